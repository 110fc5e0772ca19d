//! # Tree Command Implementation
//!
//! This module implements the `tree` subcommand, which displays the module
//! hierarchy of a project, one line per descriptor:
//!
//! ```text
//! org.example:root (pom)
//! └─ org.example.root:bundles (pom)
//!    ├─ org.example:api [bundle]
//!    └─ org.example:core [bundle]
//! ```
//!
//! This command is a read-only operation that does not modify any files.

use anyhow::Result;
use clap::Args;
use ptree::{print_tree, TreeItem};
use std::path::PathBuf;

use pax_construct::reactor::{module_tree, ModuleNode};

/// Display the module hierarchy
#[derive(Args, Debug)]
pub struct TreeArgs {
    /// Project root directory
    #[arg(short, long, value_name = "DIR", default_value = ".")]
    pub project: PathBuf,

    /// Maximum depth to display in the tree.
    ///
    /// If not specified, displays the full tree.
    /// Use 0 to show only the root project, 1 to show its modules, etc.
    #[arg(long, value_name = "NUM")]
    pub depth: Option<usize>,
}

/// Execute the `tree` command.
pub fn execute(args: TreeArgs) -> Result<()> {
    let modules = module_tree(&args.project).map_err(|e| {
        anyhow::anyhow!(
            "Failed to load project from {}: {}",
            args.project.display(),
            e
        )
    })?;

    let tree_root = build_tree_node(&modules, args.depth.unwrap_or(usize::MAX), 0);
    print_tree(&tree_root).map_err(|e| anyhow::anyhow!("Failed to display tree: {}", e))?;

    Ok(())
}

fn label(node: &ModuleNode) -> String {
    let pom = &node.pom;
    if pom.is_bundle_project() {
        format!("{} [bundle]", pom.id())
    } else {
        format!("{} ({})", pom.id(), pom.packaging())
    }
}

/// Build a display node from a module node
fn build_tree_node(module: &ModuleNode, max_depth: usize, current_depth: usize) -> TreeNode {
    let label = label(module);

    if current_depth >= max_depth || module.children.is_empty() {
        TreeNode {
            label,
            children: vec![],
        }
    } else {
        let children = module
            .children
            .iter()
            .map(|child| build_tree_node(child, max_depth, current_depth + 1))
            .collect();
        TreeNode { label, children }
    }
}

/// Tree node structure for ptree visualization
#[derive(Clone)]
struct TreeNode {
    label: String,
    children: Vec<TreeNode>,
}

impl TreeItem for TreeNode {
    type Child = TreeNode;

    fn write_self<W: std::io::Write>(
        &self,
        f: &mut W,
        _style: &ptree::Style,
    ) -> std::io::Result<()> {
        write!(f, "{}", self.label)
    }

    fn children(&self) -> std::borrow::Cow<'_, [Self::Child]> {
        std::borrow::Cow::Borrowed(&self.children)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pax_construct::navigator::create_module_tree;
    use pax_construct::pom::{Coordinates, Pom};
    use tempfile::TempDir;

    fn project() -> TempDir {
        let temp = TempDir::new().unwrap();
        Pom::create(temp.path(), &Coordinates::new("g", "root", "1"), "pom")
            .write()
            .unwrap();
        create_module_tree(temp.path(), &temp.path().join("a/b")).unwrap();
        temp
    }

    #[test]
    fn test_execute_missing_project() {
        let result = execute(TreeArgs {
            project: PathBuf::from("/nonexistent/project"),
            depth: None,
        });
        assert!(result
            .unwrap_err()
            .to_string()
            .contains("Failed to load project"));
    }

    #[test]
    fn test_build_tree_node_depth() {
        let temp = project();
        let modules = module_tree(temp.path()).unwrap();

        let full = build_tree_node(&modules, usize::MAX, 0);
        assert_eq!(full.label, "g:root (pom)");
        assert_eq!(full.children[0].label, "g.root:a (pom)");
        assert_eq!(full.children[0].children[0].label, "g.root.a:b (pom)");

        let shallow = build_tree_node(&modules, 1, 0);
        assert!(shallow.children[0].children.is_empty());
    }

    #[test]
    fn test_execute_prints() {
        let temp = project();
        execute(TreeArgs {
            project: temp.path().to_path_buf(),
            depth: Some(0),
        })
        .unwrap();
    }
}
