//! Walking a multi-module project
//!
//! Starting from a root descriptor, modules are visited depth first in the
//! order their parents declare them. A descriptor reachable through more than
//! one path is visited once, and module entries without a descriptor on disk
//! are skipped with a warning.

use std::collections::HashSet;
use std::path::{Path, PathBuf};

use log::warn;

use crate::error::Result;
use crate::path::absolute;
use crate::pom::{pom_file, Pom};

/// A descriptor together with its position in the module tree
#[derive(Debug, Clone)]
pub struct ModuleNode {
    pub pom: Pom,
    pub children: Vec<ModuleNode>,
}

impl ModuleNode {
    /// Pre-order iteration over this node and everything below it
    pub fn flatten(&self) -> Vec<&Pom> {
        let mut result = vec![&self.pom];
        for child in &self.children {
            result.extend(child.flatten());
        }
        result
    }
}

/// Load the module tree below `root`
pub fn module_tree(root: &Path) -> Result<ModuleNode> {
    let mut visited = HashSet::new();
    load(&pom_file(root), &mut visited)
}

/// Every descriptor of the project, parents before their modules
pub fn collect_modules(root: &Path) -> Result<Vec<Pom>> {
    let tree = module_tree(root)?;
    Ok(tree.flatten().into_iter().cloned().collect())
}

fn load(path: &Path, visited: &mut HashSet<PathBuf>) -> Result<ModuleNode> {
    visited.insert(absolute(path)?);
    let pom = Pom::read(path)?;

    let mut children = Vec::new();
    for module in pom.modules() {
        let module_path = pom.module_pom_path(&module);
        if !module_path.is_file() {
            warn!("{} lists module {} without a descriptor", pom.id(), module);
            continue;
        }
        if visited.contains(&absolute(&module_path)?) {
            continue;
        }
        children.push(load(&module_path, visited)?);
    }

    Ok(ModuleNode { pom, children })
}
