//! # Dependency Commands
//!
//! `add-dependency` and `remove-dependency` edit the `<dependencies>` section
//! of a project descriptor, including per-dependency exclusions.
//! `update-dependency-group` renames the groupId of a dependency wherever it
//! is declared or managed.

use anyhow::{Context, Result};
use clap::Args;
use std::path::PathBuf;

use pax_construct::pom::{ArtifactKey, Dependency, Pom};

/// Add a dependency
#[derive(Args, Debug)]
pub struct AddDependencyArgs {
    /// Dependency as groupId:artifactId[:version[:scope]]
    #[arg(value_name = "COORDINATES")]
    pub dependency: String,

    /// Project directory or descriptor file
    #[arg(short, long, value_name = "DIR", default_value = ".")]
    pub project: PathBuf,

    /// Dependency type, e.g. `pom` or `test-jar`
    #[arg(long = "type", value_name = "TYPE")]
    pub kind: Option<String>,

    /// Mark the dependency optional
    #[arg(long)]
    pub optional: bool,

    /// Exclude a transitive dependency (groupId:artifactId); repeatable
    #[arg(short = 'x', long = "exclude", value_name = "KEY")]
    pub exclusions: Vec<String>,

    /// Replace an existing entry instead of failing
    #[arg(short, long)]
    pub overwrite: bool,
}

/// Remove a dependency, or only one of its exclusions
#[derive(Args, Debug)]
pub struct RemoveDependencyArgs {
    /// Dependency as groupId:artifactId
    #[arg(value_name = "KEY")]
    pub dependency: String,

    /// Project directory or descriptor file
    #[arg(short, long, value_name = "DIR", default_value = ".")]
    pub project: PathBuf,

    /// Remove this exclusion (groupId:artifactId) and keep the dependency
    #[arg(short = 'x', long = "exclusion", value_name = "KEY")]
    pub exclusion: Option<String>,
}

/// Change the groupId of a dependency
#[derive(Args, Debug)]
pub struct UpdateGroupArgs {
    /// Dependency as groupId:artifactId
    #[arg(value_name = "KEY")]
    pub dependency: String,

    /// New groupId
    #[arg(value_name = "GROUP")]
    pub group: String,

    /// Project directory or descriptor file
    #[arg(short, long, value_name = "DIR", default_value = ".")]
    pub project: PathBuf,
}

fn parse_key(text: &str) -> Result<ArtifactKey> {
    text.parse::<ArtifactKey>()
        .with_context(|| format!("Invalid artifact key '{}'", text))
}

/// Execute the `add-dependency` command.
pub fn execute_add(args: AddDependencyArgs) -> Result<()> {
    let mut dependency: Dependency = args.dependency.parse()?;
    if let Some(kind) = args.kind {
        dependency = dependency.with_type(kind);
    }
    dependency = dependency.optional(args.optional);
    let exclusions = args
        .exclusions
        .iter()
        .map(|e| parse_key(e))
        .collect::<Result<Vec<_>>>()?;

    let mut pom = Pom::read(&args.project)?;
    pom.add_dependency(&dependency, args.overwrite)?;
    for exclusion in &exclusions {
        pom.add_exclusion(&dependency.key(), exclusion, args.overwrite)?;
    }
    pom.write()?;

    println!("✅ Added dependency {} to {}", dependency.key(), pom.id());
    Ok(())
}

/// Execute the `remove-dependency` command.
pub fn execute_remove(args: RemoveDependencyArgs) -> Result<()> {
    let key = parse_key(&args.dependency)?;
    let mut pom = Pom::read(&args.project)?;

    let (removed, what) = match &args.exclusion {
        Some(exclusion) => {
            let exclusion = parse_key(exclusion)?;
            (
                pom.remove_exclusion(&key, &exclusion)?,
                format!("exclusion {} on {}", exclusion, key),
            )
        }
        None => (pom.remove_dependency(&key)?, format!("dependency {}", key)),
    };

    if removed {
        pom.write()?;
        println!("✅ Removed {} from {}", what, pom.id());
    } else {
        println!("No {} in {}", what, pom.id());
    }
    Ok(())
}

/// Execute the `update-dependency-group` command.
pub fn execute_update_group(args: UpdateGroupArgs) -> Result<()> {
    let key = parse_key(&args.dependency)?;
    let mut pom = Pom::read(&args.project)?;
    if pom.update_dependency_group(&key, &args.group)? {
        pom.write()?;
        println!("✅ Moved {} to group {} in {}", key, args.group, pom.id());
    } else {
        println!("No dependency {} in {}", key, pom.id());
    }
    Ok(())
}
