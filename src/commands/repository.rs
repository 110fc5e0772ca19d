//! # Add Repository Command
//!
//! Declares an artifact repository in a project descriptor. The URL is
//! validated before anything is written.

use anyhow::Result;
use clap::Args;
use std::path::PathBuf;

use pax_construct::pom::{Pom, Repository};

/// Add a repository or plugin repository
#[derive(Args, Debug)]
pub struct AddRepositoryArgs {
    /// Repository id
    #[arg(value_name = "ID")]
    pub id: String,

    /// Repository URL
    #[arg(value_name = "URL")]
    pub url: String,

    /// Project directory or descriptor file
    #[arg(short, long, value_name = "DIR", default_value = ".")]
    pub project: PathBuf,

    /// Enable snapshot artifacts
    #[arg(long)]
    pub snapshots: bool,

    /// Disable release artifacts
    #[arg(long)]
    pub no_releases: bool,

    /// Declare a plugin repository instead
    #[arg(long)]
    pub plugin: bool,

    /// Replace an entry with the same id or URL instead of failing
    #[arg(short, long)]
    pub overwrite: bool,
}

/// Execute the `add-repository` command.
pub fn execute(args: AddRepositoryArgs) -> Result<()> {
    let repository = Repository::new(args.id, &args.url)?
        .with_snapshots(args.snapshots)
        .with_releases(!args.no_releases);

    let mut pom = Pom::read(&args.project)?;
    pom.add_repository(&repository, args.plugin, args.overwrite)?;
    pom.write()?;

    println!(
        "✅ Added {} {} ({}) to {}",
        if args.plugin { "plugin repository" } else { "repository" },
        repository.id,
        repository.url,
        pom.id()
    );
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use pax_construct::pom::Coordinates;
    use tempfile::TempDir;

    fn args(temp: &TempDir, url: &str) -> AddRepositoryArgs {
        AddRepositoryArgs {
            id: "ops4j".to_string(),
            url: url.to_string(),
            project: temp.path().to_path_buf(),
            snapshots: true,
            no_releases: false,
            plugin: false,
            overwrite: false,
        }
    }

    #[test]
    fn test_add_repository() {
        let temp = TempDir::new().unwrap();
        Pom::create(temp.path(), &Coordinates::new("g", "root", "1"), "pom")
            .write()
            .unwrap();

        execute(args(&temp, "http://repository.ops4j.org/maven2")).unwrap();
        let repositories = Pom::read(temp.path()).unwrap().repositories(false);
        assert_eq!(repositories.len(), 1);
        assert!(repositories[0].snapshots);

        assert!(execute(args(&temp, "http://repository.ops4j.org/maven2")).is_err());
        assert!(execute(args(&temp, "::not a url")).is_err());
    }
}
