//! # Set Parent Command
//!
//! Links a project descriptor to a parent project. The parent is given
//! either as coordinates or as the directory holding its descriptor.

use anyhow::{bail, Result};
use clap::Args;
use std::path::PathBuf;

use pax_construct::pom::{Coordinates, Pom};

/// Link a descriptor to a parent project
#[derive(Args, Debug)]
pub struct SetParentArgs {
    /// Parent as groupId:artifactId:version
    #[arg(value_name = "COORDINATES", required_unless_present = "parent_dir")]
    pub coordinates: Option<String>,

    /// Read the parent coordinates from this project directory instead
    #[arg(long, value_name = "DIR", conflicts_with = "coordinates")]
    pub parent_dir: Option<PathBuf>,

    /// Project directory or descriptor file
    #[arg(short, long, value_name = "DIR", default_value = ".")]
    pub project: PathBuf,

    /// Value of the parent's relativePath element
    #[arg(long, value_name = "PATH")]
    pub relative_path: Option<String>,

    /// Replace an existing parent link instead of failing
    #[arg(short, long)]
    pub overwrite: bool,
}

fn parse_coordinates(text: &str) -> Result<Coordinates> {
    match text.split(':').collect::<Vec<_>>().as_slice() {
        [group, artifact, version]
            if !group.is_empty() && !artifact.is_empty() && !version.is_empty() =>
        {
            Ok(Coordinates::new(*group, *artifact, *version))
        }
        _ => bail!(
            "Invalid parent '{}': expected groupId:artifactId:version",
            text
        ),
    }
}

/// Execute the `set-parent` command.
pub fn execute(args: SetParentArgs) -> Result<()> {
    let parent = match (&args.coordinates, &args.parent_dir) {
        (Some(text), _) => parse_coordinates(text)?,
        (None, Some(dir)) => Pom::read(dir)?.coordinates(),
        (None, None) => bail!("Either parent coordinates or --parent-dir is required"),
    };

    let mut pom = Pom::read(&args.project)?;
    pom.set_parent(&parent, args.relative_path.as_deref(), args.overwrite)?;
    pom.write()?;

    println!("✅ Set parent of {} to {}", pom.id(), parent);
    Ok(())
}
