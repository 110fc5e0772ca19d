//! # Bundle Commands
//!
//! `move-bundle` and `remove-bundle` reshape the project around one bundle,
//! updating every descriptor that refers to it.

use anyhow::Result;
use clap::Args;
use std::path::PathBuf;

use pax_construct::project::{move_bundle, remove_bundle};

/// Move a bundle to another directory of the project
#[derive(Args, Debug)]
pub struct MoveBundleArgs {
    /// Current bundle directory
    #[arg(value_name = "BUNDLE")]
    pub bundle: PathBuf,

    /// New bundle directory; must not exist yet
    #[arg(value_name = "DESTINATION")]
    pub destination: PathBuf,

    /// Project root directory
    #[arg(short, long, value_name = "DIR", default_value = ".")]
    pub project: PathBuf,
}

/// Delete a bundle and every reference to it
#[derive(Args, Debug)]
pub struct RemoveBundleArgs {
    /// Bundle directory
    #[arg(value_name = "BUNDLE")]
    pub bundle: PathBuf,

    /// Project root directory
    #[arg(short, long, value_name = "DIR", default_value = ".")]
    pub project: PathBuf,
}

/// Execute the `move-bundle` command.
pub fn execute_move(args: MoveBundleArgs) -> Result<()> {
    let pom = move_bundle(&args.project, &args.bundle, &args.destination)?;
    println!("✅ Moved {} to {}", pom.id(), args.destination.display());
    Ok(())
}

/// Execute the `remove-bundle` command.
pub fn execute_remove(args: RemoveBundleArgs) -> Result<()> {
    let dependents = remove_bundle(&args.project, &args.bundle)?;
    println!(
        "✅ Removed {} ({} dependent modules updated)",
        args.bundle.display(),
        dependents
    );
    Ok(())
}
