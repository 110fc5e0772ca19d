//! # Mkdirs Command
//!
//! Creates the aggregator descriptors needed to reach a directory from the
//! project, linking each one into its parent. Running it again changes
//! nothing.

use anyhow::Result;
use clap::Args;
use std::path::PathBuf;

use pax_construct::navigator::create_module_tree;

/// Create the module descriptors leading down to a directory
#[derive(Args, Debug)]
pub struct MkdirsArgs {
    /// Directory that should become a module
    #[arg(value_name = "TARGET")]
    pub target: PathBuf,

    /// Directory inside the project to start from
    #[arg(short, long, value_name = "DIR", default_value = ".")]
    pub project: PathBuf,
}

/// Execute the `mkdirs` command.
pub fn execute(args: MkdirsArgs) -> Result<()> {
    let pom = create_module_tree(&args.project, &args.target)?;
    println!("✅ {} is module {}", args.target.display(), pom.id());
    Ok(())
}
