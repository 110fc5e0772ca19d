//! # Module Commands
//!
//! `add-module` and `remove-module` edit the `<modules>` section of a
//! project descriptor.

use anyhow::Result;
use clap::Args;
use std::path::PathBuf;

use pax_construct::pom::Pom;

/// Add a module entry
#[derive(Args, Debug)]
pub struct AddModuleArgs {
    /// Module directory name, relative to the project
    #[arg(value_name = "NAME")]
    pub name: String,

    /// Project directory or descriptor file
    #[arg(short, long, value_name = "DIR", default_value = ".")]
    pub project: PathBuf,

    /// Replace an existing entry instead of failing
    #[arg(short, long)]
    pub overwrite: bool,
}

/// Remove a module entry
#[derive(Args, Debug)]
pub struct RemoveModuleArgs {
    /// Module directory name to remove
    #[arg(value_name = "NAME")]
    pub name: String,

    /// Project directory or descriptor file
    #[arg(short, long, value_name = "DIR", default_value = ".")]
    pub project: PathBuf,
}

/// Execute the `add-module` command.
pub fn execute_add(args: AddModuleArgs) -> Result<()> {
    let mut pom = Pom::read(&args.project)?;
    pom.add_module(&args.name, args.overwrite)?;
    pom.write()?;
    println!("✅ Added module {} to {}", args.name, pom.id());
    Ok(())
}

/// Execute the `remove-module` command.
pub fn execute_remove(args: RemoveModuleArgs) -> Result<()> {
    let mut pom = Pom::read(&args.project)?;
    if pom.remove_module(&args.name)? {
        pom.write()?;
        println!("✅ Removed module {} from {}", args.name, pom.id());
    } else {
        println!("Module {} is not declared in {}", args.name, pom.id());
    }
    Ok(())
}
