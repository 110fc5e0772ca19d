//! # Instruction Command
//!
//! Reads and edits the Bnd instructions of a bundle (`osgi.bnd`). Edits keep
//! every untouched line of the file as it was.

use anyhow::{bail, Result};
use clap::{Args, Subcommand};
use std::path::PathBuf;

use pax_construct::bnd::BndFile;
use pax_construct::config::Settings;

/// Read or edit Bnd instructions
#[derive(Args, Debug)]
pub struct InstructionArgs {
    /// Bundle directory or instruction file
    #[arg(short, long, value_name = "DIR", default_value = ".", global = true)]
    pub bundle: PathBuf,

    #[command(subcommand)]
    pub action: InstructionAction,
}

#[derive(Subcommand, Debug)]
pub enum InstructionAction {
    /// Print the value of an instruction
    Get {
        /// Instruction name, e.g. Export-Package
        key: String,
    },
    /// Set an instruction; without a value it is set empty
    Set {
        key: String,
        value: Option<String>,
        /// Replace an existing value instead of failing
        #[arg(short, long)]
        overwrite: bool,
    },
    /// Remove an instruction
    Remove { key: String },
    /// Print every instruction
    List,
}

/// Execute the `instruction` command.
pub fn execute(args: InstructionArgs, settings: &Settings) -> Result<()> {
    let mut bnd = BndFile::read(&args.bundle)?.with_wrap_width(settings.instruction_wrap_width);

    match args.action {
        InstructionAction::Get { key } => match bnd.get_instruction(&key) {
            Some(value) => println!("{}", value),
            None => bail!("Instruction {} is not set in {}", key, bnd.path().display()),
        },
        InstructionAction::Set {
            key,
            value,
            overwrite,
        } => {
            bnd.set_instruction(&key, value.as_deref(), overwrite)?;
            bnd.write()?;
            println!("✅ Set {} in {}", key, bnd.path().display());
        }
        InstructionAction::Remove { key } => {
            if bnd.remove_instruction(&key) {
                bnd.write()?;
                println!("✅ Removed {} from {}", key, bnd.path().display());
            } else {
                println!("Instruction {} is not set in {}", key, bnd.path().display());
            }
        }
        InstructionAction::List => {
            for (key, value) in bnd.instructions() {
                println!("{}: {}", key, value);
            }
        }
    }
    Ok(())
}
