//! # pax-construct CLI
//!
//! This is the binary entry point for the `pax-construct` command-line tool.
//!
//! Its primary responsibilities are:
//! - Parsing command-line arguments using `clap`.
//! - Initialising logging and loading the optional settings file.
//! - Executing the appropriate command and reporting errors.
//!
//! The editing logic lives in the `pax_construct` library crate; the binary is
//! a thin wrapper around it.

mod cli;
mod commands;

use anyhow::Result;
use clap::Parser;

fn main() -> Result<()> {
    let cli = cli::Cli::parse();
    cli.execute()
}
