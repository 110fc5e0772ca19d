//! CLI argument parsing and command dispatch

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};

use pax_construct::config::Settings;
use pax_construct::defaults::DEFAULT_SETTINGS_FILENAME;

use crate::commands;

/// pax-construct - Scaffold and edit multi-module OSGi bundle projects
#[derive(Parser, Debug)]
#[command(name = "pax-construct")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Subcommand to execute
    #[command(subcommand)]
    command: Commands,

    /// Set log level (error, warn, info, debug, trace)
    #[arg(long, global = true, value_name = "LEVEL", default_value = "info")]
    log_level: String,

    /// Path to the settings file
    #[arg(
        long,
        global = true,
        value_name = "FILE",
        default_value = DEFAULT_SETTINGS_FILENAME,
        env = "PAX_CONSTRUCT_SETTINGS"
    )]
    settings: PathBuf,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Add a module entry to a project descriptor
    AddModule(commands::module::AddModuleArgs),
    /// Remove a module entry from a project descriptor
    RemoveModule(commands::module::RemoveModuleArgs),
    /// Add a dependency (and optional exclusions) to a project descriptor
    AddDependency(commands::dependency::AddDependencyArgs),
    /// Remove a dependency, or one of its exclusions
    RemoveDependency(commands::dependency::RemoveDependencyArgs),
    /// Change the groupId of a dependency
    UpdateDependencyGroup(commands::dependency::UpdateGroupArgs),
    /// Add a repository or plugin repository
    AddRepository(commands::repository::AddRepositoryArgs),
    /// Link a project descriptor to a parent project
    SetParent(commands::parent::SetParentArgs),
    /// Change the version of a build plugin
    UpdatePlugin(commands::plugin::UpdatePluginArgs),
    /// Read or edit Bnd instructions
    Instruction(commands::instruction::InstructionArgs),
    /// Layer a customized project over a generated one
    Overlay(commands::overlay::OverlayArgs),
    /// Create the module descriptors leading down to a directory
    Mkdirs(commands::mkdirs::MkdirsArgs),
    /// Move a bundle to another directory of the project
    MoveBundle(commands::bundle::MoveBundleArgs),
    /// Delete a bundle and every reference to it
    RemoveBundle(commands::bundle::RemoveBundleArgs),
    /// Write a script that recreates the project layout
    Clone(commands::clone::CloneArgs),
    /// Display the module hierarchy
    Tree(commands::tree::TreeArgs),
}

impl Cli {
    /// Execute the CLI command
    pub fn execute(self) -> Result<()> {
        init_logging(&self.log_level);
        let settings = Settings::load(&self.settings)
            .with_context(|| format!("Failed to load settings from {}", self.settings.display()))?;

        match self.command {
            Commands::AddModule(args) => commands::module::execute_add(args),
            Commands::RemoveModule(args) => commands::module::execute_remove(args),
            Commands::AddDependency(args) => commands::dependency::execute_add(args),
            Commands::RemoveDependency(args) => commands::dependency::execute_remove(args),
            Commands::UpdateDependencyGroup(args) => {
                commands::dependency::execute_update_group(args)
            }
            Commands::AddRepository(args) => commands::repository::execute(args),
            Commands::SetParent(args) => commands::parent::execute(args),
            Commands::UpdatePlugin(args) => commands::plugin::execute(args),
            Commands::Instruction(args) => commands::instruction::execute(args, &settings),
            Commands::Overlay(args) => commands::overlay::execute(args, &settings),
            Commands::Mkdirs(args) => commands::mkdirs::execute(args),
            Commands::MoveBundle(args) => commands::bundle::execute_move(args),
            Commands::RemoveBundle(args) => commands::bundle::execute_remove(args),
            Commands::Clone(args) => commands::clone::execute(args, &settings),
            Commands::Tree(args) => commands::tree::execute(args),
        }
    }
}

/// Route `log` output to stderr at the requested level
fn init_logging(level: &str) {
    // a logger may already be installed in this process
    let _ = env_logger::Builder::new()
        .parse_filters(level)
        .format_timestamp(None)
        .try_init();
}
