//! # Update Plugin Command
//!
//! Shows or changes the version of a build plugin, in both
//! `build/plugins` and `build/pluginManagement`.

use anyhow::{Context, Result};
use clap::Args;
use std::path::PathBuf;

use pax_construct::pom::{ArtifactKey, Pom};

/// Change the version of a build plugin
#[derive(Args, Debug)]
pub struct UpdatePluginArgs {
    /// Plugin as groupId:artifactId
    #[arg(value_name = "KEY")]
    pub plugin: String,

    /// New version; when omitted the declared version is printed
    #[arg(value_name = "VERSION")]
    pub version: Option<String>,

    /// Project directory or descriptor file
    #[arg(short, long, value_name = "DIR", default_value = ".")]
    pub project: PathBuf,
}

/// Execute the `update-plugin` command.
pub fn execute(args: UpdatePluginArgs) -> Result<()> {
    let key: ArtifactKey = args
        .plugin
        .parse()
        .with_context(|| format!("Invalid plugin '{}'", args.plugin))?;
    let mut pom = Pom::read(&args.project)?;

    let Some(version) = args.version else {
        match pom.plugin_version(&key)? {
            Some(version) => println!("{}", version),
            None => println!("No version declared for {} in {}", key, pom.id()),
        }
        return Ok(());
    };

    if pom.update_plugin_version(&key, &version)? {
        pom.write()?;
        println!("✅ Updated {} to {} in {}", key, version, pom.id());
    } else {
        println!("Plugin {} is not declared in {}", key, pom.id());
    }
    Ok(())
}
