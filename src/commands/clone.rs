//! # Clone Command
//!
//! Writes a script of tool invocations that recreates the layout of an
//! existing project: the project itself, its repositories, every bundle and
//! the imports between bundles.

use anyhow::Result;
use clap::Args;
use std::path::PathBuf;

use pax_construct::config::Settings;
use pax_construct::context::RunContext;
use pax_construct::project::clone_project;
use pax_construct::script::ScriptFlavor;

/// Write a script that recreates the project layout
#[derive(Args, Debug)]
pub struct CloneArgs {
    /// Project root directory
    #[arg(short, long, value_name = "DIR", default_value = ".")]
    pub project: PathBuf,

    /// Script file to write; printed to stdout when omitted
    #[arg(short, long, value_name = "FILE")]
    pub output: Option<PathBuf>,

    /// Script dialect, overriding the settings file
    #[arg(long, value_enum)]
    pub flavor: Option<FlavorArg>,
}

#[derive(clap::ValueEnum, Clone, Copy, Debug)]
pub enum FlavorArg {
    Unix,
    Windows,
}

impl From<FlavorArg> for ScriptFlavor {
    fn from(flavor: FlavorArg) -> Self {
        match flavor {
            FlavorArg::Unix => ScriptFlavor::Unix,
            FlavorArg::Windows => ScriptFlavor::Windows,
        }
    }
}

/// Execute the `clone` command.
pub fn execute(args: CloneArgs, settings: &Settings) -> Result<()> {
    let flavor = args.flavor.map_or(settings.script_flavor, ScriptFlavor::from);
    let mut context = RunContext::new();
    let script = clone_project(&args.project, &mut context)?;

    match args.output {
        Some(path) => {
            script.write(&path, flavor)?;
            println!(
                "✅ Wrote {} commands ({} bundles) to {}",
                script.len(),
                context.bundles().len(),
                path.display()
            );
        }
        None => print!("{}", script.render(flavor)),
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use pax_construct::pom::{Coordinates, Pom};
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn test_clone_to_windows_script() {
        let temp = TempDir::new().unwrap();
        Pom::create(temp.path(), &Coordinates::new("g", "root", "1"), "pom")
            .write()
            .unwrap();
        let output = temp.path().join("rebuild.bat");

        execute(
            CloneArgs {
                project: temp.path().to_path_buf(),
                output: Some(output.clone()),
                flavor: Some(FlavorArg::Windows),
            },
            &Settings::default(),
        )
        .unwrap();

        assert_eq!(
            fs::read_to_string(&output).unwrap(),
            "@echo off\r\ncall pax-create-project -g g -a root -v 1\r\n"
        );
    }
}
