//! Command scripts that rebuild a project
//!
//! A [`PaxScript`] collects abstract tool invocations and renders them as a
//! POSIX shell script or a Windows batch file:
//!
//! ```
//! use pax_construct::script::PaxScript;
//!
//! let mut script = PaxScript::new();
//! script
//!     .call("pax-create-bundle")
//!     .option('p', "org.example.core")
//!     .maven_option("version", "1.0");
//!
//! assert_eq!(
//!     script.to_unix(),
//!     "#!/bin/sh\npax-create-bundle -p org.example.core -- -Dversion=1.0\n"
//! );
//! ```

use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};

use log::debug;
use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

const UNIX_HEADER: &str = "#!/bin/sh";
const WINDOWS_HEADER: &str = "@echo off";

/// Script dialect
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ScriptFlavor {
    Unix,
    Windows,
}

impl Default for ScriptFlavor {
    fn default() -> Self {
        if cfg!(windows) {
            ScriptFlavor::Windows
        } else {
            ScriptFlavor::Unix
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
enum Argument {
    Flag(char),
    Option(char, String),
}

/// One tool invocation
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PaxCommand {
    name: String,
    arguments: Vec<Argument>,
    maven_options: Vec<(String, String)>,
    target_dir: Option<PathBuf>,
}

impl PaxCommand {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            arguments: Vec::new(),
            maven_options: Vec::new(),
            target_dir: None,
        }
    }

    /// Add a short flag, rendered `-x`
    pub fn flag(&mut self, flag: char) -> &mut Self {
        self.arguments.push(Argument::Flag(flag));
        self
    }

    /// Add a short option, rendered `-o value`
    pub fn option(&mut self, option: char, value: impl Into<String>) -> &mut Self {
        self.arguments.push(Argument::Option(option, value.into()));
        self
    }

    /// Add a build property, rendered `-Dname=value` after `--`
    pub fn maven_option(&mut self, name: impl Into<String>, value: impl Into<String>) -> &mut Self {
        self.maven_options.push((name.into(), value.into()));
        self
    }

    /// Directory the command creates or works in; used for ordering
    pub fn target_dir(&mut self, dir: impl Into<PathBuf>) -> &mut Self {
        self.target_dir = Some(dir.into());
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn get_target_dir(&self) -> Option<&Path> {
        self.target_dir.as_deref()
    }
}

/// Characters either shell passes through without quoting
fn is_plain(c: char) -> bool {
    c.is_ascii_alphanumeric() || matches!(c, '-' | '_' | '.' | '/' | ':' | '@' | '+' | ',' | '=')
}

/// Quote a value for the given shell; plain values are left alone
fn quote(value: &str, flavor: ScriptFlavor) -> String {
    if !value.is_empty() && value.chars().all(is_plain) {
        return value.to_string();
    }
    match flavor {
        ScriptFlavor::Unix => format!("'{}'", value.replace('\'', r"'\''")),
        ScriptFlavor::Windows => {
            format!("\"{}\"", value.replace('%', "%%").replace('"', "\"\""))
        }
    }
}

impl PaxCommand {
    /// Render the invocation as one line of the given script dialect
    pub fn render(&self, flavor: ScriptFlavor) -> String {
        let mut line = self.name.clone();
        for argument in &self.arguments {
            match argument {
                Argument::Flag(flag) => line.push_str(&format!(" -{}", flag)),
                Argument::Option(option, value) => {
                    line.push_str(&format!(" -{} {}", option, quote(value, flavor)))
                }
            }
        }

        let target = self
            .target_dir
            .as_ref()
            .map(|dir| ("targetDirectory".to_string(), dir.display().to_string()));
        let mut properties = self.maven_options.iter().chain(target.as_ref()).peekable();
        if properties.peek().is_some() {
            line.push_str(" --");
            for (name, value) in properties {
                line.push_str(&format!(" -D{}={}", name, quote(value, flavor)));
            }
        }
        line
    }
}

impl fmt::Display for PaxCommand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.render(ScriptFlavor::Unix))
    }
}

/// An ordered collection of commands
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PaxScript {
    commands: Vec<PaxCommand>,
}

impl PaxScript {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start a new command and return it for configuration
    pub fn call(&mut self, name: impl Into<String>) -> &mut PaxCommand {
        self.commands.push(PaxCommand::new(name));
        let last = self.commands.len() - 1;
        &mut self.commands[last]
    }

    pub fn is_empty(&self) -> bool {
        self.commands.is_empty()
    }

    pub fn len(&self) -> usize {
        self.commands.len()
    }

    /// Commands in execution order: no target first, then parents before children
    pub fn commands(&self) -> Vec<&PaxCommand> {
        let mut sorted: Vec<&PaxCommand> = self.commands.iter().collect();
        sorted.sort_by(|a, b| a.target_dir.cmp(&b.target_dir));
        sorted
    }

    pub fn to_unix(&self) -> String {
        let mut out = String::from(UNIX_HEADER);
        out.push('\n');
        for command in self.commands() {
            out.push_str(&command.render(ScriptFlavor::Unix));
            out.push('\n');
        }
        out
    }

    pub fn to_windows(&self) -> String {
        let mut out = String::from(WINDOWS_HEADER);
        out.push_str("\r\n");
        for command in self.commands() {
            out.push_str("call ");
            out.push_str(&command.render(ScriptFlavor::Windows));
            out.push_str("\r\n");
        }
        out
    }

    pub fn render(&self, flavor: ScriptFlavor) -> String {
        match flavor {
            ScriptFlavor::Unix => self.to_unix(),
            ScriptFlavor::Windows => self.to_windows(),
        }
    }

    /// Save the script; Unix scripts are made executable
    pub fn write(&self, path: &Path, flavor: ScriptFlavor) -> Result<()> {
        fs::write(path, self.render(flavor)).map_err(|e| Error::document(path, "write", e))?;

        if flavor == ScriptFlavor::Unix {
            make_executable(path)?;
        }

        debug!("Wrote {} commands to {}", self.len(), path.display());
        Ok(())
    }
}

#[cfg(unix)]
fn make_executable(path: &Path) -> Result<()> {
    use std::os::unix::fs::PermissionsExt;
    fs::set_permissions(path, fs::Permissions::from_mode(0o755))
        .map_err(|e| Error::document(path, "chmod", e))
}

#[cfg(not(unix))]
fn make_executable(_path: &Path) -> Result<()> {
    Ok(())
}
