//! # Settings File
//!
//! Optional `.pax-construct.yaml` tuning how the editors behave:
//!
//! ```yaml
//! # build plugins that keep their template configuration on overlay
//! toolchain-plugins:
//!   - org.apache.felix:maven-bundle-plugin
//!   - org.ops4j:maven-pax-plugin
//! # wrap regenerated instructions longer than this
//! instruction-wrap-width: 100
//! # unix or windows
//! script-flavor: unix
//! ```
//!
//! Every key is optional. A missing file means all defaults.

use std::path::Path;

use log::debug;
use serde::{Deserialize, Serialize};

use crate::defaults::{DEFAULT_TOOLCHAIN_PLUGINS, DEFAULT_WRAP_WIDTH};
use crate::error::{Error, Result};
use crate::pom::ArtifactKey;
use crate::script::ScriptFlavor;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case", deny_unknown_fields)]
pub struct Settings {
    /// `groupId:artifactId` of plugins preserved by descriptor overlays
    #[serde(default = "default_toolchain_plugins")]
    pub toolchain_plugins: Vec<String>,

    #[serde(default = "default_wrap_width")]
    pub instruction_wrap_width: usize,

    #[serde(default)]
    pub script_flavor: ScriptFlavor,
}

fn default_toolchain_plugins() -> Vec<String> {
    DEFAULT_TOOLCHAIN_PLUGINS
        .iter()
        .map(|(group, artifact)| format!("{}:{}", group, artifact))
        .collect()
}

fn default_wrap_width() -> usize {
    DEFAULT_WRAP_WIDTH
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            toolchain_plugins: default_toolchain_plugins(),
            instruction_wrap_width: default_wrap_width(),
            script_flavor: ScriptFlavor::default(),
        }
    }
}

impl Settings {
    /// Parse settings from YAML text
    pub fn parse(yaml_content: &str) -> Result<Self> {
        if yaml_content.trim().is_empty() {
            return Ok(Self::default());
        }
        let settings: Settings =
            serde_yaml::from_str(yaml_content).map_err(|e| Error::ConfigParse {
                message: e.to_string(),
                hint: Some(
                    "known keys are toolchain-plugins, instruction-wrap-width and script-flavor"
                        .to_string(),
                ),
            })?;
        if settings.instruction_wrap_width == 0 {
            return Err(Error::ConfigParse {
                message: "instruction-wrap-width must be positive".to_string(),
                hint: None,
            });
        }
        settings.toolchain_keys()?;
        Ok(settings)
    }

    /// Load settings from `path`; a missing file yields the defaults
    pub fn load(path: &Path) -> Result<Self> {
        if !path.exists() {
            debug!("No settings file at {}, using defaults", path.display());
            return Ok(Self::default());
        }
        let content =
            std::fs::read_to_string(path).map_err(|e| Error::document(path, "read", e))?;
        debug!("Loaded settings from {}", path.display());
        Self::parse(&content)
    }

    /// Toolchain plugins as artifact keys
    pub fn toolchain_keys(&self) -> Result<Vec<ArtifactKey>> {
        self.toolchain_plugins.iter().map(|p| p.parse()).collect()
    }
}
