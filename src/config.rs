//! Converter configuration loaded from `~/.config/snipdown/config.toml`.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::Deserialize;

use crate::error::ConvertError;
use crate::options::Options;
use crate::rules::code_snippet;
use crate::Converter;

/// Which bundled rules to install.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct RuleToggles {
    pub code_snippet: bool,
}

impl Default for RuleToggles {
    fn default() -> Self {
        Self { code_snippet: true }
    }
}

/// Top-level configuration file.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct Config {
    pub options: Options,
    pub rules: RuleToggles,
}

impl Config {
    /// Parse a configuration document.
    ///
    /// # Errors
    ///
    /// Returns [`ConvertError::Config`] on malformed TOML or unknown style names.
    pub fn from_toml_str(content: &str) -> crate::Result<Self> {
        toml::from_str(content).map_err(ConvertError::from)
    }

    /// Build a converter with these options and the enabled rules installed.
    pub fn converter(&self) -> Converter {
        let mut converter = Converter::with_options(self.options.clone());
        if self.rules.code_snippet {
            converter.use_plugin(code_snippet::install);
        }
        converter
    }
}

/// Load the configuration from `path`, or from the default location.
///
/// A missing default file yields [`Config::default`]; an explicitly given
/// path must exist.
///
/// # Errors
///
/// Returns an error if the file cannot be read or is not valid TOML.
pub fn load_config(path: Option<&Path>) -> Result<Config> {
    let path = match path {
        Some(p) => p.to_path_buf(),
        None => {
            let default = config_path();
            if !default.exists() {
                return Ok(Config::default());
            }
            default
        }
    };

    let content = std::fs::read_to_string(&path)
        .with_context(|| format!("failed to read {}", path.display()))?;

    Config::from_toml_str(&content).with_context(|| format!("invalid TOML in {}", path.display()))
}

/// Return the path to the default config file.
pub fn config_path() -> PathBuf {
    dirs::config_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("snipdown")
        .join("config.toml")
}
