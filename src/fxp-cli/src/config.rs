//! Configuration management for fxp2aupreset
//!
//! The config file holds defaults for the Audio Unit metadata, so a plugin's
//! codes don't have to be repeated on every run:
//!
//! ```toml
//! type = "aumu"
//! subtype = "Lead"
//! manufacturer = "Acme"
//! state_key = "jucePluginState"
//! ```

use anyhow::{bail, Context, Result};
use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};

#[derive(Debug, Deserialize, Default, PartialEq, Eq)]
#[serde(deny_unknown_fields)]
pub struct Config {
    #[serde(rename = "type")]
    pub au_type: Option<String>,
    pub subtype: Option<String>,
    pub manufacturer: Option<String>,
    pub state_key: Option<String>,
}

impl Config {
    /// Get the path to the default config file
    pub fn config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join("fxp2aupreset").join("config.toml"))
    }

    /// Load the given config file, or the default one if it exists
    ///
    /// An explicitly named file must exist; a missing default file yields an
    /// empty config.
    pub fn load(explicit: Option<&Path>) -> Result<Self> {
        let config_path = match explicit {
            Some(path) => {
                if !path.exists() {
                    bail!("Config file {} does not exist", path.display());
                }
                path.to_path_buf()
            }
            None => match Self::config_path() {
                Some(path) if path.exists() => path,
                _ => return Ok(Config::default()),
            },
        };

        let contents = fs::read_to_string(&config_path)
            .with_context(|| format!("Failed to read config from {}", config_path.display()))?;

        toml::from_str(&contents)
            .with_context(|| format!("Failed to parse config file {}", config_path.display()))
    }
}
