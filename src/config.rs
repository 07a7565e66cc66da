//! TOML configuration
//!
//! A small optional file (`custodian.toml`); a missing file means
//! defaults, a present-but-invalid file is an error worth surfacing.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

/// User configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct Config {
    /// Where collection documents live; platform data dir when unset
    pub data_dir: Option<PathBuf>,
    /// Organization name stamped into generated reports
    pub organization: Option<String>,
}

impl Config {
    /// Load from `path`, defaulting when the file does not exist
    pub fn load(path: &Path) -> Result<Config, ConfigError> {
        if !path.exists() {
            return Ok(Config::default());
        }
        let content = std::fs::read_to_string(path)?;
        Ok(toml::from_str(&content)?)
    }

    /// Conventional config location (`<config dir>/custodian/custodian.toml`)
    pub fn default_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join("custodian").join("custodian.toml"))
    }
}
