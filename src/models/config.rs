//! Configuration model.

use crate::naming::NamingStyle;
use crate::Result;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Application configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Naming configuration.
    pub naming: NamingConfig,
    /// Folder names that mark special content (matched case-insensitively
    /// against path components).
    pub special_folders: Vec<String>,
    /// Explicit debug flag, threaded through constructors instead of any
    /// ambient global state.
    pub debug: bool,
}

/// Naming configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct NamingConfig {
    /// Filename style for rendered episode names.
    pub style: NamingStyle,
    /// Route renamed files into "Season NN" / "Specials" subfolders of the
    /// library root instead of renaming in place.
    pub season_folders: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            naming: NamingConfig::default(),
            special_folders: default_special_folders(),
            debug: false,
        }
    }
}

impl Default for NamingConfig {
    fn default() -> Self {
        Self {
            style: NamingStyle::Dashed,
            season_folders: false,
        }
    }
}

fn default_special_folders() -> Vec<String> {
    ["OVA", "OAD", "Special", "Specials", "Extra", "Extras", "Movie", "Movies"]
        .iter()
        .map(|s| s.to_string())
        .collect()
}

/// Default config file location under the user config directory.
pub fn config_path() -> PathBuf {
    dirs::config_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("episode-renamer")
        .join("config.toml")
}

impl Config {
    /// Load configuration from a TOML file, or defaults if it is absent.
    pub fn load(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }
        let content = std::fs::read_to_string(path)?;
        toml::from_str(&content).map_err(|e| crate::Error::other(format!(
            "Invalid config file {}: {}",
            path.display(),
            e
        )))
    }

    /// Load from the default location.
    pub fn load_default() -> Result<Self> {
        Self::load(&config_path())
    }
}
