// TOML config adapter - Configuration files in TOML

use std::path::{Path, PathBuf};

use serde::Deserialize;

use crate::config_initialization::ConfigOverrides;
use crate::error::{StitchError, StitchResult};

/// Name of the config file looked up in the working directory
pub const DEFAULT_CONFIG_FILE: &str = "stitchx.toml";

#[derive(Debug, Default, Deserialize)]
struct ConfigDocument {
    #[serde(default)]
    stitchx: ConfigOverrides,
}

/// TOML configuration adapter
pub struct TomlConfigAdapter;

impl TomlConfigAdapter {
    /// Default config file path
    pub fn default_config_path() -> PathBuf {
        PathBuf::from(DEFAULT_CONFIG_FILE)
    }

    /// Parse the `[stitchx]` table of a TOML document
    pub fn parse(toml_content: &str) -> StitchResult<ConfigOverrides> {
        let document: ConfigDocument = toml::from_str(toml_content).map_err(|e| StitchError::Config {
            message: format!("Failed to parse TOML config: {}", e),
        })?;
        Ok(document.stitchx)
    }

    /// Read and parse a config file
    pub fn load(file_path: &Path) -> StitchResult<ConfigOverrides> {
        if !file_path.exists() {
            return Err(StitchError::Config {
                message: format!("Config file does not exist: {}", file_path.display()),
            });
        }

        let content = std::fs::read_to_string(file_path).map_err(|e| StitchError::Config {
            message: format!("Failed to read config file {}: {}", file_path.display(), e),
        })?;

        Self::parse(&content)
    }
}
