//! Configuration loading for org-atlas.
//!
//! Layered precedence: built-in defaults -> config file
//! (~/.config/org-atlas/config.toml) -> CLI-specified file -> environment
//! variables (ATLAS_*). CLI flags are applied by the caller on top.

use config::{Config, Environment, File};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use crate::error::AtlasError;

/// Main application settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Settings {
    /// Default GitHub organization to fetch
    #[serde(default)]
    pub org: Option<String>,

    /// Directory holding snapshot and hierarchy JSON files
    #[serde(default = "default_data_dir")]
    pub data_dir: String,

    /// Log level (trace, debug, info, warn, error)
    #[serde(default = "default_log_level")]
    pub log_level: String,

    /// Include forked repositories when fetching
    #[serde(default)]
    pub include_forks: bool,

    /// Include archived repositories when fetching
    #[serde(default)]
    pub include_archived: bool,
}

fn default_data_dir() -> String {
    ProjectDirs::from("", "", "org-atlas")
        .map(|p| p.data_local_dir().to_path_buf())
        .unwrap_or_else(|| PathBuf::from("./data"))
        .to_string_lossy()
        .to_string()
}

fn default_log_level() -> String {
    "info".to_string()
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            org: None,
            data_dir: default_data_dir(),
            log_level: default_log_level(),
            include_forks: false,
            include_archived: false,
        }
    }
}

impl Settings {
    /// Load settings with layered precedence:
    /// 1. Built-in defaults
    /// 2. Config file (~/.config/org-atlas/config.toml)
    /// 3. CLI-specified config file (optional)
    /// 4. Environment variables (ATLAS_*)
    ///
    /// CLI flags should be applied by the caller after this returns.
    pub fn load(cli_config_path: Option<&str>) -> Result<Self, AtlasError> {
        let config_dir = ProjectDirs::from("", "", "org-atlas")
            .map(|p| p.config_dir().to_path_buf())
            .unwrap_or_else(|| PathBuf::from("."));

        let default_config_path = config_dir.join("config");

        let mut builder = Config::builder()
            .set_default("data_dir", default_data_dir())
            .map_err(|e| AtlasError::Config(e.to_string()))?
            .set_default("log_level", default_log_level())
            .map_err(|e| AtlasError::Config(e.to_string()))?
            .add_source(File::with_name(&default_config_path.to_string_lossy()).required(false));

        if let Some(path) = cli_config_path {
            builder = builder.add_source(File::with_name(path).required(true));
        }

        // Format: ATLAS_ORG, ATLAS_DATA_DIR, ATLAS_LOG_LEVEL, etc.
        // The prefix separator must stay a single underscore; without it
        // the key separator below would apply and only ATLAS__* names
        // would be read.
        builder = builder.add_source(
            Environment::with_prefix("ATLAS")
                .prefix_separator("_")
                .separator("__")
                .try_parsing(true),
        );

        let config = builder
            .build()
            .map_err(|e| AtlasError::Config(e.to_string()))?;

        config
            .try_deserialize()
            .map_err(|e| AtlasError::Config(e.to_string()))
    }

    /// Default path of the fetched snapshot file.
    pub fn snapshot_path(&self) -> PathBuf {
        PathBuf::from(&self.data_dir).join("repos.json")
    }

    /// Default path of the built hierarchy file.
    pub fn hierarchy_path(&self) -> PathBuf {
        PathBuf::from(&self.data_dir).join("hierarchy.json")
    }
}
