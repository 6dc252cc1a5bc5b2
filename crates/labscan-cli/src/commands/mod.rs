//! Subcommand implementations.

pub mod advise;
pub mod analyze;
pub mod batch;
pub mod config;
pub mod extract;
pub mod markers;

use std::path::{Path, PathBuf};

use tracing::debug;

use labscan_core::LabscanConfig;

/// Default configuration file location.
pub fn default_config_path() -> PathBuf {
    dirs::config_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("labscan")
        .join("config.json")
}

/// Configuration file in effect: `--config` if given, else the default path.
pub fn config_file(config_path: Option<&str>) -> PathBuf {
    config_path.map(PathBuf::from).unwrap_or_else(default_config_path)
}

/// Load configuration.
///
/// An explicit `--config` file must exist. The default file is optional and
/// falls back to built-in defaults.
pub fn load_config(config_path: Option<&str>) -> anyhow::Result<LabscanConfig> {
    if let Some(path) = config_path {
        debug!("Loading configuration from {}", path);
        return Ok(LabscanConfig::from_file(Path::new(path))?);
    }

    let default_path = default_config_path();
    if default_path.exists() {
        debug!("Loading configuration from {}", default_path.display());
        Ok(LabscanConfig::from_file(&default_path)?)
    } else {
        Ok(LabscanConfig::default())
    }
}
