//! Subcommands.

pub mod config;
pub mod extract;
pub mod inspect;

use std::path::{Path, PathBuf};

use amcx_core::AmcxConfig;
use tracing::debug;

/// Location of the user configuration file.
pub fn default_config_path() -> PathBuf {
    dirs::config_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("amcx")
        .join("config.json")
}

/// Load the configuration given with `--config`, else the user file, else defaults.
pub fn load_config(config_path: Option<&str>) -> anyhow::Result<AmcxConfig> {
    if let Some(path) = config_path {
        return Ok(AmcxConfig::from_file(Path::new(path))?);
    }

    let path = default_config_path();
    if path.exists() {
        debug!("Using config file {}", path.display());
        Ok(AmcxConfig::from_file(&path)?)
    } else {
        Ok(AmcxConfig::default())
    }
}
