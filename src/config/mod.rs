//! Configuration module for vidsearch
//!
//! Handles loading settings from YAML files and environment variables.
//! Settings are validated once loaded and passed explicitly to the
//! components that need them.

mod settings;

pub use settings::*;

use anyhow::Result;
use std::path::{Path, PathBuf};
use tracing::info;

/// Load settings from the first file found, or use defaults.
///
/// Lookup order: `explicit`, `VIDSEARCH_SETTINGS_PATH`, `./settings.yml`,
/// `./config/settings.yml`, `<config dir>/vidsearch/settings.yml`.
/// Environment overrides are merged in every case.
pub fn load_settings(explicit: Option<&Path>) -> Result<Settings> {
    if let Some(path) = explicit {
        info!("Loading settings from: {}", path.display());
        let mut settings = Settings::from_file(path)?;
        settings.merge_env();
        settings.validate()?;
        return Ok(settings);
    }

    let mut candidates = Vec::new();
    if let Ok(path) = std::env::var("VIDSEARCH_SETTINGS_PATH") {
        candidates.push(PathBuf::from(path));
    }
    candidates.push(PathBuf::from("settings.yml"));
    candidates.push(PathBuf::from("config/settings.yml"));
    if let Some(dir) = dirs::config_dir() {
        candidates.push(dir.join("vidsearch/settings.yml"));
    }

    for path in candidates.iter() {
        if path.exists() {
            info!("Loading settings from: {}", path.display());
            let mut settings = Settings::from_file(path)?;
            settings.merge_env();
            settings.validate()?;
            return Ok(settings);
        }
    }

    info!("No settings file found, using defaults");
    let mut settings = Settings::default();
    settings.merge_env();
    settings.validate()?;
    Ok(settings)
}
