//! TOML settings file loading.


use std::path::{Path, PathBuf};

use embedbot_common::ConfigError;
use tracing::info;

use crate::schema::WidgetSettings;

/// Load settings from a specific TOML file.
///
/// Missing fields take their serde defaults. Validation is left to the
/// caller so a bad file is reported instead of silently replaced.
pub fn load_from_path(path: &Path) -> Result<WidgetSettings, ConfigError> {
    if !path.exists() {
        return Err(ConfigError::FileNotFound(path.to_path_buf()));
    }

    let content = std::fs::read_to_string(path).map_err(|e| {
        ConfigError::ParseError(format!("failed to read {}: {e}", path.display()))
    })?;

    let settings = parse_settings(&content)?;
    info!("loaded widget settings from {}", path.display());
    Ok(settings)
}

pub fn parse_settings(content: &str) -> Result<WidgetSettings, ConfigError> {
    toml::from_str(content).map_err(|e| ConfigError::ParseError(format!("failed to parse TOML: {e}")))
}

/// Load settings from the platform default path.
///
/// On Linux: `~/.config/embedbot/widget.toml`
/// On macOS: `~/Library/Application Support/embedbot/widget.toml`
///
/// A missing file is not an error: defaults are returned.
pub fn load_default() -> Result<WidgetSettings, ConfigError> {
    load_default_from(&config_dir()?)
}

/// Same as [`load_default`] with `config_dir` standing in for the
/// platform config directory.
pub fn load_default_from(config_dir: &Path) -> Result<WidgetSettings, ConfigError> {
    let path = settings_path_in(config_dir);
    if !path.exists() {
        info!("no settings at {}, using defaults", path.display());
        return Ok(WidgetSettings::default());
    }
    load_from_path(&path)
}

pub fn default_settings_path() -> Result<PathBuf, ConfigError> {
    Ok(settings_path_in(&config_dir()?))
}

fn config_dir() -> Result<PathBuf, ConfigError> {
    dirs::config_dir()
        .ok_or_else(|| ConfigError::ParseError("could not determine config directory".into()))
}

fn settings_path_in(config_dir: &Path) -> PathBuf {
    config_dir.join("embedbot").join("widget.toml")
}
