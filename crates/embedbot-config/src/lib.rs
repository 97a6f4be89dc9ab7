//! Embedbot widget configuration.
//!
//! Two layers feed a mounted widget:
//!
//! - the embedding attributes on the host page's script tag, parsed once
//!   into an immutable [`WidgetConfig`] (chatbot key, position, theme);
//! - the engine tunables in [`WidgetSettings`], read from TOML with serde
//!   defaults so partial files work, then overridden from the environment.
//!
//! ```rust,no_run
//! use embedbot_config::{load_settings, EmbedAttributes, WidgetConfig};
//!
//! let attrs = EmbedAttributes::from_pairs([("data-chatbot-key", "cb_123")]);
//! let config = WidgetConfig::from_attributes(&attrs).expect("key present");
//! let settings = load_settings(None).expect("valid settings");
//! println!("{} @ {}", config.chatbot_key, settings.api_base);
//! ```

pub mod embed;
pub mod schema;
pub mod theme;
pub mod toml_loader;
pub mod validation;

pub use embed::{EmbedAttributes, Position, WidgetConfig};
pub use schema::{WidgetSettings, DEFAULT_API_BASE, DEFAULT_GREETING};
pub use theme::{Theme, ThemePalette};

use std::path::Path;

use embedbot_common::ConfigError;

/// Env var that overrides `api_base` from any file.
pub const API_BASE_ENV: &str = "EMBEDBOT_API_BASE";

/// Load engine settings from `path` (or the platform default), apply
/// environment overrides, and validate the result.
pub fn load_settings(path: Option<&Path>) -> Result<WidgetSettings, ConfigError> {
    load_settings_with(path, std::env::var(API_BASE_ENV).ok())
}

fn load_settings_with(
    path: Option<&Path>,
    api_base_override: Option<String>,
) -> Result<WidgetSettings, ConfigError> {
    let mut settings = match path {
        Some(path) => toml_loader::load_from_path(path)?,
        None => toml_loader::load_default()?,
    };

    if let Some(base) = api_base_override {
        tracing::debug!("{API_BASE_ENV} overrides api_base");
        settings.api_base = base;
    }

    validation::validate(&settings)?;
    Ok(settings)
}
