//! Embedding-tag attributes and the immutable per-mount widget config.

use std::collections::HashMap;
use std::fmt;

use embedbot_common::ConfigError;
use serde::{Deserialize, Serialize};

use crate::theme::Theme;

pub const ATTR_CHATBOT_KEY: &str = "data-chatbot-key";
pub const ATTR_POSITION: &str = "data-position";
pub const ATTR_THEME: &str = "data-theme";

/// Which corner of the host page the widget is pinned to.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Position {
    Left,
    #[default]
    Right,
}

impl Position {
    /// Only an exact `left` selects the left corner; anything else is `right`.
    pub fn from_attr(value: &str) -> Self {
        if value == "left" {
            Position::Left
        } else {
            Position::Right
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Position::Left => "left",
            Position::Right => "right",
        }
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Raw attribute values as read from the script tag.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EmbedAttributes {
    values: HashMap<String, String>,
}

impl EmbedAttributes {
    pub fn new() -> Self {
        Self::default()
    }

    /// Collect `(name, value)` pairs. Names are matched case-insensitively,
    /// like HTML attribute names.
    pub fn from_pairs<I, K, V>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        let values = pairs
            .into_iter()
            .map(|(k, v)| (k.into().to_ascii_lowercase(), v.into()))
            .collect();
        Self { values }
    }

    pub fn with(mut self, name: &str, value: impl Into<String>) -> Self {
        self.values.insert(name.to_ascii_lowercase(), value.into());
        self
    }

    pub fn get(&self, name: &str) -> Option<&str> {
        self.values.get(&name.to_ascii_lowercase()).map(String::as_str)
    }
}

/// Identifying configuration of one widget mount. Never mutated after
/// initialization.
#[derive(Clone, PartialEq, Eq)]
pub struct WidgetConfig {
    pub chatbot_key: String,
    pub position: Position,
    pub theme: Theme,
}

impl fmt::Debug for WidgetConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("WidgetConfig")
            .field("chatbot_key", &"[REDACTED]")
            .field("position", &self.position)
            .field("theme", &self.theme)
            .finish()
    }
}

impl WidgetConfig {
    /// Parse the embed attributes. A missing or empty chatbot key is the
    /// only fatal condition; display options fall back to their defaults.
    pub fn from_attributes(attrs: &EmbedAttributes) -> Result<Self, ConfigError> {
        let chatbot_key = match attrs.get(ATTR_CHATBOT_KEY) {
            Some(key) if !key.is_empty() => key.to_string(),
            _ => return Err(ConfigError::MissingChatbotKey),
        };

        let position = attrs
            .get(ATTR_POSITION)
            .map(Position::from_attr)
            .unwrap_or_default();

        let theme = match attrs.get(ATTR_THEME) {
            Some(name) => Theme::from_name(name).unwrap_or_else(|| {
                tracing::warn!(theme = name, "unrecognized theme, using gradient");
                Theme::default()
            }),
            None => Theme::default(),
        };

        Ok(Self {
            chatbot_key,
            position,
            theme,
        })
    }
}
