//! Built-in widget themes.
//!
//! The set is closed: an unknown name is not an error, callers fall back to
//! [`Theme::Gradient`].

use std::fmt;

use embedbot_common::Color;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Theme {
    #[default]
    Gradient,
    Blue,
    Purple,
    Dark,
}

/// Colors applied to the toggle control, header, user bubbles and send button.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ThemePalette {
    /// Brand color of the toggle control, header and user bubbles.
    pub primary_solid: &'static str,
    /// Foreground drawn on top of `primary_solid`.
    pub text: &'static str,
}

impl ThemePalette {
    pub fn solid_color(&self) -> Option<Color> {
        Color::from_hex(self.primary_solid)
    }

    pub fn text_color(&self) -> Option<Color> {
        Color::from_hex(self.text)
    }
}

impl Theme {
    pub const ALL: [Theme; 4] = [Theme::Gradient, Theme::Blue, Theme::Purple, Theme::Dark];

    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "gradient" => Some(Theme::Gradient),
            "blue" => Some(Theme::Blue),
            "purple" => Some(Theme::Purple),
            "dark" => Some(Theme::Dark),
            _ => None,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Theme::Gradient => "gradient",
            Theme::Blue => "blue",
            Theme::Purple => "purple",
            Theme::Dark => "dark",
        }
    }

    pub fn palette(&self) -> ThemePalette {
        match self {
            Theme::Gradient => ThemePalette {
                primary_solid: "#667eea",
                text: "#ffffff",
            },
            Theme::Blue => ThemePalette {
                primary_solid: "#3b82f6",
                text: "#ffffff",
            },
            Theme::Purple => ThemePalette {
                primary_solid: "#7c3aed",
                text: "#ffffff",
            },
            Theme::Dark => ThemePalette {
                primary_solid: "#1f2937",
                text: "#ffffff",
            },
        }
    }
}

impl fmt::Display for Theme {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn names_resolve_back_to_themes() {
        for theme in Theme::ALL {
            assert_eq!(Theme::from_name(theme.name()), Some(theme));
        }
    }

    #[test]
    fn unknown_and_cased_names_do_not_resolve() {
        assert_eq!(Theme::from_name("neon"), None);
        assert_eq!(Theme::from_name("Dark"), None);
        assert_eq!(Theme::from_name(""), None);
    }

    #[test]
    fn every_palette_has_parseable_colors() {
        for theme in Theme::ALL {
            let palette = theme.palette();
            assert!(palette.solid_color().is_some(), "{theme} solid color");
            assert_eq!(palette.text_color(), Some(Color::from_rgb(255, 255, 255)), "{theme} text");
        }
    }

    #[test]
    fn default_is_gradient() {
        assert_eq!(Theme::default(), Theme::Gradient);
        assert_eq!(Theme::default().palette().primary_solid, "#667eea");
    }
}
