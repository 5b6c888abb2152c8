//! Color scheme (light/dark appearance mode)

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Appearance mode propagated through the tree
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ColorScheme {
    Light,
    #[default]
    Dark,
}

impl ColorScheme {
    /// Every valid scheme
    pub const ALL: [ColorScheme; 2] = [ColorScheme::Light, ColorScheme::Dark];

    /// The opposite scheme
    pub fn toggle(self) -> Self {
        match self {
            ColorScheme::Light => ColorScheme::Dark,
            ColorScheme::Dark => ColorScheme::Light,
        }
    }

    pub fn is_dark(self) -> bool {
        self == ColorScheme::Dark
    }

    /// Canonical lowercase name, as stored by raw storages
    pub fn as_str(self) -> &'static str {
        match self {
            ColorScheme::Light => "light",
            ColorScheme::Dark => "dark",
        }
    }

    /// Parse a raw stored value, substituting `default` when it isn't a scheme.
    ///
    /// Unrecognized values are treated as absent rather than as errors.
    pub fn parse_or(raw: &str, default: ColorScheme) -> ColorScheme {
        raw.parse().unwrap_or(default)
    }
}

impl fmt::Display for ColorScheme {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Raised when a string is not `light` or `dark`
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown color scheme `{0}` (expected `light` or `dark`)")]
pub struct SchemeParseError(pub String);

impl FromStr for ColorScheme {
    type Err = SchemeParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        if trimmed.eq_ignore_ascii_case("light") {
            Ok(ColorScheme::Light)
        } else if trimmed.eq_ignore_ascii_case("dark") {
            Ok(ColorScheme::Dark)
        } else {
            Err(SchemeParseError(s.to_string()))
        }
    }
}
