//! Lumina configuration (lumina.toml)
//!
//! ```toml
//! [provider]
//! default_scheme = "dark"
//! # force_scheme = "light"
//!
//! [scale]
//! base_width = 1280.0
//! base_height = 832.0
//! min_scale = 0.5
//! dominant_axis = 0.5
//! ```
//!
//! Every table and key is optional; missing values take the defaults below.

use crate::error::{ConfigError, Result};
use lumina_core::ColorScheme;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// Top-level configuration
#[derive(Clone, Debug, Default, PartialEq, Deserialize, Serialize)]
pub struct LuminaConfig {
    #[serde(default)]
    pub provider: ProviderConfig,
    #[serde(default)]
    pub scale: ScaleConfig,
}

/// Provider settings
#[derive(Clone, Copy, Debug, PartialEq, Eq, Deserialize, Serialize)]
pub struct ProviderConfig {
    /// Scheme used when the manager holds nothing, and restored by `clear`
    #[serde(default = "default_scheme")]
    pub default_scheme: ColorScheme,
    /// Freezes the visible scheme when set
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub force_scheme: Option<ColorScheme>,
}

fn default_scheme() -> ColorScheme {
    ColorScheme::Dark
}

impl Default for ProviderConfig {
    fn default() -> Self {
        Self {
            default_scheme: default_scheme(),
            force_scheme: None,
        }
    }
}

impl ProviderConfig {
    /// Provider with a forced scheme
    pub fn forced(scheme: ColorScheme) -> Self {
        Self {
            force_scheme: Some(scheme),
            ..Self::default()
        }
    }

    pub fn with_default_scheme(mut self, scheme: ColorScheme) -> Self {
        self.default_scheme = scheme;
        self
    }
}

/// Scale unit settings
#[derive(Clone, Copy, Debug, PartialEq, Deserialize, Serialize)]
pub struct ScaleConfig {
    /// Design reference width in pixels
    #[serde(default = "default_base_width")]
    pub base_width: f32,
    /// Design reference height in pixels
    #[serde(default = "default_base_height")]
    pub base_height: f32,
    /// Lower bound of the scale factor
    #[serde(default = "default_min_scale")]
    pub min_scale: f32,
    /// Weight of the height axis (0.0 = width only, 1.0 = height only)
    #[serde(default = "default_dominant_axis")]
    pub dominant_axis: f32,
}

fn default_base_width() -> f32 {
    ScaleConfig::DEFAULT.base_width
}

fn default_base_height() -> f32 {
    ScaleConfig::DEFAULT.base_height
}

fn default_min_scale() -> f32 {
    ScaleConfig::DEFAULT.min_scale
}

fn default_dominant_axis() -> f32 {
    ScaleConfig::DEFAULT.dominant_axis
}

impl ScaleConfig {
    pub const DEFAULT: ScaleConfig = ScaleConfig {
        base_width: 1280.0,
        base_height: 832.0,
        min_scale: 0.5,
        dominant_axis: 0.5,
    };

    /// Check every setting is usable by the scale engine
    pub fn validate(&self) -> Result<()> {
        let positive = [
            ("base_width", self.base_width),
            ("base_height", self.base_height),
            ("min_scale", self.min_scale),
        ];
        for (field, value) in positive {
            if !value.is_finite() || value <= 0.0 {
                return Err(ConfigError::InvalidScale {
                    field,
                    value,
                    reason: "must be a positive finite number",
                });
            }
        }

        if !(0.0..=1.0).contains(&self.dominant_axis) {
            return Err(ConfigError::InvalidScale {
                field: "dominant_axis",
                value: self.dominant_axis,
                reason: "must be between 0.0 and 1.0",
            });
        }

        Ok(())
    }
}

impl Default for ScaleConfig {
    fn default() -> Self {
        Self::DEFAULT
    }
}

impl LuminaConfig {
    /// Parse and validate a TOML document
    pub fn from_toml_str(src: &str) -> Result<Self> {
        let config: LuminaConfig = toml::from_str(src)?;
        config.scale.validate()?;
        Ok(config)
    }

    /// Load configuration from a file or a directory containing lumina.toml
    pub fn load(path: &Path) -> Result<Self> {
        let config_path = if path.is_dir() {
            path.join("lumina.toml")
        } else {
            path.to_path_buf()
        };

        let content = fs::read_to_string(&config_path).map_err(|source| ConfigError::Io {
            path: config_path.clone(),
            source,
        })?;

        let config = Self::from_toml_str(&content)?;
        tracing::debug!("Loaded Lumina config from {}", config_path.display());
        Ok(config)
    }

    /// Serialize to TOML string
    pub fn to_toml(&self) -> Result<String> {
        Ok(toml::to_string_pretty(self)?)
    }
}
