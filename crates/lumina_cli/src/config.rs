//! lumina.toml commands

use anyhow::{Context, Result};
use lumina_core::ColorScheme;
use lumina_theme::{LuminaConfig, ScaleConfig};
use std::fs;
use std::path::Path;
use tracing::info;

/// Scale settings from `path`, or the defaults when no path is given
pub fn load_scale(path: Option<&Path>) -> Result<ScaleConfig> {
    match path {
        Some(path) => {
            let config = LuminaConfig::load(path)
                .with_context(|| format!("Failed to load {}", path.display()))?;
            Ok(config.scale)
        }
        None => Ok(ScaleConfig::default()),
    }
}

/// Write a lumina.toml with default settings and `scheme` as the default scheme
pub fn init(path: &Path, scheme: ColorScheme, force: bool) -> Result<()> {
    if path.exists() && !force {
        anyhow::bail!(
            "{} already exists. Pass --force to overwrite it.",
            path.display()
        );
    }

    let mut config = LuminaConfig::default();
    config.provider = config.provider.with_default_scheme(scheme);
    let content = config.to_toml()?;
    fs::write(path, content).with_context(|| format!("Failed to write {}", path.display()))?;

    info!("Wrote {}", path.display());
    Ok(())
}

/// Validate a lumina.toml and summarize it
pub fn check(path: &Path) -> Result<()> {
    let config =
        LuminaConfig::load(path).with_context(|| format!("Invalid config at {}", path.display()))?;

    let forced = config
        .provider
        .force_scheme
        .map(|scheme| scheme.to_string())
        .unwrap_or_else(|| "none".to_string());
    info!(
        "Config OK: default scheme {}, forced {}, reference {}x{}, min scale {}",
        config.provider.default_scheme,
        forced,
        config.scale.base_width,
        config.scale.base_height,
        config.scale.min_scale
    );
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn init_writes_a_config_that_checks() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("lumina.toml");

        init(&path, ColorScheme::Light, false).unwrap();
        check(&path).unwrap();
        check(dir.path()).unwrap();

        let config = LuminaConfig::load(&path).unwrap();
        assert_eq!(config.provider.default_scheme, ColorScheme::Light);
        assert_eq!(config.provider.force_scheme, None);
        assert_eq!(config.scale, ScaleConfig::default());
    }

    #[test]
    fn init_refuses_to_overwrite_without_force() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("lumina.toml");
        fs::write(&path, "# keep me\n").unwrap();

        let err = init(&path, ColorScheme::Dark, false).unwrap_err();
        assert!(err.to_string().contains("already exists"));
        assert_eq!(fs::read_to_string(&path).unwrap(), "# keep me\n");

        init(&path, ColorScheme::Dark, true).unwrap();
        check(&path).unwrap();
    }

    #[test]
    fn check_rejects_invalid_config() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("lumina.toml");
        fs::write(&path, "[scale]\nmin_scale = -1.0\n").unwrap();

        assert!(check(&path).is_err());
        assert!(check(&dir.path().join("missing.toml")).is_err());
    }

    #[test]
    fn load_scale_without_path_uses_defaults() {
        assert_eq!(load_scale(None).unwrap(), ScaleConfig::default());
    }
}
