use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use renderer::{ConfigOverrides, RendererConfig};

/// Reads tuning overrides from a TOML file.
///
/// Only the known keys are picked up; anything else in the document is
/// ignored so a shared config file can carry unrelated sections.
pub fn load_overrides(path: &Path) -> Result<ConfigOverrides> {
    let text = fs::read_to_string(path)
        .with_context(|| format!("failed to read config file {}", path.display()))?;
    let overrides: ConfigOverrides = toml::from_str(&text)
        .with_context(|| format!("failed to parse config file {}", path.display()))?;
    Ok(overrides)
}

/// Resolves the effective configuration: defaults, then the config file,
/// then CLI flags, each layer a shallow merge over the previous one.
pub fn resolve(cli: ConfigOverrides, file: Option<ConfigOverrides>) -> RendererConfig {
    let base = match file {
        Some(overrides) => overrides.apply(RendererConfig::default()),
        None => RendererConfig::default(),
    };
    cli.apply(base)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cli_flags_take_precedence_over_file() {
        let file: ConfigOverrides = toml::from_str("hue = 90.0\nspeed = 3.0").unwrap();
        let cli = ConfigOverrides {
            hue: Some(10.0),
            ..ConfigOverrides::default()
        };

        let config = resolve(cli, Some(file));
        assert_eq!(config.hue, 10.0);
        assert_eq!(config.speed, 3.0);
        assert_eq!(config.intensity, 1.0);
    }

    #[test]
    fn unknown_keys_in_file_are_ignored() {
        let file: ConfigOverrides =
            toml::from_str("hue = 45.0\nglow = true\n[window]\nborder = 2").unwrap();
        let config = resolve(ConfigOverrides::default(), Some(file));
        assert_eq!(config.hue, 45.0);
        assert_eq!(config.size, 1.0);
    }

    #[test]
    fn missing_file_means_defaults() {
        let config = resolve(ConfigOverrides::default(), None);
        assert_eq!(config, RendererConfig::default());
    }
}
