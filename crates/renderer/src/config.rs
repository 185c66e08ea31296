use serde::Deserialize;

/// Immutable tuning parameters for the lightning effect.
///
/// Supplied once when the renderer is created; every field has a documented
/// default so callers can override only what they care about.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RendererConfig {
    /// Base hue of the bolt color in degrees (default 230, an electric blue).
    pub hue: f32,
    /// Horizontal offset of the bolt center in normalized clip units (default 0).
    pub x_offset: f32,
    /// Animation speed multiplier (default 1).
    pub speed: f32,
    /// Brightness intensity multiplier (default 1).
    pub intensity: f32,
    /// Pattern scale multiplier for the noise field (default 1).
    pub size: f32,
}

impl Default for RendererConfig {
    fn default() -> Self {
        Self {
            hue: 230.0,
            x_offset: 0.0,
            speed: 1.0,
            intensity: 1.0,
            size: 1.0,
        }
    }
}

/// Partial configuration as read from a TOML file or CLI flags.
///
/// Missing keys fall back to the base value during [`ConfigOverrides::apply`];
/// unrecognized keys in the source document are ignored by serde.
#[derive(Debug, Clone, Copy, Default, Deserialize)]
pub struct ConfigOverrides {
    #[serde(default)]
    pub hue: Option<f32>,
    #[serde(default)]
    pub x_offset: Option<f32>,
    #[serde(default)]
    pub speed: Option<f32>,
    #[serde(default)]
    pub intensity: Option<f32>,
    #[serde(default)]
    pub size: Option<f32>,
}

impl ConfigOverrides {
    /// Shallow-merges the overrides over `base`, field by field.
    pub fn apply(&self, base: RendererConfig) -> RendererConfig {
        RendererConfig {
            hue: self.hue.unwrap_or(base.hue),
            x_offset: self.x_offset.unwrap_or(base.x_offset),
            speed: self.speed.unwrap_or(base.speed),
            intensity: self.intensity.unwrap_or(base.intensity),
            size: self.size.unwrap_or(base.size),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_documented_values() {
        let config = RendererConfig::default();
        assert_eq!(config.hue, 230.0);
        assert_eq!(config.x_offset, 0.0);
        assert_eq!(config.speed, 1.0);
        assert_eq!(config.intensity, 1.0);
        assert_eq!(config.size, 1.0);
    }

    #[test]
    fn apply_merges_only_present_fields() {
        let overrides = ConfigOverrides {
            hue: Some(12.5),
            speed: Some(2.0),
            ..ConfigOverrides::default()
        };
        let merged = overrides.apply(RendererConfig::default());
        assert_eq!(merged.hue, 12.5);
        assert_eq!(merged.speed, 2.0);
        assert_eq!(merged.x_offset, 0.0);
        assert_eq!(merged.intensity, 1.0);
        assert_eq!(merged.size, 1.0);
    }

    #[test]
    fn empty_overrides_are_identity() {
        let base = RendererConfig {
            hue: 90.0,
            x_offset: -0.25,
            speed: 0.5,
            intensity: 3.0,
            size: 2.0,
        };
        assert_eq!(ConfigOverrides::default().apply(base), base);
    }
}
