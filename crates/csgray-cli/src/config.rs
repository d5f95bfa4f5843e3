//! Render settings layered from scene defaults, a TOML file and flags.

use std::path::Path;

use anyhow::{Context, Result};
use csgray::RenderSettings;
use serde::Deserialize;

/// A partial set of render settings. Unset fields leave the layer below
/// untouched.
///
/// ```toml
/// pixels_wide = 640
/// pixels_high = 480
/// anti_alias = 3
/// ```
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SettingsOverride {
    pub pixels_wide: Option<usize>,
    pub pixels_high: Option<usize>,
    pub zoom: Option<f64>,
    pub anti_alias: Option<usize>,
    pub max_recursion_depth: Option<u32>,
    pub min_intensity: Option<f64>,
}

impl SettingsOverride {
    pub fn from_toml_str(text: &str) -> Result<Self> {
        Ok(toml::from_str(text)?)
    }

    pub fn load(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("reading config {}", path.display()))?;
        Self::from_toml_str(&text).with_context(|| format!("parsing config {}", path.display()))
    }

    /// Combine two layers; fields set in `over` win.
    pub fn merge(self, over: SettingsOverride) -> Self {
        Self {
            pixels_wide: over.pixels_wide.or(self.pixels_wide),
            pixels_high: over.pixels_high.or(self.pixels_high),
            zoom: over.zoom.or(self.zoom),
            anti_alias: over.anti_alias.or(self.anti_alias),
            max_recursion_depth: over.max_recursion_depth.or(self.max_recursion_depth),
            min_intensity: over.min_intensity.or(self.min_intensity),
        }
    }

    pub fn apply(&self, settings: &mut RenderSettings) {
        if let Some(v) = self.pixels_wide {
            settings.pixels_wide = v;
        }
        if let Some(v) = self.pixels_high {
            settings.pixels_high = v;
        }
        if let Some(v) = self.zoom {
            settings.zoom = v;
        }
        if let Some(v) = self.anti_alias {
            settings.anti_alias = v;
        }
        if let Some(v) = self.max_recursion_depth {
            settings.max_recursion_depth = v;
        }
        if let Some(v) = self.min_intensity {
            settings.min_intensity = v;
        }
    }
}

/// Final settings for a render: `base`, then the config file (if any),
/// then the command-line flags. The result is validated.
pub fn resolve(
    base: RenderSettings,
    config: Option<&Path>,
    flags: SettingsOverride,
) -> Result<RenderSettings> {
    let file = match config {
        Some(path) => SettingsOverride::load(path)?,
        None => SettingsOverride::default(),
    };
    let mut settings = base;
    file.merge(flags).apply(&mut settings);
    settings.validate()?;
    Ok(settings)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_partial_toml() {
        let layer = SettingsOverride::from_toml_str("pixels_wide = 640\nzoom = 1.5\n").unwrap();
        assert_eq!(layer.pixels_wide, Some(640));
        assert_eq!(layer.zoom, Some(1.5));
        assert_eq!(layer.anti_alias, None);
    }

    #[test]
    fn test_unknown_key_rejected() {
        assert!(SettingsOverride::from_toml_str("width = 640").is_err());
    }

    #[test]
    fn test_flags_win_over_file() {
        let file = SettingsOverride {
            pixels_wide: Some(640),
            anti_alias: Some(3),
            ..Default::default()
        };
        let flags = SettingsOverride {
            anti_alias: Some(1),
            ..Default::default()
        };
        let mut settings = RenderSettings::new(300, 200, 3.0, 2);
        file.merge(flags).apply(&mut settings);
        assert_eq!(settings.pixels_wide, 640);
        assert_eq!(settings.pixels_high, 200);
        assert_eq!(settings.anti_alias, 1);
        assert_eq!(settings.zoom, 3.0);
    }

    #[test]
    fn test_resolve_validates() {
        let flags = SettingsOverride {
            zoom: Some(-1.0),
            ..Default::default()
        };
        assert!(resolve(RenderSettings::default(), None, flags).is_err());
        let ok = resolve(RenderSettings::default(), None, SettingsOverride::default()).unwrap();
        assert_eq!(ok, RenderSettings::default());
    }

    #[test]
    fn test_missing_config_file() {
        let err = resolve(
            RenderSettings::default(),
            Some(Path::new("/nonexistent/csgray.toml")),
            SettingsOverride::default(),
        )
        .unwrap_err();
        assert!(err.to_string().contains("reading config"));
    }
}
