//! Centralized viewer options with TOML preset support.
//!
//! All tweakable settings (camera, display, highlight) are consolidated
//! here. Options serialize to/from TOML so a scene can ship a preset file
//! alongside its assets.

mod camera;
mod display;
mod highlight;

use std::path::Path;

pub use camera::CameraOptions;
pub use display::DisplayOptions;
pub use highlight::HighlightOptions;
use serde::{Deserialize, Serialize};

use crate::error::GlintError;

/// Top-level options container. All sub-structs use `#[serde(default)]` so
/// partial TOML files (e.g. only overriding `[highlight]`) work correctly.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
#[serde(default)]
pub struct Options {
    /// Camera projection and orbit control parameters.
    pub camera: CameraOptions,
    /// Scene appearance: clear color and emissive surface assignment.
    pub display: DisplayOptions,
    /// Hover highlight overlay appearance.
    pub highlight: HighlightOptions,
}

impl Options {
    /// Load options from a TOML file. Missing fields use defaults.
    ///
    /// # Errors
    /// [`GlintError::Io`] if the file cannot be read,
    /// [`GlintError::OptionsParse`] if it is not valid options TOML.
    pub fn load(path: &Path) -> Result<Self, GlintError> {
        let content = std::fs::read_to_string(path).map_err(GlintError::Io)?;
        toml::from_str(&content)
            .map_err(|e| GlintError::OptionsParse(e.to_string()))
    }

    /// Save options to a TOML file (pretty-printed).
    ///
    /// # Errors
    /// [`GlintError::OptionsParse`] on serialization failure,
    /// [`GlintError::Io`] if the file cannot be written.
    pub fn save(&self, path: &Path) -> Result<(), GlintError> {
        let content = toml::to_string_pretty(self)
            .map_err(|e| GlintError::OptionsParse(e.to_string()))?;
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).map_err(GlintError::Io)?;
        }
        std::fs::write(path, content).map_err(GlintError::Io)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_round_trips_through_toml() {
        let opts = Options::default();
        let toml_str = toml::to_string_pretty(&opts).unwrap();
        let parsed: Options = toml::from_str(&toml_str).unwrap();
        assert_eq!(opts, parsed);
    }

    #[test]
    fn partial_toml_fills_defaults() {
        let toml_str = r#"
[highlight]
color = [0.0, 1.0, 0.0]
"#;
        let opts: Options = toml::from_str(toml_str).unwrap();
        assert_eq!(opts.highlight.color, [0.0, 1.0, 0.0]);
        // Everything else should be default
        assert_eq!(opts.highlight.opacity, 1.0);
        assert_eq!(opts.camera.fovy, 75.0);
        assert!(opts.display.is_emissive("Circle"));
    }

    #[test]
    fn save_writes_a_loadable_preset() {
        let path = std::env::temp_dir()
            .join("glint-options-test")
            .join("preset.toml");
        let mut opts = Options::default();
        opts.camera.fovy = 60.0;
        opts.highlight.color = [1.0, 0.5, 0.0];

        opts.save(&path).unwrap();
        let loaded = Options::load(&path).unwrap();
        assert_eq!(opts, loaded);

        let _ = std::fs::remove_file(&path);
    }

    #[test]
    fn emissive_name_match_is_exact() {
        let display = DisplayOptions::default();
        assert!(display.is_emissive("Cylinder.004"));
        assert!(!display.is_emissive("Cylinder"));
        assert!(!display.is_emissive("circle"));
    }
}
