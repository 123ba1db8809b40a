use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
/// Hover highlight overlay appearance.
pub struct HighlightOptions {
    /// Whether hovering draws the wireframe overlay at all.
    pub enabled: bool,
    /// Overlay line color (linear RGB).
    pub color: [f32; 3],
    /// Overlay line opacity.
    pub opacity: f32,
}

impl Default for HighlightOptions {
    fn default() -> Self {
        Self {
            enabled: true,
            color: [1.0, 1.0, 1.0],
            opacity: 1.0,
        }
    }
}
