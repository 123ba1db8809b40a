use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
/// Scene appearance: clear color and emissive surface assignment.
pub struct DisplayOptions {
    /// Background clear color (linear RGB).
    pub background: [f32; 3],
    /// Surface names rendered with the flat emissive material instead of
    /// the baked lightmap. Matched exactly against glTF mesh names.
    pub emissive_names: Vec<String>,
    /// Emissive material color (linear RGB).
    pub emissive_color: [f32; 3],
}

impl Default for DisplayOptions {
    fn default() -> Self {
        Self {
            background: [0.0, 0.0, 0.0],
            emissive_names: vec![
                "Cylinder.004".to_owned(),
                "Circle".to_owned(),
            ],
            emissive_color: [0.0, 0.686, 0.996],
        }
    }
}

impl DisplayOptions {
    /// Whether a surface with this name takes the emissive material.
    #[must_use]
    pub fn is_emissive(&self, name: &str) -> bool {
        self.emissive_names.iter().any(|n| n == name)
    }
}
