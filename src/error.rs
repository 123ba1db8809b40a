//! Crate-level error types.

use std::fmt;

use crate::renderer::context::RenderContextError;
use crate::scene::SceneValidationError;

/// Errors produced by the glint crate.
#[derive(Debug)]
pub enum GlintError {
    /// GPU context initialization failure.
    Gpu(RenderContextError),
    /// Failed to read or parse a glTF scene file.
    SceneLoad(String),
    /// Scene construction rejected a surface definition.
    SceneValidation(SceneValidationError),
    /// Failed to decode the baked lightmap image.
    Texture(String),
    /// Generic I/O failure.
    Io(std::io::Error),
    /// TOML options parsing/serialization failure.
    OptionsParse(String),
    /// Viewer event-loop failure.
    Viewer(String),
}

impl fmt::Display for GlintError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Gpu(e) => write!(f, "GPU error: {e}"),
            Self::SceneLoad(msg) => {
                write!(f, "scene load error: {msg}")
            }
            Self::SceneValidation(e) => {
                write!(f, "scene validation error: {e}")
            }
            Self::Texture(msg) => {
                write!(f, "baked texture error: {msg}")
            }
            Self::Io(e) => write!(f, "I/O error: {e}"),
            Self::OptionsParse(msg) => {
                write!(f, "options parse error: {msg}")
            }
            Self::Viewer(msg) => write!(f, "viewer error: {msg}"),
        }
    }
}

impl std::error::Error for GlintError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Gpu(e) => Some(e),
            Self::SceneValidation(e) => Some(e),
            Self::Io(e) => Some(e),
            _ => None,
        }
    }
}

impl From<RenderContextError> for GlintError {
    fn from(e: RenderContextError) -> Self {
        Self::Gpu(e)
    }
}

impl From<SceneValidationError> for GlintError {
    fn from(e: SceneValidationError) -> Self {
        Self::SceneValidation(e)
    }
}

impl From<std::io::Error> for GlintError {
    fn from(e: std::io::Error) -> Self {
        Self::Io(e)
    }
}
