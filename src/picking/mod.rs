//! CPU hit-testing and hover resolution.
//!
//! Each frame the engine unprojects the pointer into a world ray, casts
//! it against every scene surface, and feeds the sorted hits to
//! [`HoverState`], which drives the wireframe [`HighlightOverlay`].

mod hover;
mod ray;
mod raycaster;

pub use hover::{HighlightOverlay, HoverChange, HoverState};
pub use ray::Ray;
pub use raycaster::{cast, Hit};
