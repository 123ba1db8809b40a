//! Input handling: platform-agnostic event types and pointer tracking.

/// Platform-agnostic input events.
pub mod event;
/// Pointer position cell in normalized device coordinates.
pub mod pointer;

pub use event::{InputEvent, MouseButton};
pub use pointer::PointerState;
