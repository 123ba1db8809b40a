//! Small shared utilities.

mod frame_timing;

pub use frame_timing::FrameTiming;
pub(crate) use frame_timing::MAX_DT;
