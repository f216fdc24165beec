//! Time subsystem.
//!
//! Provides stable, testable frame timing utilities without coupling to the runtime.
//! Intended usage:
//! - one `FrameClock` per driver
//! - call `update()` once per host frame to learn how many fixed steps are owed
//! - read `interpolation()` while rendering to blend between fixed steps

mod frame_clock;
mod source;

pub use frame_clock::FrameClock;
pub use source::{ManualTime, MonotonicTime, TimeSource};
