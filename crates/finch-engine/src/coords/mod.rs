//! Screen-space geometry shared by the driver and its subscribers.
//!
//! Sizes are in logical pixels after render scaling.

mod size;

pub use size::Size;
