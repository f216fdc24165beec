//! Window + runtime loop.
//!
//! Owns the `winit` EventLoop and Window, wires them to the GPU layer and
//! drives a [`crate::core::FrameHandler`] once per redraw.

mod runtime;

pub use runtime::{Runtime, RuntimeConfig};
