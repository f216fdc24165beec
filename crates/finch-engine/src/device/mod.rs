//! GPU device + surface management.
//!
//! This module is responsible for:
//! - creating the wgpu device/queue and configuring the window surface
//! - acquiring frames, recovering from lost or outdated surfaces
//! - exposing an acquired frame as a [`crate::render::Surface`]

mod frame;
mod gpu;
mod init;

pub use frame::GpuSurface;
pub use gpu::{Gpu, GpuFrame};
pub use init::GpuInit;
