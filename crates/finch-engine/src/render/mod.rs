//! Draw-side contract between the host runtime and the application.
//!
//! The engine does not ship renderers. The host hands the driver a
//! [`Surface`]; the driver optionally clears it and passes it on to
//! `App::render`, which may record its own wgpu passes through
//! [`Surface::target`].

mod surface;

pub use surface::{RenderTarget, Surface};
