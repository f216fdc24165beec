//! Core engine-facing contracts.
//!
//! Defines the interface between the host runtime (platform loop) and user
//! code: the [`App`] capability, the per-hook contexts, the update scheduler
//! and the [`ApplicationDriver`] that ties them to a frame clock.

mod app;
mod ctx;
mod driver;
mod host;
mod scheduler;

#[cfg(test)]
mod testing;

pub use app::{App, AppControl};
pub use ctx::{AppCtx, DrawCtx, QuitHandle};
pub use driver::ApplicationDriver;
pub use host::{FrameHandler, FrameOutcome, drive_frame};
pub use scheduler::{LifecycleState, UpdateScheduler};
