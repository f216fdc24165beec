//! Finch engine crate.
//!
//! Drives an application through a fixed-step game loop: a frame clock
//! converts wall-clock time into a whole number of fixed simulation steps,
//! the update scheduler runs the early/fixed/late phases around them, and
//! the application driver adapts all of it to a winit + wgpu window.

pub mod config;
pub mod coords;
pub mod core;
pub mod device;
pub mod error;
pub mod events;
pub mod launch;
pub mod logging;
pub mod paint;
pub mod render;
pub mod resources;
pub mod time;
pub mod window;

pub use crate::config::AppConfig;
pub use crate::core::{App, AppControl, AppCtx, ApplicationDriver, DrawCtx};
pub use crate::error::EngineError;
pub use crate::events::MessageBus;
pub use crate::time::FrameClock;
