//! Application configuration.
//!
//! Plain structs with defaults and a single `validate` pass. Launch flags
//! (see [`crate::launch`]) are applied on top before validation.

mod app;
mod window;

pub use app::{AppConfig, Metadata, ResourcesConfig, TimingConfig};
pub use window::{ResizeMode, WindowConfig};
