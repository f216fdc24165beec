//! Resource manifest and byte cache.
//!
//! The manifest maps resource names to files under the resource root. The
//! cache reads each file once on first lookup and hands out shared bytes;
//! decoding is left to the application.

mod cache;
mod error;
mod manifest;

pub use cache::ResourceCache;
pub use error::ResourceError;
pub use manifest::{Manifest, ManifestEntry};
