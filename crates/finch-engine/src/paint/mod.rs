//! Colors used by the driver's clear pass.

mod color;

pub use color::Color;
