//! Typed notification channels.
//!
//! Buses are plain values: the driver constructs the ones it publishes on and
//! hands out clones. There is no process-wide registry.

mod bus;
mod resize;

pub use bus::{MessageBus, SubscriptionId};
pub use resize::ResizeEvent;
