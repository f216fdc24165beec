use crate::coords::Size;

/// Published by the driver when the effective render size changes.
///
/// `from` is zero-sized for the very first layout.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct ResizeEvent {
    pub from: Size,
    pub to: Size,
}
