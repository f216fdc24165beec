use std::cell::Cell;
use std::rc::Rc;
use std::time::Instant;

/// Monotonic millisecond sampler consumed by [`FrameClock`](super::FrameClock).
///
/// Samples are relative to an arbitrary origin; only differences matter.
pub trait TimeSource {
    fn now_ms(&self) -> f64;
}

/// Wall-clock source backed by `std::time::Instant`.
#[derive(Debug, Clone)]
pub struct MonotonicTime {
    origin: Instant,
}

impl MonotonicTime {
    pub fn new() -> Self {
        Self { origin: Instant::now() }
    }
}

impl Default for MonotonicTime {
    fn default() -> Self {
        Self::new()
    }
}

impl TimeSource for MonotonicTime {
    fn now_ms(&self) -> f64 {
        Instant::now()
            .saturating_duration_since(self.origin)
            .as_secs_f64()
            * 1000.0
    }
}

/// Manually advanced time source.
///
/// Clones share the same underlying value, so a test can keep one handle and
/// move another into a clock or driver.
///
/// ```
/// use finch_engine::time::{ManualTime, TimeSource};
///
/// let time = ManualTime::new();
/// let handle = time.clone();
/// handle.advance(16.0);
/// assert_eq!(time.now_ms(), 16.0);
/// ```
#[derive(Debug, Clone, Default)]
pub struct ManualTime {
    now: Rc<Cell<f64>>,
}

impl ManualTime {
    pub fn new() -> Self {
        Self::default()
    }

    /// Moves time forward by `ms`. Negative values are ignored.
    pub fn advance(&self, ms: f64) {
        if ms > 0.0 {
            self.now.set(self.now.get() + ms);
        }
    }

    /// Sets the absolute time. Going backwards is permitted but the clock
    /// treats it as zero elapsed time.
    pub fn set(&self, ms: f64) {
        self.now.set(ms);
    }
}

impl TimeSource for ManualTime {
    fn now_ms(&self) -> f64 {
        self.now.get()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn manual_clones_share_state() {
        let a = ManualTime::new();
        let b = a.clone();
        b.advance(5.0);
        b.advance(-3.0);
        assert_eq!(a.now_ms(), 5.0);
    }

    #[test]
    fn monotonic_never_goes_backwards() {
        let t = MonotonicTime::new();
        let first = t.now_ms();
        let second = t.now_ms();
        assert!(first >= 0.0);
        assert!(second >= first);
    }
}
