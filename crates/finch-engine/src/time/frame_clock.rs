use crate::error::EngineError;

use super::source::{MonotonicTime, TimeSource};

/// Slack applied when converting debt into whole steps.
///
/// `1000 / rate` is rarely exact in binary floating point; without the slack an
/// advance of exactly `k` frame durations can floor to `k - 1`. The flip side:
/// debt within the slack of a whole frame is rounded up to a full step, and the
/// remaining debt clamps to 0 rather than going negative.
const STEP_EPSILON_MS: f64 = 1e-6;

/// Window over which the throughput estimate is refreshed.
const FPS_WINDOW_MS: f64 = 1000.0;

/// Fixed-step accumulator.
///
/// `FrameClock` converts wall-clock samples into a whole number of fixed
/// simulation steps plus a fractional interpolation factor. The simulation
/// always advances by [`fixed_delta_seconds`](Self::fixed_delta_seconds), while
/// rendering blends between steps using [`interpolation`](Self::interpolation).
///
/// Invariant: `0 <= debt_ms() < target_frame_ms()` after every `update`.
///
/// The clock does not cap the number of steps it reports; bounding catch-up
/// work is the scheduler's job.
#[derive(Debug, Clone)]
pub struct FrameClock<T: TimeSource = MonotonicTime> {
    source: T,

    target_frame_ms: f64,
    fixed_delta_seconds: f64,

    debt_ms: f64,
    start_ms: f64,
    last_sample_ms: f64,
    delta_seconds: f64,
    started: bool,

    rolling_step_count: u64,
    last_fps_sample_ms: f64,
    measured_fps: f64,
}

impl FrameClock<MonotonicTime> {
    /// Creates a wall-clock driven clock for `target_fps` fixed steps per second.
    pub fn new(target_fps: u32) -> Result<Self, EngineError> {
        Self::with_source(target_fps, MonotonicTime::new())
    }
}

impl<T: TimeSource> FrameClock<T> {
    /// Creates a clock sampling `source`.
    ///
    /// Fails when `target_fps` is zero.
    pub fn with_source(target_fps: u32, source: T) -> Result<Self, EngineError> {
        if target_fps == 0 {
            return Err(EngineError::config("target fps must be greater than 0"));
        }

        let target_frame_ms = 1000.0 / f64::from(target_fps);

        Ok(Self {
            source,
            target_frame_ms,
            fixed_delta_seconds: target_frame_ms / 1000.0,
            debt_ms: 0.0,
            start_ms: 0.0,
            last_sample_ms: 0.0,
            delta_seconds: 0.0,
            started: false,
            rolling_step_count: 0,
            last_fps_sample_ms: 0.0,
            measured_fps: 0.0,
        })
    }

    /// Establishes the time baseline. Only the first call has an effect.
    pub fn start(&mut self) {
        if self.started {
            return;
        }

        let now = self.source.now_ms();

        self.started = true;
        self.start_ms = now;
        self.last_sample_ms = now;
        self.last_fps_sample_ms = now;
        self.debt_ms = 0.0;
        self.delta_seconds = 0.0;
        self.rolling_step_count = 0;
        self.measured_fps = 0.0;
    }

    /// Re-baselines the last sample to now, keeping the current debt.
    ///
    /// Call after the host resumes from suspension so the gap is not billed
    /// as simulation time.
    pub fn reset(&mut self) {
        if !self.started {
            self.start();
            return;
        }
        self.last_sample_ms = self.source.now_ms();
        self.delta_seconds = 0.0;
    }

    /// Samples the time source and returns the number of fixed steps owed.
    ///
    /// Returns 0 for frames shorter than the target duration.
    pub fn update(&mut self) -> u32 {
        if !self.started {
            self.start();
        }

        let now = self.source.now_ms();
        let dt = (now - self.last_sample_ms).max(0.0);

        self.last_sample_ms = now;
        self.delta_seconds = dt / 1000.0;
        self.debt_ms += dt;

        let steps = ((self.debt_ms + STEP_EPSILON_MS) / self.target_frame_ms).floor();
        if steps > 0.0 {
            self.debt_ms = (self.debt_ms - steps * self.target_frame_ms).max(0.0);
        }
        let steps = steps as u32;

        self.rolling_step_count += u64::from(steps);

        let window = now - self.last_fps_sample_ms;
        if window >= FPS_WINDOW_MS {
            self.measured_fps = self.rolling_step_count as f64 / (window / 1000.0);
            self.rolling_step_count = 0;
            self.last_fps_sample_ms = now;
        }

        steps
    }

    /// Progress toward the next fixed step, in `[0, 1]`.
    ///
    /// Does not mutate the clock; includes time elapsed since the last
    /// `update` so the render phase can extrapolate smoothly.
    pub fn interpolation(&self) -> f64 {
        if !self.started {
            return 0.0;
        }

        let since_update = (self.source.now_ms() - self.last_sample_ms).max(0.0);
        ((self.debt_ms + since_update) / self.target_frame_ms).clamp(0.0, 1.0)
    }

    /// Real time elapsed between the two most recent updates, in seconds.
    pub fn delta_seconds(&self) -> f64 {
        self.delta_seconds
    }

    /// Constant simulation step, in seconds.
    pub fn fixed_delta_seconds(&self) -> f64 {
        self.fixed_delta_seconds
    }

    /// Fixed steps produced per second over the last full measurement window.
    pub fn fps(&self) -> f64 {
        self.measured_fps
    }

    pub fn target_frame_ms(&self) -> f64 {
        self.target_frame_ms
    }

    /// Real time not yet converted into fixed steps.
    pub fn debt_ms(&self) -> f64 {
        self.debt_ms
    }

    /// Time since `start`, as of the most recent update.
    pub fn elapsed_seconds(&self) -> f64 {
        if !self.started {
            return 0.0;
        }
        (self.last_sample_ms - self.start_ms) / 1000.0
    }

    pub fn is_started(&self) -> bool {
        self.started
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::time::ManualTime;

    fn clock(fps: u32) -> (FrameClock<ManualTime>, ManualTime) {
        let time = ManualTime::new();
        let clock = FrameClock::with_source(fps, time.clone()).unwrap();
        (clock, time)
    }

    // ── construction ──────────────────────────────────────────────────────

    #[test]
    fn zero_rate_is_rejected() {
        let err = FrameClock::with_source(0, ManualTime::new()).unwrap_err();
        assert!(matches!(err, EngineError::Configuration(_)));
    }

    #[test]
    fn fixed_delta_is_reciprocal_of_rate() {
        for fps in [1, 24, 30, 60, 144, 240] {
            let (mut c, t) = clock(fps);
            let expected = 1.0 / f64::from(fps);
            assert!((c.fixed_delta_seconds() - expected).abs() < 1e-12);

            t.advance(123.4);
            c.update();
            t.advance(1000.0);
            c.update();
            assert!((c.fixed_delta_seconds() - expected).abs() < 1e-12);
        }
    }

    // ── start ─────────────────────────────────────────────────────────────

    #[test]
    fn start_is_idempotent() {
        let (mut c, t) = clock(60);
        t.set(100.0);
        c.start();
        t.set(500.0);
        c.start();
        // Baseline stayed at 100.0, so 400ms are owed.
        assert_eq!(c.update(), 24);
    }

    #[test]
    fn first_update_starts_with_zero_delta() {
        let (mut c, t) = clock(60);
        t.set(1000.0);
        assert_eq!(c.update(), 0);
        assert!(c.is_started());
        assert_eq!(c.delta_seconds(), 0.0);
        assert_eq!(c.debt_ms(), 0.0);
    }

    // ── update ────────────────────────────────────────────────────────────

    #[test]
    fn debt_within_slack_of_a_frame_rounds_up() {
        let (mut c, t) = clock(30);
        c.start();
        t.advance(c.target_frame_ms() - STEP_EPSILON_MS / 2.0);
        assert_eq!(c.update(), 1);
        assert_eq!(c.debt_ms(), 0.0);

        // Clearly short of a frame still owes nothing.
        t.advance(c.target_frame_ms() - 0.01);
        assert_eq!(c.update(), 0);
    }

    #[test]
    fn short_frames_yield_no_steps() {
        let (mut c, t) = clock(30);
        c.start();
        t.advance(10.0);
        assert_eq!(c.update(), 0);
        assert!((c.debt_ms() - 10.0).abs() < 1e-9);
        assert!((c.delta_seconds() - 0.010).abs() < 1e-12);
    }

    #[test]
    fn hundred_ms_at_thirty_fps_is_three_steps() {
        let (mut c, t) = clock(30);
        c.start();
        t.advance(100.0);
        assert_eq!(c.update(), 3);
        assert!((c.fixed_delta_seconds() - 0.0333).abs() < 1e-3);
        assert!(c.debt_ms() < 0.5);
    }

    #[test]
    fn whole_multiples_leave_debt_unchanged() {
        let (mut c, t) = clock(60);
        c.start();
        t.advance(7.0);
        c.update();
        let debt = c.debt_ms();

        for k in 0..6u32 {
            t.advance(f64::from(k) * c.target_frame_ms());
            assert_eq!(c.update(), k);
            assert!((c.debt_ms() - debt).abs() < 1e-6);
        }
    }

    #[test]
    fn debt_stays_within_one_frame() {
        let (mut c, t) = clock(60);
        c.start();
        let samples = [0.0, 1.0, 16.0, 17.0, 33.3, 0.5, 250.0, 16.666, 1.0e4, 3.0];
        for dt in samples {
            t.advance(dt);
            c.update();
            assert!(c.debt_ms() >= 0.0);
            assert!(c.debt_ms() < c.target_frame_ms());
        }
    }

    #[test]
    fn backwards_time_counts_as_zero() {
        let (mut c, t) = clock(60);
        t.set(50.0);
        c.start();
        t.set(10.0);
        assert_eq!(c.update(), 0);
        assert_eq!(c.delta_seconds(), 0.0);
    }

    #[test]
    fn reset_forgives_the_gap() {
        let (mut c, t) = clock(60);
        c.start();
        t.advance(8.0);
        c.update();
        t.advance(5000.0);
        c.reset();
        assert_eq!(c.update(), 0);
        assert!((c.debt_ms() - 8.0).abs() < 1e-9);
    }

    // ── interpolation ─────────────────────────────────────────────────────

    #[test]
    fn interpolation_is_zero_before_start() {
        let (c, t) = clock(60);
        t.advance(100.0);
        assert_eq!(c.interpolation(), 0.0);
    }

    #[test]
    fn interpolation_grows_between_updates_and_drops_after_a_step() {
        let (mut c, t) = clock(20); // 50ms frames
        c.start();

        let mut last = c.interpolation();
        for _ in 0..4 {
            t.advance(10.0);
            let a = c.interpolation();
            assert!(a >= last);
            last = a;
        }
        assert!((last - 0.8).abs() < 1e-9);

        t.advance(15.0);
        assert_eq!(c.interpolation(), 1.0);

        assert_eq!(c.update(), 1);
        assert!(c.interpolation() < last);
        assert!((c.interpolation() - 0.1).abs() < 1e-6);
    }

    #[test]
    fn interpolation_does_not_mutate() {
        let (mut c, t) = clock(60);
        c.start();
        t.advance(5.0);
        let _ = c.interpolation();
        let _ = c.interpolation();
        assert_eq!(c.debt_ms(), 0.0);
        c.update();
        assert!((c.debt_ms() - 5.0).abs() < 1e-9);
    }

    // ── fps ───────────────────────────────────────────────────────────────

    #[test]
    fn fps_refreshes_once_per_second() {
        let (mut c, t) = clock(50); // 20ms frames
        c.start();

        for _ in 0..49 {
            t.advance(20.0);
            c.update();
        }
        assert_eq!(c.fps(), 0.0);

        t.advance(20.0);
        c.update();
        assert!((c.fps() - 50.0).abs() < 1e-6);
        assert!((c.elapsed_seconds() - 1.0).abs() < 1e-9);
    }
}
