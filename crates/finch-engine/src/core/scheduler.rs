use crate::error::{EngineError, Hook, Phase};
use crate::time::{FrameClock, TimeSource};

use super::app::{App, AppControl};
use super::ctx::AppCtx;

/// Driver lifecycle.
///
/// `Idle → Running → ShuttingDown → Terminated`; `Terminated` is final.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum LifecycleState {
    Idle,
    Running,
    ShuttingDown,
    Terminated,
}

/// Sequences lifecycle hooks and update phases, one host frame at a time.
#[derive(Debug, Clone)]
pub struct UpdateScheduler {
    state: LifecycleState,
    started: bool,
    max_fixed_steps: u32,

    ticks: u64,
    last_steps: u32,
    dropped_steps: u64,
}

impl UpdateScheduler {
    pub const DEFAULT_MAX_FIXED_STEPS: u32 = 5;

    /// Creates a scheduler that runs at most `max_fixed_steps` fixed updates per tick.
    pub fn new(max_fixed_steps: u32) -> Result<Self, EngineError> {
        if max_fixed_steps == 0 {
            return Err(EngineError::config("max fixed steps must be greater than 0"));
        }
        Ok(Self {
            state: LifecycleState::Idle,
            started: false,
            max_fixed_steps,
            ticks: 0,
            last_steps: 0,
            dropped_steps: 0,
        })
    }

    pub fn state(&self) -> LifecycleState {
        self.state
    }

    pub fn max_fixed_steps(&self) -> u32 {
        self.max_fixed_steps
    }

    /// Completed ticks.
    pub fn ticks(&self) -> u64 {
        self.ticks
    }

    /// Fixed updates run by the most recent tick.
    pub fn last_steps(&self) -> u32 {
        self.last_steps
    }

    /// Total fixed steps discarded by the step cap.
    pub fn dropped_steps(&self) -> u64 {
        self.dropped_steps
    }

    /// Runs the startup hook. Must succeed before the first `tick`.
    pub fn startup<A: App>(&mut self, app: &mut A, ctx: &mut AppCtx<'_>) -> Result<(), EngineError> {
        if self.started || self.state != LifecycleState::Idle {
            return Err(EngineError::Lifecycle("startup already ran".to_string()));
        }

        app.startup(ctx).map_err(|source| EngineError::Hook {
            hook: Hook::Startup,
            source,
        })?;

        self.started = true;
        log::info!("startup complete");
        Ok(())
    }

    /// Runs one frame: shutdown if an exit is pending, otherwise
    /// early → fixed × n → late.
    ///
    /// The first failing phase aborts the rest of the frame and is returned.
    pub fn tick<A, T>(
        &mut self,
        clock: &mut FrameClock<T>,
        app: &mut A,
        ctx: &mut AppCtx<'_>,
    ) -> Result<AppControl, EngineError>
    where
        A: App,
        T: TimeSource,
    {
        match self.state {
            LifecycleState::Terminated => return Ok(AppControl::Exit),
            LifecycleState::Idle if !self.started => {
                return Err(EngineError::Lifecycle("tick called before startup".to_string()));
            }
            _ => {}
        }

        if ctx.is_quitting() {
            return self.shutdown(app, ctx, clock.elapsed_seconds());
        }

        let owed = clock.update();
        let dt = clock.delta_seconds();
        let fixed_dt = clock.fixed_delta_seconds();

        app.early_update(ctx, dt)
            .map_err(|source| EngineError::Phase { phase: Phase::Early, source })?;

        let steps = owed.min(self.max_fixed_steps);
        if owed > steps {
            let dropped = owed - steps;
            self.dropped_steps += u64::from(dropped);
            log::debug!("frame owed {owed} fixed steps; dropping {dropped}");
        }
        self.last_steps = steps;

        for _ in 0..steps {
            app.fixed_update(ctx, fixed_dt)
                .map_err(|source| EngineError::Phase { phase: Phase::Fixed, source })?;
        }

        app.late_update(ctx, dt)
            .map_err(|source| EngineError::Phase { phase: Phase::Late, source })?;

        if self.state == LifecycleState::Idle {
            self.state = LifecycleState::Running;
            log::info!("running at {:.1} fixed steps/s", 1.0 / fixed_dt);
        }
        self.ticks += 1;
        log::trace!("tick {}: dt={dt:.4}s steps={steps}", self.ticks);

        Ok(AppControl::Continue)
    }

    fn shutdown<A: App>(
        &mut self,
        app: &mut A,
        ctx: &mut AppCtx<'_>,
        elapsed_seconds: f64,
    ) -> Result<AppControl, EngineError> {
        self.state = LifecycleState::ShuttingDown;
        log::info!("exit requested; shutting down");

        let result = app.shutdown(ctx);
        self.state = LifecycleState::Terminated;

        match result {
            Ok(()) => {
                log::info!(
                    "terminated after {} ticks ({elapsed_seconds:.2}s)",
                    self.ticks
                );
                Ok(AppControl::Exit)
            }
            Err(source) => Err(EngineError::Hook {
                hook: Hook::Shutdown,
                source,
            }),
        }
    }
}

impl Default for UpdateScheduler {
    fn default() -> Self {
        Self {
            state: LifecycleState::Idle,
            started: false,
            max_fixed_steps: Self::DEFAULT_MAX_FIXED_STEPS,
            ticks: 0,
            last_steps: 0,
            dropped_steps: 0,
        }
    }
}
