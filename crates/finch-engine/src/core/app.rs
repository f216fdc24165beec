use anyhow::Result;

use super::ctx::{AppCtx, DrawCtx};

/// Control directive returned to the host runtime after a frame.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum AppControl {
    Continue,
    /// Stop the run loop. Returned once the shutdown hook has run.
    Exit,
}

/// Application contract implemented by higher layers.
///
/// Every method has a no-op default except [`fixed_update`](Self::fixed_update).
/// Any error is fatal for the run: it aborts the remaining phases of the
/// current frame and stops the host loop.
///
/// Per frame the driver calls, in order:
/// 1. `early_update(dt)` once
/// 2. `fixed_update(fixed_dt)` zero or more times
/// 3. `late_update(dt)` once
/// 4. `render(ctx)` once, from the host's draw callback
pub trait App {
    /// Runs once before the host loop starts. A failure aborts `open`.
    fn startup(&mut self, ctx: &mut AppCtx<'_>) -> Result<()> {
        let _ = ctx;
        Ok(())
    }

    /// Runs once, on the first frame after an exit request.
    fn shutdown(&mut self, ctx: &mut AppCtx<'_>) -> Result<()> {
        let _ = ctx;
        Ok(())
    }

    /// Variable-rate phase before the fixed steps (input sampling).
    fn early_update(&mut self, ctx: &mut AppCtx<'_>, dt: f64) -> Result<()> {
        let _ = (ctx, dt);
        Ok(())
    }

    /// Deterministic simulation step; `fixed_dt` is constant for the run.
    fn fixed_update(&mut self, ctx: &mut AppCtx<'_>, fixed_dt: f64) -> Result<()>;

    /// Variable-rate phase after the fixed steps (animation blending, cameras).
    fn late_update(&mut self, ctx: &mut AppCtx<'_>, dt: f64) -> Result<()> {
        let _ = (ctx, dt);
        Ok(())
    }

    /// Draws the current state. `ctx.alpha` blends the last two fixed steps.
    fn render(&mut self, ctx: &mut DrawCtx<'_>) -> Result<()> {
        let _ = ctx;
        Ok(())
    }
}
