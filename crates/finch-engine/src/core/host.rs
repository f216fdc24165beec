use crate::error::EngineError;
use crate::render::Surface;

use super::app::AppControl;

/// Per-frame callback contract between the host runtime and the driver.
///
/// The host calls these synchronously from one thread, never concurrently,
/// typically `layout → update → draw` once per frame (see [`drive_frame`]).
/// Implementations must not call back into the host from inside any of them.
pub trait FrameHandler {
    /// Maps the outer window size to the render size. The host draws at the
    /// returned size.
    fn layout(&mut self, outside_width: u32, outside_height: u32) -> (u32, u32);

    /// Advances the simulation. `Exit` stops the run loop.
    fn update(&mut self) -> Result<AppControl, EngineError>;

    /// Draws the current frame onto `surface`.
    fn draw(&mut self, surface: &mut dyn Surface) -> Result<(), EngineError>;

    /// The user asked the window to close.
    fn request_close(&mut self) {}

    /// The host resumed after a suspension; wall-clock gaps should not be billed.
    fn resumed(&mut self) {}
}

/// Result of [`drive_frame`].
#[derive(Debug)]
pub enum FrameOutcome<S> {
    /// The handler asked to stop; nothing was drawn.
    Exit,
    /// No surface was available this frame.
    Skipped,
    /// Drawn and ready to present.
    Drawn(S),
}

/// Runs one host frame against `handler`.
///
/// `acquire` receives the render size returned by `layout` and yields the
/// surface to draw on, or `None` to skip drawing. Presenting the drawn
/// surface is left to the caller.
pub fn drive_frame<H, S, F>(
    handler: &mut H,
    outside_width: u32,
    outside_height: u32,
    acquire: F,
) -> Result<FrameOutcome<S>, EngineError>
where
    H: FrameHandler + ?Sized,
    S: Surface,
    F: FnOnce((u32, u32)) -> Result<Option<S>, EngineError>,
{
    let render_size = handler.layout(outside_width, outside_height);

    if handler.update()? == AppControl::Exit {
        return Ok(FrameOutcome::Exit);
    }

    let Some(mut surface) = acquire(render_size)? else {
        return Ok(FrameOutcome::Skipped);
    };

    handler.draw(&mut surface)?;
    Ok(FrameOutcome::Drawn(surface))
}
