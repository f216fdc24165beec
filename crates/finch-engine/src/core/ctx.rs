use std::cell::Cell;
use std::rc::Rc;

use crate::config::AppConfig;
use crate::coords::Size;
use crate::events::{MessageBus, ResizeEvent};
use crate::render::Surface;
use crate::resources::ResourceCache;

/// Shared exit flag.
///
/// Setting it never interrupts anything; the scheduler checks it at the top of
/// the next frame and runs the shutdown hook there.
#[derive(Debug, Clone, Default)]
pub struct QuitHandle(Rc<Cell<bool>>);

impl QuitHandle {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn request(&self) {
        self.0.set(true);
    }

    pub fn is_requested(&self) -> bool {
        self.0.get()
    }
}

/// Context passed to lifecycle hooks and update phases.
pub struct AppCtx<'a> {
    pub config: &'a AppConfig,
    pub resources: &'a mut ResourceCache,
    /// Current render size (after render scaling).
    pub screen: Size,
    resize: &'a MessageBus<ResizeEvent>,
    quit: &'a QuitHandle,
}

impl<'a> AppCtx<'a> {
    pub(crate) fn new(
        config: &'a AppConfig,
        resources: &'a mut ResourceCache,
        screen: Size,
        resize: &'a MessageBus<ResizeEvent>,
        quit: &'a QuitHandle,
    ) -> Self {
        Self {
            config,
            resources,
            screen,
            resize,
            quit,
        }
    }

    /// Bus the driver publishes resize events on. Clone it to keep a handle.
    pub fn resize_events(&self) -> &MessageBus<ResizeEvent> {
        self.resize
    }

    /// Requests a cooperative exit at the start of the next frame.
    pub fn quit(&self) {
        self.quit.request();
    }

    pub fn quit_handle(&self) -> QuitHandle {
        self.quit.clone()
    }

    pub fn is_quitting(&self) -> bool {
        self.quit.is_requested()
    }
}

/// Context passed to [`App::render`](super::App::render).
pub struct DrawCtx<'a> {
    pub surface: &'a mut dyn Surface,
    /// Interpolation factor in `[0, 1]` between the last fixed step and the next.
    pub alpha: f64,
    pub screen: Size,
    pub config: &'a AppConfig,
    pub resources: &'a mut ResourceCache,
    quit: &'a QuitHandle,
}

impl<'a> DrawCtx<'a> {
    pub(crate) fn new(
        surface: &'a mut dyn Surface,
        alpha: f64,
        screen: Size,
        config: &'a AppConfig,
        resources: &'a mut ResourceCache,
        quit: &'a QuitHandle,
    ) -> Self {
        Self {
            surface,
            alpha,
            screen,
            config,
            resources,
            quit,
        }
    }

    pub fn quit(&self) {
        self.quit.request();
    }
}
