use crate::config::AppConfig;
use crate::coords::Size;
use crate::device::GpuInit;
use crate::error::EngineError;
use crate::events::{MessageBus, ResizeEvent};
use crate::render::Surface;
use crate::resources::ResourceCache;
use crate::time::{FrameClock, MonotonicTime, TimeSource};
use crate::window::{Runtime, RuntimeConfig};

use super::app::{App, AppControl};
use super::ctx::{AppCtx, DrawCtx, QuitHandle};
use super::host::FrameHandler;
use super::scheduler::{LifecycleState, UpdateScheduler};

/// Adapts an [`App`] to the host runtime's per-frame callbacks.
///
/// Owns the frame clock, the update scheduler, the resource cache and the
/// resize bus. Everything runs on the thread that calls [`open`](Self::open);
/// the driver is `!Send`.
///
/// Re-entrancy: nothing reachable from `update`, `draw` or a resize
/// subscriber can call back into the driver, because subscribers only ever
/// see a clone of the bus.
pub struct ApplicationDriver<A, T = MonotonicTime>
where
    A: App,
    T: TimeSource,
{
    config: AppConfig,
    app: A,
    clock: FrameClock<T>,
    scheduler: UpdateScheduler,
    resources: ResourceCache,
    resize: MessageBus<ResizeEvent>,
    quit: QuitHandle,
    active: Size,
    gpu_init: GpuInit,
}

impl<A: App> ApplicationDriver<A> {
    /// Validates `config` and builds a wall-clock driven driver.
    pub fn new(config: AppConfig, app: A) -> Result<Self, EngineError> {
        Self::with_time_source(config, app, MonotonicTime::new())
    }
}

impl<A, T> ApplicationDriver<A, T>
where
    A: App,
    T: TimeSource,
{
    /// Like [`new`](ApplicationDriver::new) but sampling `source` for time.
    pub fn with_time_source(config: AppConfig, app: A, source: T) -> Result<Self, EngineError> {
        config.validate()?;

        let clock = FrameClock::with_source(config.timing.target_fps, source)?;
        let scheduler = UpdateScheduler::new(config.timing.max_fixed_steps)?;

        let resource_root = match &config.resources {
            Some(res) => config.metadata.root.join(&res.path),
            None => config.metadata.root.clone(),
        };

        Ok(Self {
            config,
            app,
            clock,
            scheduler,
            resources: ResourceCache::new(resource_root),
            resize: MessageBus::new(),
            quit: QuitHandle::new(),
            active: Size::default(),
            gpu_init: GpuInit::default(),
        })
    }

    /// Overrides the GPU initialization parameters used by [`open`](Self::open).
    pub fn with_gpu_init(mut self, gpu_init: GpuInit) -> Self {
        self.gpu_init = gpu_init;
        self
    }

    pub fn config(&self) -> &AppConfig {
        &self.config
    }

    pub fn app(&self) -> &A {
        &self.app
    }

    pub fn app_mut(&mut self) -> &mut A {
        &mut self.app
    }

    pub fn clock(&self) -> &FrameClock<T> {
        &self.clock
    }

    pub fn scheduler(&self) -> &UpdateScheduler {
        &self.scheduler
    }

    pub fn state(&self) -> LifecycleState {
        self.scheduler.state()
    }

    pub fn resources(&self) -> &ResourceCache {
        &self.resources
    }

    pub fn resources_mut(&mut self) -> &mut ResourceCache {
        &mut self.resources
    }

    /// Bus carrying [`ResizeEvent`]s. The returned handle shares subscribers
    /// with the driver.
    pub fn resize_events(&self) -> MessageBus<ResizeEvent> {
        self.resize.clone()
    }

    pub fn quit_handle(&self) -> QuitHandle {
        self.quit.clone()
    }

    /// Current render size; zero until the first layout.
    pub fn screen_size(&self) -> Size {
        self.active
    }

    /// Requests a cooperative exit. The shutdown hook runs at the start of
    /// the next frame; the frame in progress completes normally.
    pub fn quit(&self) {
        self.quit.request();
    }

    /// Runs the startup hook.
    ///
    /// [`open`](Self::open) calls this; headless hosts that drive the
    /// [`FrameHandler`] methods themselves must call it first.
    pub fn startup(&mut self) -> Result<(), EngineError> {
        let Self {
            config,
            app,
            scheduler,
            resources,
            resize,
            quit,
            active,
            ..
        } = self;

        let mut ctx = AppCtx::new(config, resources, *active, resize, quit);
        scheduler.startup(app, &mut ctx)
    }

    /// Runs the startup hook, then blocks in the winit/wgpu host runtime until
    /// the app exits or fails.
    pub fn open(mut self) -> Result<(), EngineError> {
        log::info!(
            "opening {} {} ({}x{} @ {} fixed steps/s)",
            self.config.metadata.name,
            self.config.metadata.version,
            self.config.window.width,
            self.config.window.height,
            self.config.timing.target_fps,
        );

        self.startup()?;

        let runtime_config = RuntimeConfig::from(&self.config.window);
        let gpu_init = self.gpu_init.clone();
        Runtime::run(runtime_config, gpu_init, self)
    }
}

impl<A, T> FrameHandler for ApplicationDriver<A, T>
where
    A: App,
    T: TimeSource,
{
    fn layout(&mut self, outside_width: u32, outside_height: u32) -> (u32, u32) {
        let next = Size::new(outside_width as f32, outside_height as f32)
            .scaled(self.config.window.render_scale);

        if next != self.active {
            let event = ResizeEvent {
                from: self.active,
                to: next,
            };
            self.active = next;

            log::debug!(
                "render size {}x{} -> {}x{}",
                event.from.width,
                event.from.height,
                event.to.width,
                event.to.height
            );
            self.resize.publish(event);
        }

        next.to_pixels()
    }

    fn update(&mut self) -> Result<AppControl, EngineError> {
        let Self {
            config,
            app,
            clock,
            scheduler,
            resources,
            resize,
            quit,
            active,
            ..
        } = self;

        let mut ctx = AppCtx::new(config, resources, *active, resize, quit);
        scheduler.tick(clock, app, &mut ctx)
    }

    fn draw(&mut self, surface: &mut dyn Surface) -> Result<(), EngineError> {
        if self.scheduler.state() == LifecycleState::Terminated {
            return Ok(());
        }

        let window = &self.config.window;
        if window.clear_background {
            surface.clear(window.clear_color);
        }

        let alpha = self.clock.interpolation();
        let mut ctx = DrawCtx::new(
            surface,
            alpha,
            self.active,
            &self.config,
            &mut self.resources,
            &self.quit,
        );

        self.app.render(&mut ctx).map_err(EngineError::Render)
    }

    fn request_close(&mut self) {
        log::info!("close requested by host");
        self.quit();
    }

    fn resumed(&mut self) {
        self.clock.reset();
    }
}
