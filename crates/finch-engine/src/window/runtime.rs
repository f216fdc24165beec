use anyhow::Context;
use ouroboros::self_referencing;

use winit::application::ApplicationHandler;
use winit::dpi::LogicalSize;
use winit::event::WindowEvent;
use winit::event_loop::{ActiveEventLoop, ControlFlow, EventLoop};
use winit::window::{Fullscreen, Window, WindowButtons, WindowId};

use crate::config::{ResizeMode, WindowConfig};
use crate::core::{AppControl, FrameHandler, FrameOutcome, drive_frame};
use crate::device::{Gpu, GpuInit, GpuSurface};
use crate::error::EngineError;

/// Window/runtime configuration.
#[derive(Debug, Clone)]
pub struct RuntimeConfig {
    pub title: String,
    pub initial_size: LogicalSize<f64>,
    pub resize_mode: ResizeMode,
    pub fullscreen: bool,
}

impl Default for RuntimeConfig {
    fn default() -> Self {
        Self::from(&WindowConfig::default())
    }
}

impl From<&WindowConfig> for RuntimeConfig {
    fn from(window: &WindowConfig) -> Self {
        Self {
            title: window.title.clone(),
            initial_size: LogicalSize::new(f64::from(window.width), f64::from(window.height)),
            resize_mode: window.resize_mode,
            fullscreen: window.fullscreen,
        }
    }
}

/// Entry point for the runtime.
pub struct Runtime;

impl Runtime {
    /// Opens one window and drives `handler` until the loop exits.
    ///
    /// Blocks the calling thread. The first error raised by the handler or the
    /// GPU layer ends the loop and is returned.
    pub fn run<H: FrameHandler>(
        config: RuntimeConfig,
        gpu_init: GpuInit,
        handler: H,
    ) -> Result<(), EngineError> {
        let event_loop = EventLoop::new()
            .context("failed to create winit EventLoop")
            .map_err(EngineError::Host)?;
        let mut state = HostState::new(config, gpu_init, handler);

        event_loop
            .run_app(&mut state)
            .context("winit event loop terminated with error")
            .map_err(EngineError::Host)?;

        state.finish()
    }
}

#[self_referencing]
struct WindowEntry {
    window: Window,

    #[borrows(window)]
    #[covariant]
    gpu: Gpu<'this>,
}

struct HostState<H: FrameHandler> {
    config: RuntimeConfig,
    gpu_init: GpuInit,
    handler: H,

    entry: Option<WindowEntry>,
    error: Option<EngineError>,
}

impl<H: FrameHandler> HostState<H> {
    fn new(config: RuntimeConfig, gpu_init: GpuInit, handler: H) -> Self {
        Self {
            config,
            gpu_init,
            handler,
            entry: None,
            error: None,
        }
    }

    fn finish(mut self) -> Result<(), EngineError> {
        // Release the surface before the window goes away.
        self.entry = None;
        match self.error {
            Some(err) => Err(err),
            None => Ok(()),
        }
    }

    /// Records the first error and stops the loop.
    fn fail(&mut self, event_loop: &ActiveEventLoop, err: EngineError) {
        log::error!("{err}");
        if self.error.is_none() {
            self.error = Some(err);
        }
        event_loop.exit();
    }

    fn create_window_entry(&self, event_loop: &ActiveEventLoop) -> anyhow::Result<WindowEntry> {
        let mut attrs = Window::default_attributes()
            .with_title(self.config.title.clone())
            .with_inner_size(self.config.initial_size)
            .with_resizable(self.config.resize_mode.user_resizable())
            .with_enabled_buttons(window_buttons(self.config.resize_mode));
        if self.config.fullscreen {
            attrs = attrs.with_fullscreen(Some(Fullscreen::Borderless(None)));
        }

        let window = event_loop
            .create_window(attrs)
            .context("failed to create window")?;

        let gpu_init = self.gpu_init.clone();
        WindowEntryTryBuilder {
            window,
            gpu_builder: |w| pollster::block_on(Gpu::new(w, gpu_init)),
        }
        .try_build()
        .context("GPU initialization failed for window")
    }

    fn redraw(&mut self, event_loop: &ActiveEventLoop) {
        let (handler, entry) = (&mut self.handler, &mut self.entry);
        let Some(entry) = entry.as_mut() else {
            return;
        };

        let result = entry.with_mut(|fields| -> Result<AppControl, EngineError> {
            let window: &Window = fields.window;
            let gpu = fields.gpu;

            let logical = window.inner_size().to_logical::<f64>(window.scale_factor());
            let (width, height) = (logical.width.round() as u32, logical.height.round() as u32);

            let outcome = drive_frame(handler, width, height, move |viewport| {
                let gpu = gpu;
                match gpu.acquire() {
                    Ok(Some(frame)) => Ok(Some(GpuSurface::new(gpu, frame, viewport))),
                    Ok(None) => Ok(None),
                    Err(err) => Err(EngineError::Host(err)),
                }
            })?;

            match outcome {
                FrameOutcome::Exit => Ok(AppControl::Exit),
                FrameOutcome::Skipped => Ok(AppControl::Continue),
                FrameOutcome::Drawn(surface) => {
                    window.pre_present_notify();
                    surface.present();
                    Ok(AppControl::Continue)
                }
            }
        });

        match result {
            Ok(AppControl::Continue) => {}
            Ok(AppControl::Exit) => event_loop.exit(),
            Err(err) => self.fail(event_loop, err),
        }
    }
}

impl<H: FrameHandler> ApplicationHandler for HostState<H> {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if let Some(entry) = self.entry.as_ref() {
            self.handler.resumed();
            entry.with_window(|w| w.request_redraw());
            return;
        }

        match self.create_window_entry(event_loop) {
            Ok(entry) => {
                entry.with_window(|w| w.request_redraw());
                self.entry = Some(entry);
            }
            Err(err) => self.fail(event_loop, EngineError::Host(err)),
        }
    }

    fn about_to_wait(&mut self, event_loop: &ActiveEventLoop) {
        event_loop.set_control_flow(ControlFlow::Wait);

        // Continuous redraw; the frame clock decides how much simulation runs.
        if let Some(entry) = self.entry.as_ref() {
            entry.with_window(|w| w.request_redraw());
        }
    }

    fn window_event(
        &mut self,
        event_loop: &ActiveEventLoop,
        _window_id: WindowId,
        event: WindowEvent,
    ) {
        match event {
            WindowEvent::CloseRequested => {
                // Shutdown runs on the next update; keep the loop alive until then.
                self.handler.request_close();
                if let Some(entry) = self.entry.as_ref() {
                    entry.with_window(|w| w.request_redraw());
                }
            }

            WindowEvent::Resized(new_size) => {
                if let Some(entry) = self.entry.as_mut() {
                    entry.with_gpu_mut(|gpu| gpu.resize(new_size));
                    entry.with_window(|w| w.request_redraw());
                }
            }

            WindowEvent::ScaleFactorChanged { .. } => {
                if let Some(entry) = self.entry.as_mut() {
                    let new_size = entry.with_window(|w| w.inner_size());
                    entry.with_gpu_mut(|gpu| gpu.resize(new_size));
                    entry.with_window(|w| w.request_redraw());
                }
            }

            WindowEvent::RedrawRequested => self.redraw(event_loop),

            _ => {}
        }
    }
}

fn window_buttons(mode: ResizeMode) -> WindowButtons {
    if mode.allows_maximize() {
        WindowButtons::all()
    } else {
        WindowButtons::CLOSE | WindowButtons::MINIMIZE
    }
}
