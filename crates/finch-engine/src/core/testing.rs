//! Test doubles shared by the scheduler and driver tests.

use std::cell::RefCell;
use std::rc::Rc;

use anyhow::{Result, bail};

use crate::paint::Color;
use crate::render::Surface;

use super::app::App;
use super::ctx::{AppCtx, DrawCtx};

/// Records every hook invocation; can be told to fail at specific points.
#[derive(Default)]
pub(crate) struct RecordingApp {
    pub log: Rc<RefCell<Vec<String>>>,
    pub fixed_dts: Rc<RefCell<Vec<f64>>>,
    pub alphas: Rc<RefCell<Vec<f64>>>,
    /// `(surface.size(), screen.to_pixels())` seen by each render.
    pub drawn_sizes: Rc<RefCell<Vec<((u32, u32), (u32, u32))>>>,
    /// 1-based index of the fixed_update call (over the whole run) that fails.
    pub fail_fixed_at: Option<usize>,
    pub fail_early: bool,
    pub fail_startup: bool,
    pub fail_shutdown: bool,
    pub fail_render: bool,
    /// Request an exit from inside late_update.
    pub quit_in_late: bool,
    pub fixed_calls: usize,
}

impl RecordingApp {
    pub fn entries(&self) -> Vec<String> {
        self.log.borrow().clone()
    }

    pub fn count(&self, what: &str) -> usize {
        self.log.borrow().iter().filter(|e| *e == what).count()
    }

    pub fn clear_log(&self) {
        self.log.borrow_mut().clear();
    }

    fn push(&self, what: &str) {
        self.log.borrow_mut().push(what.to_string());
    }
}

impl App for RecordingApp {
    fn startup(&mut self, _ctx: &mut AppCtx<'_>) -> Result<()> {
        self.push("startup");
        if self.fail_startup {
            bail!("startup refused");
        }
        Ok(())
    }

    fn shutdown(&mut self, _ctx: &mut AppCtx<'_>) -> Result<()> {
        self.push("shutdown");
        if self.fail_shutdown {
            bail!("shutdown refused");
        }
        Ok(())
    }

    fn early_update(&mut self, _ctx: &mut AppCtx<'_>, _dt: f64) -> Result<()> {
        self.push("early");
        if self.fail_early {
            bail!("early refused");
        }
        Ok(())
    }

    fn fixed_update(&mut self, _ctx: &mut AppCtx<'_>, fixed_dt: f64) -> Result<()> {
        self.fixed_calls += 1;
        self.push("fixed");
        self.fixed_dts.borrow_mut().push(fixed_dt);
        if self.fail_fixed_at == Some(self.fixed_calls) {
            bail!("fixed step {} refused", self.fixed_calls);
        }
        Ok(())
    }

    fn late_update(&mut self, ctx: &mut AppCtx<'_>, _dt: f64) -> Result<()> {
        self.push("late");
        if self.quit_in_late {
            ctx.quit();
        }
        Ok(())
    }

    fn render(&mut self, ctx: &mut DrawCtx<'_>) -> Result<()> {
        self.push("render");
        self.alphas.borrow_mut().push(ctx.alpha);
        self.drawn_sizes
            .borrow_mut()
            .push((ctx.surface.size(), ctx.screen.to_pixels()));
        if self.fail_render {
            bail!("render refused");
        }
        Ok(())
    }
}

/// Surface that only records clears.
pub(crate) struct RecordingSurface {
    pub size: (u32, u32),
    pub clears: Vec<Color>,
}

impl RecordingSurface {
    pub fn sized(size: (u32, u32)) -> Self {
        Self {
            size,
            clears: Vec::new(),
        }
    }
}

impl Default for RecordingSurface {
    fn default() -> Self {
        Self::sized((800, 600))
    }
}

impl Surface for RecordingSurface {
    fn size(&self) -> (u32, u32) {
        self.size
    }

    fn clear(&mut self, color: Color) {
        self.clears.push(color);
    }
}
