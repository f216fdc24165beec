use std::cell::Cell;
use std::rc::Rc;

use anyhow::Result;
use clap::Parser;

use finch_engine::config::{AppConfig, ResourcesConfig};
use finch_engine::coords::Size;
use finch_engine::launch::{LaunchArgs, launch};
use finch_engine::logging::{LoggingConfig, init_logging};
use finch_engine::paint::Color;
use finch_engine::{App, AppCtx, DrawCtx};

#[derive(Parser)]
#[command(name = "finch-demo", version, about = "Bouncing-body demo for the finch engine")]
struct Cli {
    #[command(flatten)]
    launch: LaunchArgs,

    /// Log filter in env_logger syntax, e.g. "finch_engine=debug".
    #[arg(long, value_name = "FILTER")]
    log: Option<String>,

    /// Exit on its own after this many seconds.
    #[arg(long, value_name = "SECS")]
    seconds: Option<f64>,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    init_logging(LoggingConfig {
        env_filter: cli.log.clone(),
        ..LoggingConfig::default()
    });

    let mut config = AppConfig::default();
    config.metadata.name = "Finch Demo".to_string();
    config.window.title = "finch demo".to_string();
    // The body's position tints the whole frame; render clears by itself.
    config.window.clear_background = false;
    config.resources = Some(ResourcesConfig::default());

    launch(config, &cli.launch, Bouncer::new(cli.seconds))?;
    Ok(())
}

/// One point bouncing inside the render area.
struct Bouncer {
    pos: [f64; 2],
    prev: [f64; 2],
    vel: [f64; 2],
    bounds: Rc<Cell<Size>>,
    elapsed: f64,
    run_for: Option<f64>,
}

impl Bouncer {
    fn new(run_for: Option<f64>) -> Self {
        Self {
            pos: [40.0, 60.0],
            prev: [40.0, 60.0],
            vel: [220.0, 160.0],
            bounds: Rc::new(Cell::new(Size::default())),
            elapsed: 0.0,
            run_for,
        }
    }
}

impl App for Bouncer {
    fn startup(&mut self, ctx: &mut AppCtx<'_>) -> Result<()> {
        self.bounds.set(ctx.config.window.screen_size());

        let bounds = Rc::clone(&self.bounds);
        ctx.resize_events().subscribe(move |event| {
            log::info!("play area is now {}x{}", event.to.width, event.to.height);
            bounds.set(event.to);
        });

        let entries = ctx.resources.manifest().map_or(0, |m| m.len());
        log::info!("demo started with {entries} manifest entries");
        Ok(())
    }

    fn shutdown(&mut self, _ctx: &mut AppCtx<'_>) -> Result<()> {
        log::info!("demo ran for {:.2}s", self.elapsed);
        Ok(())
    }

    fn early_update(&mut self, ctx: &mut AppCtx<'_>, dt: f64) -> Result<()> {
        self.elapsed += dt;
        if self.run_for.is_some_and(|limit| self.elapsed >= limit) {
            ctx.quit();
        }
        Ok(())
    }

    fn fixed_update(&mut self, _ctx: &mut AppCtx<'_>, fixed_dt: f64) -> Result<()> {
        self.prev = self.pos;

        let bounds = self.bounds.get();
        let limits = [f64::from(bounds.width), f64::from(bounds.height)];
        for axis in 0..2 {
            let (pos, vel) = step_axis(self.pos[axis], self.vel[axis], fixed_dt, limits[axis]);
            self.pos[axis] = pos;
            self.vel[axis] = vel;
        }
        Ok(())
    }

    fn render(&mut self, ctx: &mut DrawCtx<'_>) -> Result<()> {
        let x = lerp(self.prev[0], self.pos[0], ctx.alpha);
        let y = lerp(self.prev[1], self.pos[1], ctx.alpha);

        if !ctx.screen.is_valid() {
            ctx.surface.clear(Color::black());
            return Ok(());
        }
        let (w, h) = (f64::from(ctx.screen.width), f64::from(ctx.screen.height));

        let tint = Color::new((x / w) as f32, (y / h) as f32, 0.45, 1.0).clamped();
        ctx.surface.clear(tint);
        Ok(())
    }
}

/// Advances one axis and reflects off `[0, limit]`. A non-positive limit
/// means the play area is unknown; the body moves freely.
fn step_axis(pos: f64, vel: f64, dt: f64, limit: f64) -> (f64, f64) {
    let next = pos + vel * dt;
    if limit <= 0.0 {
        return (next, vel);
    }
    if next < 0.0 {
        (-next, -vel)
    } else if next > limit {
        (2.0 * limit - next, -vel)
    } else {
        (next, vel)
    }
}

fn lerp(a: f64, b: f64, t: f64) -> f64 {
    a + (b - a) * t
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn body_reflects_off_far_edge() {
        let (pos, vel) = step_axis(95.0, 100.0, 0.1, 100.0);
        assert!((pos - 95.0).abs() < 1e-9);
        assert_eq!(vel, -100.0);
    }

    #[test]
    fn body_reflects_off_origin() {
        let (pos, vel) = step_axis(2.0, -50.0, 0.1, 100.0);
        assert!((pos - 3.0).abs() < 1e-9);
        assert_eq!(vel, 50.0);
    }

    #[test]
    fn unknown_bounds_do_not_bounce() {
        assert_eq!(step_axis(0.0, -10.0, 1.0, 0.0), (-10.0, -10.0));
    }

    #[test]
    fn cli_accepts_engine_flags() {
        let cli = Cli::try_parse_from(["finch-demo", "--target-fps", "60", "--seconds", "2.5"])
            .unwrap();
        assert_eq!(cli.launch.target_fps, Some(60));
        assert_eq!(cli.seconds, Some(2.5));
    }
}
