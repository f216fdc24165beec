//! Command-line launch flow.
//!
//! `LaunchArgs` is meant to be `#[command(flatten)]`-ed into a binary's own
//! clap parser. [`launch`] applies it on top of an [`AppConfig`], resolves
//! paths, loads the resource manifest and opens the window.

use std::path::PathBuf;

use clap::Args;

use crate::config::{AppConfig, ResourcesConfig};
use crate::core::{App, ApplicationDriver};
use crate::error::EngineError;
use crate::paint::Color;
use crate::resources::Manifest;

/// Launch-time overrides for [`AppConfig`].
#[derive(Debug, Clone, Default, Args)]
pub struct LaunchArgs {
    /// Application root directory; resource paths resolve against it.
    #[arg(long, value_name = "DIR")]
    pub root: Option<PathBuf>,

    /// Initial window width in logical pixels.
    #[arg(long, value_name = "PX")]
    pub window_width: Option<u32>,

    /// Initial window height in logical pixels.
    #[arg(long, value_name = "PX")]
    pub window_height: Option<u32>,

    /// Open a borderless fullscreen window.
    #[arg(long)]
    pub fullscreen: bool,

    /// Resource directory, relative to the root.
    #[arg(long, value_name = "DIR")]
    pub resources_path: Option<PathBuf>,

    /// Manifest file name inside the resource directory.
    #[arg(long, value_name = "FILE")]
    pub manifest_name: Option<String>,

    /// Fixed simulation steps per second.
    #[arg(long, value_name = "FPS")]
    pub target_fps: Option<u32>,

    /// Background clear color as `#rrggbb` or `#rrggbbaa`.
    #[arg(long, value_name = "HEX", value_parser = parse_color)]
    pub clear_color: Option<Color>,
}

fn parse_color(value: &str) -> Result<Color, String> {
    Color::from_hex(value).ok_or_else(|| format!("`{value}` is not a #rrggbb or #rrggbbaa color"))
}

impl LaunchArgs {
    /// Overwrites every field of `config` that was given on the command line.
    pub fn apply(&self, config: &mut AppConfig) {
        if let Some(root) = &self.root {
            config.metadata.root = root.clone();
        }
        if let Some(width) = self.window_width {
            config.window.width = width;
        }
        if let Some(height) = self.window_height {
            config.window.height = height;
        }
        if self.fullscreen {
            config.window.fullscreen = true;
        }
        if let Some(fps) = self.target_fps {
            config.timing.target_fps = fps;
        }
        if let Some(color) = self.clear_color {
            config.window.clear_color = color;
            config.window.clear_background = true;
        }

        if self.resources_path.is_some() || self.manifest_name.is_some() {
            let resources = config.resources.get_or_insert_with(ResourcesConfig::default);
            if let Some(path) = &self.resources_path {
                resources.path = path.clone();
            }
            if let Some(name) = &self.manifest_name {
                resources.manifest_name = name.clone();
            }
        }
    }
}

/// Configuration ready to hand to the driver.
#[derive(Debug)]
pub struct Prepared {
    pub config: AppConfig,
    /// `None` when resources are disabled or the manifest file is absent.
    pub manifest: Option<Manifest>,
}

/// Applies `args`, validates, resolves paths and loads the manifest.
pub fn prepare(mut config: AppConfig, args: &LaunchArgs) -> Result<Prepared, EngineError> {
    args.apply(&mut config);

    let root = std::path::absolute(&config.metadata.root).map_err(|err| {
        EngineError::config(format!(
            "cannot resolve application root {}: {err}",
            config.metadata.root.display()
        ))
    })?;
    config.metadata.root = root;

    config.validate()?;

    let mut manifest = None;
    if let Some(resources) = config.resources.as_mut() {
        resources.path = config.metadata.root.join(&resources.path);
        if resources.manifest_name.is_empty() {
            resources.manifest_name = ResourcesConfig::DEFAULT_MANIFEST.to_string();
        }

        let manifest_path = resources.manifest_path();
        if manifest_path.is_file() {
            let loaded = Manifest::load(&manifest_path)?;
            log::info!(
                "loaded {} resource entries from {}",
                loaded.len(),
                manifest_path.display()
            );
            manifest = Some(loaded);
        } else {
            log::warn!("no resource manifest at {}", manifest_path.display());
        }
    }

    Ok(Prepared { config, manifest })
}

/// Prepares `config`, builds the driver and runs it until the app exits.
pub fn launch<A: App>(config: AppConfig, args: &LaunchArgs, app: A) -> Result<(), EngineError> {
    let Prepared { config, manifest } = prepare(config, args)?;

    let mut driver = ApplicationDriver::new(config, app)?;
    if let Some(manifest) = manifest {
        driver.resources_mut().set_manifest(manifest);
    }

    driver.open()
}
