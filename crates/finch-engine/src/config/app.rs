use std::path::PathBuf;

use crate::error::EngineError;

use super::window::WindowConfig;

/// Descriptive application metadata.
#[derive(Debug, Clone, PartialEq)]
pub struct Metadata {
    pub name: String,
    pub version: String,
    /// Application root; resource paths are resolved against it.
    pub root: PathBuf,
}

impl Default for Metadata {
    fn default() -> Self {
        Self {
            name: "Finch".to_string(),
            version: "1.0.0".to_string(),
            root: PathBuf::from("."),
        }
    }
}

/// Simulation cadence.
#[derive(Debug, Clone, PartialEq)]
pub struct TimingConfig {
    /// Fixed simulation steps per second.
    pub target_fps: u32,
    /// Upper bound on fixed steps run in a single frame. Debt beyond it is dropped.
    pub max_fixed_steps: u32,
}

impl Default for TimingConfig {
    fn default() -> Self {
        Self {
            target_fps: 30,
            max_fixed_steps: 5,
        }
    }
}

impl TimingConfig {
    pub fn validate(&self) -> Result<(), EngineError> {
        if self.target_fps == 0 {
            return Err(EngineError::config("target fps must be greater than 0"));
        }
        if self.max_fixed_steps == 0 {
            return Err(EngineError::config("max fixed steps must be greater than 0"));
        }
        Ok(())
    }
}

/// Location of the resource directory and its manifest.
#[derive(Debug, Clone, PartialEq)]
pub struct ResourcesConfig {
    /// Resource directory, relative to [`Metadata::root`] unless absolute.
    pub path: PathBuf,
    /// Manifest file name inside `path`. Empty means `manifest.json`.
    pub manifest_name: String,
}

impl ResourcesConfig {
    pub const DEFAULT_MANIFEST: &'static str = "manifest.json";

    pub fn manifest_name(&self) -> &str {
        if self.manifest_name.is_empty() {
            Self::DEFAULT_MANIFEST
        } else {
            &self.manifest_name
        }
    }

    pub fn manifest_path(&self) -> PathBuf {
        self.path.join(self.manifest_name())
    }
}

impl Default for ResourcesConfig {
    fn default() -> Self {
        Self {
            path: PathBuf::from("resources"),
            manifest_name: Self::DEFAULT_MANIFEST.to_string(),
        }
    }
}

/// Full application configuration consumed by
/// [`ApplicationDriver`](crate::core::ApplicationDriver).
#[derive(Debug, Clone, Default, PartialEq)]
pub struct AppConfig {
    pub metadata: Metadata,
    pub timing: TimingConfig,
    pub window: WindowConfig,
    /// `None` disables manifest loading.
    pub resources: Option<ResourcesConfig>,
}

impl AppConfig {
    pub fn validate(&self) -> Result<(), EngineError> {
        self.timing.validate()?;
        self.window.validate()?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_reference_values() {
        let cfg = AppConfig::default();
        assert_eq!(cfg.metadata.name, "Finch");
        assert_eq!(cfg.timing.target_fps, 30);
        assert_eq!(cfg.timing.max_fixed_steps, 5);
        assert_eq!((cfg.window.width, cfg.window.height), (800, 600));
        cfg.validate().unwrap();
    }

    #[test]
    fn zero_target_fps_is_rejected() {
        let mut cfg = AppConfig::default();
        cfg.timing.target_fps = 0;
        assert!(matches!(cfg.validate(), Err(EngineError::Configuration(_))));
    }

    #[test]
    fn zero_step_cap_is_rejected() {
        let mut cfg = AppConfig::default();
        cfg.timing.max_fixed_steps = 0;
        assert!(cfg.validate().is_err());
    }

    #[test]
    fn empty_manifest_name_falls_back() {
        let res = ResourcesConfig {
            path: PathBuf::from("assets"),
            manifest_name: String::new(),
        };
        assert_eq!(res.manifest_path(), PathBuf::from("assets").join("manifest.json"));
    }
}
