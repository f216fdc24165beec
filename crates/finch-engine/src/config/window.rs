use crate::coords::Size;
use crate::error::EngineError;
use crate::paint::Color;

/// How the user may resize the window.
#[derive(Debug, Copy, Clone, Default, Eq, PartialEq)]
pub enum ResizeMode {
    /// Fixed size; the maximize button is disabled.
    Disabled,
    /// Fixed size, but the platform maximize/fullscreen button stays available.
    OnlyFullscreen,
    #[default]
    Enabled,
}

impl ResizeMode {
    /// Edges can be dragged.
    pub fn user_resizable(self) -> bool {
        self == ResizeMode::Enabled
    }

    pub fn allows_maximize(self) -> bool {
        self != ResizeMode::Disabled
    }
}

/// Window and surface configuration.
#[derive(Debug, Clone, PartialEq)]
pub struct WindowConfig {
    pub title: String,

    /// Initial window size in logical pixels.
    pub width: u32,
    pub height: u32,

    pub resize_mode: ResizeMode,

    /// Multiplier applied to the outer window size to obtain the render size.
    ///
    /// Must be finite and strictly positive; anything else is rejected by
    /// [`validate`](Self::validate).
    pub render_scale: f32,

    pub fullscreen: bool,

    /// Clear the surface to `clear_color` before every draw.
    pub clear_background: bool,
    pub clear_color: Color,
}

impl Default for WindowConfig {
    fn default() -> Self {
        Self {
            title: "Finch Application".to_string(),
            width: 800,
            height: 600,
            resize_mode: ResizeMode::Enabled,
            render_scale: 1.0,
            fullscreen: false,
            clear_background: true,
            clear_color: Color::cornflower_blue(),
        }
    }
}

impl WindowConfig {
    pub fn validate(&self) -> Result<(), EngineError> {
        if self.width == 0 || self.height == 0 {
            return Err(EngineError::config(
                "window width and height must be non-zero positive integers",
            ));
        }
        if !(self.render_scale.is_finite() && self.render_scale > 0.0) {
            return Err(EngineError::config(format!(
                "render scale must be a positive number, got {}",
                self.render_scale
            )));
        }
        if !self.clear_color.is_finite() {
            return Err(EngineError::config("clear color must be finite"));
        }
        Ok(())
    }

    /// Render size for the initial window dimensions.
    pub fn screen_size(&self) -> Size {
        Size::new(self.width as f32, self.height as f32).scaled(self.render_scale)
    }
}
