/// Width/height pair in logical pixels.
#[derive(Debug, Copy, Clone, Default, PartialEq)]
pub struct Size {
    pub width: f32,
    pub height: f32,
}

impl Size {
    #[inline]
    pub const fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }

    /// Scales both dimensions by `factor`.
    #[inline]
    pub fn scaled(self, factor: f32) -> Self {
        Self::new(self.width * factor, self.height * factor)
    }

    /// Truncates to whole pixels, as reported back to the host runtime.
    #[inline]
    pub fn to_pixels(self) -> (u32, u32) {
        (self.width as u32, self.height as u32)
    }

    #[inline]
    pub fn is_valid(self) -> bool {
        self.width > 0.0 && self.height > 0.0 && self.width.is_finite() && self.height.is_finite()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn scaled_multiplies_both_axes() {
        assert_eq!(Size::new(800.0, 600.0).scaled(0.5), Size::new(400.0, 300.0));
    }

    #[test]
    fn to_pixels_truncates() {
        assert_eq!(Size::new(10.9, 3.2).to_pixels(), (10, 3));
    }

    #[test]
    fn zero_size_is_invalid() {
        assert!(!Size::default().is_valid());
        assert!(!Size::new(f32::NAN, 1.0).is_valid());
        assert!(Size::new(1.0, 1.0).is_valid());
    }
}
