use crate::paint::Color;

/// GPU handles for one acquired frame.
pub struct RenderTarget<'a> {
    pub device: &'a wgpu::Device,
    pub queue: &'a wgpu::Queue,
    pub format: wgpu::TextureFormat,
    pub encoder: &'a mut wgpu::CommandEncoder,
    /// Swapchain view at the window's physical resolution.
    pub color_view: &'a wgpu::TextureView,
    /// Physical size of `color_view`.
    pub physical_size: (u32, u32),
    /// Render size from layout; map it onto `physical_size` when drawing.
    pub viewport: (u32, u32),
}

/// A frame being drawn.
pub trait Surface {
    /// Render size in pixels, as returned by the driver's layout.
    fn size(&self) -> (u32, u32);

    /// Fills the whole surface with `color`.
    fn clear(&mut self, color: Color);

    /// Raw GPU access. `None` for surfaces without a GPU behind them.
    fn target(&mut self) -> Option<RenderTarget<'_>> {
        None
    }
}
