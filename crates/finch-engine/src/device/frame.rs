use crate::paint::Color;
use crate::render::{RenderTarget, Surface};

use super::gpu::{Gpu, GpuFrame};

/// [`Surface`] over one acquired swapchain frame.
///
/// Reports the render size it was acquired for, not the swapchain's
/// physical size.
pub struct GpuSurface<'a, 'w> {
    gpu: &'a Gpu<'w>,
    frame: GpuFrame,
    viewport: (u32, u32),
}

impl<'a, 'w> GpuSurface<'a, 'w> {
    pub fn new(gpu: &'a Gpu<'w>, frame: GpuFrame, viewport: (u32, u32)) -> Self {
        Self {
            gpu,
            frame,
            viewport,
        }
    }

    /// Submits recorded commands and presents the frame.
    pub fn present(self) {
        self.gpu.submit(self.frame);
    }
}

impl Surface for GpuSurface<'_, '_> {
    fn size(&self) -> (u32, u32) {
        self.viewport
    }

    fn clear(&mut self, color: Color) {
        let _rpass = self
            .frame
            .encoder
            .begin_render_pass(&wgpu::RenderPassDescriptor {
                label: Some("finch clear"),
                color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                    view: &self.frame.view,
                    resolve_target: None,
                    ops: wgpu::Operations {
                        load: wgpu::LoadOp::Clear(color.to_wgpu()),
                        store: wgpu::StoreOp::Store,
                    },
                    depth_slice: None,
                })],
                depth_stencil_attachment: None,
                timestamp_writes: None,
                occlusion_query_set: None,
                multiview_mask: None,
            });
    }

    fn target(&mut self) -> Option<RenderTarget<'_>> {
        let physical = self.gpu.size();
        Some(RenderTarget {
            device: self.gpu.device(),
            queue: self.gpu.queue(),
            format: self.gpu.surface_format(),
            encoder: &mut self.frame.encoder,
            color_view: &self.frame.view,
            physical_size: (physical.width, physical.height),
            viewport: self.viewport,
        })
    }
}
