use crate::context::GpuContext;
use crate::gpu::{CubeRenderer, Viewport};
use glam::Mat4;
use spincube_core::FrameTarget;

/// Swapchain image acquired for one frame. Present it once all passes
/// (cube, overlay UI) have been submitted.
pub struct SurfaceFrame {
    texture: wgpu::SurfaceTexture,
    view: wgpu::TextureView,
}

impl SurfaceFrame {
    pub fn view(&self) -> &wgpu::TextureView {
        &self.view
    }

    pub fn present(self) {
        self.texture.present();
    }
}

/// [`FrameTarget`] backed by the window surface.
pub struct SurfaceTarget<'a> {
    context: &'a GpuContext,
    renderer: &'a mut CubeRenderer,
    viewport: Viewport,
}

impl<'a> SurfaceTarget<'a> {
    pub fn new(
        context: &'a GpuContext,
        renderer: &'a mut CubeRenderer,
        viewport: Viewport,
    ) -> Self {
        Self {
            context,
            renderer,
            viewport,
        }
    }
}

impl FrameTarget for SurfaceTarget<'_> {
    type Frame = SurfaceFrame;

    fn acquire_frame(&mut self) -> Option<SurfaceFrame> {
        match self.context.surface.get_current_texture() {
            Ok(texture) => {
                let view = texture
                    .texture
                    .create_view(&wgpu::TextureViewDescriptor::default());
                Some(SurfaceFrame { texture, view })
            }
            Err(wgpu::SurfaceError::Lost | wgpu::SurfaceError::Outdated) => {
                // Next callback gets a fresh swapchain.
                self.context.reconfigure();
                None
            }
            Err(e) => {
                tracing::debug!("no drawable this frame: {e}");
                None
            }
        }
    }

    fn draw(&mut self, frame: &SurfaceFrame, mvp: Mat4) {
        self.renderer.draw(
            &self.context.device,
            &self.context.queue,
            frame.view(),
            self.viewport,
            mvp,
        );
    }
}
