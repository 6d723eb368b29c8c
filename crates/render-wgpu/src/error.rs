/// Errors from GPU setup and resource loading.
///
/// Frame-time failures are not errors: an unavailable drawable skips the frame.
#[derive(Debug, thiserror::Error)]
pub enum RenderError {
    #[error("failed to create surface: {0}")]
    Surface(#[from] wgpu::CreateSurfaceError),
    #[error("no compatible GPU adapter found")]
    AdapterNotFound,
    #[error("failed to create device: {0}")]
    Device(#[from] wgpu::RequestDeviceError),
    #[error("surface reports no supported formats")]
    NoSurfaceFormat,
    #[error("texture decode error: {0}")]
    Image(#[from] image::ImageError),
    #[error("texture is {width}x{height}, device limit is {max}")]
    TextureTooLarge { width: u32, height: u32, max: u32 },
    #[error("texture has zero size")]
    EmptyTexture,
}
