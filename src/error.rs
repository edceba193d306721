//! # Render Errors
//!
//! Failures that can occur while bringing up the GPU context or while presenting a frame.
//!
//! Setup errors (`CreateSurface`, `NoAdapter`, `RequestDevice`, `UnsupportedSurface`) are
//! fatal: the application logs them and leaves the event loop. Per-frame surface errors
//! that wgpu reports as recoverable (`Lost`, `Outdated`, `Timeout`) never reach this type;
//! the [`Renderer`](crate::Renderer) reconfigures the surface and skips the frame instead.
//! Only running out of memory while acquiring a frame is surfaced as
//! [`RenderError::SurfaceOutOfMemory`].

/// Errors raised by [`Gpu`](crate::Gpu) setup and [`Renderer`](crate::Renderer) frames.
#[derive(Debug, thiserror::Error)]
pub enum RenderError {
    /// The window or canvas could not be turned into a wgpu surface.
    #[error("failed to create rendering surface: {0}")]
    CreateSurface(#[from] wgpu::CreateSurfaceError),

    /// No adapter is able to present to the surface.
    #[error("no compatible graphics adapter found")]
    NoAdapter,

    /// The adapter refused to hand out a device with the requested limits.
    #[error("failed to request graphics device: {0}")]
    RequestDevice(#[from] wgpu::RequestDeviceError),

    /// The surface reported no texture formats at all.
    #[error("surface reports no supported texture formats")]
    UnsupportedSurface,

    #[error("out of memory while acquiring the next surface texture")]
    SurfaceOutOfMemory,
}
