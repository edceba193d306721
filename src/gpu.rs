//! # GPU Management Module
//!
//! The `gpu` module sets up and owns the wgpu objects every frame depends on: the surface the
//! wave is presented to, the device and queue resources are created and submitted on, and the
//! surface configuration.
//!
//! ## Overview
//!
//! [`Gpu::new_async`] walks the usual wgpu bring-up:
//!
//! 1. Create an instance and a surface for the window (or canvas on the web).
//! 2. Request an adapter that can present to that surface.
//! 3. Request a device and queue. WebGL builds ask for downlevel limits.
//! 4. Pick a surface format and configure the surface.
//!
//! Each step that can fail returns a [`RenderError`] instead of panicking, so the application
//! can log the cause and shut down cleanly.
//!
//! ## Surface Format
//!
//! A non-sRGB format is preferred. The palette colors are written to the framebuffer exactly as
//! authored, with no linear-to-sRGB encoding on store, and egui also expects a non-sRGB target.
//!
//! ## Presentation
//!
//! The surface uses [`wgpu::PresentMode::AutoVsync`], so presenting a frame waits for the next
//! display refresh. That wait is what paces the render loop.

// `InstanceDescriptor` selects the backends the wgpu instance may use. The default lets wgpu
// pick Vulkan, Metal, DX12 or GL natively, and WebGPU or WebGL in the browser depending on the
// enabled feature.
use wgpu::InstanceDescriptor;

// Every fallible step of the bring-up maps onto one `RenderError` variant.
use crate::error::RenderError;

/// Surface, device and queue for rendering into one window.
pub struct Gpu {
    /// The presentable surface backed by the window or canvas.
    pub surface: wgpu::Surface<'static>,

    /// Logical device used to create buffers, textures and pipelines.
    pub device: wgpu::Device,

    /// Queue that command buffers and buffer writes are submitted to.
    pub queue: wgpu::Queue,

    /// Current surface configuration; width and height track the window size.
    pub surface_config: wgpu::SurfaceConfiguration,

    /// Texture format of the surface, also used as the pipeline's color target format.
    pub surface_format: wgpu::TextureFormat,
}

impl Gpu {
    /// Width over height of the surface. A zero height is treated as one pixel.
    ///
    /// # Returns
    ///
    /// The aspect ratio passed to the camera's projection matrix.
    pub fn aspect_ratio(&self) -> f32 {
        self.surface_config.width as f32 / self.surface_config.height.max(1) as f32
    }

    /// Reconfigures the surface for a new size in physical pixels.
    ///
    /// # Parameters
    ///
    /// - `width`: New surface width. Callers skip zero sizes.
    /// - `height`: New surface height. Callers skip zero sizes.
    pub fn resize(&mut self, width: u32, height: u32) {
        self.surface_config.width = width;
        self.surface_config.height = height;
        self.reconfigure();
    }

    /// Applies the current configuration again, e.g. after the surface was lost.
    pub fn reconfigure(&mut self) {
        self.surface.configure(&self.device, &self.surface_config);
    }

    /// Creates a depth texture view of the given size in [`Renderer::DEPTH_FORMAT`](crate::Renderer::DEPTH_FORMAT).
    ///
    /// # Parameters
    ///
    /// - `width`, `height`: Size in physical pixels. Must match the surface the depth texture is
    ///   attached alongside.
    ///
    /// # Returns
    ///
    /// A view over the whole texture, ready to use as a depth-stencil attachment. The texture
    /// itself stays alive as long as the view does.
    pub fn create_depth_texture(&self, width: u32, height: u32) -> wgpu::TextureView {
        let texture = self.device.create_texture(
            &(wgpu::TextureDescriptor {
                label: Some("Depth Texture"),
                size: wgpu::Extent3d {
                    width,
                    height,
                    depth_or_array_layers: 1,
                },
                mip_level_count: 1,
                sample_count: 1,
                dimension: wgpu::TextureDimension::D2,
                format: crate::Renderer::DEPTH_FORMAT,
                usage: wgpu::TextureUsages::RENDER_ATTACHMENT
                    | wgpu::TextureUsages::TEXTURE_BINDING,
                view_formats: &[],
            }),
        );
        texture.create_view(&wgpu::TextureViewDescriptor {
            label: Some("Depth Texture View"),
            format: Some(crate::Renderer::DEPTH_FORMAT),
            dimension: Some(wgpu::TextureViewDimension::D2),
            aspect: wgpu::TextureAspect::All,
            base_mip_level: 0,
            base_array_layer: 0,
            array_layer_count: None,
            mip_level_count: None,
            usage: None,
        })
    }

    /// Brings up the GPU for `window` with an initial surface size of `width` × `height`.
    ///
    /// # Errors
    ///
    /// - [`RenderError::CreateSurface`] if the window cannot back a surface.
    /// - [`RenderError::NoAdapter`] if no adapter can present to it.
    /// - [`RenderError::RequestDevice`] if the adapter rejects the device request.
    /// - [`RenderError::UnsupportedSurface`] if the surface lists no formats.
    pub async fn new_async(
        window: impl Into<wgpu::SurfaceTarget<'static>>,
        width: u32,
        height: u32,
    ) -> Result<Self, RenderError> {
        let instance = wgpu::Instance::new(&InstanceDescriptor::default());
        let surface = instance.create_surface(window)?;

        let adapter = instance
            .request_adapter(&wgpu::RequestAdapterOptions {
                power_preference: wgpu::PowerPreference::default(),
                compatible_surface: Some(&surface),
                force_fallback_adapter: false,
            })
            .await
            .ok_or(RenderError::NoAdapter)?;

        let info = adapter.get_info();
        log::info!("Using adapter {} ({:?})", info.name, info.backend);

        let (device, queue) = adapter
            .request_device(
                &wgpu::DeviceDescriptor {
                    label: Some("Wave Device"),
                    memory_hints: wgpu::MemoryHints::default(),
                    required_features: wgpu::Features::default(),
                    #[cfg(not(target_arch = "wasm32"))]
                    required_limits: wgpu::Limits::default().using_resolution(adapter.limits()),
                    #[cfg(all(target_arch = "wasm32", not(feature = "webgl")))]
                    required_limits: wgpu::Limits::default().using_resolution(adapter.limits()),
                    #[cfg(all(target_arch = "wasm32", feature = "webgl"))]
                    required_limits: wgpu::Limits::downlevel_webgl2_defaults()
                        .using_resolution(adapter.limits()),
                },
                None,
            )
            .await?;

        let surface_capabilities = surface.get_capabilities(&adapter);
        let surface_format = surface_capabilities
            .formats
            .iter()
            .copied()
            .find(|format| !format.is_srgb())
            .or_else(|| surface_capabilities.formats.first().copied())
            .ok_or(RenderError::UnsupportedSurface)?;
        log::info!("Surface format: {surface_format:?}");

        let surface_config = wgpu::SurfaceConfiguration {
            usage: wgpu::TextureUsages::RENDER_ATTACHMENT,
            format: surface_format,
            width: width.max(1),
            height: height.max(1),
            present_mode: wgpu::PresentMode::AutoVsync,
            alpha_mode: surface_capabilities
                .alpha_modes
                .first()
                .copied()
                .unwrap_or(wgpu::CompositeAlphaMode::Auto),
            view_formats: vec![],
            desired_maximum_frame_latency: 2,
        };
        surface.configure(&device, &surface_config);

        Ok(Self {
            surface,
            device,
            queue,
            surface_config,
            surface_format,
        })
    }
}
