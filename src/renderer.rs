//! # Renderer
//!
//! The `renderer` module turns the scene and the debug overlay into presented frames.
//!
//! ## Overview
//!
//! A [`Renderer`] owns:
//!
//! - The [`Gpu`] context (surface, device, queue).
//! - A depth texture sized to the surface.
//! - The `egui_wgpu` renderer that paints the overlay.
//! - The [`Scene`] holding the wave plane and its camera.
//!
//! Each call to [`Renderer::render_frame`]:
//!
//! 1. Writes this frame's uniforms through [`Scene::update`].
//! 2. Uploads overlay textures and buffers.
//! 3. Acquires the next surface texture, clears color and depth, draws the wave plane and then
//!    the overlay in a single render pass.
//! 4. Submits the commands and presents.
//!
//! ## Surface Errors
//!
//! | Error | Handling |
//! |---|---|
//! | `Lost`, `Outdated` | reconfigure the surface and skip the frame |
//! | `Timeout` | skip the frame |
//! | `OutOfMemory` | return [`RenderError::SurfaceOutOfMemory`] |

// Visual constants the scene is composed from.
use crate::config::SceneConfig;

// Setup and frame failures reported to the application shell.
use crate::error::RenderError;

// Surface, device and queue. The renderer owns the only `Gpu` in the application.
use crate::gpu::Gpu;

// The wave plane with its pipeline, uniforms and orbit camera.
use crate::scene::Scene;

/// Renders the wave scene and overlay into a window surface.
pub struct Renderer {
    /// GPU context the renderer draws with.
    gpu: Gpu,

    /// Depth attachment matching the current surface size.
    depth_texture_view: wgpu::TextureView,

    /// Paints the egui overlay on top of the scene.
    egui_renderer: egui_wgpu::Renderer,

    /// The wave plane, its material and camera.
    scene: Scene,
}

impl Renderer {
    /// Format of the depth attachment shared by the scene pipeline and the overlay.
    pub const DEPTH_FORMAT: wgpu::TextureFormat = wgpu::TextureFormat::Depth32Float;

    /// Creates the GPU context for `window` and composes the scene from `config`.
    ///
    /// # Errors
    ///
    /// Propagates any [`RenderError`] raised while bringing up the [`Gpu`].
    pub async fn new(
        window: impl Into<wgpu::SurfaceTarget<'static>>,
        width: u32,
        height: u32,
        config: &SceneConfig,
    ) -> Result<Self, RenderError> {
        let gpu = Gpu::new_async(window, width, height).await?;
        let depth_texture_view =
            gpu.create_depth_texture(gpu.surface_config.width, gpu.surface_config.height);

        let egui_renderer = egui_wgpu::Renderer::new(
            &gpu.device,
            gpu.surface_config.format,
            Some(Self::DEPTH_FORMAT),
            1,
            false,
        );

        let scene = Scene::new(&gpu.device, gpu.surface_format, config);

        Ok(Self {
            gpu,
            depth_texture_view,
            egui_renderer,
            scene,
        })
    }

    /// Resizes the surface and depth texture. Zero-sized requests (minimised windows) are ignored.
    ///
    /// # Parameters
    ///
    /// - `width`: New width in physical pixels.
    /// - `height`: New height in physical pixels.
    pub fn resize(&mut self, width: u32, height: u32) {
        if width == 0 || height == 0 {
            log::debug!("Ignoring resize to empty surface ({width}, {height})");
            return;
        }
        self.gpu.resize(width, height);
        self.depth_texture_view = self.gpu.create_depth_texture(width, height);
    }

    /// The scene, for reading camera and palette state.
    pub fn scene(&self) -> &Scene {
        &self.scene
    }

    /// The scene, for steering the camera from input.
    pub fn scene_mut(&mut self) -> &mut Scene {
        &mut self.scene
    }

    /// Renders and presents one frame.
    ///
    /// # Parameters
    ///
    /// - `screen_descriptor`: Size and scale of the surface, for the overlay.
    /// - `paint_jobs`: Tessellated overlay shapes.
    /// - `textures_delta`: Overlay textures to upload or free.
    /// - `elapsed`: Animation time in seconds, passed to the wave shader.
    ///
    /// # Errors
    ///
    /// Returns [`RenderError::SurfaceOutOfMemory`] if the next surface texture cannot be
    /// allocated. Other surface errors skip the frame and return `Ok`.
    pub fn render_frame(
        &mut self,
        screen_descriptor: egui_wgpu::ScreenDescriptor,
        paint_jobs: Vec<egui::epaint::ClippedPrimitive>,
        textures_delta: egui::TexturesDelta,
        elapsed: f32,
    ) -> Result<(), RenderError> {
        self.scene
            .update(&self.gpu.queue, self.gpu.aspect_ratio(), elapsed);

        for (id, image_delta) in &textures_delta.set {
            self.egui_renderer
                .update_texture(&self.gpu.device, &self.gpu.queue, *id, image_delta);
        }

        for id in &textures_delta.free {
            self.egui_renderer.free_texture(id);
        }

        let mut encoder = self
            .gpu
            .device
            .create_command_encoder(&wgpu::CommandEncoderDescriptor {
                label: Some("Render Encoder"),
            });

        self.egui_renderer.update_buffers(
            &self.gpu.device,
            &self.gpu.queue,
            &mut encoder,
            &paint_jobs,
            &screen_descriptor,
        );

        let surface_texture = match self.gpu.surface.get_current_texture() {
            Ok(surface_texture) => surface_texture,
            Err(wgpu::SurfaceError::Lost | wgpu::SurfaceError::Outdated) => {
                log::warn!("Surface lost or outdated, reconfiguring");
                self.gpu.reconfigure();
                return Ok(());
            }
            Err(wgpu::SurfaceError::OutOfMemory) => return Err(RenderError::SurfaceOutOfMemory),
            Err(error) => {
                log::warn!("Skipping frame: {error}");
                return Ok(());
            }
        };

        let surface_texture_view =
            surface_texture
                .texture
                .create_view(&wgpu::TextureViewDescriptor {
                    label: wgpu::Label::default(),
                    aspect: wgpu::TextureAspect::default(),
                    format: Some(self.gpu.surface_format),
                    dimension: None,
                    base_mip_level: 0,
                    mip_level_count: None,
                    base_array_layer: 0,
                    array_layer_count: None,
                    usage: None,
                });

        encoder.insert_debug_marker("Render wave scene");

        {
            let mut render_pass = encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
                label: Some("Wave Render Pass"),
                color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                    view: &surface_texture_view,
                    resolve_target: None,
                    ops: wgpu::Operations {
                        load: wgpu::LoadOp::Clear(self.scene.clear_color),
                        store: wgpu::StoreOp::Store,
                    },
                })],
                depth_stencil_attachment: Some(wgpu::RenderPassDepthStencilAttachment {
                    view: &self.depth_texture_view,
                    depth_ops: Some(wgpu::Operations {
                        load: wgpu::LoadOp::Clear(1.0),
                        store: wgpu::StoreOp::Store,
                    }),
                    stencil_ops: None,
                }),
                timestamp_writes: None,
                occlusion_query_set: None,
            });

            self.scene.render(&mut render_pass);

            self.egui_renderer.render(
                &mut render_pass.forget_lifetime(),
                &paint_jobs,
                &screen_descriptor,
            );
        }

        self.gpu.queue.submit(std::iter::once(encoder.finish()));
        surface_texture.present();
        Ok(())
    }
}
