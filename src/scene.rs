//! # Scene
//!
//! The `scene` module composes the one thing the application draws: the wave plane, viewed
//! through an orbit camera.
//!
//! ## Overview
//!
//! [`Scene::new`] is evaluated once at startup and builds:
//!
//! - The plane mesh ([`PlaneGeometry`]) and its vertex and index buffers.
//! - The wave material: the `wave.wgsl` shader module, the [`UniformBinding`] holding
//!   [`WaveUniforms`], and the render pipeline tying them together.
//! - The [`OrbitCamera`] in its initial pose.
//!
//! Nothing in the scene changes shape after that. Each frame [`Scene::update`] writes the new
//! view-projection matrix and elapsed time into the uniform buffer, and [`Scene::render`] records
//! a single indexed draw.
//!
//! ## Example Usage
//! ```rust,ignore
//! let mut scene = Scene::new(&device, surface_format, &SceneConfig::default());
//!
//! // Every frame
//! scene.update(&queue, aspect_ratio, clock.tick());
//! let mut render_pass = encoder.begin_render_pass(&render_pass_descriptor);
//! scene.render(&mut render_pass);
//! ```
//!
//! ## Pipeline State
//!
//! The pipeline draws an indexed triangle list with counter-clockwise front faces and culls back
//! faces, so the surface is visible from above (`+z`). Depth testing uses
//! [`Renderer::DEPTH_FORMAT`] with `Less`, and the color target replaces the framebuffer
//! contents without blending: the surface is fully opaque.

// The camera the view-projection matrix is taken from each frame.
use crate::camera::OrbitCamera;

// Plane size, camera start, palette and clear color.
use crate::config::SceneConfig;

// Colors uploaded with every uniform write.
use crate::palette::Palette;

// Grid vertices and indices for the wave surface.
use crate::plane::PlaneGeometry;

// Provides `DEPTH_FORMAT` so the pipeline matches the renderer's depth attachment.
use crate::renderer::Renderer;

// Uniform buffer, bind group and layout exposed to the vertex stage.
use crate::uniform_binding::UniformBinding;

// CPU-side layout of the shader uniforms.
use crate::uniform_buffer::WaveUniforms;

// Vertex struct and its buffer layout.
use crate::vertex::Vertex;

// WGSL source of the wave vertex and fragment stages.
use crate::SHADER_SOURCE;

/// The wave plane with its material and camera.
pub struct Scene {
    /// The orbit camera the plane is viewed through.
    pub camera: OrbitCamera,

    /// Colors uploaded to the shader each frame.
    pub palette: Palette,

    /// Color the frame is cleared to before the plane is drawn.
    pub clear_color: wgpu::Color,

    /// Rest positions and UVs of the plane grid.
    pub vertex_buffer: wgpu::Buffer,

    /// Triangle-list indices into [`Self::vertex_buffer`].
    pub index_buffer: wgpu::Buffer,

    /// Number of indices in [`Self::index_buffer`].
    pub index_count: u32,

    /// The wave uniforms and their bind group.
    pub uniform: UniformBinding,

    /// Render pipeline compiled from `wave.wgsl`.
    pub pipeline: wgpu::RenderPipeline,
}

impl Scene {
    /// Builds the plane, material and camera described by `config`.
    ///
    /// # Parameters
    ///
    /// - `device`: Device the buffers and pipeline are created on.
    /// - `surface_format`: Format of the color attachment the pipeline renders into.
    /// - `config`: Plane dimensions, camera rig and palette.
    pub fn new(
        device: &wgpu::Device,
        surface_format: wgpu::TextureFormat,
        config: &SceneConfig,
    ) -> Self {
        let geometry = PlaneGeometry::new(&config.plane);

        let vertex_buffer = wgpu::util::DeviceExt::create_buffer_init(
            device,
            &wgpu::util::BufferInitDescriptor {
                label: Some("Wave Plane Vertex Buffer"),
                contents: bytemuck::cast_slice(geometry.vertices()),
                usage: wgpu::BufferUsages::VERTEX,
            },
        );

        let index_buffer = wgpu::util::DeviceExt::create_buffer_init(
            device,
            &wgpu::util::BufferInitDescriptor {
                label: Some("Wave Plane Index Buffer"),
                contents: bytemuck::cast_slice(geometry.indices()),
                usage: wgpu::BufferUsages::INDEX,
            },
        );

        let uniform = UniformBinding::new(device);
        let pipeline = Self::create_pipeline(device, surface_format, &uniform);

        log::info!(
            "Scene ready: {}x{} plane, {} vertices",
            config.plane.width_segments,
            config.plane.height_segments,
            geometry.vertices().len()
        );

        Self {
            camera: OrbitCamera::new(&config.camera),
            palette: config.palette,
            clear_color: config.clear_color,
            vertex_buffer,
            index_buffer,
            index_count: geometry.index_count(),
            uniform,
            pipeline,
        }
    }

    /// Records the draw of the wave plane into `renderpass`.
    pub fn render<'rpass>(&'rpass self, renderpass: &mut wgpu::RenderPass<'rpass>) {
        renderpass.set_pipeline(&self.pipeline);
        renderpass.set_bind_group(0, &self.uniform.bind_group, &[]);
        renderpass.set_vertex_buffer(0, self.vertex_buffer.slice(..));
        renderpass.set_index_buffer(self.index_buffer.slice(..), wgpu::IndexFormat::Uint32);
        renderpass.draw_indexed(0..self.index_count, 0, 0..1);
    }

    /// Uploads this frame's uniforms.
    ///
    /// # Parameters
    ///
    /// - `queue`: Queue used to write the uniform buffer.
    /// - `aspect_ratio`: Width over height of the render target.
    /// - `elapsed`: Seconds since the animation started.
    pub fn update(&mut self, queue: &wgpu::Queue, aspect_ratio: f32, elapsed: f32) {
        let view_proj = self.camera.view_projection(aspect_ratio);
        self.uniform
            .update_buffer(queue, 0, WaveUniforms::new(view_proj, &self.palette, elapsed));
    }

    fn create_pipeline(
        device: &wgpu::Device,
        surface_format: wgpu::TextureFormat,
        uniform: &UniformBinding,
    ) -> wgpu::RenderPipeline {
        let shader_module = device.create_shader_module(wgpu::ShaderModuleDescriptor {
            label: Some("Wave Shader"),
            source: wgpu::ShaderSource::Wgsl(std::borrow::Cow::Borrowed(SHADER_SOURCE)),
        });

        let pipeline_layout = device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
            label: Some("Wave Pipeline Layout"),
            bind_group_layouts: &[&uniform.bind_group_layout],
            push_constant_ranges: &[],
        });

        device.create_render_pipeline(&wgpu::RenderPipelineDescriptor {
            label: Some("Wave Pipeline"),
            layout: Some(&pipeline_layout),
            vertex: wgpu::VertexState {
                module: &shader_module,
                entry_point: Some("vertex_main"),
                buffers: &[Vertex::description(&Vertex::vertex_attributes())],
                compilation_options: Default::default(),
            },
            primitive: wgpu::PrimitiveState {
                topology: wgpu::PrimitiveTopology::TriangleList,
                strip_index_format: None,
                front_face: wgpu::FrontFace::Ccw,
                cull_mode: Some(wgpu::Face::Back),
                polygon_mode: wgpu::PolygonMode::Fill,
                conservative: false,
                unclipped_depth: false,
            },
            depth_stencil: Some(wgpu::DepthStencilState {
                format: Renderer::DEPTH_FORMAT,
                depth_write_enabled: true,
                depth_compare: wgpu::CompareFunction::Less,
                stencil: wgpu::StencilState::default(),
                bias: wgpu::DepthBiasState::default(),
            }),
            multisample: wgpu::MultisampleState {
                count: 1,
                mask: !0,
                alpha_to_coverage_enabled: false,
            },
            fragment: Some(wgpu::FragmentState {
                module: &shader_module,
                entry_point: Some("fragment_main"),
                targets: &[Some(wgpu::ColorTargetState {
                    format: surface_format,
                    blend: Some(wgpu::BlendState::REPLACE), // Opaque surface.
                    write_mask: wgpu::ColorWrites::ALL,
                })],
                compilation_options: Default::default(),
            }),
            multiview: None,
            cache: None,
        })
    }
}
