//! # Uniform Binding
//!
//! GPU-side home of [`WaveUniforms`]: the buffer that stores them, plus the bind group and
//! layout that expose that buffer to the shader at `@group(0) @binding(0)`.
//!
//! Only the vertex stage reads the uniforms; the fragment stage receives everything it needs
//! through interpolated vertex outputs.
//!
//! ## Usage
//!
//! ```rust,ignore
//! let mut uniform = UniformBinding::new(&device);
//!
//! // Once per frame
//! uniform.update_buffer(&queue, 0, WaveUniforms::new(view_proj, &palette, time));
//!
//! // While recording the draw
//! render_pass.set_bind_group(0, &uniform.bind_group, &[]);
//! ```

use crate::uniform_buffer::WaveUniforms;

/// The wave uniform buffer together with its bind group and layout.
pub struct UniformBinding {
    /// GPU buffer holding one [`WaveUniforms`], writable from the CPU.
    pub buffer: wgpu::Buffer,

    /// Binds [`Self::buffer`] to slot 0 of group 0.
    pub bind_group: wgpu::BindGroup,

    /// Layout the render pipeline is created with.
    pub bind_group_layout: wgpu::BindGroupLayout,
}

impl UniformBinding {
    /// Creates the buffer, initialised with [`WaveUniforms::default`], and its bind group.
    pub fn new(device: &wgpu::Device) -> Self {
        let buffer = wgpu::util::DeviceExt::create_buffer_init(
            device,
            &wgpu::util::BufferInitDescriptor {
                label: Some("Wave Uniform Buffer"),
                contents: bytemuck::cast_slice(&[WaveUniforms::default()]),
                usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
            },
        );

        let bind_group_layout = device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
            entries: &[wgpu::BindGroupLayoutEntry {
                binding: 0,
                visibility: wgpu::ShaderStages::VERTEX,
                ty: wgpu::BindingType::Buffer {
                    ty: wgpu::BufferBindingType::Uniform,
                    has_dynamic_offset: false,
                    min_binding_size: wgpu::BufferSize::new(
                        std::mem::size_of::<WaveUniforms>() as wgpu::BufferAddress,
                    ),
                },
                count: None,
            }],
            label: Some("wave_uniform_bind_group_layout"),
        });

        let bind_group = device.create_bind_group(&wgpu::BindGroupDescriptor {
            layout: &bind_group_layout,
            entries: &[wgpu::BindGroupEntry {
                binding: 0,
                resource: buffer.as_entire_binding(),
            }],
            label: Some("wave_uniform_bind_group"),
        });

        Self {
            buffer,
            bind_group,
            bind_group_layout,
        }
    }

    /// Queues a write of `uniforms` at `offset` bytes into the buffer.
    ///
    /// The write becomes visible to the GPU with the next queue submission, so calling this
    /// before encoding the frame's render pass is enough.
    pub fn update_buffer(
        &mut self,
        queue: &wgpu::Queue,
        offset: wgpu::BufferAddress,
        uniforms: WaveUniforms,
    ) {
        queue.write_buffer(&self.buffer, offset, bytemuck::cast_slice(&[uniforms]))
    }
}
