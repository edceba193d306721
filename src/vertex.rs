//! # Vertex Module
//!
//! This module provides the `Vertex` struct used by the wave plane's vertex buffer, together with
//! the buffer layout that tells wgpu how to feed it to `vertex_main`.
//!
//! # Overview
//!
//! ## Structs
//!
//! - [`Vertex`]: A point of the plane grid, with its rest position and its UV coordinate.
//!
//! ## Methods
//!
//! - [`Vertex::vertex_attributes`]: Returns the vertex attributes layout supported by the `Vertex` struct.
//! - [`Vertex::description`]: Returns the high-level memory layout for vertex data to be provided to the GPU.
//!
//! The vertex carries no color: the shader derives color from the UV coordinate and time, so
//! the same buffer is reused unchanged for every frame.
//!
//! # Crate Dependencies
//!
//! This module depends on the following crates:
//! - `wgpu` for the GPU attributes and layouts.
//! - `bytemuck` for safe and efficient conversion of structs for GPU usage.

/// A single vertex of the wave plane.
///
/// # Fields
///
/// - `position`: Rest position of the vertex in world space. The plane lies in the `xy` plane,
///   so `z` is `0.0` for every generated vertex; the shader adds the wave height on top.
/// - `uv`: Parametric coordinate over the plane, in `[0, 1]²`. `u` grows with `x`, `v` grows
///   with `y`.
///
/// # Memory Layout
///
/// `#[repr(C)]` plus `bytemuck::Pod` gives a tightly packed 20-byte vertex that can be cast
/// straight into a byte slice for `create_buffer_init`.
///
/// ```rust
/// use wave_plane::Vertex;
///
/// let vertex = Vertex {
///     position: [0.0, 0.0, 0.0],
///     uv: [0.5, 0.5],
/// };
/// assert_eq!(bytemuck::bytes_of(&vertex).len(), 20);
/// ```
#[repr(C)]
#[derive(Copy, Clone, Debug, PartialEq, bytemuck::Pod, bytemuck::Zeroable)]
pub struct Vertex {
    /// Rest position `[x, y, z]`.
    pub position: [f32; 3],

    /// Surface coordinate `[u, v]`.
    pub uv: [f32; 2],
}

impl Vertex {
    /// Generates the vertex attributes layout for the `Vertex` struct.
    ///
    /// # Returns
    ///
    /// - Location `0`: `position`, as `Float32x3`.
    /// - Location `1`: `uv`, as `Float32x2`.
    ///
    /// The locations must match the `VertexInput` struct in `wave.wgsl`.
    pub fn vertex_attributes() -> Vec<wgpu::VertexAttribute> {
        wgpu::vertex_attr_array![0 => Float32x3, 1 => Float32x2].to_vec()
    }

    /// Returns the vertex buffer layout for the `Vertex` struct.
    ///
    /// The stride is the size of one `Vertex` and the buffer advances once per vertex.
    pub fn description(attributes: &[wgpu::VertexAttribute]) -> wgpu::VertexBufferLayout<'_> {
        wgpu::VertexBufferLayout {
            array_stride: std::mem::size_of::<Vertex>() as wgpu::BufferAddress,
            step_mode: wgpu::VertexStepMode::Vertex,
            attributes,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn layout_matches_struct() {
        let attributes = Vertex::vertex_attributes();
        let layout = Vertex::description(&attributes);
        assert_eq!(layout.array_stride, 20);
        assert_eq!(attributes.len(), 2);
        assert_eq!(attributes[0].offset, 0);
        assert_eq!(attributes[0].shader_location, 0);
        assert_eq!(attributes[1].offset, 12);
        assert_eq!(attributes[1].shader_location, 1);
    }
}
