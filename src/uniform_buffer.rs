//! # Uniform Buffer
//!
//! This module defines `WaveUniforms`, the block of per-frame values the wave shader reads from
//! its uniform binding.
//!
//! ## Overview
//!
//! The vertex stage needs three inputs that are constant across a draw call:
//!
//! - **View-projection matrix**: maps the displaced plane from world space to clip space. The
//!   plane's model transform is the identity, so no separate model matrix is uploaded.
//! - **Palette**: the five colors, each padded to a `vec4` because uniform arrays in WGSL use a
//!   16-byte element stride.
//! - **Time**: elapsed seconds from the [`AnimationClock`](crate::AnimationClock).
//!
//! ## Memory Layout
//!
//! The struct mirrors `WaveUniforms` in `wave.wgsl` byte for byte:
//!
//! | Field | Offset | Size |
//! |---|---|---|
//! | `view_proj` | 0 | 64 |
//! | `palette` | 64 | 80 |
//! | `time` | 144 | 4 |
//! | padding | 148 | 12 |
//!
//! WGSL rounds a uniform struct up to its 16-byte alignment, hence the trailing padding and the
//! 160-byte total.
//!
//! - `#[repr(C)]`: Ensures the struct uses a C-compatible memory layout that matches the GPU's expectations.
//! - `bytemuck::Pod` and `bytemuck::Zeroable`: Allow for safe and efficient conversion of the struct to raw bytes
//!   without introducing undefined behavior.

use crate::palette::{Palette, PALETTE_LEN};

/// Per-frame shader inputs, laid out for a WGSL uniform buffer.
#[repr(C)]
#[derive(Debug, Copy, Clone, bytemuck::Pod, bytemuck::Zeroable)]
pub struct WaveUniforms {
    /// Combined projection and view transform.
    pub view_proj: nalgebra_glm::Mat4,

    /// Palette colors as `[r, g, b, 1.0]`, in blend order.
    pub palette: [[f32; 4]; PALETTE_LEN],

    /// Elapsed animation time in seconds.
    pub time: f32,

    _padding: [f32; 3],
}

impl WaveUniforms {
    pub fn new(view_proj: nalgebra_glm::Mat4, palette: &Palette, time: f32) -> Self {
        Self {
            view_proj,
            palette: palette.to_uniform(),
            time,
            _padding: [0.0; 3],
        }
    }
}

impl Default for WaveUniforms {
    fn default() -> Self {
        Self::new(nalgebra_glm::Mat4::identity(), &Palette::default(), 0.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn matches_wgsl_layout() {
        assert_eq!(std::mem::size_of::<WaveUniforms>(), 160);
        assert_eq!(std::mem::offset_of!(WaveUniforms, view_proj), 0);
        assert_eq!(std::mem::offset_of!(WaveUniforms, palette), 64);
        assert_eq!(std::mem::offset_of!(WaveUniforms, time), 144);
    }

    #[test]
    fn time_lands_at_its_byte_offset() {
        let uniforms = WaveUniforms::new(nalgebra_glm::Mat4::identity(), &Palette::default(), 2.5);
        let bytes = bytemuck::bytes_of(&uniforms);
        let time = f32::from_le_bytes([bytes[144], bytes[145], bytes[146], bytes[147]]);
        assert_eq!(time, 2.5);
    }

    #[test]
    fn all_five_palette_entries_are_uploaded() {
        let uniforms = WaveUniforms::default();
        assert_eq!(uniforms.palette, Palette::default().to_uniform());
    }
}
