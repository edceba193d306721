//! # Wave Surface
//!
//! CPU reference of the per-vertex work done by `vertex_main` in `wave.wgsl`.
//!
//! Every function here mirrors a step of the vertex shader with the same constants and the same
//! order of operations, so tests and the debug overlay can evaluate the surface without reading
//! anything back from the GPU.
//!
//! ## Displacement
//!
//! The plane is lifted along `z` by three static bias terms that depend only on the UV
//! coordinate, plus twice a simplex noise sample that drifts with time:
//!
//! ```text
//! noise_coord = uv * (6, 8)
//! tilt        = -1.5 * uv.y
//! incline     = 5 * uv.x
//! offset      = incline * mix(2.0, 2.75, uv.y)
//! primary     = snoise3(noise_coord.x + 0.03 t, noise_coord.y, 0.1 t)
//! z'          = z + 2 * primary + tilt + incline + offset
//! ```
//!
//! ## Color
//!
//! Three noise layers blend the first three palette entries in order, starting from black:
//!
//! ```text
//! color = mix(color, palette[i], snoise3(...layer i...))   for i in 0..3
//! ```
//!
//! The blend weight is the raw noise value and is not clamped, so it can leave `[0, 1]` and
//! push the color past either end of the interpolation. Palette entries 3 and 4 never enter the
//! blend.

use nalgebra_glm as glm;

use crate::noise::snoise3;
use crate::palette::Palette;

/// Scale from UV space into noise space.
pub const NOISE_SCALE: [f32; 2] = [6.0, 8.0];

/// Amplitude of the primary noise applied to `z`.
pub const DISPLACEMENT_AMPLITUDE: f32 = 2.0;

/// Shader `mix`: `x * (1 - a) + y * a`, with `a` left unclamped.
pub fn mix<T>(x: T, y: T, a: f32) -> T
where
    T: std::ops::Mul<f32, Output = T> + std::ops::Add<Output = T>,
{
    x * (1.0 - a) + y * a
}

/// Maps a UV coordinate into the noise domain.
pub fn noise_coord(uv: glm::Vec2) -> glm::Vec2 {
    uv.component_mul(&glm::vec2(NOISE_SCALE[0], NOISE_SCALE[1]))
}

/// The static, time-independent part of the displacement.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BiasTerms {
    /// Linear slope along `v`.
    pub tilt: f32,
    /// Linear slope along `u`.
    pub incline: f32,
    /// The incline again, scaled by `mix(2.0, 2.75, v)`.
    pub offset: f32,
}

impl BiasTerms {
    /// Total height the three terms add to a vertex.
    pub fn sum(&self) -> f32 {
        self.tilt + self.incline + self.offset
    }
}

/// Computes the static slope terms for the vertex at `uv`.
///
/// # Returns
///
/// A [`BiasTerms`] with `tilt = -1.5 * v`, `incline = 5 * u` and
/// `offset = incline * mix(2.0, 2.75, v)`. None of them depend on time, so the surface leans
/// upward towards `u = 1` and the noise rides on top of that slope.
pub fn bias_terms(uv: glm::Vec2) -> BiasTerms {
    let tilt = -1.5 * uv.y;
    let incline = uv.x * 5.0;
    let offset = incline * mix(2.0, 2.75, uv.y);
    BiasTerms {
        tilt,
        incline,
        offset,
    }
}

/// The time-dependent noise sample that drives the displacement.
pub fn primary_noise(uv: glm::Vec2, time: f32) -> f32 {
    let coord = noise_coord(uv);
    snoise3(glm::vec3(coord.x + time * 0.03, coord.y, time * 0.1))
}

/// Displaces a plane vertex. `x` and `y` pass through; only `z` moves.
pub fn displace(position: glm::Vec3, uv: glm::Vec2, time: f32) -> glm::Vec3 {
    let bias = bias_terms(uv);
    let noise = primary_noise(uv, time);
    glm::vec3(
        position.x,
        position.y,
        position.z + noise * DISPLACEMENT_AMPLITUDE + bias.tilt + bias.incline + bias.offset,
    )
}

/// Coefficients of one color noise layer.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ColorLayer {
    /// Horizontal drift per second.
    pub flow: f32,
    /// Speed through the third noise dimension.
    pub speed: f32,
    /// Offset in the third noise dimension, decorrelating the layers.
    pub seed: f32,
    /// Frequency scale applied to the noise coordinate.
    pub freq: [f32; 2],
}

impl ColorLayer {
    /// Number of layers, one per blended palette entry.
    pub const COUNT: usize = Palette::BLENDED;

    /// Coefficients of layer `index`.
    ///
    /// # Parameters
    ///
    /// - `index`: Layer number, counting from zero. Layer `i` blends towards palette entry `i`.
    ///
    /// # Returns
    ///
    /// `flow = 0.01 + 0.04 i`, `speed = 0.01 + 0.001 i`, `seed = 1 + 12 i` and `freq = (0.5, 1)`.
    pub fn nth(index: usize) -> Self {
        let i = index as f32;
        Self {
            flow: 0.01 + i * 0.04,
            speed: 0.01 + i * 0.001,
            seed: 1.0 + i * 12.0,
            freq: [0.5, 1.0],
        }
    }

    /// The blend weight this layer contributes at `uv` and `time`.
    pub fn weight(&self, uv: glm::Vec2, time: f32) -> f32 {
        let coord = noise_coord(uv);
        snoise3(glm::vec3(
            coord.x * self.freq[0] + time * self.flow,
            coord.y * self.freq[1],
            time * self.speed + self.seed,
        ))
    }
}

/// Blends the palette over the three color layers, starting from black.
pub fn blend_color(uv: glm::Vec2, time: f32, palette: &Palette) -> glm::Vec3 {
    (0..ColorLayer::COUNT).fold(glm::Vec3::zeros(), |color, index| {
        let weight = ColorLayer::nth(index).weight(uv, time);
        mix(color, palette.color(index), weight)
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPSILON: f32 = 1.0e-5;

    fn assert_close(actual: f32, expected: f32) {
        assert!(
            (actual - expected).abs() <= EPSILON,
            "expected {expected}, got {actual}"
        );
    }

    #[test]
    fn origin_corner_has_no_bias() {
        let bias = bias_terms(glm::vec2(0.0, 0.0));
        assert_eq!(bias.sum(), 0.0);

        for time in [0.0, 1.0, 17.5, 600.0] {
            let displaced = displace(glm::Vec3::zeros(), glm::vec2(0.0, 0.0), time);
            let expected = 2.0 * snoise3(glm::vec3(time * 0.03, 0.0, time * 0.1));
            assert_eq!(displaced.z, expected);
        }
    }

    #[test]
    fn plane_center_at_time_zero() {
        let uv = glm::vec2(0.5, 0.5);
        assert_eq!(noise_coord(uv), glm::vec2(3.0, 4.0));

        let bias = bias_terms(uv);
        assert_close(bias.tilt, -0.75);
        assert_close(bias.incline, 2.5);
        assert_close(bias.offset, 5.9375);

        let z0 = 1.25;
        let displaced = displace(glm::vec3(0.0, 0.0, z0), uv, 0.0);
        let noise = snoise3(glm::vec3(3.0, 4.0, 0.0));
        assert_close(displaced.z, z0 + 2.0 * noise - 0.75 + 2.5 + 5.9375);
    }

    #[test]
    fn plane_center_height_matches_reference_noise() {
        // 2 * 0.1440858 - 0.75 + 2.5 + 5.9375
        let displaced = displace(glm::vec3(0.0, 0.0, 0.0), glm::vec2(0.5, 0.5), 0.0);
        assert!(
            (displaced.z - 7.975_671_6).abs() < 1.0e-4,
            "centre height {}",
            displaced.z
        );
    }

    #[test]
    fn displacement_only_moves_z() {
        let position = glm::vec3(-12.5, 7.0, 0.0);
        for (u, v) in [(0.1, 0.9), (0.75, 0.25), (1.0, 1.0)] {
            let displaced = displace(position, glm::vec2(u, v), 3.3);
            assert_eq!(displaced.x, position.x);
            assert_eq!(displaced.y, position.y);
        }
    }

    #[test]
    fn displacement_handles_negative_time() {
        let displaced = displace(glm::Vec3::zeros(), glm::vec2(0.3, 0.6), -42.0);
        assert!(displaced.z.is_finite());
    }

    #[test]
    fn layer_coefficients() {
        let expected = [
            (0.01, 0.01, 1.0),
            (0.05, 0.011, 13.0),
            (0.09, 0.012, 25.0),
        ];
        for (index, (flow, speed, seed)) in expected.into_iter().enumerate() {
            let layer = ColorLayer::nth(index);
            assert_close(layer.flow, flow);
            assert_close(layer.speed, speed);
            assert_close(layer.seed, seed);
            assert_eq!(layer.freq, [0.5, 1.0]);
        }
    }

    #[test]
    fn mix_at_full_weight_is_the_target() {
        let target = Palette::default().color(0);
        assert_eq!(mix(glm::Vec3::zeros(), target, 1.0), target);
    }

    #[test]
    fn mix_is_not_clamped() {
        assert_close(mix(0.0, 1.0, 1.5), 1.5);
        assert_close(mix(0.0, 1.0, -0.5), -0.5);
        assert_close(mix(2.0, 2.75, 0.5), 2.375);
    }

    #[test]
    fn blend_is_three_sequential_mixes() {
        let palette = Palette::default();
        let uv = glm::vec2(0.2, 0.7);
        let time = 12.0;

        let mut expected = glm::Vec3::zeros();
        for index in 0..3 {
            let weight = ColorLayer::nth(index).weight(uv, time);
            expected = mix(expected, palette.color(index), weight);
        }
        assert_eq!(blend_color(uv, time, &palette), expected);
    }

    #[test]
    fn first_layer_starts_from_black() {
        let palette = Palette::default();
        let uv = glm::vec2(0.4, 0.1);
        let weight = ColorLayer::nth(0).weight(uv, 0.0);
        let after_first = mix(glm::Vec3::zeros(), palette.color(0), weight);
        assert_eq!(after_first, palette.color(0) * weight);
    }

    #[test]
    fn unused_palette_entries_do_not_change_color() {
        let original = Palette::default();
        let mut hex = [0u32; 5];
        for (index, slot) in hex.iter_mut().enumerate() {
            *slot = original.hex(index);
        }
        hex[3] = 0x000000;
        hex[4] = 0xffffff;
        let altered = Palette::from_hex(hex);

        for (u, v, t) in [(0.0, 0.0, 0.0), (0.5, 0.5, 3.0), (0.9, 0.2, 120.0)] {
            let uv = glm::vec2(u, v);
            assert_eq!(blend_color(uv, t, &original), blend_color(uv, t, &altered));
        }
    }

    #[test]
    fn used_palette_entries_change_color() {
        let original = Palette::default();
        let mut hex = [0u32; 5];
        for (index, slot) in hex.iter_mut().enumerate() {
            *slot = original.hex(index);
        }
        hex[2] = 0x000000;
        let altered = Palette::from_hex(hex);

        let uv = glm::vec2(0.5, 0.5);
        let weight = ColorLayer::nth(2).weight(uv, 1.0);
        assert!(weight.abs() > 1.0e-4, "layer 2 has no influence at this sample");
        assert_ne!(blend_color(uv, 1.0, &original), blend_color(uv, 1.0, &altered));
    }
}
