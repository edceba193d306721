//! # Simplex Noise
//!
//! CPU implementation of the 3D simplex noise sampled by `wave.wgsl`.
//!
//! This is the widely used Ashima Arts / Ian McEwan formulation: lattice hashing is done with
//! the permutation polynomial `(34x² + x) mod 289` instead of a lookup table, gradients are
//! spread over a 7×7 grid on an octahedron, and gradient normalisation uses a Taylor
//! approximation of the inverse square root. Because it needs no texture or table, the exact
//! same arithmetic runs in the vertex shader and here, which lets the crate test the surface
//! math without a GPU.
//!
//! The function is pure: identical inputs always produce identical outputs, and every point of
//! ℝ³ is a valid input. Output lies roughly in `[-1, 1]`.
//!
//! ```rust
//! use nalgebra_glm as glm;
//! use wave_plane::noise::snoise3;
//!
//! let a = snoise3(glm::vec3(3.0, 4.0, 0.0));
//! let b = snoise3(glm::vec3(3.0, 4.0, 0.0));
//! assert_eq!(a, b);
//! ```

use nalgebra_glm as glm;

/// `1/7`, spacing of the gradient grid.
const GRADIENT_STEP: f32 = 0.142_857_15;

/// Skew factor for 3D: `1/3`.
const SKEW: f32 = 1.0 / 3.0;

/// Unskew factor for 3D: `1/6`.
const UNSKEW: f32 = 1.0 / 6.0;

fn mod289(x: f32) -> f32 {
    x - (x * (1.0 / 289.0)).floor() * 289.0
}

fn permute(x: glm::Vec4) -> glm::Vec4 {
    x.map(|v| mod289((v * 34.0 + 1.0) * v))
}

fn taylor_inv_sqrt(r: glm::Vec4) -> glm::Vec4 {
    r.map(|v| 1.792_842_9 - 0.853_734_7 * v)
}

/// Shader `step`: `0.0` when `x < edge`, `1.0` otherwise.
fn step(edge: f32, x: f32) -> f32 {
    if x < edge {
        0.0
    } else {
        1.0
    }
}

/// Samples 3D simplex noise at `v`.
pub fn snoise3(v: glm::Vec3) -> f32 {
    // First corner of the simplex cell containing `v`.
    let i = v.add_scalar(v.sum() * SKEW).map(f32::floor);
    let x0 = v - i.add_scalar(-i.sum() * UNSKEW);

    // Rank the offset components to pick the other two corners.
    let g = glm::vec3(step(x0.y, x0.x), step(x0.z, x0.y), step(x0.x, x0.z));
    let l = glm::Vec3::repeat(1.0) - g;
    let l_zxy = glm::vec3(l.z, l.x, l.y);
    let i1 = g.zip_map(&l_zxy, f32::min);
    let i2 = g.zip_map(&l_zxy, f32::max);

    let x1 = (x0 - i1).add_scalar(UNSKEW);
    let x2 = (x0 - i2).add_scalar(SKEW);
    let x3 = x0.add_scalar(-0.5);

    // Hash the four corners.
    let i = i.map(mod289);
    let p = permute(
        permute(
            permute(glm::vec4(0.0, i1.z, i2.z, 1.0).add_scalar(i.z))
                + glm::vec4(0.0, i1.y, i2.y, 1.0).add_scalar(i.y),
        ) + glm::vec4(0.0, i1.x, i2.x, 1.0).add_scalar(i.x),
    );

    // Map each hash onto a gradient on the octahedron.
    let ns = glm::vec3(GRADIENT_STEP * 2.0, GRADIENT_STEP * 0.5 - 1.0, GRADIENT_STEP);
    let j = p - (p * ns.z * ns.z).map(f32::floor) * 49.0;
    let x_ = (j * ns.z).map(f32::floor);
    let y_ = (j - x_ * 7.0).map(f32::floor);
    let x = (x_ * ns.x).add_scalar(ns.y);
    let y = (y_ * ns.x).add_scalar(ns.y);
    let h = glm::Vec4::repeat(1.0) - x.map(f32::abs) - y.map(f32::abs);

    let b0 = glm::vec4(x.x, x.y, y.x, y.y);
    let b1 = glm::vec4(x.z, x.w, y.z, y.w);
    let s0 = (b0.map(f32::floor) * 2.0).add_scalar(1.0);
    let s1 = (b1.map(f32::floor) * 2.0).add_scalar(1.0);
    let sh = h.map(|v| -step(v, 0.0));

    let a0 = glm::vec4(b0.x, b0.z, b0.y, b0.w)
        + glm::vec4(s0.x, s0.z, s0.y, s0.w).component_mul(&glm::vec4(sh.x, sh.x, sh.y, sh.y));
    let a1 = glm::vec4(b1.x, b1.z, b1.y, b1.w)
        + glm::vec4(s1.x, s1.z, s1.y, s1.w).component_mul(&glm::vec4(sh.z, sh.z, sh.w, sh.w));

    let p0 = glm::vec3(a0.x, a0.y, h.x);
    let p1 = glm::vec3(a0.z, a0.w, h.y);
    let p2 = glm::vec3(a1.x, a1.y, h.z);
    let p3 = glm::vec3(a1.z, a1.w, h.w);

    let norm = taylor_inv_sqrt(glm::vec4(p0.dot(&p0), p1.dot(&p1), p2.dot(&p2), p3.dot(&p3)));
    let p0 = p0 * norm.x;
    let p1 = p1 * norm.y;
    let p2 = p2 * norm.z;
    let p3 = p3 * norm.w;

    // Radial falloff per corner, then sum the gradient contributions.
    let m = glm::vec4(0.6 - x0.dot(&x0), 0.6 - x1.dot(&x1), 0.6 - x2.dot(&x2), 0.6 - x3.dot(&x3))
        .map(|v| v.max(0.0));
    let m = m.component_mul(&m);
    let m4 = m.component_mul(&m);

    42.0 * m4.dot(&glm::vec4(p0.dot(&x0), p1.dot(&x1), p2.dot(&x2), p3.dot(&x3)))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_grid() -> impl Iterator<Item = glm::Vec3> {
        (0..12).flat_map(|ix| {
            (0..12).flat_map(move |iy| {
                (0..6).map(move |iz| {
                    glm::vec3(ix as f32 * 0.37 - 2.0, iy as f32 * 0.53 - 3.0, iz as f32 * 1.7)
                })
            })
        })
    }

    #[test]
    fn same_input_gives_same_output() {
        for point in sample_grid() {
            assert_eq!(snoise3(point).to_bits(), snoise3(point).to_bits());
        }
    }

    #[test]
    fn stays_near_unit_range() {
        for point in sample_grid() {
            let n = snoise3(point);
            assert!(n.is_finite(), "noise at {point:?} is not finite");
            assert!(n.abs() <= 1.05, "noise at {point:?} out of range: {n}");
        }
    }

    #[test]
    fn varies_across_space() {
        let values: Vec<f32> = sample_grid().map(snoise3).collect();
        let min = values.iter().copied().fold(f32::INFINITY, f32::min);
        let max = values.iter().copied().fold(f32::NEG_INFINITY, f32::max);
        assert!(max - min > 0.5, "noise is nearly flat: [{min}, {max}]");
    }

    #[test]
    fn small_steps_give_small_changes() {
        let step = 1.0e-3;
        for point in sample_grid() {
            let here = snoise3(point);
            let there = snoise3(point + glm::vec3(step, step, step));
            assert!((here - there).abs() < 0.05, "jump at {point:?}: {here} -> {there}");
        }
    }

    #[test]
    fn negative_coordinates_are_valid() {
        let n = snoise3(glm::vec3(-123.4, -0.5, -7.25));
        assert!(n.is_finite());
        assert!(n.abs() <= 1.05);
    }

    #[test]
    fn matches_glsl_simplex_reference_values() {
        // f32 outputs of the glsl-noise `simplex/3d` routine at the same points.
        let cases = [
            (glm::vec3(3.0, 4.0, 0.0), 0.144_085_8),
            (glm::vec3(0.0, 0.0, 0.0), -0.412_198_8),
            (glm::vec3(-5.1, 2.3, 7.7), -0.257_101_4),
            (glm::vec3(12.25, -3.5, 0.9), -0.055_536_7),
        ];
        for (point, expected) in cases {
            let n = snoise3(point);
            assert!(
                (n - expected).abs() < 1.0e-5,
                "snoise3({point:?}) = {n}, expected {expected}"
            );
        }
    }

    #[test]
    fn mod289_wraps_into_range() {
        assert_eq!(mod289(0.0), 0.0);
        assert_eq!(mod289(290.0), 1.0);
        assert_eq!(mod289(-1.0), 288.0);
    }
}
