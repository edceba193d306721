//! # Plane Geometry
//!
//! Builds the subdivided rectangle the wave is drawn on.
//!
//! The grid is centred on the origin in the `xy` plane. Vertices are emitted row by row starting
//! at the top edge (`y = +height/2`) and moving down, each row left to right. UVs run from
//! `(0, 1)` at the top-left corner to `(1, 0)` at the bottom-right, so `v` grows with `y`.
//!
//! Each grid cell becomes two counter-clockwise triangles when viewed from `+z`:
//!
//! ```text
//!  a ---- d        a = ix     + row * iy
//!  |    / |        b = ix     + row * (iy + 1)
//!  |  /   |        c = ix + 1 + row * (iy + 1)
//!  b ---- c        d = ix + 1 + row * iy
//!
//!  triangles: (a, b, d) and (b, c, d)
//! ```
//!
//! where `row = width_segments + 1`.

use crate::config::PlaneConfig;
use crate::vertex::Vertex;

/// Vertex and index data of a subdivided plane. Immutable once built.
#[derive(Debug, Clone)]
pub struct PlaneGeometry {
    vertices: Vec<Vertex>,
    indices: Vec<u32>,
}

impl PlaneGeometry {
    pub fn new(config: &PlaneConfig) -> Self {
        let grid_x = config.width_segments.max(1);
        let grid_y = config.height_segments.max(1);
        let row = grid_x + 1;

        let half_width = config.width / 2.0;
        let half_height = config.height / 2.0;
        let segment_width = config.width / grid_x as f32;
        let segment_height = config.height / grid_y as f32;

        let mut vertices = Vec::with_capacity((row * (grid_y + 1)) as usize);
        for iy in 0..=grid_y {
            let y = iy as f32 * segment_height - half_height;
            for ix in 0..=grid_x {
                let x = ix as f32 * segment_width - half_width;
                vertices.push(Vertex {
                    position: [x, -y, 0.0],
                    uv: [ix as f32 / grid_x as f32, 1.0 - iy as f32 / grid_y as f32],
                });
            }
        }

        let mut indices = Vec::with_capacity((grid_x * grid_y * 6) as usize);
        for iy in 0..grid_y {
            for ix in 0..grid_x {
                let a = ix + row * iy;
                let b = ix + row * (iy + 1);
                let c = (ix + 1) + row * (iy + 1);
                let d = (ix + 1) + row * iy;
                indices.extend_from_slice(&[a, b, d, b, c, d]);
            }
        }

        log::debug!(
            "Built {grid_x}x{grid_y} plane: {} vertices, {} indices",
            vertices.len(),
            indices.len()
        );

        Self { vertices, indices }
    }

    pub fn vertices(&self) -> &[Vertex] {
        &self.vertices
    }

    pub fn indices(&self) -> &[u32] {
        &self.indices
    }

    pub fn index_count(&self) -> u32 {
        self.indices.len() as u32
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn default_plane() -> PlaneGeometry {
        PlaneGeometry::new(&PlaneConfig::default())
    }

    #[test]
    fn vertex_and_index_counts() {
        let plane = default_plane();
        assert_eq!(plane.vertices().len(), 129 * 129);
        assert_eq!(plane.indices().len(), 128 * 128 * 6);
        assert_eq!(plane.index_count(), 98_304);
    }

    #[test]
    fn uvs_stay_in_unit_square() {
        for vertex in default_plane().vertices() {
            let [u, v] = vertex.uv;
            assert!((0.0..=1.0).contains(&u), "u out of range: {u}");
            assert!((0.0..=1.0).contains(&v), "v out of range: {v}");
        }
    }

    #[test]
    fn corners_match_extent_and_uv() {
        let plane = default_plane();
        let vertices = plane.vertices();
        let top_left = vertices[0];
        let bottom_right = vertices[vertices.len() - 1];

        assert_eq!(top_left.position, [-20.0, 20.0, 0.0]);
        assert_eq!(top_left.uv, [0.0, 1.0]);
        assert_eq!(bottom_right.position, [20.0, -20.0, 0.0]);
        assert_eq!(bottom_right.uv, [1.0, 0.0]);
    }

    #[test]
    fn plane_is_flat_before_displacement() {
        assert!(default_plane().vertices().iter().all(|v| v.position[2] == 0.0));
    }

    #[test]
    fn indices_reference_existing_vertices() {
        let plane = default_plane();
        let count = plane.vertices().len() as u32;
        assert!(plane.indices().iter().all(|&index| index < count));
    }

    #[test]
    fn triangles_face_positive_z() {
        let plane = PlaneGeometry::new(&PlaneConfig {
            width: 2.0,
            height: 2.0,
            width_segments: 2,
            height_segments: 2,
        });
        let vertices = plane.vertices();
        for triangle in plane.indices().chunks_exact(3) {
            let [a, b, c] = [0, 1, 2].map(|k| vertices[triangle[k] as usize].position);
            let ab = [b[0] - a[0], b[1] - a[1]];
            let ac = [c[0] - a[0], c[1] - a[1]];
            let cross_z = ab[0] * ac[1] - ab[1] * ac[0];
            assert!(cross_z > 0.0, "triangle {triangle:?} winds clockwise");
        }
    }

    #[test]
    fn single_cell_layout() {
        let plane = PlaneGeometry::new(&PlaneConfig {
            width: 1.0,
            height: 1.0,
            width_segments: 1,
            height_segments: 1,
        });
        assert_eq!(plane.indices(), &[0, 2, 1, 2, 3, 1]);
    }
}
