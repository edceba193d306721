//! # Scene Configuration
//!
//! Every visual constant of the wave scene, grouped in one place.
//!
//! The crate reads no configuration files or environment variables (logging aside, which honours
//! `RUST_LOG` on native targets). [`SceneConfig::default`] carries the values the scene is meant
//! to be rendered with; changing any of the plane dimensions or palette entries changes the
//! picture.

use crate::palette::Palette;

/// Size and subdivision of the wave plane.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PlaneConfig {
    /// Extent along `x`, in world units.
    pub width: f32,
    /// Extent along `y`, in world units.
    pub height: f32,
    pub width_segments: u32,
    pub height_segments: u32,
}

impl Default for PlaneConfig {
    fn default() -> Self {
        Self {
            width: 40.0,
            height: 40.0,
            width_segments: 128,
            height_segments: 128,
        }
    }
}

/// Initial camera rig and orbit limits.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CameraConfig {
    /// Initial eye position.
    pub position: [f32; 3],
    /// Point the camera orbits around.
    pub target: [f32; 3],
    /// Vertical field of view in degrees.
    pub fov_degrees: f32,
    pub near: f32,
    pub far: f32,
    /// Closest the orbit may zoom to the target.
    pub min_distance: f32,
    /// Furthest the orbit may zoom from the target.
    pub max_distance: f32,
    /// Multiplier on drag-to-rotate sensitivity.
    pub rotate_speed: f32,
}

impl Default for CameraConfig {
    fn default() -> Self {
        Self {
            position: [0.0, -5.0, 5.0],
            target: [0.0, 0.0, 0.0],
            fov_degrees: 100.0,
            near: 0.1,
            far: 1000.0,
            min_distance: 0.1,
            max_distance: 500.0,
            rotate_speed: 1.0,
        }
    }
}

/// Everything [`Scene::new`](crate::Scene::new) needs to compose the scene.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SceneConfig {
    pub plane: PlaneConfig,
    pub camera: CameraConfig,
    pub palette: Palette,
    /// Color the frame is cleared to before the surface is drawn.
    pub clear_color: wgpu::Color,
}

impl Default for SceneConfig {
    fn default() -> Self {
        Self {
            plane: PlaneConfig::default(),
            camera: CameraConfig::default(),
            palette: Palette::default(),
            clear_color: wgpu::Color::BLACK,
        }
    }
}
