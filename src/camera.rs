//! # Orbit Camera
//!
//! A perspective camera that circles a target point, steered by pointer input.
//!
//! The eye is stored in spherical coordinates relative to the target, with `+y` as the pole:
//!
//! - `radius`: distance from target to eye.
//! - `polar`: angle between `+y` and the eye offset, kept inside `(0, π)` so the view never
//!   flips over the pole.
//! - `azimuth`: angle around `+y`, measured from `+z` towards `+x`.
//!
//! Input maps onto the rig like this:
//!
//! | Input | Effect |
//! |---|---|
//! | drag (orbit button) | [`OrbitCamera::rotate`]: a drag across the full viewport height turns a full circle |
//! | wheel | [`OrbitCamera::dolly`]: each notch scales the radius by `0.95` |
//! | drag (pan button) | [`OrbitCamera::pan`]: moves the target in the view plane so the surface follows the cursor |
//!
//! Projection is right-handed with a `[0, 1]` depth range, which is what wgpu expects.

use std::f32::consts::{PI, TAU};

use nalgebra_glm as glm;

use crate::config::CameraConfig;

/// Radius scale applied per wheel notch.
const ZOOM_SCALE: f32 = 0.95;

/// Keeps the polar angle away from the poles.
const POLAR_EPSILON: f32 = 1.0e-6;

#[derive(Debug, Clone, Copy, PartialEq)]
struct Rig {
    target: glm::Vec3,
    radius: f32,
    polar: f32,
    azimuth: f32,
}

impl Rig {
    fn from_eye(eye: glm::Vec3, target: glm::Vec3) -> Self {
        let offset = eye - target;
        let radius = offset.norm();
        let (polar, azimuth) = if radius > 0.0 {
            (
                (offset.y / radius).clamp(-1.0, 1.0).acos(),
                offset.x.atan2(offset.z),
            )
        } else {
            (PI / 2.0, 0.0)
        };
        Self {
            target,
            radius,
            polar: polar.clamp(POLAR_EPSILON, PI - POLAR_EPSILON),
            azimuth,
        }
    }

    fn offset(&self) -> glm::Vec3 {
        let (sin_polar, cos_polar) = self.polar.sin_cos();
        let (sin_azimuth, cos_azimuth) = self.azimuth.sin_cos();
        glm::vec3(
            self.radius * sin_polar * sin_azimuth,
            self.radius * cos_polar,
            self.radius * sin_polar * cos_azimuth,
        )
    }
}

/// Perspective camera with orbit, zoom and pan controls.
#[derive(Debug, Clone)]
pub struct OrbitCamera {
    rig: Rig,
    home: Rig,
    fov_y: f32,
    near: f32,
    far: f32,
    min_distance: f32,
    max_distance: f32,
    rotate_speed: f32,
}

impl OrbitCamera {
    pub fn new(config: &CameraConfig) -> Self {
        let rig = Rig::from_eye(
            glm::make_vec3(&config.position),
            glm::make_vec3(&config.target),
        );
        Self {
            rig,
            home: rig,
            fov_y: config.fov_degrees.to_radians(),
            near: config.near,
            far: config.far,
            min_distance: config.min_distance,
            max_distance: config.max_distance,
            rotate_speed: config.rotate_speed,
        }
    }

    /// World-space eye position.
    pub fn position(&self) -> glm::Vec3 {
        self.rig.target + self.rig.offset()
    }

    pub fn target(&self) -> glm::Vec3 {
        self.rig.target
    }

    /// Distance from the eye to the target.
    pub fn distance(&self) -> f32 {
        self.rig.radius
    }

    /// Vertical field of view in radians.
    pub fn fov_y(&self) -> f32 {
        self.fov_y
    }

    /// Orbits around the target by a pointer drag of `(dx, dy)` pixels.
    pub fn rotate(&mut self, dx: f32, dy: f32, viewport_height: f32) {
        let height = viewport_height.max(1.0);
        self.rig.azimuth -= TAU * dx / height * self.rotate_speed;
        self.rig.polar = (self.rig.polar - TAU * dy / height * self.rotate_speed)
            .clamp(POLAR_EPSILON, PI - POLAR_EPSILON);
    }

    /// Zooms by `steps` wheel notches. Positive steps move towards the target.
    pub fn dolly(&mut self, steps: f32) {
        self.rig.radius =
            (self.rig.radius * ZOOM_SCALE.powf(steps)).clamp(self.min_distance, self.max_distance);
    }

    /// Zooms for a dolly drag of `dy` pixels: one notch out when dragging down, one notch in when
    /// dragging up. The drag length does not matter, only its direction.
    pub fn dolly_drag(&mut self, dy: f32) {
        if dy > 0.0 {
            self.dolly(-1.0);
        } else if dy < 0.0 {
            self.dolly(1.0);
        }
    }

    /// Moves the target (and the eye with it) by a pointer drag of `(dx, dy)` pixels.
    pub fn pan(&mut self, dx: f32, dy: f32, viewport_height: f32) {
        let height = viewport_height.max(1.0);
        let (right, up) = self.view_axes();
        let visible_half_height = self.rig.radius * (self.fov_y / 2.0).tan();
        let scale = 2.0 * visible_half_height / height;
        self.rig.target += right * (-dx * scale) + up * (dy * scale);
    }

    /// Restores the rig the camera was created with.
    pub fn reset(&mut self) {
        self.rig = self.home;
    }

    pub fn view_matrix(&self) -> glm::Mat4 {
        glm::look_at_rh(&self.position(), &self.rig.target, &glm::Vec3::y())
    }

    pub fn projection_matrix(&self, aspect_ratio: f32) -> glm::Mat4 {
        glm::perspective_rh_zo(aspect_ratio, self.fov_y, self.near, self.far)
    }

    pub fn view_projection(&self, aspect_ratio: f32) -> glm::Mat4 {
        self.projection_matrix(aspect_ratio) * self.view_matrix()
    }

    /// Camera right and up vectors in world space.
    fn view_axes(&self) -> (glm::Vec3, glm::Vec3) {
        let forward = -self.rig.offset().normalize();
        let right = forward.cross(&glm::Vec3::y()).normalize();
        let up = right.cross(&forward);
        (right, up)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPSILON: f32 = 1.0e-4;

    fn assert_vec_close(actual: glm::Vec3, expected: glm::Vec3) {
        assert!(
            (actual - expected).norm() <= EPSILON,
            "expected {expected:?}, got {actual:?}"
        );
    }

    fn camera() -> OrbitCamera {
        OrbitCamera::new(&CameraConfig::default())
    }

    #[test]
    fn starts_at_configured_position() {
        let camera = camera();
        assert_vec_close(camera.position(), glm::vec3(0.0, -5.0, 5.0));
        assert_vec_close(camera.target(), glm::Vec3::zeros());
        assert!((camera.distance() - 50.0_f32.sqrt()).abs() < EPSILON);
        assert!((camera.fov_y() - 100.0_f32.to_radians()).abs() < EPSILON);
    }

    #[test]
    fn rotate_keeps_distance() {
        let mut camera = camera();
        let before = camera.distance();
        camera.rotate(120.0, -40.0, 800.0);
        let after = (camera.position() - camera.target()).norm();
        assert!((after - before).abs() < EPSILON);
    }

    #[test]
    fn full_height_drag_turns_full_circle() {
        let mut camera = camera();
        let start = camera.position();
        camera.rotate(600.0, 0.0, 600.0);
        assert_vec_close(camera.position(), start);
    }

    #[test]
    fn polar_angle_never_crosses_the_pole() {
        let mut camera = camera();
        camera.rotate(0.0, 1.0e6, 600.0);
        assert!(camera.rig.polar >= POLAR_EPSILON);
        camera.rotate(0.0, -1.0e6, 600.0);
        assert!(camera.rig.polar <= PI - POLAR_EPSILON);
        assert!(camera.view_projection(1.0).iter().all(|v| v.is_finite()));
    }

    #[test]
    fn dolly_scales_and_clamps() {
        let mut camera = camera();
        let start = camera.distance();
        camera.dolly(1.0);
        assert!((camera.distance() - start * 0.95).abs() < EPSILON);
        camera.dolly(-1.0);
        assert!((camera.distance() - start).abs() < EPSILON);

        camera.dolly(10_000.0);
        assert_eq!(camera.distance(), 0.1);
        camera.dolly(-10_000.0);
        assert_eq!(camera.distance(), 500.0);
    }

    #[test]
    fn dolly_drag_zooms_by_direction_only() {
        let mut camera = camera();
        let start = camera.distance();

        camera.dolly_drag(3.0);
        assert!((camera.distance() - start / 0.95).abs() < EPSILON);

        camera.dolly_drag(-250.0);
        assert!((camera.distance() - start).abs() < EPSILON);

        camera.dolly_drag(0.0);
        assert!((camera.distance() - start).abs() < EPSILON);
    }

    #[test]
    fn pan_moves_target_and_eye_together() {
        let mut camera = camera();
        let offset = camera.position() - camera.target();
        camera.pan(50.0, 25.0, 600.0);
        assert!(camera.target().norm() > 0.0);
        assert_vec_close(camera.position() - camera.target(), offset);
    }

    #[test]
    fn pan_right_moves_target_left() {
        let mut camera = camera();
        camera.pan(100.0, 0.0, 600.0);
        assert!(camera.target().x < 0.0);
    }

    #[test]
    fn reset_restores_initial_rig() {
        let mut camera = camera();
        camera.rotate(33.0, 12.0, 600.0);
        camera.dolly(3.0);
        camera.pan(-20.0, 40.0, 600.0);
        camera.reset();
        assert_vec_close(camera.position(), glm::vec3(0.0, -5.0, 5.0));
        assert_vec_close(camera.target(), glm::Vec3::zeros());
    }

    #[test]
    fn target_projects_to_screen_center() {
        let camera = camera();
        let clip = camera.view_projection(16.0 / 9.0) * glm::vec4(0.0, 0.0, 0.0, 1.0);
        let ndc = clip.xyz() / clip.w;
        assert!(ndc.x.abs() < EPSILON);
        assert!(ndc.y.abs() < EPSILON);
        assert!((0.0..=1.0).contains(&ndc.z));
    }
}
