//! Perspective camera
//!
//! The camera keeps a cached projection matrix. Changing `fov_deg`, `aspect`,
//! `near` or `far` has no effect until `update_projection_matrix` is called,
//! except through `set_aspect`, which updates the projection itself.

use glam::{Mat4, Vec3};
use xr_room_input::OrbitCamera;

/// Default vertical field of view in degrees
pub const DEFAULT_FOV_DEG: f32 = 50.0;
pub const DEFAULT_NEAR: f32 = 0.1;
pub const DEFAULT_FAR: f32 = 100.0;
/// Standing eye height
pub const DEFAULT_POSITION: Vec3 = Vec3::new(0.0, 1.6, 3.0);
pub const DEFAULT_TARGET: Vec3 = Vec3::new(0.0, 1.6, 0.0);

/// Perspective camera looking at a target point
#[derive(Clone, Debug)]
pub struct PerspectiveCamera {
    /// Vertical field of view in degrees
    pub fov_deg: f32,
    /// Width divided by height
    pub aspect: f32,
    pub near: f32,
    pub far: f32,
    pub up: Vec3,
    position: Vec3,
    target: Vec3,
    projection: Mat4,
}

impl Default for PerspectiveCamera {
    fn default() -> Self {
        Self::new(DEFAULT_FOV_DEG, 1.0, DEFAULT_NEAR, DEFAULT_FAR)
    }
}

impl PerspectiveCamera {
    /// Create a camera at the default standing position
    pub fn new(fov_deg: f32, aspect: f32, near: f32, far: f32) -> Self {
        let mut camera = Self {
            fov_deg,
            aspect,
            near,
            far,
            up: Vec3::Y,
            position: DEFAULT_POSITION,
            target: DEFAULT_TARGET,
            projection: Mat4::IDENTITY,
        };
        camera.update_projection_matrix();
        camera
    }

    /// Builder: place the camera
    pub fn with_position(mut self, position: Vec3) -> Self {
        self.position = position;
        self
    }

    /// Builder: aim the camera
    pub fn with_target(mut self, target: Vec3) -> Self {
        self.target = target;
        self
    }

    #[inline]
    pub fn position(&self) -> Vec3 {
        self.position
    }

    #[inline]
    pub fn target(&self) -> Vec3 {
        self.target
    }

    pub fn set_position(&mut self, position: Vec3) {
        self.position = position;
    }

    pub fn look_at(&mut self, target: Vec3) {
        self.target = target;
    }

    /// Set the aspect ratio from a viewport size and refresh the projection
    ///
    /// Zero-sized viewports are ignored.
    pub fn set_aspect(&mut self, width: u32, height: u32) {
        if width == 0 || height == 0 {
            log::warn!("Ignoring camera aspect update for {}x{}", width, height);
            return;
        }
        self.aspect = width as f32 / height as f32;
        self.update_projection_matrix();
    }

    /// Recompute the cached projection from fov, aspect, near and far
    pub fn update_projection_matrix(&mut self) {
        self.projection = Mat4::perspective_rh(
            self.fov_deg.to_radians(),
            self.aspect,
            self.near,
            self.far,
        );
    }

    #[inline]
    pub fn projection_matrix(&self) -> Mat4 {
        self.projection
    }

    /// Projection for a different aspect ratio (used by stereo eye views)
    pub fn projection_with_aspect(&self, aspect: f32) -> Mat4 {
        Mat4::perspective_rh(self.fov_deg.to_radians(), aspect, self.near, self.far)
    }

    /// Unit vector from the camera towards the target
    pub fn forward(&self) -> Vec3 {
        let dir = self.target - self.position;
        if dir.length_squared() < 1e-12 {
            Vec3::NEG_Z
        } else {
            dir.normalize()
        }
    }

    pub fn right(&self) -> Vec3 {
        let right = self.forward().cross(self.up);
        if right.length_squared() < 1e-12 {
            Vec3::X
        } else {
            right.normalize()
        }
    }

    pub fn up_vector(&self) -> Vec3 {
        self.right().cross(self.forward())
    }

    /// World to camera transform
    pub fn view_matrix(&self) -> Mat4 {
        self.view_matrix_from(self.position)
    }

    /// View matrix for an eye placed at `eye`, keeping this camera's orientation
    pub fn view_matrix_from(&self, eye: Vec3) -> Mat4 {
        let forward = self.forward();
        Mat4::look_to_rh(eye, forward, self.up_vector())
    }

    pub fn view_projection(&self) -> Mat4 {
        self.projection * self.view_matrix()
    }
}

impl OrbitCamera for PerspectiveCamera {
    fn position(&self) -> Vec3 {
        self.position
    }

    fn set_position(&mut self, position: Vec3) {
        self.position = position;
    }

    fn look_at(&mut self, target: Vec3) {
        self.target = target;
    }

    fn fov_y(&self) -> f32 {
        self.fov_deg.to_radians()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPSILON: f32 = 1e-5;

    #[test]
    fn test_defaults() {
        let camera = PerspectiveCamera::default();
        assert_eq!(camera.fov_deg, 50.0);
        assert_eq!(camera.near, 0.1);
        assert_eq!(camera.far, 100.0);
        assert_eq!(camera.position(), Vec3::new(0.0, 1.6, 3.0));
        assert_eq!(camera.target(), Vec3::new(0.0, 1.6, 0.0));
    }

    #[test]
    fn test_set_aspect() {
        let mut camera = PerspectiveCamera::default();
        camera.set_aspect(1920, 1080);
        assert!((camera.aspect - 1920.0 / 1080.0).abs() < EPSILON);

        let expected = Mat4::perspective_rh(50f32.to_radians(), 1920.0 / 1080.0, 0.1, 100.0);
        assert!(camera.projection_matrix().abs_diff_eq(expected, EPSILON));
    }

    #[test]
    fn test_set_aspect_ignores_zero() {
        let mut camera = PerspectiveCamera::default();
        camera.set_aspect(800, 600);
        camera.set_aspect(0, 600);
        camera.set_aspect(800, 0);
        assert!((camera.aspect - 800.0 / 600.0).abs() < EPSILON);
    }

    #[test]
    fn test_projection_is_cached() {
        let mut camera = PerspectiveCamera::default();
        let before = camera.projection_matrix();

        camera.fov_deg = 90.0;
        assert_eq!(camera.projection_matrix(), before);

        camera.update_projection_matrix();
        assert_ne!(camera.projection_matrix(), before);
    }

    #[test]
    fn test_view_matrix_looks_down_negative_z() {
        let camera = PerspectiveCamera::default();
        let view = camera.view_matrix();

        // The target ends up straight ahead, 3 units down -Z in view space
        let target_in_view = view.transform_point3(camera.target());
        assert!((target_in_view - Vec3::new(0.0, 0.0, -3.0)).length() < EPSILON);

        // The camera itself sits at the view-space origin
        let eye_in_view = view.transform_point3(camera.position());
        assert!(eye_in_view.length() < EPSILON);
    }

    #[test]
    fn test_basis_vectors() {
        let camera = PerspectiveCamera::default();
        assert!((camera.forward() - Vec3::NEG_Z).length() < EPSILON);
        assert!((camera.right() - Vec3::X).length() < EPSILON);
        assert!((camera.up_vector() - Vec3::Y).length() < EPSILON);
    }

    #[test]
    fn test_degenerate_target() {
        let camera = PerspectiveCamera::default()
            .with_position(Vec3::ONE)
            .with_target(Vec3::ONE);
        assert_eq!(camera.forward(), Vec3::NEG_Z);
        assert!(camera.view_matrix().is_finite());
    }

    #[test]
    fn test_orbit_camera_fov_in_radians() {
        let camera = PerspectiveCamera::default();
        assert!((OrbitCamera::fov_y(&camera) - 50f32.to_radians()).abs() < EPSILON);
    }
}
