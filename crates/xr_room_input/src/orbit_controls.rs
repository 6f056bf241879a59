//! Orbit controls
//!
//! Controls:
//! - Left drag: orbit around the target
//! - Right drag: pan the target in the view plane
//! - Mouse wheel: dolly towards / away from the target
//! - Arrow keys: pan

use std::f32::consts::PI;

use glam::{Vec2, Vec3};
use winit::event::{ElementState, MouseButton};
use winit::keyboard::KeyCode;

/// Keeps the polar angle away from the poles where the view would flip
const POLAR_EPSILON: f32 = 1e-6;

/// Pixels panned per arrow key press
const KEY_PAN_PIXELS: f32 = 7.0;

/// Distance ratio applied per wheel step at zoom speed 1
const DOLLY_BASE: f32 = 0.95;

/// Spherical coordinates around the Y axis
#[derive(Clone, Copy, Debug, Default, PartialEq)]
struct Spherical {
    radius: f32,
    /// Polar angle measured from +Y
    phi: f32,
    /// Azimuth around +Y, measured from +Z
    theta: f32,
}

impl Spherical {
    fn from_offset(offset: Vec3) -> Self {
        let radius = offset.length();
        if radius == 0.0 {
            return Self::default();
        }
        Self {
            radius,
            theta: offset.x.atan2(offset.z),
            phi: (offset.y / radius).clamp(-1.0, 1.0).acos(),
        }
    }

    fn to_offset(self) -> Vec3 {
        let sin_phi_radius = self.phi.sin() * self.radius;
        Vec3::new(
            sin_phi_radius * self.theta.sin(),
            self.phi.cos() * self.radius,
            sin_phi_radius * self.theta.cos(),
        )
    }
}

/// Orbit camera controller
pub struct OrbitControls {
    /// Point the camera orbits around and looks at
    pub target: Vec3,
    initial_target: Vec3,
    initial_position: Vec3,

    // Mouse state
    rotating: bool,
    panning: bool,
    last_cursor: Option<Vec2>,
    viewport_height: f32,

    // Accumulated input, consumed by `update`
    pending_rotate: Vec2,
    pending_pan: Vec2,
    pending_dolly: f32,

    // Deltas still being applied when damping is enabled
    theta_delta: f32,
    phi_delta: f32,
    pan_offset: Vec3,

    // Configuration
    pub enabled: bool,
    pub rotate_speed: f32,
    pub zoom_speed: f32,
    pub pan_speed: f32,
    pub enable_damping: bool,
    pub damping_factor: f32,
    pub min_distance: f32,
    pub max_distance: f32,
    pub min_polar_angle: f32,
    pub max_polar_angle: f32,
}

impl OrbitControls {
    /// Create controls orbiting `target`, remembering `camera_position` for `reset`
    pub fn new(target: Vec3, camera_position: Vec3) -> Self {
        Self {
            target,
            initial_target: target,
            initial_position: camera_position,

            rotating: false,
            panning: false,
            last_cursor: None,
            viewport_height: 1.0,

            pending_rotate: Vec2::ZERO,
            pending_pan: Vec2::ZERO,
            pending_dolly: 0.0,

            theta_delta: 0.0,
            phi_delta: 0.0,
            pan_offset: Vec3::ZERO,

            enabled: true,
            rotate_speed: 1.0,
            zoom_speed: 1.0,
            pan_speed: 1.0,
            enable_damping: false,
            damping_factor: 0.05,
            min_distance: 0.0,
            max_distance: f32::INFINITY,
            min_polar_angle: 0.0,
            max_polar_angle: PI,
        }
    }

    /// Height of the viewport in pixels; drag distances are relative to it
    pub fn set_viewport_height(&mut self, height: u32) {
        self.viewport_height = height.max(1) as f32;
    }

    /// Process mouse button input
    pub fn process_mouse_button(&mut self, button: MouseButton, state: ElementState) {
        let pressed = state == ElementState::Pressed;

        match button {
            MouseButton::Left => self.rotating = pressed,
            MouseButton::Right => self.panning = pressed,
            _ => {}
        }
    }

    /// Process an absolute cursor position in physical pixels
    pub fn process_cursor_moved(&mut self, x: f64, y: f64) {
        let position = Vec2::new(x as f32, y as f32);

        if let Some(last) = self.last_cursor {
            let delta = position - last;
            if self.rotating {
                self.pending_rotate += delta;
            } else if self.panning {
                self.pending_pan += delta;
            }
        }

        self.last_cursor = Some(position);
    }

    /// Forget the last cursor position (cursor left the window)
    pub fn process_cursor_left(&mut self) {
        self.last_cursor = None;
        self.rotating = false;
        self.panning = false;
    }

    /// Process wheel input in line steps; positive moves closer
    pub fn process_scroll(&mut self, steps: f32) {
        self.pending_dolly += steps;
    }

    /// Process keyboard input, returns true if the key was consumed
    pub fn process_keyboard(&mut self, key: KeyCode, state: ElementState) -> bool {
        if state != ElementState::Pressed {
            return matches!(
                key,
                KeyCode::ArrowUp | KeyCode::ArrowDown | KeyCode::ArrowLeft | KeyCode::ArrowRight
            );
        }

        match key {
            KeyCode::ArrowUp => self.pending_pan.y += KEY_PAN_PIXELS,
            KeyCode::ArrowDown => self.pending_pan.y -= KEY_PAN_PIXELS,
            KeyCode::ArrowLeft => self.pending_pan.x += KEY_PAN_PIXELS,
            KeyCode::ArrowRight => self.pending_pan.x -= KEY_PAN_PIXELS,
            _ => return false,
        }
        true
    }

    /// Whether a drag is in progress
    pub fn is_dragging(&self) -> bool {
        self.rotating || self.panning
    }

    /// Apply accumulated input to the camera
    ///
    /// Returns true if the camera position or target changed.
    pub fn update<C: OrbitCamera>(&mut self, camera: &mut C) -> bool {
        let old_position = camera.position();
        let old_target = self.target;

        let mut offset = old_position - self.target;
        let mut spherical = Spherical::from_offset(offset);
        if spherical.radius == 0.0 {
            // Camera sits on the target; nothing sensible to orbit
            offset = Vec3::Z * 1e-3;
            spherical = Spherical::from_offset(offset);
        }

        let mut scale = 1.0;

        if self.enabled {
            let angle_per_pixel = 2.0 * PI / self.viewport_height * self.rotate_speed;
            self.theta_delta -= self.pending_rotate.x * angle_per_pixel;
            self.phi_delta -= self.pending_rotate.y * angle_per_pixel;

            if self.pending_pan != Vec2::ZERO {
                self.pan_offset += self.pan_vector(camera, spherical.radius);
            }

            if self.pending_dolly != 0.0 {
                scale = DOLLY_BASE.powf(self.zoom_speed * self.pending_dolly);
            }
        }

        self.pending_rotate = Vec2::ZERO;
        self.pending_pan = Vec2::ZERO;
        self.pending_dolly = 0.0;

        let step = if self.enable_damping {
            self.damping_factor
        } else {
            1.0
        };

        spherical.theta += self.theta_delta * step;
        spherical.phi += self.phi_delta * step;
        spherical.phi = spherical
            .phi
            .clamp(self.min_polar_angle, self.max_polar_angle)
            .clamp(POLAR_EPSILON, PI - POLAR_EPSILON);

        spherical.radius = (spherical.radius * scale).clamp(self.min_distance, self.max_distance);

        self.target += self.pan_offset * step;

        let position = self.target + spherical.to_offset();
        camera.set_position(position);
        camera.look_at(self.target);

        if self.enable_damping {
            self.theta_delta *= 1.0 - self.damping_factor;
            self.phi_delta *= 1.0 - self.damping_factor;
            self.pan_offset *= 1.0 - self.damping_factor;
        } else {
            self.theta_delta = 0.0;
            self.phi_delta = 0.0;
            self.pan_offset = Vec3::ZERO;
        }

        (position - old_position).length_squared() > 1e-12
            || (self.target - old_target).length_squared() > 1e-12
    }

    /// World-space target movement for the pending pan
    fn pan_vector<C: OrbitCamera>(&self, camera: &C, distance: f32) -> Vec3 {
        let forward = (self.target - camera.position()).normalize_or_zero();
        let right = forward.cross(Vec3::Y).normalize_or_zero();
        let up = right.cross(forward);

        // Distance covered by half the viewport height at the target depth
        let target_distance = distance * (camera.fov_y() / 2.0).tan();
        let per_pixel = 2.0 * target_distance / self.viewport_height * self.pan_speed;

        -right * self.pending_pan.x * per_pixel + up * self.pending_pan.y * per_pixel
    }

    /// Restore the initial target and camera position
    pub fn reset<C: OrbitCamera>(&mut self, camera: &mut C) {
        self.target = self.initial_target;
        self.pending_rotate = Vec2::ZERO;
        self.pending_pan = Vec2::ZERO;
        self.pending_dolly = 0.0;
        self.theta_delta = 0.0;
        self.phi_delta = 0.0;
        self.pan_offset = Vec3::ZERO;

        camera.set_position(self.initial_position);
        camera.look_at(self.target);
    }

    /// Current distance between the camera and the target
    pub fn distance<C: OrbitCamera>(&self, camera: &C) -> f32 {
        (camera.position() - self.target).length()
    }

    /// Builder: set rotation speed
    pub fn with_rotate_speed(mut self, speed: f32) -> Self {
        self.rotate_speed = speed;
        self
    }

    /// Builder: set zoom speed
    pub fn with_zoom_speed(mut self, speed: f32) -> Self {
        self.zoom_speed = speed;
        self
    }

    /// Builder: set pan speed
    pub fn with_pan_speed(mut self, speed: f32) -> Self {
        self.pan_speed = speed;
        self
    }

    /// Builder: enable damping with the given factor (0-1)
    pub fn with_damping(mut self, enabled: bool, factor: f32) -> Self {
        self.enable_damping = enabled;
        self.damping_factor = factor.clamp(0.0, 1.0);
        self
    }

    /// Builder: limit the camera distance to the target
    pub fn with_distance_limits(mut self, min: f32, max: f32) -> Self {
        self.min_distance = min.max(0.0);
        self.max_distance = max.max(self.min_distance);
        self
    }

    /// Builder: limit the polar angle (radians from +Y)
    pub fn with_polar_limits(mut self, min: f32, max: f32) -> Self {
        self.min_polar_angle = min.clamp(0.0, PI);
        self.max_polar_angle = max.clamp(self.min_polar_angle, PI);
        self
    }
}

/// Trait for cameras the orbit controls can drive
pub trait OrbitCamera {
    fn position(&self) -> Vec3;
    fn set_position(&mut self, position: Vec3);
    fn look_at(&mut self, target: Vec3);
    /// Vertical field of view in radians
    fn fov_y(&self) -> f32;
}

#[cfg(test)]
mod tests {
    use super::*;

    struct TestCamera {
        position: Vec3,
        target: Vec3,
    }

    impl OrbitCamera for TestCamera {
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
            50f32.to_radians()
        }
    }

    fn setup() -> (OrbitControls, TestCamera) {
        let target = Vec3::new(0.0, 1.6, 0.0);
        let position = Vec3::new(0.0, 1.6, 3.0);
        let mut controls = OrbitControls::new(target, position);
        controls.set_viewport_height(600);
        (controls, TestCamera { position, target: Vec3::ZERO })
    }

    fn drag(controls: &mut OrbitControls, button: MouseButton, dx: f64, dy: f64) {
        controls.process_cursor_moved(100.0, 100.0);
        controls.process_mouse_button(button, ElementState::Pressed);
        controls.process_cursor_moved(100.0 + dx, 100.0 + dy);
        controls.process_mouse_button(button, ElementState::Released);
    }

    #[test]
    fn test_spherical_roundtrip() {
        let offset = Vec3::new(1.0, 2.0, -3.0);
        let back = Spherical::from_offset(offset).to_offset();
        assert!((offset - back).length() < 1e-5);
    }

    #[test]
    fn test_update_without_input_keeps_camera() {
        let (mut controls, mut camera) = setup();
        let changed = controls.update(&mut camera);

        assert!(!changed);
        assert!((camera.position - Vec3::new(0.0, 1.6, 3.0)).length() < 1e-5);
        assert_eq!(camera.target, Vec3::new(0.0, 1.6, 0.0));
    }

    #[test]
    fn test_rotate_preserves_distance() {
        let (mut controls, mut camera) = setup();
        drag(&mut controls, MouseButton::Left, 150.0, 40.0);

        assert!(controls.update(&mut camera));
        assert!((controls.distance(&camera) - 3.0).abs() < 1e-4);
        assert!(camera.position.x.abs() > 0.1);
    }

    #[test]
    fn test_quarter_turn() {
        let (mut controls, mut camera) = setup();
        // A quarter of the viewport height is a quarter turn
        drag(&mut controls, MouseButton::Left, -150.0, 0.0);
        controls.update(&mut camera);

        assert!((camera.position.x - 3.0).abs() < 1e-3);
        assert!(camera.position.z.abs() < 1e-3);
    }

    #[test]
    fn test_polar_angle_clamped() {
        let (mut controls, mut camera) = setup();
        // Drag far enough to flip over the top
        drag(&mut controls, MouseButton::Left, 0.0, 5000.0);
        controls.update(&mut camera);

        let offset = camera.position - controls.target;
        assert!(offset.y <= 3.0 + 1e-4);
        assert!(Spherical::from_offset(offset).phi >= 0.0);
        assert!((offset.length() - 3.0).abs() < 1e-3);
    }

    #[test]
    fn test_scroll_dollies_in() {
        let (mut controls, mut camera) = setup();
        controls.process_scroll(1.0);
        controls.update(&mut camera);

        assert!((controls.distance(&camera) - 3.0 * 0.95).abs() < 1e-4);
    }

    #[test]
    fn test_distance_limits() {
        let (controls, mut camera) = setup();
        let mut controls = controls.with_distance_limits(2.0, 4.0);
        controls.process_scroll(100.0);
        controls.update(&mut camera);
        assert!((controls.distance(&camera) - 2.0).abs() < 1e-4);

        controls.process_scroll(-200.0);
        controls.update(&mut camera);
        assert!((controls.distance(&camera) - 4.0).abs() < 1e-4);
    }

    #[test]
    fn test_pan_moves_target() {
        let (mut controls, mut camera) = setup();
        drag(&mut controls, MouseButton::Right, 50.0, 0.0);
        controls.update(&mut camera);

        // Dragging right moves the scene right, so the target moves left
        assert!(controls.target.x < 0.0);
        assert!((controls.distance(&camera) - 3.0).abs() < 1e-4);
    }

    #[test]
    fn test_arrow_keys_pan() {
        let (mut controls, mut camera) = setup();
        assert!(controls.process_keyboard(KeyCode::ArrowUp, ElementState::Pressed));
        assert!(!controls.process_keyboard(KeyCode::KeyW, ElementState::Pressed));
        controls.update(&mut camera);

        assert!(controls.target.y > 1.6);
    }

    #[test]
    fn test_damping_spreads_motion() {
        let (controls, mut camera) = setup();
        let mut controls = controls.with_damping(true, 0.25);
        drag(&mut controls, MouseButton::Left, -150.0, 0.0);

        controls.update(&mut camera);
        let first = camera.position;
        controls.update(&mut camera);
        let second = camera.position;

        // Partial motion on the first frame, and still moving on the next
        assert!(first.x > 0.0 && first.x < 3.0);
        assert!(second.x > first.x);
    }

    #[test]
    fn test_disabled_ignores_input() {
        let (mut controls, mut camera) = setup();
        controls.enabled = false;
        drag(&mut controls, MouseButton::Left, 200.0, 0.0);

        assert!(!controls.update(&mut camera));
    }

    #[test]
    fn test_reset() {
        let (mut controls, mut camera) = setup();
        drag(&mut controls, MouseButton::Right, 80.0, 20.0);
        controls.update(&mut camera);

        controls.reset(&mut camera);
        assert_eq!(controls.target, Vec3::new(0.0, 1.6, 0.0));
        assert_eq!(camera.position, Vec3::new(0.0, 1.6, 3.0));
    }
}
