//! Per-eye views for immersive rendering
//!
//! A frame is rendered once per [`EyeView`]. Outside immersive mode that is a
//! single mono view covering the window; an [`XrDisplay`] supplies the eye
//! views while a session is active.

use glam::{Mat4, Vec3};

use crate::camera::PerspectiveCamera;

/// Default interpupillary distance in meters
pub const DEFAULT_EYE_SEPARATION: f32 = 0.064;

/// Which eye a view belongs to
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Eye {
    Mono,
    Left,
    Right,
}

/// Pixel rectangle of the surface, origin top-left
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Viewport {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

impl Viewport {
    pub fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self { x, y, width, height }
    }

    /// Viewport covering a whole surface
    pub fn full(width: u32, height: u32) -> Self {
        Self::new(0.0, 0.0, width as f32, height as f32)
    }

    pub fn aspect(&self) -> f32 {
        if self.height <= 0.0 {
            1.0
        } else {
            self.width / self.height
        }
    }
}

/// Everything needed to render the scene once
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct EyeView {
    pub eye: Eye,
    pub viewport: Viewport,
    pub view_projection: Mat4,
    /// World-space eye position
    pub position: Vec3,
}

/// Single view covering the whole surface
pub fn mono_view(camera: &PerspectiveCamera, width: u32, height: u32) -> EyeView {
    EyeView {
        eye: Eye::Mono,
        viewport: Viewport::full(width, height),
        view_projection: camera.view_projection(),
        position: camera.position(),
    }
}

/// A display able to present immersive (per-eye) frames
pub trait XrDisplay {
    /// Whether immersive presentation is available at all
    fn is_supported(&self) -> bool;

    /// Views to render this frame for a surface of `width` x `height` pixels
    fn eye_views(&self, camera: &PerspectiveCamera, width: u32, height: u32) -> Vec<EyeView>;
}

/// Stereo rendition in the window: left eye in the left half, right eye in the right half
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SideBySideDisplay {
    /// Distance between the eyes in meters
    pub eye_separation: f32,
}

impl Default for SideBySideDisplay {
    fn default() -> Self {
        Self::new(DEFAULT_EYE_SEPARATION)
    }
}

impl SideBySideDisplay {
    pub fn new(eye_separation: f32) -> Self {
        Self { eye_separation }
    }

    fn eye_view(
        &self,
        camera: &PerspectiveCamera,
        eye: Eye,
        viewport: Viewport,
        projection: Mat4,
    ) -> EyeView {
        let half = self.eye_separation / 2.0;
        let offset = match eye {
            Eye::Left => -half,
            Eye::Right => half,
            Eye::Mono => 0.0,
        };
        let position = camera.position() + camera.right() * offset;
        EyeView {
            eye,
            viewport,
            view_projection: projection * camera.view_matrix_from(position),
            position,
        }
    }
}

impl XrDisplay for SideBySideDisplay {
    fn is_supported(&self) -> bool {
        true
    }

    fn eye_views(&self, camera: &PerspectiveCamera, width: u32, height: u32) -> Vec<EyeView> {
        let half_width = width as f32 / 2.0;
        let height = height as f32;
        let left = Viewport::new(0.0, 0.0, half_width, height);
        let right = Viewport::new(half_width, 0.0, half_width, height);
        let projection = camera.projection_with_aspect(left.aspect());

        vec![
            self.eye_view(camera, Eye::Left, left, projection),
            self.eye_view(camera, Eye::Right, right, projection),
        ]
    }
}
