//! GPU-compatible data types for the scene pipelines
//!
//! These types are designed to match the shader layouts exactly.
//! All types derive Pod and Zeroable for safe GPU buffer operations.

use bytemuck::{Pod, Zeroable};
use glam::Mat4;
use xr_room_core::{Color, Light};

/// A world-space line vertex
#[repr(C)]
#[derive(Clone, Copy, Debug, PartialEq, Pod, Zeroable)]
pub struct LineVertex {
    pub position: [f32; 3],
    pub color: [f32; 4],
}

impl LineVertex {
    pub fn new(position: [f32; 3], color: [f32; 4]) -> Self {
        Self { position, color }
    }
}

/// A mesh vertex in model space
#[repr(C)]
#[derive(Clone, Copy, Debug, PartialEq, Pod, Zeroable)]
pub struct MeshVertex {
    pub position: [f32; 3],
    pub normal: [f32; 3],
}

/// Per-instance data for a mesh draw
///
/// The model matrix occupies shader locations 2-5 and the color location 6.
#[repr(C)]
#[derive(Clone, Copy, Debug, PartialEq, Pod, Zeroable)]
pub struct MeshInstance {
    /// Column-major model matrix
    pub model: [[f32; 4]; 4],
    /// Diffuse color (RGBA)
    pub color: [f32; 4],
}

impl MeshInstance {
    pub fn new(model: Mat4, color: Color) -> Self {
        Self {
            model: model.to_cols_array_2d(),
            color: color.to_rgba(1.0),
        }
    }
}

/// A screen-space overlay vertex in normalized device coordinates
#[repr(C)]
#[derive(Clone, Copy, Debug, PartialEq, Pod, Zeroable)]
pub struct OverlayVertex {
    pub position: [f32; 2],
    pub color: [f32; 4],
}

/// Per-view uniforms shared by the line and mesh shaders
/// Layout: 128 bytes total (must match FrameUniforms in line.wgsl and mesh.wgsl)
#[repr(C)]
#[derive(Clone, Copy, Debug, PartialEq, Pod, Zeroable)]
pub struct FrameUniforms {
    /// View-projection matrix (64 bytes)
    pub view_proj: [[f32; 4]; 4],
    /// Hemisphere sky color, w = hemisphere intensity
    pub sky_color: [f32; 4],
    /// Hemisphere ground color, w unused
    pub ground_color: [f32; 4],
    /// Direction towards the directional light, w unused
    pub light_dir: [f32; 4],
    /// Directional light color, w = intensity
    pub light_color: [f32; 4],
}

impl Default for FrameUniforms {
    fn default() -> Self {
        Self {
            view_proj: Mat4::IDENTITY.to_cols_array_2d(),
            sky_color: [0.0; 4],
            ground_color: [0.0; 4],
            light_dir: [0.0, 1.0, 0.0, 0.0],
            light_color: [0.0; 4],
        }
    }
}

impl FrameUniforms {
    /// Build uniforms for a view from the scene's lights
    ///
    /// Only the first hemisphere and the first directional light are used.
    /// Missing lights contribute nothing.
    pub fn from_lights(view_proj: Mat4, lights: &[Light]) -> Self {
        let mut uniforms = Self {
            view_proj: view_proj.to_cols_array_2d(),
            ..Self::default()
        };

        if let Some((sky, ground, intensity)) = lights.iter().find_map(|light| match light {
            Light::Hemisphere { sky, ground, intensity } => Some((*sky, *ground, *intensity)),
            _ => None,
        }) {
            uniforms.sky_color = sky.to_rgba(intensity);
            uniforms.ground_color = ground.to_rgba(0.0);
        }

        if let Some((color, intensity, direction)) = lights.iter().find_map(|light| match light {
            Light::Directional { color, intensity, direction } => {
                Some((*color, *intensity, *direction))
            }
            _ => None,
        }) {
            uniforms.light_dir = direction.extend(0.0).to_array();
            uniforms.light_color = color.to_rgba(intensity);
        }

        uniforms
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use glam::Vec3;
    use std::mem::size_of;

    #[test]
    fn test_line_vertex_size() {
        // 3 floats position + 4 floats color = 28 bytes
        assert_eq!(size_of::<LineVertex>(), 28);
    }

    #[test]
    fn test_mesh_vertex_size() {
        // 3 floats position + 3 floats normal = 24 bytes
        assert_eq!(size_of::<MeshVertex>(), 24);
    }

    #[test]
    fn test_mesh_instance_size() {
        // 16 floats model + 4 floats color = 80 bytes
        assert_eq!(size_of::<MeshInstance>(), 80);
    }

    #[test]
    fn test_overlay_vertex_size() {
        assert_eq!(size_of::<OverlayVertex>(), 24);
    }

    #[test]
    fn test_frame_uniforms_size() {
        // 16 floats view_proj + 4 vec4s = 32 floats = 128 bytes
        assert_eq!(size_of::<FrameUniforms>(), 128);
    }

    #[test]
    fn test_alignment() {
        assert_eq!(std::mem::align_of::<LineVertex>(), 4);
        assert_eq!(std::mem::align_of::<MeshInstance>(), 4);
        assert_eq!(std::mem::align_of::<FrameUniforms>(), 4);
    }

    #[test]
    fn test_from_lights() {
        let lights = [
            Light::hemisphere(Color::from_hex(0x606060), Color::from_hex(0x404040)),
            Light::directional(Color::WHITE, Vec3::ONE),
        ];
        let uniforms = FrameUniforms::from_lights(Mat4::IDENTITY, &lights);

        assert!((uniforms.sky_color[0] - 0x60 as f32 / 255.0).abs() < 1e-6);
        assert_eq!(uniforms.sky_color[3], 1.0);
        assert!((uniforms.ground_color[0] - 0x40 as f32 / 255.0).abs() < 1e-6);
        assert_eq!(uniforms.light_color, [1.0, 1.0, 1.0, 1.0]);

        let dir = Vec3::new(uniforms.light_dir[0], uniforms.light_dir[1], uniforms.light_dir[2]);
        assert!((dir.length() - 1.0).abs() < 1e-6);
    }

    #[test]
    fn test_from_lights_without_lights() {
        let uniforms = FrameUniforms::from_lights(Mat4::IDENTITY, &[]);
        assert_eq!(uniforms.sky_color, [0.0; 4]);
        assert_eq!(uniforms.light_color, [0.0; 4]);
    }

    #[test]
    fn test_mesh_instance_translation() {
        let instance = MeshInstance::new(Mat4::from_translation(Vec3::new(1.0, 2.0, 3.0)), Color::WHITE);
        assert_eq!(instance.model[3], [1.0, 2.0, 3.0, 1.0]);
        assert_eq!(instance.color, [1.0, 1.0, 1.0, 1.0]);
    }
}
