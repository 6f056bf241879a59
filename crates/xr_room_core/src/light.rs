//! Scene lights

use glam::Vec3;

use crate::Color;

/// A light contributing to Lambert shading
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Light {
    /// Ambient light blended between a sky color (normals facing +Y)
    /// and a ground color (normals facing -Y)
    Hemisphere {
        sky: Color,
        ground: Color,
        intensity: f32,
    },
    /// Parallel light arriving from `direction` (points towards the light)
    Directional {
        color: Color,
        intensity: f32,
        direction: Vec3,
    },
}

impl Light {
    /// Hemisphere light with unit intensity
    pub fn hemisphere(sky: Color, ground: Color) -> Self {
        Light::Hemisphere {
            sky,
            ground,
            intensity: 1.0,
        }
    }

    /// Directional light with unit intensity shining from `position` towards the origin
    ///
    /// Zero positions fall back to straight down lighting.
    pub fn directional(color: Color, position: Vec3) -> Self {
        Light::Directional {
            color,
            intensity: 1.0,
            direction: position.try_normalize().unwrap_or(Vec3::Y),
        }
    }
}
