//! Colors and materials
//!
//! Colors are stored as linear RGB floats. Hex values are taken as-is,
//! without an sRGB decode.

use rand::Rng;
use serde::{Deserialize, Serialize};

/// Largest 24-bit color value
pub const MAX_HEX_COLOR: u32 = 0xff_ffff;

/// An RGB color with components in 0.0-1.0
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Color {
    pub r: f32,
    pub g: f32,
    pub b: f32,
}

impl Default for Color {
    fn default() -> Self {
        Self::WHITE
    }
}

impl Color {
    pub const WHITE: Self = Self { r: 1.0, g: 1.0, b: 1.0 };
    pub const BLACK: Self = Self { r: 0.0, g: 0.0, b: 0.0 };

    /// Create a color from float components
    pub const fn from_rgb(r: f32, g: f32, b: f32) -> Self {
        Self { r, g, b }
    }

    /// Create a color from a 0xRRGGBB value (bits above 24 are ignored)
    pub fn from_hex(hex: u32) -> Self {
        let hex = hex & MAX_HEX_COLOR;
        Self {
            r: ((hex >> 16) & 0xff) as f32 / 255.0,
            g: ((hex >> 8) & 0xff) as f32 / 255.0,
            b: (hex & 0xff) as f32 / 255.0,
        }
    }

    /// Back to a 0xRRGGBB value (components are clamped and rounded)
    pub fn to_hex(&self) -> u32 {
        let channel = |c: f32| (c.clamp(0.0, 1.0) * 255.0).round() as u32;
        (channel(self.r) << 16) | (channel(self.g) << 8) | channel(self.b)
    }

    /// A uniformly random 24-bit color
    pub fn random<R: Rng + ?Sized>(rng: &mut R) -> Self {
        Self::from_hex(rng.gen_range(0..MAX_HEX_COLOR))
    }

    /// RGBA array with the given alpha
    #[inline]
    pub fn to_rgba(&self, alpha: f32) -> [f32; 4] {
        [self.r, self.g, self.b, alpha]
    }

    /// Scale all components
    #[inline]
    pub fn scaled(&self, factor: f32) -> Self {
        Self::from_rgb(self.r * factor, self.g * factor, self.b * factor)
    }
}

/// Unlit material for line primitives
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct LineBasicMaterial {
    pub color: Color,
}

impl LineBasicMaterial {
    pub fn new(color: Color) -> Self {
        Self { color }
    }
}

/// Diffuse-only material lit by the scene lights
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct LambertMaterial {
    pub color: Color,
}

impl LambertMaterial {
    pub fn new(color: Color) -> Self {
        Self { color }
    }
}
