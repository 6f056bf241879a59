//! Wireframe box made of grid lines on each face

use glam::Vec3;
use serde::{Deserialize, Serialize};

use super::LineGeometry;

/// Dimensions and subdivisions of a wireframe box
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct BoxLineParams {
    pub width: f32,
    pub height: f32,
    pub depth: f32,
    pub width_segments: u32,
    pub height_segments: u32,
    pub depth_segments: u32,
}

impl BoxLineParams {
    /// Total number of line segments the box produces
    pub fn segment_count(&self) -> usize {
        4 * (self.width_segments as usize
            + 1
            + self.height_segments as usize
            + 1
            + self.depth_segments as usize
            + 1)
    }
}

/// Build a wireframe box centered at the origin
///
/// Every subdivision step along an axis contributes one rectangle
/// (4 segments) perpendicular to that axis, including both end faces.
/// Segment counts below 1 are raised to 1.
pub fn box_line_geometry(
    width: f32,
    height: f32,
    depth: f32,
    width_segments: u32,
    height_segments: u32,
    depth_segments: u32,
) -> LineGeometry {
    let params = BoxLineParams {
        width,
        height,
        depth,
        width_segments: width_segments.max(1),
        height_segments: height_segments.max(1),
        depth_segments: depth_segments.max(1),
    };

    let hw = width / 2.0;
    let hh = height / 2.0;
    let hd = depth / 2.0;

    let step_x = width / params.width_segments as f32;
    let step_y = height / params.height_segments as f32;
    let step_z = depth / params.depth_segments as f32;

    let mut positions = Vec::with_capacity(params.segment_count() * 2);
    let mut rect = |corners: [Vec3; 4]| {
        for i in 0..4 {
            positions.push(corners[i]);
            positions.push(corners[(i + 1) % 4]);
        }
    };

    for i in 0..=params.width_segments {
        let x = -hw + i as f32 * step_x;
        rect([
            Vec3::new(x, -hh, -hd),
            Vec3::new(x, hh, -hd),
            Vec3::new(x, hh, hd),
            Vec3::new(x, -hh, hd),
        ]);
    }

    for i in 0..=params.height_segments {
        let y = -hh + i as f32 * step_y;
        rect([
            Vec3::new(-hw, y, -hd),
            Vec3::new(hw, y, -hd),
            Vec3::new(hw, y, hd),
            Vec3::new(-hw, y, hd),
        ]);
    }

    for i in 0..=params.depth_segments {
        let z = -hd + i as f32 * step_z;
        rect([
            Vec3::new(-hw, -hh, z),
            Vec3::new(-hw, hh, z),
            Vec3::new(hw, hh, z),
            Vec3::new(hw, -hh, z),
        ]);
    }

    LineGeometry {
        positions,
        box_params: Some(params),
    }
}
