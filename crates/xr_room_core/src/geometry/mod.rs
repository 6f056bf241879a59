//! Procedural geometry
//!
//! Geometry is pure data in local space - no colors or materials.
//! Nodes share it through `Arc` so one sphere mesh can back many instances.

mod box_line;
mod icosahedron;

use glam::Vec3;

pub use box_line::{box_line_geometry, BoxLineParams};
pub use icosahedron::icosahedron_geometry;

/// Line segments stored as consecutive vertex pairs
#[derive(Clone, Debug, Default, PartialEq)]
pub struct LineGeometry {
    /// Segment endpoints; `positions[2n]` and `positions[2n + 1]` form segment `n`
    pub positions: Vec<Vec3>,
    /// Construction parameters when built by `box_line_geometry`
    pub box_params: Option<BoxLineParams>,
}

impl LineGeometry {
    /// Number of line segments
    #[inline]
    pub fn segment_count(&self) -> usize {
        self.positions.len() / 2
    }

    /// Iterate over segments as endpoint pairs
    pub fn segments(&self) -> impl Iterator<Item = (Vec3, Vec3)> + '_ {
        self.positions.chunks_exact(2).map(|pair| (pair[0], pair[1]))
    }

    /// Axis-aligned bounds as (min, max), or None when empty
    pub fn bounds(&self) -> Option<(Vec3, Vec3)> {
        bounds_of(&self.positions)
    }
}

/// A non-indexed triangle list with per-vertex normals
#[derive(Clone, Debug, Default, PartialEq)]
pub struct MeshGeometry {
    pub positions: Vec<Vec3>,
    pub normals: Vec<Vec3>,
}

impl MeshGeometry {
    #[inline]
    pub fn vertex_count(&self) -> usize {
        self.positions.len()
    }

    #[inline]
    pub fn triangle_count(&self) -> usize {
        self.positions.len() / 3
    }

    /// Iterate over triangles as vertex triples
    pub fn triangles(&self) -> impl Iterator<Item = [Vec3; 3]> + '_ {
        self.positions
            .chunks_exact(3)
            .map(|tri| [tri[0], tri[1], tri[2]])
    }

    pub fn bounds(&self) -> Option<(Vec3, Vec3)> {
        bounds_of(&self.positions)
    }
}

fn bounds_of(points: &[Vec3]) -> Option<(Vec3, Vec3)> {
    let first = *points.first()?;
    Some(
        points
            .iter()
            .fold((first, first), |(min, max), p| (min.min(*p), max.max(*p))),
    )
}
