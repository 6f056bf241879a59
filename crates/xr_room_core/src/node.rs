//! Scene nodes
//!
//! A Node is a transform with an optional renderable primitive attached.

use std::collections::HashSet;
use std::sync::Arc;

use bitflags::bitflags;

use crate::geometry::{LineGeometry, MeshGeometry};
use crate::{LambertMaterial, LineBasicMaterial, Transform3D};

bitflags! {
    /// Flags indicating which parts of a node have changed since the last upload
    #[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
    pub struct DirtyFlags: u8 {
        const NONE = 0;
        const TRANSFORM = 1 << 0;
        const GEOMETRY = 1 << 1;
        const MATERIAL = 1 << 2;
        const ALL = Self::TRANSFORM.bits() | Self::GEOMETRY.bits() | Self::MATERIAL.bits();
    }
}

/// What a node draws
#[derive(Clone, Debug)]
pub enum NodeKind {
    /// Pure transform node, draws nothing
    Group,
    /// Line segments with an unlit material
    LineSegments {
        geometry: Arc<LineGeometry>,
        material: LineBasicMaterial,
    },
    /// Triangle mesh with a Lambert material
    Mesh {
        geometry: Arc<MeshGeometry>,
        material: LambertMaterial,
    },
}

/// A node in the scene graph
#[derive(Clone, Debug)]
pub struct Node {
    /// Optional name for lookup
    pub name: Option<String>,
    /// Tags for categorization (e.g. "room", "ball")
    pub tags: HashSet<String>,
    /// Transform relative to the parent
    transform: Transform3D,
    /// The attached primitive
    kind: NodeKind,
    dirty: DirtyFlags,
}

impl Node {
    fn with_kind(kind: NodeKind) -> Self {
        Self {
            name: None,
            tags: HashSet::new(),
            transform: Transform3D::identity(),
            kind,
            dirty: DirtyFlags::ALL,
        }
    }

    /// An empty group node
    pub fn group() -> Self {
        Self::with_kind(NodeKind::Group)
    }

    /// A line segments node
    pub fn line_segments(geometry: Arc<LineGeometry>, material: LineBasicMaterial) -> Self {
        Self::with_kind(NodeKind::LineSegments { geometry, material })
    }

    /// A mesh node
    pub fn mesh(geometry: Arc<MeshGeometry>, material: LambertMaterial) -> Self {
        Self::with_kind(NodeKind::Mesh { geometry, material })
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    pub fn with_tag(mut self, tag: impl Into<String>) -> Self {
        self.tags.insert(tag.into());
        self
    }

    pub fn with_transform(mut self, transform: Transform3D) -> Self {
        self.transform = transform;
        self
    }

    pub fn has_tag(&self, tag: &str) -> bool {
        self.tags.contains(tag)
    }

    #[inline]
    pub fn transform(&self) -> &Transform3D {
        &self.transform
    }

    /// Replace the transform and mark it dirty
    pub fn set_transform(&mut self, transform: Transform3D) {
        self.transform = transform;
        self.dirty |= DirtyFlags::TRANSFORM;
    }

    #[inline]
    pub fn kind(&self) -> &NodeKind {
        &self.kind
    }

    /// Replace the primitive and mark geometry and material dirty
    pub fn set_kind(&mut self, kind: NodeKind) {
        self.kind = kind;
        self.dirty |= DirtyFlags::GEOMETRY | DirtyFlags::MATERIAL;
    }

    /// Whether this node draws anything
    pub fn is_renderable(&self) -> bool {
        !matches!(self.kind, NodeKind::Group)
    }

    #[inline]
    pub fn dirty(&self) -> DirtyFlags {
        self.dirty
    }

    #[inline]
    pub fn is_dirty(&self) -> bool {
        !self.dirty.is_empty()
    }

    pub fn clear_dirty(&mut self) {
        self.dirty = DirtyFlags::NONE;
    }
}
