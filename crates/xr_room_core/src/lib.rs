//! Core types for xr_room
//!
//! This crate provides the scene description that the renderer consumes:
//!
//! - [`Transform3D`] - Position, rotation, and scale relative to a parent
//! - [`Node`] - A transform with an optional line or mesh primitive
//! - [`SceneGraph`] - Parent/child container for nodes, plus background and lights
//! - [`NodeKey`] - Generational key to a node in the graph
//! - [`Color`], [`LineBasicMaterial`], [`LambertMaterial`] - Surface appearance
//! - [`Light`] - Hemisphere and directional lights
//! - [`geometry`] - Procedural wireframe box and geodesic sphere

mod transform;
mod material;
mod light;
mod node;
mod scene_graph;
pub mod geometry;

pub use transform::Transform3D;
pub use material::{Color, LambertMaterial, LineBasicMaterial, MAX_HEX_COLOR};
pub use light::Light;
pub use node::{DirtyFlags, Node, NodeKind};
pub use scene_graph::{NodeKey, SceneGraph};
pub use geometry::{LineGeometry, MeshGeometry};

// Re-export the math types used throughout the public API
pub use glam::{Mat4, Quat, Vec3};
