//! Rendering library for xr_room
//!
//! This crate provides the wgpu-based renderer for the room scene.
//!
//! ## Key Components
//!
//! - [`context::RenderContext`] - WGPU device, queue, and surface management
//! - [`camera::PerspectiveCamera`] - Perspective camera with a cached projection
//! - [`pipeline`] - Line, mesh, and overlay pipelines
//! - [`renderable::RenderableScene`] - Converts a SceneGraph to GPU buffers
//! - [`stereo`] - Mono and per-eye views, and the [`stereo::XrDisplay`] seam
//! - [`scene_renderer::SceneRenderer`] - Draws all views of a frame

pub mod context;
pub mod camera;
pub mod pipeline;
pub mod renderable;
pub mod stereo;
pub mod overlay;
pub mod scene_renderer;
mod error;

pub use error::RenderError;

// Re-export core types for convenience
pub use xr_room_core::{Color, Light, NodeKey, SceneGraph};

pub use camera::PerspectiveCamera;
pub use overlay::OverlayRect;
pub use renderable::{MeshBatch, RenderableScene};
pub use scene_renderer::SceneRenderer;
pub use stereo::{mono_view, Eye, EyeView, SideBySideDisplay, Viewport, XrDisplay};
