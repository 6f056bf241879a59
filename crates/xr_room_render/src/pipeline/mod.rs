//! Rendering pipeline components
//!
//! Lines and meshes share a per-view uniform bind group; the overlay is
//! drawn in screen space on top of them.

mod buffer;
pub mod types;
pub mod targets;
pub mod view_bindings;
pub mod line_pipeline;
pub mod mesh_pipeline;
pub mod overlay_pipeline;

// Re-export types
pub use types::{FrameUniforms, LineVertex, MeshInstance, MeshVertex, OverlayVertex};
pub use targets::{RenderTargets, DEPTH_FORMAT};
pub use view_bindings::{ViewBindings, MAX_VIEWS};

// Re-export pipelines
pub use line_pipeline::LinePipeline;
pub use mesh_pipeline::MeshPipeline;
pub use overlay_pipeline::OverlayPipeline;
