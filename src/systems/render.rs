//! GPU rendering system
//!
//! Manages GPU rendering including:
//! - Render context and surface
//! - Scene upload when the graph changes
//! - Frame rendering for every view plus the overlay

use std::sync::Arc;
use winit::window::Window;
use xr_room_render::{
    context::RenderContext, EyeView, OverlayRect, RenderError, SceneGraph, SceneRenderer,
};
use crate::config::RenderingConfig;

/// Manages GPU rendering
pub struct RenderSystem {
    context: RenderContext,
    renderer: SceneRenderer,
}

impl RenderSystem {
    /// Create render system from window and config
    pub fn new(
        window: Arc<Window>,
        render_config: &RenderingConfig,
        vsync: bool,
    ) -> Result<Self, RenderError> {
        let context = pollster::block_on(RenderContext::with_vsync(window, vsync))?;
        let renderer = SceneRenderer::new(&context, render_config.sample_count());

        Ok(Self { context, renderer })
    }

    /// Handle window resize; zero sizes are ignored
    pub fn resize(&mut self, width: u32, height: u32) {
        if width == 0 || height == 0 {
            return;
        }
        self.context
            .resize(winit::dpi::PhysicalSize::new(width, height));
        self.renderer.resize(&self.context.device, width, height);
    }

    /// Reconfigure the surface after it was lost
    pub fn reconfigure(&mut self) {
        self.context.reconfigure();
    }

    /// Upload the scene's renderables if anything changed, then clear the dirty flags
    pub fn sync_scene(&mut self, graph: &mut SceneGraph) -> bool {
        if !graph.has_dirty_nodes() {
            return false;
        }
        self.renderer.upload_scene(&self.context, graph);
        graph.clear_all_dirty();
        log::info!("Uploaded {} mesh instances", self.renderer.instance_count());
        true
    }

    /// Render a single frame
    pub fn render_frame(
        &mut self,
        views: &[EyeView],
        overlay: &[OverlayRect],
    ) -> Result<(), RenderError> {
        self.renderer.render(&self.context, views, overlay)
    }

    /// Get current surface size
    pub fn size(&self) -> (u32, u32) {
        (self.context.config.width, self.context.config.height)
    }
}
