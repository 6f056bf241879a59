//! Frame rendering for the scene graph
//!
//! One render pass per frame: clear to the scene background, then lines and
//! meshes once per view (each confined to its viewport), then the overlay
//! across the whole surface.

use xr_room_core::{Color, Light, SceneGraph};

use crate::context::RenderContext;
use crate::overlay::{overlay_vertices, OverlayRect};
use crate::pipeline::{
    FrameUniforms, LinePipeline, MeshPipeline, OverlayPipeline, RenderTargets, ViewBindings,
    MAX_VIEWS,
};
use crate::renderable::RenderableScene;
use crate::stereo::{EyeView, Viewport};
use crate::RenderError;

/// Draws a [`SceneGraph`] to the window surface
pub struct SceneRenderer {
    line_pipeline: LinePipeline,
    mesh_pipeline: MeshPipeline,
    overlay_pipeline: OverlayPipeline,
    view_bindings: ViewBindings,
    targets: RenderTargets,
    background: wgpu::Color,
    lights: Vec<Light>,
}

impl SceneRenderer {
    /// Create the pipelines for the context's surface
    ///
    /// Falls back to no multisampling when `sample_count` is not supported.
    pub fn new(ctx: &RenderContext, sample_count: u32) -> Self {
        let sample_count = if ctx.supports_sample_count(sample_count) {
            sample_count.max(1)
        } else {
            log::warn!(
                "MSAA x{} not supported for {:?}, rendering without antialiasing",
                sample_count,
                ctx.config.format
            );
            1
        };
        log::info!("Scene renderer using {} sample(s) per pixel", sample_count);

        let format = ctx.config.format;
        let view_bindings = ViewBindings::new(&ctx.device);
        let line_pipeline =
            LinePipeline::new(&ctx.device, format, view_bindings.layout(), sample_count);
        let mesh_pipeline =
            MeshPipeline::new(&ctx.device, format, view_bindings.layout(), sample_count);
        let overlay_pipeline = OverlayPipeline::new(&ctx.device, format, sample_count);
        let targets = RenderTargets::new(
            &ctx.device,
            format,
            ctx.config.width,
            ctx.config.height,
            sample_count,
        );

        Self {
            line_pipeline,
            mesh_pipeline,
            overlay_pipeline,
            view_bindings,
            targets,
            background: to_wgpu_color(Color::BLACK),
            lights: Vec::new(),
        }
    }

    /// Recreate depth and multisample targets for a new surface size
    pub fn resize(&mut self, device: &wgpu::Device, width: u32, height: u32) {
        self.targets.resize(device, width, height);
    }

    /// Collect the graph's renderables and upload them
    pub fn upload_scene(&mut self, ctx: &RenderContext, graph: &SceneGraph) {
        let scene = RenderableScene::from_graph(graph);
        log::debug!(
            "Uploading scene: {} line segments, {} mesh instances in {} batch(es)",
            scene.segment_count(),
            scene.instance_count(),
            scene.meshes.len()
        );

        self.line_pipeline.upload(&ctx.device, &ctx.queue, &scene.lines);
        self.mesh_pipeline.upload(&ctx.device, &ctx.queue, &scene.meshes);
        self.background = to_wgpu_color(graph.background());
        self.lights = graph.lights().to_vec();
    }

    /// Number of uploaded mesh instances
    pub fn instance_count(&self) -> u32 {
        self.mesh_pipeline.instance_count()
    }

    #[inline]
    pub fn sample_count(&self) -> u32 {
        self.targets.sample_count()
    }

    /// Render one frame and present it
    pub fn render(
        &mut self,
        ctx: &RenderContext,
        views: &[EyeView],
        overlay: &[OverlayRect],
    ) -> Result<(), RenderError> {
        if views.len() > MAX_VIEWS {
            log::warn!("Rendering only {} of {} views", MAX_VIEWS, views.len());
        }
        let views = &views[..views.len().min(MAX_VIEWS)];

        let frame = ctx.surface.get_current_texture()?;
        let frame_view = frame
            .texture
            .create_view(&wgpu::TextureViewDescriptor::default());

        let (width, height) = (ctx.config.width, ctx.config.height);
        for (slot, view) in views.iter().enumerate() {
            let uniforms = FrameUniforms::from_lights(view.view_projection, &self.lights);
            self.view_bindings.write(&ctx.queue, slot, &uniforms);
        }
        self.overlay_pipeline
            .upload(&ctx.device, &ctx.queue, &overlay_vertices(overlay, width, height));

        let mut encoder = ctx
            .device
            .create_command_encoder(&wgpu::CommandEncoderDescriptor {
                label: Some("Frame Encoder"),
            });

        {
            let mut pass = encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
                label: Some("Scene Pass"),
                color_attachments: &[Some(
                    self.targets.color_attachment(&frame_view, self.background),
                )],
                depth_stencil_attachment: Some(wgpu::RenderPassDepthStencilAttachment {
                    view: self.targets.depth_view(),
                    depth_ops: Some(wgpu::Operations {
                        load: wgpu::LoadOp::Clear(1.0),
                        store: wgpu::StoreOp::Store,
                    }),
                    stencil_ops: None,
                }),
                timestamp_writes: None,
                occlusion_query_set: None,
            });

            for (slot, view) in views.iter().enumerate() {
                let Some(bind_group) = self.view_bindings.bind_group(slot) else {
                    continue;
                };
                let Some(scissor) = scissor_rect(&view.viewport, width, height) else {
                    continue;
                };
                let vp = view.viewport;
                pass.set_viewport(vp.x, vp.y, vp.width, vp.height, 0.0, 1.0);
                pass.set_scissor_rect(scissor.0, scissor.1, scissor.2, scissor.3);

                self.line_pipeline.draw(&mut pass, bind_group);
                self.mesh_pipeline.draw(&mut pass, bind_group);
            }

            pass.set_viewport(0.0, 0.0, width as f32, height as f32, 0.0, 1.0);
            pass.set_scissor_rect(0, 0, width, height);
            self.overlay_pipeline.draw(&mut pass);
        }

        ctx.queue.submit(std::iter::once(encoder.finish()));
        frame.present();
        Ok(())
    }
}

fn to_wgpu_color(color: Color) -> wgpu::Color {
    wgpu::Color {
        r: color.r as f64,
        g: color.g as f64,
        b: color.b as f64,
        a: 1.0,
    }
}

/// Integer scissor rectangle for a viewport, clipped to the surface
///
/// Returns None when nothing of the viewport is visible.
fn scissor_rect(viewport: &Viewport, width: u32, height: u32) -> Option<(u32, u32, u32, u32)> {
    let x0 = (viewport.x.max(0.0) as u32).min(width);
    let y0 = (viewport.y.max(0.0) as u32).min(height);
    let x1 = ((viewport.x + viewport.width).max(0.0).ceil() as u32).min(width);
    let y1 = ((viewport.y + viewport.height).max(0.0).ceil() as u32).min(height);
    if x1 <= x0 || y1 <= y0 {
        None
    } else {
        Some((x0, y0, x1 - x0, y1 - y0))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_scissor_full_surface() {
        let viewport = Viewport::full(800, 600);
        assert_eq!(scissor_rect(&viewport, 800, 600), Some((0, 0, 800, 600)));
    }

    #[test]
    fn test_scissor_right_half() {
        let viewport = Viewport::new(400.0, 0.0, 400.0, 600.0);
        assert_eq!(scissor_rect(&viewport, 800, 600), Some((400, 0, 400, 600)));
    }

    #[test]
    fn test_scissor_clipped_and_empty() {
        let oversized = Viewport::new(-10.0, -10.0, 1000.0, 1000.0);
        assert_eq!(scissor_rect(&oversized, 800, 600), Some((0, 0, 800, 600)));

        let outside = Viewport::new(900.0, 0.0, 100.0, 100.0);
        assert_eq!(scissor_rect(&outside, 800, 600), None);
    }

    #[test]
    fn test_background_conversion() {
        let color = to_wgpu_color(Color::from_hex(0x505050));
        assert!((color.r - 0x50 as f64 / 255.0).abs() < 1e-6);
        assert_eq!(color.a, 1.0);
    }
}
