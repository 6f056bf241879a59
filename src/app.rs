//! Application state and event handling
//!
//! `App` builds everything once at startup and then reacts to two kinds of
//! events: window resizes, which keep the camera aspect and render targets in
//! sync with the window, and redraw requests, which run one frame.

use std::time::Instant;

use glam::Vec3;
use winit::{
    application::ApplicationHandler,
    event::{MouseScrollDelta, WindowEvent},
    event_loop::ActiveEventLoop,
    keyboard::PhysicalKey,
    window::WindowId,
};
use xr_room_input::OrbitControls;
use xr_room_render::{OverlayRect, PerspectiveCamera, RenderError};

use crate::config::AppConfig;
use crate::input::{InputAction, InputMapper};
use crate::scene::{RoomScene, RoomSceneBuilder};
use crate::systems::{FrameStats, ImmersiveSystem, RenderSystem, WindowSystem};

/// Wheel pixels per line step for touchpads
const PIXELS_PER_SCROLL_STEP: f64 = 100.0;

/// Main application state
pub struct App {
    config: AppConfig,
    scene: RoomScene,
    camera: PerspectiveCamera,
    controls: OrbitControls,
    stats: FrameStats,
    immersive: ImmersiveSystem,
    window: Option<WindowSystem>,
    render: Option<RenderSystem>,
    cursor: Option<(f32, f32)>,
    failed: bool,
}

impl App {
    /// Build the scene, camera, controls, stats, and immersive session from config
    ///
    /// The window and GPU are created later, when the event loop resumes.
    pub fn new(config: AppConfig) -> Self {
        let scene = RoomSceneBuilder::from_config(&config.scene, &config.rendering).build();

        let cam = &config.camera;
        let aspect = config.window.width.max(1) as f32 / config.window.height.max(1) as f32;
        let mut camera = PerspectiveCamera::new(cam.fov, aspect, cam.near, cam.far)
            .with_position(Vec3::from_array(cam.position))
            .with_target(Vec3::from_array(cam.target));

        let ctl = &config.controls;
        let mut controls = OrbitControls::new(Vec3::from_array(cam.target), camera.position())
            .with_rotate_speed(ctl.rotate_speed)
            .with_zoom_speed(ctl.zoom_speed)
            .with_pan_speed(ctl.pan_speed)
            .with_damping(ctl.enable_damping, ctl.damping_factor)
            .with_distance_limits(ctl.min_distance, ctl.max_distance);
        controls.set_viewport_height(config.window.height);
        controls.update(&mut camera);

        let stats = FrameStats::new(&config.stats, Instant::now());
        let immersive = ImmersiveSystem::new(&config.immersive);

        Self {
            config,
            scene,
            camera,
            controls,
            stats,
            immersive,
            window: None,
            render: None,
            cursor: None,
            failed: false,
        }
    }

    pub fn camera(&self) -> &PerspectiveCamera {
        &self.camera
    }

    pub fn scene(&self) -> &RoomScene {
        &self.scene
    }

    pub fn immersive(&self) -> &ImmersiveSystem {
        &self.immersive
    }

    /// Whether startup failed and the app exited early
    pub fn failed(&self) -> bool {
        self.failed
    }

    /// Keep the camera, controls, and render targets in sync with the window size
    ///
    /// Zero-sized windows (minimized) are ignored.
    pub fn resize(&mut self, width: u32, height: u32) {
        if width == 0 || height == 0 {
            log::warn!("Ignoring resize to {}x{}", width, height);
            return;
        }

        self.camera.set_aspect(width, height);
        self.controls.set_viewport_height(height);
        if let Some(render) = &mut self.render {
            render.resize(width, height);
        }
        log::debug!("Resized to {}x{}, aspect {:.3}", width, height, self.camera.aspect);
    }

    /// Apply a mapped input action
    pub fn handle_action(&mut self, action: InputAction) -> bool {
        match action {
            InputAction::Exit => return false,
            InputAction::LeaveImmersive => self.immersive.end(),
            InputAction::ResetCamera => {
                self.controls.reset(&mut self.camera);
                log::info!("Camera reset to starting position");
            }
            InputAction::ToggleFullscreen => {
                if let Some(window) = &self.window {
                    window.toggle_fullscreen();
                }
            }
            InputAction::ToggleImmersive => {
                self.immersive.toggle();
            }
            InputAction::ToggleStats => {
                self.stats.toggle_visible();
            }
        }
        self.update_title();
        true
    }

    fn update_title(&self) {
        if let Some(window) = &self.window {
            window.update_title(self.stats.summary().as_deref(), self.immersive.label());
        }
    }

    fn scale_factor(&self) -> f32 {
        self.window.as_ref().map_or(1.0, WindowSystem::scale_factor)
    }

    fn surface_size(&self) -> (u32, u32) {
        match &self.render {
            Some(render) => render.size(),
            None => (self.config.window.width, self.config.window.height),
        }
    }

    fn refresh_hover(&mut self) {
        let (width, height) = self.surface_size();
        let scale = self.scale_factor();
        self.immersive.hover(self.cursor, width, height, scale);
    }

    fn overlay(&self, width: u32, height: u32) -> Vec<OverlayRect> {
        let scale = self.scale_factor();
        let mut rects = self.stats.overlay_rects(scale);
        rects.push(self.immersive.button_rect(width, height, scale));
        rects
    }

    /// Create the window and GPU resources
    fn start(&mut self, event_loop: &ActiveEventLoop) -> Result<(), Box<dyn std::error::Error>> {
        let window = WindowSystem::create(event_loop, &self.config.window)?;
        let render = RenderSystem::new(
            window.window().clone(),
            &self.config.rendering,
            self.config.window.vsync,
        )?;

        self.window = Some(window);
        self.render = Some(render);

        let (width, height) = self.surface_size();
        self.resize(width, height);
        if let Some(render) = &mut self.render {
            render.sync_scene(&mut self.scene.graph);
        }
        self.update_title();
        Ok(())
    }

    /// Run one frame: stats, controls, scene upload, views, render
    fn redraw(&mut self, event_loop: &ActiveEventLoop) {
        if self.stats.update(Instant::now()).is_some() {
            self.update_title();
        }

        self.controls.update(&mut self.camera);

        let (width, height) = self.surface_size();
        let views = self.immersive.views(&self.camera, width, height);
        let overlay = self.overlay(width, height);

        let Some(render) = &mut self.render else {
            return;
        };
        render.sync_scene(&mut self.scene.graph);

        match render.render_frame(&views, &overlay) {
            Ok(()) => {}
            Err(RenderError::SurfaceLost) => {
                log::debug!("Surface lost, reconfiguring");
                render.reconfigure();
            }
            Err(RenderError::OutOfMemory) => {
                log::error!("GPU out of memory, exiting");
                event_loop.exit();
                return;
            }
            Err(e) => log::warn!("Skipping frame: {}", e),
        }

        if let Some(window) = &self.window {
            window.request_redraw();
        }
    }
}

impl ApplicationHandler for App {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.window.is_some() {
            return;
        }

        if let Err(e) = self.start(event_loop) {
            log::error!("Startup failed: {}", e);
            self.failed = true;
            event_loop.exit();
            return;
        }

        if let Some(window) = &self.window {
            window.request_redraw();
        }
    }

    fn window_event(&mut self, event_loop: &ActiveEventLoop, _id: WindowId, event: WindowEvent) {
        match event {
            WindowEvent::CloseRequested => {
                event_loop.exit();
            }

            WindowEvent::Resized(physical_size) => {
                self.resize(physical_size.width, physical_size.height);
                self.refresh_hover();
            }

            WindowEvent::KeyboardInput { event, .. } => {
                if let PhysicalKey::Code(key) = event.physical_key {
                    match InputMapper::map_keyboard(key, event.state, self.immersive.is_active()) {
                        Some(action) => {
                            if !self.handle_action(action) {
                                event_loop.exit();
                            }
                        }
                        None => {
                            self.controls.process_keyboard(key, event.state);
                        }
                    }
                }
            }

            WindowEvent::CursorMoved { position, .. } => {
                self.cursor = Some((position.x as f32, position.y as f32));
                self.refresh_hover();
                self.controls.process_cursor_moved(position.x, position.y);
            }

            WindowEvent::CursorLeft { .. } => {
                self.cursor = None;
                self.refresh_hover();
                self.controls.process_cursor_left();
            }

            WindowEvent::MouseInput { state, button, .. } => {
                match InputMapper::map_mouse_button(button, state, self.immersive.is_button_hovered()) {
                    Some(action) => {
                        self.handle_action(action);
                        self.refresh_hover();
                    }
                    None => self.controls.process_mouse_button(button, state),
                }
            }

            WindowEvent::MouseWheel { delta, .. } => {
                let steps = match delta {
                    MouseScrollDelta::LineDelta(_, y) => y,
                    MouseScrollDelta::PixelDelta(pos) => (pos.y / PIXELS_PER_SCROLL_STEP) as f32,
                };
                self.controls.process_scroll(steps);
            }

            WindowEvent::RedrawRequested => {
                self.redraw(event_loop);
            }

            _ => {}
        }
    }
}
