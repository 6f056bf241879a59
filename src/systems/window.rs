//! Application window
//!
//! Owns the winit window. The title doubles as the text readout for the
//! frame stats and the immersive button label.

use std::sync::Arc;
use winit::{
    dpi::PhysicalSize,
    event_loop::ActiveEventLoop,
    window::{Fullscreen, Window},
};
use crate::config::WindowConfig;

/// Manages the application window
pub struct WindowSystem {
    window: Arc<Window>,
    base_title: String,
}

impl WindowSystem {
    /// Open the window described by `config`
    pub fn create(
        event_loop: &ActiveEventLoop,
        config: &WindowConfig,
    ) -> Result<Self, WindowError> {
        let mut attrs = Window::default_attributes()
            .with_title(&config.title)
            .with_inner_size(winit::dpi::LogicalSize::new(
                config.width,
                config.height,
            ));

        if config.fullscreen {
            attrs = attrs.with_fullscreen(Some(Fullscreen::Borderless(None)));
        }

        let window = Arc::new(
            event_loop
                .create_window(attrs)
                .map_err(|e| WindowError::CreationFailed(e.to_string()))?,
        );

        log::info!(
            "Created window {:?} at scale factor {}",
            window.inner_size(),
            window.scale_factor()
        );

        Ok(Self {
            window,
            base_title: config.title.clone(),
        })
    }

    /// Shared handle, cloned into the render context
    pub fn window(&self) -> &Arc<Window> {
        &self.window
    }

    pub fn inner_size(&self) -> PhysicalSize<u32> {
        self.window.inner_size()
    }

    /// Physical pixels per logical pixel
    pub fn scale_factor(&self) -> f32 {
        self.window.scale_factor() as f32
    }

    /// Switch between windowed and borderless fullscreen
    pub fn toggle_fullscreen(&self) {
        let fullscreen = if self.window.fullscreen().is_some() {
            None
        } else {
            Some(Fullscreen::Borderless(None))
        };
        log::info!("Fullscreen: {}", if fullscreen.is_some() { "ON" } else { "OFF" });
        self.window.set_fullscreen(fullscreen);
    }

    /// Update window title with frame stats and the VR button label
    pub fn update_title(&self, stats: Option<&str>, vr_label: &str) {
        self.window.set_title(&format_title(&self.base_title, stats, vr_label));
    }

    pub fn request_redraw(&self) {
        self.window.request_redraw();
    }
}

fn format_title(base: &str, stats: Option<&str>, vr_label: &str) -> String {
    match stats {
        Some(stats) => format!("{} - {} [{}]", base, stats, vr_label),
        None => format!("{} [{}]", base, vr_label),
    }
}

#[derive(Debug)]
pub enum WindowError {
    CreationFailed(String),
}

impl std::fmt::Display for WindowError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            WindowError::CreationFailed(msg) => write!(f, "Window creation failed: {}", msg),
        }
    }
}

impl std::error::Error for WindowError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_title_with_stats() {
        let title = format_title("xr_room", Some("60 FPS (59-61) 16.7 ms"), "ENTER VR");
        assert_eq!(title, "xr_room - 60 FPS (59-61) 16.7 ms [ENTER VR]");
    }

    #[test]
    fn test_title_without_stats() {
        let title = format_title("xr_room", None, "EXIT VR");
        assert_eq!(title, "xr_room [EXIT VR]");
    }

    #[test]
    fn test_window_error_display() {
        let err = WindowError::CreationFailed("no display".to_string());
        assert_eq!(err.to_string(), "Window creation failed: no display");
    }
}
