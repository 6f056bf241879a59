//! Immersive session system
//!
//! Owns the immersive session state, the display that provides per-eye
//! views, and the on-screen button that enters and leaves the session.

use xr_room_render::{mono_view, EyeView, OverlayRect, PerspectiveCamera, SideBySideDisplay, XrDisplay};

use crate::config::ImmersiveConfig;

/// Lifecycle of an immersive session
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionState {
    /// The display cannot present immersive frames
    Unsupported,
    /// Supported, currently rendering the mono view
    Inactive,
    /// Rendering one view per eye
    Active,
}

/// Immersive session state machine
#[derive(Debug, Clone)]
pub struct ImmersiveSession {
    state: SessionState,
}

impl ImmersiveSession {
    pub fn new(supported: bool) -> Self {
        let state = if supported {
            SessionState::Inactive
        } else {
            SessionState::Unsupported
        };
        Self { state }
    }

    pub fn state(&self) -> SessionState {
        self.state
    }

    pub fn is_active(&self) -> bool {
        self.state == SessionState::Active
    }

    /// Enter or leave the session; does nothing when unsupported
    pub fn toggle(&mut self) -> SessionState {
        self.state = match self.state {
            SessionState::Unsupported => {
                log::warn!("Immersive mode is not supported on this display");
                SessionState::Unsupported
            }
            SessionState::Inactive => {
                log::info!("Immersive session started");
                SessionState::Active
            }
            SessionState::Active => {
                log::info!("Immersive session ended");
                SessionState::Inactive
            }
        };
        self.state
    }

    /// Leave the session if one is running
    pub fn end(&mut self) {
        if self.is_active() {
            self.toggle();
        }
    }
}

// Button layout in unscaled pixels
const BUTTON_WIDTH: f32 = 100.0;
const BUTTON_WIDTH_UNSUPPORTED: f32 = 150.0;
const BUTTON_HEIGHT: f32 = 40.0;
const BUTTON_BOTTOM_MARGIN: f32 = 20.0;

/// On-screen control for entering and leaving immersive mode
///
/// Bottom-centered. Text is not rendered, so the label is shown in the window title.
#[derive(Debug, Clone, Default)]
pub struct VrButton {
    hovered: bool,
}

impl VrButton {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn label(state: SessionState) -> &'static str {
        match state {
            SessionState::Unsupported => "VR NOT SUPPORTED",
            SessionState::Inactive => "ENTER VR",
            SessionState::Active => "EXIT VR",
        }
    }

    /// Button rectangle for a window of `width` x `height` pixels
    pub fn rect(&self, state: SessionState, width: u32, height: u32, scale: f32) -> OverlayRect {
        let button_width = match state {
            SessionState::Unsupported => BUTTON_WIDTH_UNSUPPORTED,
            _ => BUTTON_WIDTH,
        } * scale;
        let button_height = BUTTON_HEIGHT * scale;

        OverlayRect::new(
            (width as f32 - button_width) / 2.0,
            height as f32 - button_height - BUTTON_BOTTOM_MARGIN * scale,
            button_width,
            button_height,
            self.color(state),
        )
    }

    fn color(&self, state: SessionState) -> [f32; 4] {
        let alpha = if self.hovered { 0.9 } else { 0.5 };
        match state {
            SessionState::Unsupported => [0.7, 0.08, 0.08, alpha],
            SessionState::Inactive => [0.05, 0.05, 0.05, alpha],
            SessionState::Active => [0.9, 0.9, 0.9, alpha],
        }
    }

    /// Update the hover state from the cursor position; returns whether it is over the button
    pub fn hover(&mut self, state: SessionState, cursor: Option<(f32, f32)>, width: u32, height: u32, scale: f32) -> bool {
        let rect = self.rect(state, width, height, scale);
        self.hovered = cursor.is_some_and(|(x, y)| rect.contains(x, y));
        self.hovered
    }

    pub fn is_hovered(&self) -> bool {
        self.hovered
    }
}

/// Session, display, and entry button together
pub struct ImmersiveSystem {
    session: ImmersiveSession,
    display: Box<dyn XrDisplay>,
    button: VrButton,
}

impl ImmersiveSystem {
    /// Create the system with a side-by-side stereo display
    pub fn new(config: &ImmersiveConfig) -> Self {
        Self::with_display(config, Box::new(SideBySideDisplay::new(config.eye_separation)))
    }

    pub fn with_display(config: &ImmersiveConfig, display: Box<dyn XrDisplay>) -> Self {
        let supported = config.enabled && display.is_supported();
        log::info!("Immersive mode supported: {}", supported);
        Self {
            session: ImmersiveSession::new(supported),
            display,
            button: VrButton::new(),
        }
    }

    pub fn state(&self) -> SessionState {
        self.session.state()
    }

    pub fn is_active(&self) -> bool {
        self.session.is_active()
    }

    pub fn toggle(&mut self) -> SessionState {
        self.session.toggle()
    }

    pub fn end(&mut self) {
        self.session.end();
    }

    pub fn label(&self) -> &'static str {
        VrButton::label(self.state())
    }

    /// Track the cursor over the button; returns whether it is hovered
    pub fn hover(&mut self, cursor: Option<(f32, f32)>, width: u32, height: u32, scale: f32) -> bool {
        let state = self.state();
        self.button.hover(state, cursor, width, height, scale)
    }

    pub fn is_button_hovered(&self) -> bool {
        self.button.is_hovered()
    }

    pub fn button_rect(&self, width: u32, height: u32, scale: f32) -> OverlayRect {
        self.button.rect(self.state(), width, height, scale)
    }

    /// Views to render this frame: one per eye while active, otherwise a single mono view
    pub fn views(&self, camera: &PerspectiveCamera, width: u32, height: u32) -> Vec<EyeView> {
        if self.is_active() {
            self.display.eye_views(camera, width, height)
        } else {
            vec![mono_view(camera, width, height)]
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use xr_room_render::Eye;

    struct NoDisplay;

    impl XrDisplay for NoDisplay {
        fn is_supported(&self) -> bool {
            false
        }

        fn eye_views(&self, _camera: &PerspectiveCamera, _width: u32, _height: u32) -> Vec<EyeView> {
            Vec::new()
        }
    }

    #[test]
    fn test_session_toggle() {
        let mut session = ImmersiveSession::new(true);
        assert_eq!(session.state(), SessionState::Inactive);
        assert_eq!(session.toggle(), SessionState::Active);
        assert!(session.is_active());
        assert_eq!(session.toggle(), SessionState::Inactive);
    }

    #[test]
    fn test_unsupported_toggle_is_noop() {
        let mut session = ImmersiveSession::new(false);
        assert_eq!(session.toggle(), SessionState::Unsupported);
        session.end();
        assert_eq!(session.state(), SessionState::Unsupported);
    }

    #[test]
    fn test_end() {
        let mut session = ImmersiveSession::new(true);
        session.end();
        assert_eq!(session.state(), SessionState::Inactive);
        session.toggle();
        session.end();
        assert_eq!(session.state(), SessionState::Inactive);
    }

    #[test]
    fn test_button_labels() {
        assert_eq!(VrButton::label(SessionState::Inactive), "ENTER VR");
        assert_eq!(VrButton::label(SessionState::Active), "EXIT VR");
        assert_eq!(VrButton::label(SessionState::Unsupported), "VR NOT SUPPORTED");
    }

    #[test]
    fn test_button_bottom_centered() {
        let button = VrButton::new();
        let rect = button.rect(SessionState::Inactive, 800, 600, 1.0);
        assert_eq!(rect.x, 350.0);
        assert_eq!(rect.width, 100.0);
        assert_eq!(rect.y + rect.height, 580.0);
    }

    #[test]
    fn test_button_hover() {
        let mut button = VrButton::new();
        assert!(button.hover(SessionState::Inactive, Some((400.0, 560.0)), 800, 600, 1.0));
        assert!(!button.hover(SessionState::Inactive, Some((10.0, 10.0)), 800, 600, 1.0));
        assert!(!button.hover(SessionState::Inactive, None, 800, 600, 1.0));
    }

    #[test]
    fn test_views_follow_session() {
        let mut system = ImmersiveSystem::new(&ImmersiveConfig::default());
        let camera = PerspectiveCamera::default();

        let views = system.views(&camera, 800, 600);
        assert_eq!(views.len(), 1);
        assert_eq!(views[0].eye, Eye::Mono);

        system.toggle();
        let views = system.views(&camera, 800, 600);
        assert_eq!(views.len(), 2);
        assert_eq!(views[0].eye, Eye::Left);
        assert_eq!(system.label(), "EXIT VR");
    }

    #[test]
    fn test_disabled_or_unsupported_display() {
        let config = ImmersiveConfig {
            enabled: false,
            ..ImmersiveConfig::default()
        };
        assert_eq!(ImmersiveSystem::new(&config).state(), SessionState::Unsupported);

        let system = ImmersiveSystem::with_display(&ImmersiveConfig::default(), Box::new(NoDisplay));
        assert_eq!(system.state(), SessionState::Unsupported);
    }
}
