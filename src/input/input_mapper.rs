//! Input mapping from raw events to semantic actions
//!
//! Maps keyboard and mouse input to high-level actions like Exit or ToggleImmersive.
//! Orbit input (drags, wheel, arrow keys) is NOT mapped here - it goes directly to OrbitControls.

use winit::event::{ElementState, MouseButton};
use winit::keyboard::KeyCode;

/// Actions triggered by special input (not orbiting)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputAction {
    /// Exit application (Escape outside immersive mode)
    Exit,
    /// Leave immersive mode (Escape while immersive)
    LeaveImmersive,
    /// Reset camera to starting position (R key)
    ResetCamera,
    /// Toggle fullscreen mode (F key)
    ToggleFullscreen,
    /// Enter or leave immersive mode (V key or a click on the VR button)
    ToggleImmersive,
    /// Show or hide the frame statistics overlay (Tab key)
    ToggleStats,
}

/// Maps raw input events to semantic actions
pub struct InputMapper;

impl InputMapper {
    /// Map keyboard input to an action
    ///
    /// Returns `None` for key releases and for keys handled by the orbit controls
    pub fn map_keyboard(
        key: KeyCode,
        state: ElementState,
        immersive_active: bool,
    ) -> Option<InputAction> {
        if state != ElementState::Pressed {
            return None;
        }

        match key {
            KeyCode::Escape => {
                if immersive_active {
                    Some(InputAction::LeaveImmersive)
                } else {
                    Some(InputAction::Exit)
                }
            }
            KeyCode::KeyR => Some(InputAction::ResetCamera),
            KeyCode::KeyF => Some(InputAction::ToggleFullscreen),
            KeyCode::KeyV => Some(InputAction::ToggleImmersive),
            KeyCode::Tab => Some(InputAction::ToggleStats),
            _ => None,
        }
    }

    /// Map mouse button to an action
    ///
    /// A left press over the VR button toggles immersive mode; everything
    /// else belongs to the orbit controls.
    pub fn map_mouse_button(
        button: MouseButton,
        state: ElementState,
        over_vr_button: bool,
    ) -> Option<InputAction> {
        if button == MouseButton::Left && state == ElementState::Pressed && over_vr_button {
            Some(InputAction::ToggleImmersive)
        } else {
            None
        }
    }
}
