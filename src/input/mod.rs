//! Application-level input
//!
//! Orbiting lives in `xr_room_input`; this module only turns special keys and
//! VR button clicks into [`InputAction`]s.

mod input_mapper;

pub use input_mapper::{InputAction, InputMapper};
