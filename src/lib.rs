//! xr_room - a wireframe room full of spheres, viewable mono or in stereo
//!
//! The binary opens a window, builds the room scene, and renders it every
//! frame with orbit controls, a frame statistics overlay, and a VR button
//! that switches to side-by-side stereo rendering.

pub mod app;
pub mod config;
pub mod input;
pub mod scene;
pub mod systems;

pub use app::App;
pub use config::AppConfig;
