//! Application systems
//!
//! Each system owns one concern of the app: the window, the GPU, the
//! immersive session, and frame statistics.

mod immersive;
mod render;
mod stats;
mod window;

pub use immersive::{ImmersiveSession, ImmersiveSystem, SessionState, VrButton};
pub use render::RenderSystem;
pub use stats::FrameStats;
pub use window::{WindowError, WindowSystem};
