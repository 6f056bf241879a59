//! Scene construction
//!
//! Builds the room, its spheres, and the lights into a `SceneGraph`.

mod scene_builder;

pub use scene_builder::{RoomScene, RoomSceneBuilder, BALL_TAG, ROOM_NAME};
