//! RoomSceneBuilder - construction of the room scene
//!
//! The scene is a wireframe room with a field of small spheres attached to
//! it as children, a gray background, a hemisphere light, and a directional
//! light.

use std::sync::Arc;

use glam::Vec3;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use xr_room_core::geometry::{box_line_geometry, icosahedron_geometry};
use xr_room_core::{
    Color, LambertMaterial, Light, LineBasicMaterial, MeshGeometry, Node, NodeKey, SceneGraph,
    Transform3D,
};

use crate::config::{RenderingConfig, SceneConfig};

/// Name of the room node
pub const ROOM_NAME: &str = "room";
/// Tag carried by every sphere
pub const BALL_TAG: &str = "ball";

/// The built scene plus handles to its notable parts
pub struct RoomScene {
    pub graph: SceneGraph,
    pub room: NodeKey,
    /// Geometry shared by all spheres
    pub ball_geometry: Arc<MeshGeometry>,
}

impl RoomScene {
    /// Keys of the spheres, in creation order
    pub fn balls(&self) -> &[NodeKey] {
        self.graph.children(self.room)
    }
}

/// Builder for the room scene
///
/// # Example
/// ```ignore
/// let scene = RoomSceneBuilder::new()
///     .with_seed(Some(7))
///     .build();
/// assert_eq!(scene.balls().len(), 200);
/// ```
#[derive(Clone, Debug)]
pub struct RoomSceneBuilder {
    scene: SceneConfig,
    rendering: RenderingConfig,
}

impl Default for RoomSceneBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl RoomSceneBuilder {
    /// Builder with the stock room: 200 balls, 6x6x6 room
    pub fn new() -> Self {
        Self::from_config(&SceneConfig::default(), &RenderingConfig::default())
    }

    /// Builder using scene layout and light colors from configuration
    pub fn from_config(scene: &SceneConfig, rendering: &RenderingConfig) -> Self {
        Self {
            scene: scene.clone(),
            rendering: rendering.clone(),
        }
    }

    pub fn with_ball_count(mut self, count: usize) -> Self {
        self.scene.ball_count = count;
        self
    }

    /// Fix the random seed; `None` draws from entropy
    pub fn with_seed(mut self, seed: Option<u64>) -> Self {
        self.scene.seed = seed;
        self
    }

    /// Build the scene using the configured seed, or entropy when none is set
    pub fn build(&self) -> RoomScene {
        let mut rng = match self.scene.seed {
            Some(seed) => {
                log::info!("Building room with seed {}", seed);
                StdRng::seed_from_u64(seed)
            }
            None => StdRng::from_entropy(),
        };
        self.build_with_rng(&mut rng)
    }

    /// Build the scene drawing ball colors and positions from `rng`
    pub fn build_with_rng<R: Rng + ?Sized>(&self, rng: &mut R) -> RoomScene {
        let config = &self.scene;
        let mut graph = SceneGraph::with_capacity(config.ball_count + 1);

        graph.set_background(Color::from_hex(config.background));
        graph.add_light(Light::hemisphere(
            Color::from_hex(self.rendering.hemisphere_sky),
            Color::from_hex(self.rendering.hemisphere_ground),
        ));
        graph.add_light(Light::directional(
            Color::from_hex(self.rendering.light_color),
            Vec3::from_array(self.rendering.light_position),
        ));

        let [width, height, depth] = config.room_size;
        let [ws, hs, ds] = config.room_segments;
        let room_geometry = Arc::new(box_line_geometry(width, height, depth, ws, hs, ds));
        let room = graph.add(
            Node::line_segments(
                room_geometry,
                LineBasicMaterial::new(Color::from_hex(config.room_color)),
            )
            .with_name(ROOM_NAME),
        );

        let ball_geometry = Arc::new(icosahedron_geometry(config.ball_radius, config.ball_detail));
        let spread = config.ball_spread.max(f32::EPSILON);

        for _ in 0..config.ball_count {
            let material = LambertMaterial::new(Color::random(rng));
            let position = Vec3::new(
                rng.gen_range(0.0..spread),
                rng.gen_range(0.0..spread),
                rng.gen_range(0.0..spread),
            );
            let ball = Node::mesh(Arc::clone(&ball_geometry), material)
                .with_tag(BALL_TAG)
                .with_transform(Transform3D::from_position(position));
            // The room was just added, so attaching cannot fail
            let _ = graph.add_child(room, ball);
        }

        log::info!(
            "Built room scene: {} nodes, {} balls",
            graph.len(),
            graph.children(room).len()
        );

        RoomScene {
            graph,
            room,
            ball_geometry,
        }
    }
}
