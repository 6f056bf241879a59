//! Renderable scene - bridges the scene graph to GPU buffers
//!
//! Line segments are baked into world space. Meshes are grouped by shared
//! geometry into instance batches, one model matrix and color per node.

use std::sync::Arc;

use xr_room_core::{MeshGeometry, NodeKind, SceneGraph};

use crate::pipeline::{LineVertex, MeshInstance, MeshVertex};

/// All instances of one shared mesh geometry
#[derive(Clone, Debug)]
pub struct MeshBatch {
    pub geometry: Arc<MeshGeometry>,
    pub instances: Vec<MeshInstance>,
}

impl MeshBatch {
    /// Vertex data for the shared geometry
    pub fn vertices(&self) -> Vec<MeshVertex> {
        self.geometry
            .positions
            .iter()
            .zip(&self.geometry.normals)
            .map(|(position, normal)| MeshVertex {
                position: position.to_array(),
                normal: normal.to_array(),
            })
            .collect()
    }
}

/// GPU-ready data collected from a scene graph
#[derive(Clone, Debug, Default)]
pub struct RenderableScene {
    /// World-space line vertices, two per segment
    pub lines: Vec<LineVertex>,
    /// Mesh instances grouped by geometry, in first-seen order
    pub meshes: Vec<MeshBatch>,
}

impl RenderableScene {
    pub fn new() -> Self {
        Self::default()
    }

    /// Collect every renderable node of the graph
    pub fn from_graph(graph: &SceneGraph) -> Self {
        let mut scene = Self::new();

        graph.traverse(|_, node, world| match node.kind() {
            NodeKind::Group => {}
            NodeKind::LineSegments { geometry, material } => {
                let color = material.color.to_rgba(1.0);
                scene.lines.extend(geometry.positions.iter().map(|p| {
                    LineVertex::new(world.transform_point3(*p).to_array(), color)
                }));
            }
            NodeKind::Mesh { geometry, material } => {
                let instance = MeshInstance::new(world, material.color);
                match scene
                    .meshes
                    .iter_mut()
                    .find(|batch| Arc::ptr_eq(&batch.geometry, geometry))
                {
                    Some(batch) => batch.instances.push(instance),
                    None => scene.meshes.push(MeshBatch {
                        geometry: Arc::clone(geometry),
                        instances: vec![instance],
                    }),
                }
            }
        });

        scene
    }

    /// Number of line segments
    pub fn segment_count(&self) -> usize {
        self.lines.len() / 2
    }

    /// Total mesh instances across all batches
    pub fn instance_count(&self) -> usize {
        self.meshes.iter().map(|batch| batch.instances.len()).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty() && self.meshes.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use xr_room_core::geometry::{box_line_geometry, icosahedron_geometry};
    use xr_room_core::{Color, LambertMaterial, LineBasicMaterial, Node, Transform3D, Vec3};

    fn room_graph(balls: usize) -> SceneGraph {
        let mut graph = SceneGraph::new();
        let room = graph.add(
            Node::line_segments(
                Arc::new(box_line_geometry(6.0, 6.0, 6.0, 10, 10, 10)),
                LineBasicMaterial::new(Color::from_hex(0x808080)),
            )
            .with_transform(Transform3D::from_position(Vec3::new(0.0, 3.0, 0.0))),
        );

        let sphere = Arc::new(icosahedron_geometry(0.08, 2));
        for i in 0..balls {
            graph.add_child(
                room,
                Node::mesh(Arc::clone(&sphere), LambertMaterial::new(Color::WHITE))
                    .with_transform(Transform3D::from_position(Vec3::splat(i as f32 * 0.01))),
            );
        }
        graph
    }

    #[test]
    fn test_empty_graph() {
        let scene = RenderableScene::from_graph(&SceneGraph::new());
        assert!(scene.is_empty());
        assert_eq!(scene.instance_count(), 0);
    }

    #[test]
    fn test_lines_in_world_space() {
        let scene = RenderableScene::from_graph(&room_graph(0));
        assert_eq!(scene.segment_count(), 132);

        // The room is lifted by 3, so its floor sits at y = 0
        let min_y = scene
            .lines
            .iter()
            .map(|v| v.position[1])
            .fold(f32::INFINITY, f32::min);
        assert!(min_y.abs() < 1e-5);

        let gray = 0x80 as f32 / 255.0;
        assert!((scene.lines[0].color[0] - gray).abs() < 1e-6);
    }

    #[test]
    fn test_shared_geometry_is_one_batch() {
        let scene = RenderableScene::from_graph(&room_graph(200));
        assert_eq!(scene.meshes.len(), 1);
        assert_eq!(scene.instance_count(), 200);
    }

    #[test]
    fn test_instances_include_parent_transform() {
        let scene = RenderableScene::from_graph(&room_graph(2));
        let second = &scene.meshes[0].instances[1];
        let translation = second.model[3];
        assert!((translation[0] - 0.01).abs() < 1e-6);
        assert!((translation[1] - 3.01).abs() < 1e-6);
    }

    #[test]
    fn test_batch_vertices() {
        let scene = RenderableScene::from_graph(&room_graph(1));
        let vertices = scene.meshes[0].vertices();
        assert_eq!(vertices.len(), 180 * 3);
    }
}
