//! Scene graph container
//!
//! The SceneGraph owns every node along with the parent/child links between
//! them, the background color and the lights.

use std::collections::HashMap;

use glam::Mat4;
use slotmap::{new_key_type, SecondaryMap, SlotMap};

use crate::{Color, Light, Node};

new_key_type! {
    /// Generational key to a node in the scene graph
    pub struct NodeKey;
}

/// Hierarchical collection of renderable nodes
pub struct SceneGraph {
    nodes: SlotMap<NodeKey, Node>,
    parents: SecondaryMap<NodeKey, NodeKey>,
    children: SecondaryMap<NodeKey, Vec<NodeKey>>,
    /// Nodes without a parent, in insertion order
    roots: Vec<NodeKey>,
    name_index: HashMap<String, NodeKey>,
    background: Color,
    lights: Vec<Light>,
}

impl Default for SceneGraph {
    fn default() -> Self {
        Self::new()
    }
}

impl SceneGraph {
    /// Create an empty scene graph with a black background and no lights
    pub fn new() -> Self {
        Self {
            nodes: SlotMap::with_key(),
            parents: SecondaryMap::new(),
            children: SecondaryMap::new(),
            roots: Vec::new(),
            name_index: HashMap::new(),
            background: Color::BLACK,
            lights: Vec::new(),
        }
    }

    /// Create a scene graph with pre-allocated node capacity
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            nodes: SlotMap::with_capacity_and_key(capacity),
            parents: SecondaryMap::with_capacity(capacity),
            children: SecondaryMap::with_capacity(capacity),
            ..Self::new()
        }
    }

    /// Add a node at the top level
    pub fn add(&mut self, node: Node) -> NodeKey {
        let key = self.insert(node);
        self.roots.push(key);
        key
    }

    /// Attach a node under `parent`
    ///
    /// Returns `None` (and drops the node) if the parent does not exist.
    pub fn add_child(&mut self, parent: NodeKey, node: Node) -> Option<NodeKey> {
        if !self.nodes.contains_key(parent) {
            log::warn!("Cannot attach child to missing parent {:?}", parent);
            return None;
        }

        let key = self.insert(node);
        self.parents.insert(key, parent);
        match self.children.get_mut(parent) {
            Some(list) => list.push(key),
            None => {
                self.children.insert(parent, vec![key]);
            }
        }
        Some(key)
    }

    fn insert(&mut self, node: Node) -> NodeKey {
        let name = node.name.clone();
        let key = self.nodes.insert(node);
        if let Some(name) = name {
            self.name_index.insert(name, key);
        }
        key
    }

    /// Remove a node and its whole subtree, returning the number of nodes removed
    pub fn remove(&mut self, key: NodeKey) -> usize {
        if !self.nodes.contains_key(key) {
            return 0;
        }

        match self.parents.remove(key) {
            Some(parent) => {
                if let Some(siblings) = self.children.get_mut(parent) {
                    siblings.retain(|k| *k != key);
                }
            }
            None => self.roots.retain(|k| *k != key),
        }

        let mut removed = 0;
        let mut stack = vec![key];
        while let Some(current) = stack.pop() {
            if let Some(children) = self.children.remove(current) {
                stack.extend(children);
            }
            self.parents.remove(current);
            if let Some(node) = self.nodes.remove(current) {
                if let Some(name) = node.name {
                    if self.name_index.get(&name) == Some(&current) {
                        self.name_index.remove(&name);
                    }
                }
                removed += 1;
            }
        }
        removed
    }

    pub fn get(&self, key: NodeKey) -> Option<&Node> {
        self.nodes.get(key)
    }

    pub fn get_mut(&mut self, key: NodeKey) -> Option<&mut Node> {
        self.nodes.get_mut(key)
    }

    /// Look up a node by name
    pub fn get_by_name(&self, name: &str) -> Option<(NodeKey, &Node)> {
        let key = *self.name_index.get(name)?;
        self.nodes.get(key).map(|node| (key, node))
    }

    /// Direct children of a node, in attachment order
    pub fn children(&self, key: NodeKey) -> &[NodeKey] {
        self.children.get(key).map(Vec::as_slice).unwrap_or(&[])
    }

    pub fn parent(&self, key: NodeKey) -> Option<NodeKey> {
        self.parents.get(key).copied()
    }

    pub fn roots(&self) -> &[NodeKey] {
        &self.roots
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Iterate over all nodes in storage order
    pub fn iter(&self) -> impl Iterator<Item = (NodeKey, &Node)> {
        self.nodes.iter()
    }

    /// Nodes carrying a tag
    pub fn iter_tagged<'a>(&'a self, tag: &'a str) -> impl Iterator<Item = (NodeKey, &'a Node)> {
        self.nodes.iter().filter(move |(_, node)| node.has_tag(tag))
    }

    /// World matrix of a node: the product of its ancestors' transforms and its own
    pub fn world_matrix(&self, key: NodeKey) -> Option<Mat4> {
        let mut matrix = self.nodes.get(key)?.transform().to_matrix();
        let mut current = key;
        while let Some(parent) = self.parents.get(current) {
            let parent_node = self.nodes.get(*parent)?;
            matrix = parent_node.transform().to_matrix() * matrix;
            current = *parent;
        }
        Some(matrix)
    }

    /// Visit every node depth-first, parents before children, with its world matrix
    pub fn traverse<F>(&self, mut visit: F)
    where
        F: FnMut(NodeKey, &Node, Mat4),
    {
        let mut stack: Vec<(NodeKey, Mat4)> = self
            .roots
            .iter()
            .rev()
            .map(|key| (*key, Mat4::IDENTITY))
            .collect();

        while let Some((key, parent_matrix)) = stack.pop() {
            let Some(node) = self.nodes.get(key) else {
                continue;
            };
            let world = parent_matrix * node.transform().to_matrix();
            visit(key, node, world);

            stack.extend(self.children(key).iter().rev().map(|child| (*child, world)));
        }
    }

    /// Whether any node changed since the last `clear_all_dirty`
    pub fn has_dirty_nodes(&self) -> bool {
        self.nodes.values().any(Node::is_dirty)
    }

    pub fn clear_all_dirty(&mut self) {
        self.nodes.values_mut().for_each(Node::clear_dirty);
    }

    #[inline]
    pub fn background(&self) -> Color {
        self.background
    }

    pub fn set_background(&mut self, color: Color) {
        self.background = color;
    }

    pub fn add_light(&mut self, light: Light) {
        self.lights.push(light);
    }

    pub fn lights(&self) -> &[Light] {
        &self.lights
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Transform3D;
    use glam::Vec3;

    fn positioned(x: f32, y: f32, z: f32) -> Node {
        Node::group().with_transform(Transform3D::from_position(Vec3::new(x, y, z)))
    }

    #[test]
    fn test_empty_graph() {
        let graph = SceneGraph::new();
        assert!(graph.is_empty());
        assert_eq!(graph.roots().len(), 0);
        assert_eq!(graph.background(), Color::BLACK);
    }

    #[test]
    fn test_add_child() {
        let mut graph = SceneGraph::new();
        let room = graph.add(Node::group().with_name("room"));
        let ball = graph.add_child(room, positioned(1.0, 0.0, 0.0)).unwrap();

        assert_eq!(graph.len(), 2);
        assert_eq!(graph.roots(), &[room]);
        assert_eq!(graph.children(room), &[ball]);
        assert_eq!(graph.parent(ball), Some(room));
        assert_eq!(graph.parent(room), None);
    }

    #[test]
    fn test_add_child_missing_parent() {
        let mut graph = SceneGraph::new();
        let room = graph.add(Node::group());
        graph.remove(room);

        assert!(graph.add_child(room, Node::group()).is_none());
        assert!(graph.is_empty());
    }

    #[test]
    fn test_world_matrix_composes_parents() {
        let mut graph = SceneGraph::new();
        let room = graph.add(positioned(0.0, 3.0, 0.0));
        let ball = graph.add_child(room, positioned(1.0, 1.0, 1.0)).unwrap();

        let world = graph.world_matrix(ball).unwrap();
        let origin = world.transform_point3(Vec3::ZERO);
        assert!((origin - Vec3::new(1.0, 4.0, 1.0)).length() < 1e-6);
    }

    #[test]
    fn test_traverse_order_and_matrices() {
        let mut graph = SceneGraph::new();
        let a = graph.add(positioned(1.0, 0.0, 0.0).with_name("a"));
        graph.add_child(a, positioned(0.0, 1.0, 0.0).with_name("a1"));
        graph.add_child(a, positioned(0.0, 2.0, 0.0).with_name("a2"));
        graph.add(Node::group().with_name("b"));

        let mut visited = Vec::new();
        graph.traverse(|_, node, world| {
            visited.push((
                node.name.clone().unwrap(),
                world.transform_point3(Vec3::ZERO),
            ));
        });

        let names: Vec<_> = visited.iter().map(|(n, _)| n.as_str()).collect();
        assert_eq!(names, vec!["a", "a1", "a2", "b"]);
        assert_eq!(visited[2].1, Vec3::new(1.0, 2.0, 0.0));
    }

    #[test]
    fn test_remove_subtree() {
        let mut graph = SceneGraph::new();
        let room = graph.add(Node::group().with_name("room"));
        for _ in 0..5 {
            graph.add_child(room, Node::group());
        }
        let other = graph.add(Node::group());

        assert_eq!(graph.remove(room), 6);
        assert_eq!(graph.len(), 1);
        assert_eq!(graph.roots(), &[other]);
        assert!(graph.get_by_name("room").is_none());
    }

    #[test]
    fn test_get_by_name_and_tags() {
        let mut graph = SceneGraph::new();
        let room = graph.add(Node::group().with_name("room"));
        graph.add_child(room, Node::group().with_tag("ball"));
        graph.add_child(room, Node::group().with_tag("ball"));

        assert_eq!(graph.get_by_name("room").map(|(k, _)| k), Some(room));
        assert_eq!(graph.iter_tagged("ball").count(), 2);
    }

    #[test]
    fn test_dirty_tracking() {
        let mut graph = SceneGraph::new();
        let key = graph.add(Node::group());
        assert!(graph.has_dirty_nodes());

        graph.clear_all_dirty();
        assert!(!graph.has_dirty_nodes());

        graph
            .get_mut(key)
            .unwrap()
            .set_transform(Transform3D::from_position(Vec3::Y));
        assert!(graph.has_dirty_nodes());
    }

    #[test]
    fn test_lights_and_background() {
        let mut graph = SceneGraph::new();
        graph.set_background(Color::from_hex(0x505050));
        graph.add_light(Light::hemisphere(Color::from_hex(0x606060), Color::from_hex(0x404040)));

        assert_eq!(graph.background().to_hex(), 0x505050);
        assert_eq!(graph.lights().len(), 1);
    }
}
