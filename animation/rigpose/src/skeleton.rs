//! Bind-pose skeleton hierarchy
//!
//! Nodes live in a flat arena and refer to each other by index. The root is
//! always node 0. Bones are the subset of nodes that influence skinned
//! vertices; their indices are dense and stable for the skeleton's lifetime
//! and match the slots of the final bone matrix array.

use std::collections::HashMap;
use std::collections::hash_map::Entry;

use glam::Mat4;
use log::debug;

use crate::error::{AnimationError, Result};
use crate::scene::SceneDescription;

/// One entry in the bind-pose hierarchy
#[derive(Debug, Clone, PartialEq)]
pub struct Node {
    pub name: String,
    /// Transform relative to the parent node
    pub local_bind_transform: Mat4,
    /// Parent node index (None for the root)
    pub parent: Option<usize>,
    /// Child node indices in import order
    pub children: Vec<usize>,
    /// Bone driven by this node, if it has skinning influence
    pub bone_index: Option<usize>,
}

/// A skinned joint
#[derive(Debug, Clone, PartialEq)]
pub struct Bone {
    pub index: usize,
    pub name: String,
    /// Index of the node with the same name
    pub node: usize,
    /// Inverse bind-pose matrix
    pub offset: Mat4,
}

/// Immutable node tree plus bone table
#[derive(Debug, Clone)]
pub struct Skeleton {
    nodes: Vec<Node>,
    bones: Vec<Bone>,
    node_lookup: HashMap<String, usize>,
    bone_lookup: HashMap<String, usize>,
}

impl Skeleton {
    /// Index of the root node
    pub const ROOT: usize = 0;

    /// Build a skeleton from an imported scene
    ///
    /// The scene tree is flattened in pre-order, so node indices follow the
    /// order in which a depth-first walk visits them. Bone indices are the
    /// positions in `scene.bones`.
    pub fn from_scene(scene: &SceneDescription) -> Result<Self> {
        let mut builder = SkeletonBuilder::new(&scene.root.name, scene.root.transform);

        let mut pending: Vec<_> = scene
            .root
            .children
            .iter()
            .rev()
            .map(|child| (Self::ROOT, child))
            .collect();

        while let Some((parent, node)) = pending.pop() {
            let index = builder.add_child(parent, &node.name, node.transform)?;
            pending.extend(node.children.iter().rev().map(|child| (index, child)));
        }

        for bone in &scene.bones {
            builder.add_bone(&bone.name, bone.offset);
        }

        builder.build()
    }

    pub fn root(&self) -> &Node {
        &self.nodes[Self::ROOT]
    }

    pub fn node(&self, index: usize) -> Option<&Node> {
        self.nodes.get(index)
    }

    pub fn nodes(&self) -> &[Node] {
        &self.nodes
    }

    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    /// Node index for a node name
    pub fn node_index(&self, name: &str) -> Option<usize> {
        self.node_lookup.get(name).copied()
    }

    pub fn bone(&self, index: usize) -> Option<&Bone> {
        self.bones.get(index)
    }

    pub fn bones(&self) -> &[Bone] {
        &self.bones
    }

    pub fn bone_count(&self) -> usize {
        self.bones.len()
    }

    /// Bone index for a bone name
    pub fn index_of(&self, name: &str) -> Result<usize> {
        self.bone_lookup
            .get(name)
            .copied()
            .ok_or_else(|| AnimationError::UnknownBone(name.to_string()))
    }

    /// Pre-order walk yielding `(node_index, depth)`, parents before children
    pub fn depth_first(&self) -> DepthFirst<'_> {
        DepthFirst {
            skeleton: self,
            stack: vec![(Self::ROOT, 0)],
        }
    }

    /// Model-space bind transform of every node, indexed like [`Self::nodes`]
    pub fn global_bind_transforms(&self) -> Vec<Mat4> {
        let mut globals = vec![Mat4::IDENTITY; self.nodes.len()];
        for (index, _) in self.depth_first() {
            let node = &self.nodes[index];
            let parent = node.parent.map_or(Mat4::IDENTITY, |p| globals[p]);
            globals[index] = parent * node.local_bind_transform;
        }
        globals
    }
}

/// Iterator returned by [`Skeleton::depth_first`]
pub struct DepthFirst<'a> {
    skeleton: &'a Skeleton,
    stack: Vec<(usize, usize)>,
}

impl Iterator for DepthFirst<'_> {
    type Item = (usize, usize);

    fn next(&mut self) -> Option<Self::Item> {
        let (index, depth) = self.stack.pop()?;
        let node = &self.skeleton.nodes[index];
        self.stack
            .extend(node.children.iter().rev().map(|&child| (child, depth + 1)));
        Some((index, depth))
    }
}

/// Assembles a [`Skeleton`] one node at a time
///
/// Starts with exactly one root; every other node is attached to an
/// existing one, so the result is always a tree.
#[derive(Debug, Clone)]
pub struct SkeletonBuilder {
    nodes: Vec<Node>,
    node_lookup: HashMap<String, usize>,
    bones: Vec<(String, Mat4)>,
}

impl SkeletonBuilder {
    pub fn new(root_name: &str, root_transform: Mat4) -> Self {
        let root = Node {
            name: root_name.to_string(),
            local_bind_transform: root_transform,
            parent: None,
            children: Vec::new(),
            bone_index: None,
        };

        Self {
            nodes: vec![root],
            node_lookup: HashMap::from([(root_name.to_string(), Skeleton::ROOT)]),
            bones: Vec::new(),
        }
    }

    /// Attach a new node under `parent`, returning its index
    pub fn add_child(&mut self, parent: usize, name: &str, transform: Mat4) -> Result<usize> {
        if parent >= self.nodes.len() {
            return Err(AnimationError::InvalidParent(parent));
        }

        let index = self.nodes.len();
        match self.node_lookup.entry(name.to_string()) {
            Entry::Occupied(_) => return Err(AnimationError::DuplicateName(name.to_string())),
            Entry::Vacant(slot) => {
                slot.insert(index);
            }
        }

        self.nodes.push(Node {
            name: name.to_string(),
            local_bind_transform: transform,
            parent: Some(parent),
            children: Vec::new(),
            bone_index: None,
        });
        self.nodes[parent].children.push(index);

        Ok(index)
    }

    /// Register a skinned bone; its index is the registration order
    pub fn add_bone(&mut self, name: &str, offset: Mat4) -> &mut Self {
        self.bones.push((name.to_string(), offset));
        self
    }

    /// Resolve bones against nodes and freeze the hierarchy
    pub fn build(self) -> Result<Skeleton> {
        let Self {
            mut nodes,
            node_lookup,
            bones: pending_bones,
        } = self;

        let mut bones = Vec::with_capacity(pending_bones.len());
        let mut bone_lookup = HashMap::with_capacity(pending_bones.len());

        for (index, (name, offset)) in pending_bones.into_iter().enumerate() {
            let node = *node_lookup
                .get(&name)
                .ok_or_else(|| AnimationError::UnknownNode(name.clone()))?;

            if bone_lookup.insert(name.clone(), index).is_some() {
                return Err(AnimationError::DuplicateName(name));
            }

            nodes[node].bone_index = Some(index);
            bones.push(Bone {
                index,
                name,
                node,
                offset,
            });
        }

        debug!(
            "Built skeleton '{}' with {} nodes and {} bones",
            nodes[Skeleton::ROOT].name,
            nodes.len(),
            bones.len()
        );

        Ok(Skeleton {
            nodes,
            bones,
            node_lookup,
            bone_lookup,
        })
    }
}
