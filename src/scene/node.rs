//! Scene graph with generational node ids
//!
//! Nodes live in an arena; a `NodeId` is an index plus a generation counter,
//! so a reference to a destroyed node never resolves again even when the
//! slot is reused. Components (renderer, camera) hang off the node directly.

use super::transform::{GlobalTransform, Transform};
use crate::color::Color;
use crate::rasterizer::{mat4_affine_inverse, mat4_transform_point, Mesh, Vec3};

/// Layer reserved for offscreen snapshot captures.
///
/// Sprite baking moves the target subtree here and points the snapshot
/// camera's culling mask at it, so the capture never picks up the rest of
/// the scene and the target never shows in a main view mid-bake.
pub const SNAPSHOT_LAYER: u32 = 31;

/// Bitmask selecting a single layer
#[inline]
pub fn layer_mask(layer: u32) -> u32 {
    1 << layer
}

/// A unique identifier for a scene node.
///
/// Index into the scene arena plus a generation; two ids with the same
/// index but different generations are different nodes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct NodeId {
    index: u32,
    generation: u32,
}

impl NodeId {
    /// A null/invalid node reference
    pub const NULL: NodeId = NodeId { index: u32::MAX, generation: 0 };

    pub fn is_null(&self) -> bool {
        self.index == u32::MAX
    }
}

impl Default for NodeId {
    fn default() -> Self {
        NodeId::NULL
    }
}

/// Drawable component: a mesh plus a material color
#[derive(Debug, Clone)]
pub struct Renderer {
    pub mesh: Mesh,
    /// Material color, multiplied over vertex colors when rendering
    pub color: Color,
    pub visible: bool,
}

impl Renderer {
    pub fn new(mesh: Mesh) -> Self {
        Self { mesh, color: Color::WHITE, visible: true }
    }
}

/// Camera component.
///
/// `enabled: false` means the camera never renders on its own and is driven
/// manually - snapshot cameras are always created this way.
#[derive(Debug, Clone)]
pub struct CameraRig {
    /// Bitmask of layers this camera sees
    pub culling_mask: u32,
    /// Clear color for the render target
    pub background: Color,
    /// Whether the camera renders as part of a normal frame
    pub enabled: bool,
}

impl Default for CameraRig {
    fn default() -> Self {
        Self {
            culling_mask: u32::MAX,
            background: Color::TRANSPARENT,
            enabled: true,
        }
    }
}

/// A scene node: transform, hierarchy links, and optional components
#[derive(Debug, Clone)]
pub struct Node {
    pub name: String,
    pub transform: Transform,
    pub active: bool,
    /// Layer index (0..32), used by camera culling masks
    pub layer: u32,
    pub renderer: Option<Renderer>,
    pub camera: Option<CameraRig>,
    parent: Option<NodeId>,
    children: Vec<NodeId>,
}

impl Node {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            transform: Transform::IDENTITY,
            active: true,
            layer: 0,
            renderer: None,
            camera: None,
            parent: None,
            children: Vec::new(),
        }
    }

    pub fn with_transform(mut self, transform: Transform) -> Self {
        self.transform = transform;
        self
    }

    pub fn with_renderer(mut self, renderer: Renderer) -> Self {
        self.renderer = Some(renderer);
        self
    }

    pub fn with_layer(mut self, layer: u32) -> Self {
        self.layer = layer;
        self
    }

    pub fn parent(&self) -> Option<NodeId> {
        self.parent
    }

    pub fn children(&self) -> &[NodeId] {
        &self.children
    }
}

struct Slot {
    generation: u32,
    node: Option<Node>,
}

/// Arena-backed scene graph
#[derive(Default)]
pub struct Scene {
    slots: Vec<Slot>,
    free: Vec<u32>,
    alive: usize,
}

impl Scene {
    pub fn new() -> Self {
        Self { slots: Vec::new(), free: Vec::new(), alive: 0 }
    }

    /// Number of alive nodes
    pub fn len(&self) -> usize {
        self.alive
    }

    pub fn is_empty(&self) -> bool {
        self.alive == 0
    }

    pub fn is_alive(&self, id: NodeId) -> bool {
        !id.is_null()
            && (id.index as usize) < self.slots.len()
            && self.slots[id.index as usize].generation == id.generation
            && self.slots[id.index as usize].node.is_some()
    }

    pub fn get(&self, id: NodeId) -> Option<&Node> {
        if !self.is_alive(id) {
            return None;
        }
        self.slots[id.index as usize].node.as_ref()
    }

    pub fn get_mut(&mut self, id: NodeId) -> Option<&mut Node> {
        if !self.is_alive(id) {
            return None;
        }
        self.slots[id.index as usize].node.as_mut()
    }

    /// Spawn a node at the scene root
    pub fn spawn(&mut self, mut node: Node) -> NodeId {
        node.parent = None;
        node.children.clear();
        self.alive += 1;

        if let Some(index) = self.free.pop() {
            let slot = &mut self.slots[index as usize];
            slot.node = Some(node);
            NodeId { index, generation: slot.generation }
        } else {
            let index = self.slots.len() as u32;
            self.slots.push(Slot { generation: 0, node: Some(node) });
            NodeId { index, generation: 0 }
        }
    }

    /// Spawn a node under a parent. Falls back to the scene root (with a
    /// warning) when the parent is not alive.
    pub fn spawn_child(&mut self, parent: NodeId, node: Node) -> NodeId {
        let id = self.spawn(node);
        if self.is_alive(parent) {
            self.attach(id, parent);
        } else {
            log::warn!("spawn_child: parent not alive, spawning at root");
        }
        id
    }

    /// Destroy a node and its whole subtree. Returns false for stale ids.
    pub fn destroy(&mut self, id: NodeId) -> bool {
        if !self.is_alive(id) {
            return false;
        }
        self.detach(id);
        self.free_subtree(id);
        true
    }

    fn free_subtree(&mut self, id: NodeId) {
        let children = match self.get(id) {
            Some(node) => node.children.clone(),
            None => return,
        };
        for child in children {
            self.free_subtree(child);
        }
        let slot = &mut self.slots[id.index as usize];
        slot.node = None;
        slot.generation += 1;
        self.free.push(id.index);
        self.alive -= 1;
    }

    fn detach(&mut self, id: NodeId) {
        let parent = match self.get(id) {
            Some(node) => node.parent,
            None => return,
        };
        if let Some(parent) = parent {
            if let Some(node) = self.get_mut(parent) {
                node.children.retain(|&c| c != id);
            }
        }
        if let Some(node) = self.get_mut(id) {
            node.parent = None;
        }
    }

    fn attach(&mut self, id: NodeId, parent: NodeId) {
        if let Some(node) = self.get_mut(id) {
            node.parent = Some(parent);
        }
        if let Some(node) = self.get_mut(parent) {
            node.children.push(id);
        }
    }

    /// Reparent a node (None detaches to the scene root).
    ///
    /// The local transform is kept as-is. Returns false if either node is
    /// not alive or the move would create a cycle (parenting a node under
    /// its own descendant, or under itself).
    pub fn set_parent(&mut self, id: NodeId, new_parent: Option<NodeId>) -> bool {
        if !self.is_alive(id) {
            return false;
        }
        if let Some(parent) = new_parent {
            if !self.is_alive(parent) {
                return false;
            }
            // Cycle check: walk up from the new parent
            let mut cursor = Some(parent);
            while let Some(current) = cursor {
                if current == id {
                    return false;
                }
                cursor = self.get(current).and_then(|n| n.parent);
            }
        }
        self.detach(id);
        if let Some(parent) = new_parent {
            self.attach(id, parent);
        }
        true
    }

    /// All descendants of a node in preorder, the node itself excluded.
    /// Inactive nodes are included.
    pub fn descendants(&self, id: NodeId) -> Vec<NodeId> {
        let mut out = Vec::new();
        self.collect_descendants(id, &mut out);
        out
    }

    fn collect_descendants(&self, id: NodeId, out: &mut Vec<NodeId>) {
        if let Some(node) = self.get(id) {
            for &child in &node.children {
                out.push(child);
                self.collect_descendants(child, out);
            }
        }
    }

    /// World-space transform, walking parent links to the root
    pub fn global_transform(&self, id: NodeId) -> Option<GlobalTransform> {
        let node = self.get(id)?;
        let global = match node.parent {
            Some(parent) => {
                let parent_global = self.global_transform(parent)?;
                GlobalTransform::from_parent_and_local(&parent_global, &node.transform)
            }
            None => GlobalTransform::from_transform(&node.transform),
        };
        Some(global)
    }

    pub fn world_position(&self, id: NodeId) -> Option<Vec3> {
        self.global_transform(id).map(|g| g.position())
    }

    /// Move a node so its world position matches `position`, keeping its
    /// current parent. Returns false for stale ids.
    pub fn set_world_position(&mut self, id: NodeId, position: Vec3) -> bool {
        let parent = match self.get(id) {
            Some(node) => node.parent,
            None => return false,
        };
        let local = match parent {
            Some(parent) => match self.global_transform(parent) {
                Some(parent_global) => {
                    let inv = mat4_affine_inverse(parent_global.matrix());
                    mat4_transform_point(&inv, position)
                }
                None => return false,
            },
            None => position,
        };
        if let Some(node) = self.get_mut(id) {
            node.transform.position = local;
        }
        true
    }

    /// Whether the node and all of its ancestors are active
    pub fn is_effectively_active(&self, id: NodeId) -> bool {
        let mut cursor = Some(id);
        while let Some(current) = cursor {
            match self.get(current) {
                Some(node) if node.active => cursor = node.parent,
                _ => return false,
            }
        }
        true
    }

    /// Assign a layer to a node and every descendant
    pub fn set_layer_recursive(&mut self, id: NodeId, layer: u32) {
        let mut targets = vec![id];
        targets.extend(self.descendants(id));
        for target in targets {
            if let Some(node) = self.get_mut(target) {
                node.layer = layer;
            }
        }
    }

    /// Deep-copy a subtree into an independently-owned root-level node
    pub fn clone_subtree(&mut self, id: NodeId) -> Option<NodeId> {
        let node = self.get(id)?;
        let mut copy = node.clone();
        let children = std::mem::take(&mut copy.children);
        copy.parent = None;
        let new_id = self.spawn(copy);
        for child in children {
            if let Some(new_child) = self.clone_subtree(child) {
                self.attach(new_child, new_id);
            }
        }
        Some(new_id)
    }

    /// Iterate all alive nodes
    pub fn iter(&self) -> impl Iterator<Item = (NodeId, &Node)> {
        self.slots.iter().enumerate().filter_map(|(index, slot)| {
            slot.node.as_ref().map(|node| {
                (NodeId { index: index as u32, generation: slot.generation }, node)
            })
        })
    }

    /// Ids of all alive nodes carrying a camera component
    pub fn cameras(&self) -> impl Iterator<Item = NodeId> + '_ {
        self.iter().filter(|(_, node)| node.camera.is_some()).map(|(id, _)| id)
    }
}
