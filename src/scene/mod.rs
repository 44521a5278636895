//! Scene graph
//!
//! Nodes with local transforms, parent/child hierarchy, layers, and optional
//! renderer/camera components. This is the surface every operation in the
//! crate works against: prefab instantiation spawns node trees, swapping
//! rewires them, recoloring walks them, and sprite baking renders them.

mod node;
mod transform;

pub use node::{layer_mask, CameraRig, Node, NodeId, Renderer, Scene, SNAPSHOT_LAYER};
pub use transform::{GlobalTransform, Transform};
