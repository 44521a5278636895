//! Node swapping ("permute")
//!
//! Replace one node with another while carrying over presentation state:
//! local rotation and scale always, position/parent/name by flag. The
//! operation is not atomic - on failure the error reports which steps had
//! already been applied, and nothing is rolled back. Callers decide on
//! cleanup.

use crate::rasterizer::Vec3;
use crate::scene::{NodeId, Scene};

/// Options controlling what a swap carries over from the source node
#[derive(Debug, Clone)]
pub struct SwapOptions {
    /// Clone the replacement first and mutate the clone (the original stays
    /// untouched, e.g. when the replacement is a shared template instance)
    pub instantiate: bool,
    /// Destroy the source node after the transfer
    pub remove_source: bool,
    /// Copy the source's name
    pub take_name: bool,
    /// Move the replacement to the source's world position
    pub take_position: bool,
    /// Reparent the replacement under the source's parent
    pub take_parent: bool,
}

impl Default for SwapOptions {
    fn default() -> Self {
        Self {
            instantiate: false,
            remove_source: true,
            take_name: true,
            take_position: true,
            take_parent: true,
        }
    }
}

/// One mutation performed by `swap_node`, in application order
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SwapStep {
    Instantiated,
    CopiedRotation,
    CopiedScale,
    Reparented,
    MovedToSourcePosition,
    Renamed,
    DestroyedSource,
}

/// Why a swap failed
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SwapErrorKind {
    SourceMissing,
    ReplacementMissing,
    /// Reparenting would put the replacement under its own descendant
    WouldCycle,
}

/// Tagged swap failure.
///
/// `applied` lists the mutations that had already happened when the
/// operation failed; partial state is left in place (no rollback).
#[derive(Debug, Clone)]
pub struct SwapError {
    pub kind: SwapErrorKind,
    pub applied: Vec<SwapStep>,
}

impl std::fmt::Display for SwapError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self.kind {
            SwapErrorKind::SourceMissing => write!(f, "swap failed: source node not alive")?,
            SwapErrorKind::ReplacementMissing => {
                write!(f, "swap failed: replacement node not alive")?
            }
            SwapErrorKind::WouldCycle => {
                write!(f, "swap failed: reparent would create a cycle")?
            }
        }
        if !self.applied.is_empty() {
            write!(f, " (steps already applied: {:?})", self.applied)?;
        }
        Ok(())
    }
}

impl std::error::Error for SwapError {}

/// Swap `source` for `replacement`.
///
/// Always copies the source's local rotation and scale onto the
/// replacement; position, parent, and name follow the options. Returns the
/// node that took the source's place (the clone when `instantiate` is set,
/// `replacement` itself otherwise).
///
/// Any property not flagged keeps the replacement's original value. Errors
/// are logged and returned with the already-applied step list; partial
/// mutation is possible and intentional.
pub fn swap_node(
    scene: &mut Scene,
    source: NodeId,
    replacement: NodeId,
    options: &SwapOptions,
) -> Result<NodeId, SwapError> {
    let mut applied = Vec::new();
    let fail = |kind: SwapErrorKind, applied: Vec<SwapStep>| {
        let err = SwapError { kind, applied };
        log::error!("{}", err);
        Err(err)
    };

    if !scene.is_alive(source) {
        return fail(SwapErrorKind::SourceMissing, applied);
    }
    if !scene.is_alive(replacement) {
        return fail(SwapErrorKind::ReplacementMissing, applied);
    }

    // Capture source state before any mutation
    let source_world_pos: Vec3 = match scene.world_position(source) {
        Some(p) => p,
        None => return fail(SwapErrorKind::SourceMissing, applied),
    };
    let (source_rotation, source_scale, source_parent, source_name) = match scene.get(source) {
        Some(node) => (
            node.transform.rotation,
            node.transform.scale,
            node.parent(),
            node.name.clone(),
        ),
        None => return fail(SwapErrorKind::SourceMissing, applied),
    };

    let target = if options.instantiate {
        match scene.clone_subtree(replacement) {
            Some(id) => {
                applied.push(SwapStep::Instantiated);
                id
            }
            None => return fail(SwapErrorKind::ReplacementMissing, applied),
        }
    } else {
        replacement
    };

    // Rotation and scale transfer unconditionally
    if let Some(node) = scene.get_mut(target) {
        node.transform.rotation = source_rotation;
        applied.push(SwapStep::CopiedRotation);
        node.transform.scale = source_scale;
        applied.push(SwapStep::CopiedScale);
    }

    if options.take_parent {
        // Reparenting must not move the node in world space unless the
        // source position is being taken anyway
        let keep_world = if options.take_position { None } else { scene.world_position(target) };
        if !scene.set_parent(target, source_parent) {
            return fail(SwapErrorKind::WouldCycle, applied);
        }
        if let Some(pos) = keep_world {
            scene.set_world_position(target, pos);
        }
        applied.push(SwapStep::Reparented);
    }

    if options.take_position {
        scene.set_world_position(target, source_world_pos);
        applied.push(SwapStep::MovedToSourcePosition);
    }

    if options.take_name {
        if let Some(node) = scene.get_mut(target) {
            node.name = source_name;
        }
        applied.push(SwapStep::Renamed);
    }

    if options.remove_source {
        scene.destroy(source);
        applied.push(SwapStep::DestroyedSource);
    }

    Ok(target)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scene::{Node, Transform};

    fn approx(a: Vec3, b: Vec3) -> bool {
        (a.x - b.x).abs() < 0.001 && (a.y - b.y).abs() < 0.001 && (a.z - b.z).abs() < 0.001
    }

    #[test]
    fn test_position_taken_parent_kept() {
        let mut scene = Scene::new();
        let old_parent = scene.spawn(
            Node::new("old_parent")
                .with_transform(Transform::from_position(Vec3::new(10.0, 0.0, 0.0))),
        );
        let source = scene.spawn_child(
            old_parent,
            Node::new("source").with_transform(Transform::from_position(Vec3::new(1.0, 2.0, 3.0))),
        );
        let replacement_parent = scene.spawn(Node::new("other_parent"));
        let replacement = scene.spawn_child(replacement_parent, Node::new("replacement"));

        let source_pos = scene.world_position(source).unwrap();
        let options = SwapOptions {
            take_position: true,
            take_parent: false,
            remove_source: true,
            ..Default::default()
        };
        let result = swap_node(&mut scene, source, replacement, &options).unwrap();

        assert_eq!(result, replacement);
        assert!(approx(scene.world_position(result).unwrap(), source_pos));
        // Parent unchanged from before the call
        assert_eq!(scene.get(result).unwrap().parent(), Some(replacement_parent));
        // Source no longer exists
        assert!(!scene.is_alive(source));
    }

    #[test]
    fn test_parent_taken_without_position_keeps_world_position() {
        let mut scene = Scene::new();
        let source_parent = scene.spawn(
            Node::new("source_parent")
                .with_transform(Transform::from_position(Vec3::new(50.0, 0.0, 0.0))),
        );
        let source = scene.spawn_child(source_parent, Node::new("source"));
        let replacement = scene.spawn(
            Node::new("replacement")
                .with_transform(Transform::from_position(Vec3::new(1.0, 2.0, 3.0))),
        );

        let options = SwapOptions {
            take_position: false,
            take_parent: true,
            ..Default::default()
        };
        let result = swap_node(&mut scene, source, replacement, &options).unwrap();

        assert_eq!(scene.get(result).unwrap().parent(), Some(source_parent));
        // Moved in the hierarchy, not in the world
        assert!(approx(scene.world_position(result).unwrap(), Vec3::new(1.0, 2.0, 3.0)));
    }

    #[test]
    fn test_rotation_and_scale_always_transfer() {
        let mut scene = Scene::new();
        let source = scene.spawn(Node::new("source").with_transform(Transform {
            position: Vec3::ZERO,
            rotation: Vec3::new(0.0, 45.0, 0.0),
            scale: 2.5,
        }));
        let replacement = scene.spawn(Node::new("replacement"));

        let options = SwapOptions {
            take_position: false,
            take_parent: false,
            take_name: false,
            ..Default::default()
        };
        swap_node(&mut scene, source, replacement, &options).unwrap();

        let t = scene.get(replacement).unwrap().transform;
        assert!((t.rotation.y - 45.0).abs() < 0.001);
        assert!((t.scale - 2.5).abs() < 0.001);
        // Unflagged properties keep the replacement's values
        assert_eq!(scene.get(replacement).unwrap().name, "replacement");
    }

    #[test]
    fn test_take_parent_and_name() {
        let mut scene = Scene::new();
        let parent = scene.spawn(Node::new("parent"));
        let source = scene.spawn_child(parent, Node::new("left_arm"));
        let replacement = scene.spawn(Node::new("template"));

        let result =
            swap_node(&mut scene, source, replacement, &SwapOptions::default()).unwrap();

        assert_eq!(scene.get(result).unwrap().parent(), Some(parent));
        assert_eq!(scene.get(result).unwrap().name, "left_arm");
        assert!(!scene.is_alive(source));
    }

    #[test]
    fn test_instantiate_keeps_template() {
        let mut scene = Scene::new();
        let source = scene.spawn(Node::new("source"));
        let template = scene.spawn(Node::new("template"));

        let options = SwapOptions { instantiate: true, ..Default::default() };
        let result = swap_node(&mut scene, source, template, &options).unwrap();

        assert_ne!(result, template);
        assert!(scene.is_alive(template));
        assert_eq!(scene.get(template).unwrap().name, "template");
        assert_eq!(scene.get(result).unwrap().name, "source");
    }

    #[test]
    fn test_missing_source_reports_no_steps() {
        let mut scene = Scene::new();
        let replacement = scene.spawn(Node::new("replacement"));
        let gone = scene.spawn(Node::new("gone"));
        scene.destroy(gone);

        let err = swap_node(&mut scene, gone, replacement, &SwapOptions::default()).unwrap_err();
        assert_eq!(err.kind, SwapErrorKind::SourceMissing);
        assert!(err.applied.is_empty());
    }

    #[test]
    fn test_cycle_failure_carries_applied_steps() {
        let mut scene = Scene::new();
        // Source is a child of the replacement, so taking the source's
        // parent would parent the replacement under itself.
        let replacement = scene.spawn(Node::new("replacement"));
        let source = scene.spawn_child(replacement, Node::new("source"));

        let err = swap_node(&mut scene, source, replacement, &SwapOptions::default()).unwrap_err();
        assert_eq!(err.kind, SwapErrorKind::WouldCycle);
        // Rotation/scale were already copied; partial mutation is reported
        assert!(err.applied.contains(&SwapStep::CopiedRotation));
        assert!(err.applied.contains(&SwapStep::CopiedScale));
        // No rollback: source still alive, nothing destroyed
        assert!(scene.is_alive(source));
        assert!(scene.is_alive(replacement));
    }
}
