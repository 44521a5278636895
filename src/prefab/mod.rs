//! Prefab templates and instantiation
//!
//! A prefab is a self-contained node-tree bundle stored as RON: transforms,
//! layers, and embedded renderer meshes. The library discovers and caches
//! them; `instantiate` spawns an independently-owned copy into a scene, and
//! `load_prefab` is the one-shot path-to-instance operation.

mod library;
mod prefab;

pub use library::{PrefabLibrary, PREFABS_DIR};
pub use prefab::{generate_prefab_id, Prefab, PrefabError, PrefabNode, RendererDef};

use crate::scene::{Node, NodeId, Renderer, Scene};
use std::path::Path;

/// Spawn an independently-owned instance of a prefab's node tree at the
/// scene root. Returns the root node of the new instance.
pub fn instantiate(scene: &mut Scene, prefab: &Prefab) -> NodeId {
    instantiate_node(scene, &prefab.root, None)
}

fn instantiate_node(scene: &mut Scene, def: &PrefabNode, parent: Option<NodeId>) -> NodeId {
    let mut node = Node::new(def.name.clone())
        .with_transform(def.transform)
        .with_layer(def.layer);
    node.active = def.active;
    if let Some(renderer) = &def.renderer {
        node.renderer = Some(Renderer {
            mesh: renderer.mesh.clone(),
            color: renderer.color,
            visible: renderer.visible,
        });
    }

    let id = match parent {
        Some(parent) => scene.spawn_child(parent, node),
        None => scene.spawn(node),
    };
    for child in &def.children {
        instantiate_node(scene, child, Some(id));
    }
    id
}

/// Load a prefab file and instantiate it into the scene.
///
/// Returns `None` when the path does not resolve to a usable prefab -
/// missing file and malformed content alike (logged, not an error; the
/// caller asked "is there something at this path", and the answer is no).
/// On success the only side effect is the newly spawned instance.
pub fn load_prefab(scene: &mut Scene, path: &Path) -> Option<NodeId> {
    match Prefab::load(path) {
        Ok(prefab) => Some(instantiate(scene, &prefab)),
        Err(e) => {
            log::warn!("load_prefab: {:?}: {}", path, e);
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::color::Color;
    use crate::rasterizer::{Mesh, Vec3};
    use crate::scene::Transform;

    fn sample_prefab() -> Prefab {
        Prefab::new(
            "avatar_head",
            PrefabNode::new("head")
                .with_renderer(RendererDef::new(Mesh::cube(1.0, Color::WHITE)))
                .with_child(
                    PrefabNode::new("hat")
                        .with_transform(Transform::from_position(Vec3::new(0.0, 0.6, 0.0))),
                ),
        )
    }

    #[test]
    fn test_instantiate_builds_tree() {
        let mut scene = Scene::new();
        let root = instantiate(&mut scene, &sample_prefab());

        assert_eq!(scene.get(root).unwrap().name, "head");
        assert!(scene.get(root).unwrap().renderer.is_some());
        let children = scene.get(root).unwrap().children().to_vec();
        assert_eq!(children.len(), 1);
        assert_eq!(scene.get(children[0]).unwrap().name, "hat");
        assert_eq!(scene.get(children[0]).unwrap().parent(), Some(root));
    }

    #[test]
    fn test_instances_are_independent() {
        let mut scene = Scene::new();
        let prefab = sample_prefab();
        let a = instantiate(&mut scene, &prefab);
        let b = instantiate(&mut scene, &prefab);
        assert_ne!(a, b);

        scene.get_mut(a).unwrap().name = "renamed".into();
        assert_eq!(scene.get(b).unwrap().name, "head");
    }

    #[test]
    fn test_load_prefab_from_disk() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("head.ron");
        sample_prefab().save(&path).unwrap();

        let mut scene = Scene::new();
        let id = load_prefab(&mut scene, &path).unwrap();
        assert_eq!(scene.get(id).unwrap().name, "head");
        assert_eq!(scene.len(), 2);
    }

    #[test]
    fn test_load_prefab_missing_path_is_none() {
        let mut scene = Scene::new();
        let before = scene.len();
        assert!(load_prefab(&mut scene, Path::new("no/such/file.ron")).is_none());
        // No side effects on failure
        assert_eq!(scene.len(), before);
    }

    #[test]
    fn test_load_prefab_malformed_is_none() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("bad.ron");
        std::fs::write(&path, "(((").unwrap();

        let mut scene = Scene::new();
        assert!(load_prefab(&mut scene, &path).is_none());
        assert!(scene.is_empty());
    }
}
