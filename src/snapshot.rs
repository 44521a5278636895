//! Sprite baking via an offscreen snapshot camera
//!
//! Renders a node's appearance into a fixed-size pixel buffer without
//! touching the visible scene: an ephemeral camera culled to a private
//! layer, the target subtree moved onto that layer and parented in front
//! of the camera, one manual render into a temporary framebuffer, then
//! full teardown. Only the returned sprite survives the call.

use crate::color::Color;
use crate::rasterizer::{render_mesh, Camera, Framebuffer, RasterSettings, Vec3, Vertex};
use crate::scene::{layer_mask, CameraRig, Node, NodeId, Scene, SNAPSHOT_LAYER};
use crate::sprite::Sprite;

/// Options for a snapshot bake
#[derive(Debug, Clone)]
pub struct SnapshotOptions {
    pub width: usize,
    pub height: usize,
    /// Background color; `None` means fully transparent (the default), not
    /// opaque black
    pub background: Option<Color>,
    /// Bake a clone and leave the original node untouched. Without this,
    /// the target itself is consumed by the bake.
    pub clone: bool,
    /// Distance from the camera to the target, along the view axis
    pub distance: f32,
}

impl Default for SnapshotOptions {
    fn default() -> Self {
        Self {
            width: 128,
            height: 128,
            background: None,
            clone: false,
            distance: 3.0,
        }
    }
}

/// Error type for snapshot operations
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SnapshotError {
    /// Render target dimensions are unusable (zero width or height).
    /// There is no fallback; the caller asked for an impossible buffer.
    BadTarget { width: usize, height: usize },
    /// The target node is not alive
    TargetMissing,
}

impl std::fmt::Display for SnapshotError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SnapshotError::BadTarget { width, height } => {
                write!(f, "cannot allocate {}x{} render target", width, height)
            }
            SnapshotError::TargetMissing => write!(f, "snapshot target is not alive"),
        }
    }
}

impl std::error::Error for SnapshotError {}

/// Bake a node's rendered appearance into a sprite.
///
/// Synchronous and self-contained: by the time this returns, the snapshot
/// camera, the temporary render target, and the consumed target node are
/// all gone - only the sprite survives. With `clone` set the original node
/// is left untouched and the bake consumes a copy; otherwise the target
/// itself is consumed.
pub fn make_sprite(
    scene: &mut Scene,
    target: NodeId,
    options: &SnapshotOptions,
) -> Result<Sprite, SnapshotError> {
    if options.width == 0 || options.height == 0 {
        return Err(SnapshotError::BadTarget {
            width: options.width,
            height: options.height,
        });
    }
    if !scene.is_alive(target) {
        return Err(SnapshotError::TargetMissing);
    }

    let background = options.background.unwrap_or(Color::TRANSPARENT);

    let target = if options.clone {
        scene.clone_subtree(target).ok_or(SnapshotError::TargetMissing)?
    } else {
        target
    };

    // Ephemeral camera restricted to the private capture layer, auto-render
    // off - it only ever renders the one manual pass below
    let mut camera_node = Node::new("snapshot_camera");
    camera_node.camera = Some(CameraRig {
        culling_mask: layer_mask(SNAPSHOT_LAYER),
        background,
        enabled: false,
    });
    let camera_id = scene.spawn(camera_node);

    // Move the whole target subtree onto the capture layer and hang it in
    // front of the camera
    scene.set_layer_recursive(target, SNAPSHOT_LAYER);
    scene.set_parent(target, Some(camera_id));
    if let Some(node) = scene.get_mut(target) {
        node.transform.position = Vec3::new(0.0, 0.0, options.distance);
    }

    log::debug!(
        "snapshot: baking {}x{} at distance {}",
        options.width,
        options.height,
        options.distance
    );

    let mut fb = Framebuffer::new(options.width, options.height);
    fb.clear(background);
    render_camera_view(scene, camera_id, &mut fb);

    // Readback: the framebuffer is CPU memory, so wrapping it as a sprite
    // is the synchronous pixel copy
    let sprite = Sprite::from_framebuffer(&fb);

    // Teardown: consumed target first, then the camera
    scene.destroy(target);
    scene.destroy(camera_id);

    Ok(sprite)
}

/// Drive one manual render of a camera's view into a framebuffer.
///
/// Only nodes passing the camera's culling mask are drawn; a node renders
/// when it and all its ancestors are active, it has a visible renderer,
/// and its layer is in the mask.
pub fn render_camera_view(scene: &Scene, camera_id: NodeId, fb: &mut Framebuffer) {
    let Some(camera_node) = scene.get(camera_id) else { return };
    let Some(rig) = &camera_node.camera else { return };
    let Some(camera_global) = scene.global_transform(camera_id) else { return };
    let camera = Camera::from_global(&camera_global);

    for (id, node) in scene.iter() {
        let Some(renderer) = &node.renderer else { continue };
        if !renderer.visible || renderer.mesh.is_empty() {
            continue;
        }
        if layer_mask(node.layer) & rig.culling_mask == 0 {
            continue;
        }
        if !scene.is_effectively_active(id) {
            continue;
        }
        let Some(global) = scene.global_transform(id) else { continue };

        let vertices: Vec<Vertex> = renderer
            .mesh
            .vertices
            .iter()
            .map(|v| Vertex::new(global.transform_point(v.pos), v.color))
            .collect();
        let settings = RasterSettings { tint: renderer.color, ..Default::default() };
        render_mesh(fb, &vertices, &renderer.mesh.faces, &camera, &settings);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rasterizer::Mesh;
    use crate::scene::Renderer;

    fn cube_node(name: &str) -> Node {
        Node::new(name).with_renderer(Renderer::new(Mesh::cube(1.0, Color::WHITE)))
    }

    #[test]
    fn test_default_background_is_transparent() {
        let mut scene = Scene::new();
        let target = scene.spawn(cube_node("avatar"));

        let sprite = make_sprite(&mut scene, target, &SnapshotOptions::default()).unwrap();

        for corner in sprite.corner_pixels() {
            assert_eq!(corner.a, 0, "uncovered corners must be fully transparent");
        }
        // The target itself did render into the middle
        let center = sprite.pixel(sprite.width() / 2, sprite.height() / 2);
        assert_eq!(center.a, 255);
    }

    #[test]
    fn test_explicit_background_fills_corners() {
        let mut scene = Scene::new();
        let target = scene.spawn(cube_node("avatar"));

        let options = SnapshotOptions {
            background: Some(Color::new(12, 34, 56)),
            ..Default::default()
        };
        let sprite = make_sprite(&mut scene, target, &options).unwrap();

        for corner in sprite.corner_pixels() {
            assert_eq!(corner, Color::new(12, 34, 56));
        }
    }

    #[test]
    fn test_resource_neutral() {
        let mut scene = Scene::new();
        let _bystander = scene.spawn(Node::new("bystander"));
        let target = scene.spawn(cube_node("avatar"));

        let cameras_before = scene.cameras().count();
        let len_before = scene.len();

        make_sprite(&mut scene, target, &SnapshotOptions::default()).unwrap();

        // No camera created during the call survives it
        assert_eq!(scene.cameras().count(), cameras_before);
        // Without clone, the bake consumes exactly the target subtree
        assert_eq!(scene.len(), len_before - 1);
        assert!(!scene.is_alive(target));
    }

    #[test]
    fn test_clone_leaves_original_untouched() {
        let mut scene = Scene::new();
        let target = scene.spawn(cube_node("avatar"));
        let layer_before = scene.get(target).unwrap().layer;
        let len_before = scene.len();

        let options = SnapshotOptions { clone: true, ..Default::default() };
        make_sprite(&mut scene, target, &options).unwrap();

        assert!(scene.is_alive(target));
        assert_eq!(scene.get(target).unwrap().layer, layer_before);
        assert!(scene.get(target).unwrap().parent().is_none());
        assert_eq!(scene.len(), len_before);
    }

    #[test]
    fn test_other_layers_do_not_leak_into_shot() {
        let mut scene = Scene::new();
        // A wall on the default layer, squarely in front of the snapshot
        // camera - it would fill the whole frame if the culling mask let it
        // through
        let wall = Node::new("wall")
            .with_renderer(Renderer::new(Mesh::quad(100.0, 100.0, Color::RED)))
            .with_transform(crate::scene::Transform::from_position(Vec3::new(0.0, 0.0, 2.0)));
        let _wall = scene.spawn(wall);

        let target = scene.spawn(cube_node("avatar"));
        let sprite = make_sprite(&mut scene, target, &SnapshotOptions::default()).unwrap();

        for corner in sprite.corner_pixels() {
            assert_eq!(corner.a, 0, "default-layer geometry leaked into the bake");
        }
        let center = sprite.pixel(sprite.width() / 2, sprite.height() / 2);
        assert_eq!((center.r, center.g, center.b), (255, 255, 255));
    }

    #[test]
    fn test_material_color_tints_bake() {
        let mut scene = Scene::new();
        let mut node = cube_node("avatar");
        if let Some(renderer) = &mut node.renderer {
            renderer.color = Color::BLUE;
        }
        let target = scene.spawn(node);

        let sprite = make_sprite(&mut scene, target, &SnapshotOptions::default()).unwrap();
        let center = sprite.pixel(sprite.width() / 2, sprite.height() / 2);
        assert_eq!((center.r, center.g, center.b), (0, 0, 255));
    }

    #[test]
    fn test_zero_size_target_fails_loudly() {
        let mut scene = Scene::new();
        let target = scene.spawn(cube_node("avatar"));

        let options = SnapshotOptions { width: 0, height: 64, ..Default::default() };
        let err = make_sprite(&mut scene, target, &options).unwrap_err();
        assert_eq!(err, SnapshotError::BadTarget { width: 0, height: 64 });
        // Nothing was consumed
        assert!(scene.is_alive(target));
    }

    #[test]
    fn test_missing_target_fails() {
        let mut scene = Scene::new();
        let gone = scene.spawn(cube_node("gone"));
        scene.destroy(gone);
        assert_eq!(
            make_sprite(&mut scene, gone, &SnapshotOptions::default()).unwrap_err(),
            SnapshotError::TargetMissing
        );
    }

    #[test]
    fn test_subtree_renders_with_parent() {
        let mut scene = Scene::new();
        let target = scene.spawn(Node::new("rig"));
        let _body = scene.spawn_child(target, cube_node("body"));

        let sprite = make_sprite(&mut scene, target, &SnapshotOptions::default()).unwrap();
        let center = sprite.pixel(sprite.width() / 2, sprite.height() / 2);
        assert_eq!(center.a, 255, "child renderer should appear in the bake");
        assert!(!scene.is_alive(target));
        assert!(scene.is_empty());
    }
}
