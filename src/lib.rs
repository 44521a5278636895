//! AVATAR-KIT: avatar asset manipulation toolkit
//!
//! Helper routines for building avatar customization flows:
//! - Prefab templates stored as RON files, instantiated into a scene graph
//! - Node swapping that preserves transform state ("permute")
//! - Recoloring renderer materials across a subtree
//! - Hex color conversion
//! - Baking a node's rendered appearance into a 2D sprite via an offscreen
//!   snapshot camera and a CPU software rasterizer
//!
//! Everything is synchronous and deterministic; no GPU or windowing context
//! is needed (sprites can still be uploaded as textures for display).
//!
//! ```
//! use avatar_kit::{make_sprite, SnapshotOptions};
//! use avatar_kit::scene::{Node, Renderer, Scene};
//! use avatar_kit::rasterizer::Mesh;
//! use avatar_kit::Color;
//!
//! let mut scene = Scene::new();
//! let avatar = scene.spawn(
//!     Node::new("avatar").with_renderer(Renderer::new(Mesh::cube(1.0, Color::WHITE))),
//! );
//! let icon = make_sprite(&mut scene, avatar, &SnapshotOptions::default()).unwrap();
//! assert_eq!(icon.width(), 128);
//! ```

/// Version from Cargo.toml
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

pub mod color;
pub mod prefab;
pub mod rasterizer;
pub mod recolor;
pub mod scene;
pub mod snapshot;
pub mod sprite;
pub mod swap;

pub use color::{hex_to_int, int_to_hex, Color, ColorError};
pub use prefab::{instantiate, load_prefab, Prefab, PrefabError, PrefabLibrary, PrefabNode};
pub use recolor::recolor;
pub use scene::{layer_mask, NodeId, Scene, SNAPSHOT_LAYER};
pub use snapshot::{make_sprite, render_camera_view, SnapshotError, SnapshotOptions};
pub use sprite::{Sprite, SpriteRect};
pub use swap::{swap_node, SwapError, SwapErrorKind, SwapOptions, SwapStep};
