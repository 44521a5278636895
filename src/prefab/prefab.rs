//! Prefab definition
//!
//! A prefab is a reusable node-tree template: names, transforms, layers,
//! and embedded renderer meshes, stored as a `.ron` file. Instantiating a
//! prefab spawns an independently-owned copy of the tree into a scene.

use crate::color::Color;
use crate::rasterizer::Mesh;
use crate::scene::Transform;
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::sync::atomic::{AtomicU64, Ordering};

/// Counter for generating unique prefab IDs
static PREFAB_ID_COUNTER: AtomicU64 = AtomicU64::new(0);

/// Generate a stable unique ID for a prefab.
///
/// Mixes an atomic counter, a random value, and the current time so ids are
/// unique within a session and across launches.
pub fn generate_prefab_id() -> u64 {
    use std::collections::hash_map::DefaultHasher;
    use std::hash::{Hash, Hasher};

    let counter = PREFAB_ID_COUNTER.fetch_add(1, Ordering::SeqCst);
    let random_bits = macroquad::rand::rand() as u64;

    let mut hasher = DefaultHasher::new();
    counter.hash(&mut hasher);
    random_bits.hash(&mut hasher);
    if let Ok(time) = std::time::SystemTime::now().duration_since(std::time::UNIX_EPOCH) {
        time.as_nanos().hash(&mut hasher);
    }
    hasher.finish()
}

/// Error type for prefab operations
#[derive(Debug)]
pub enum PrefabError {
    /// File I/O error
    Io(String),
    /// Serialization/deserialization error
    Serialization(String),
    /// Validation error
    Validation(String),
}

impl std::fmt::Display for PrefabError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PrefabError::Io(msg) => write!(f, "I/O error: {}", msg),
            PrefabError::Serialization(msg) => write!(f, "Serialization error: {}", msg),
            PrefabError::Validation(msg) => write!(f, "Validation error: {}", msg),
        }
    }
}

impl std::error::Error for PrefabError {}

impl From<std::io::Error> for PrefabError {
    fn from(e: std::io::Error) -> Self {
        PrefabError::Io(e.to_string())
    }
}

fn default_true() -> bool {
    true
}

/// Renderer definition embedded in a prefab node
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RendererDef {
    pub mesh: Mesh,
    /// Material color
    #[serde(default)]
    pub color: Color,
    #[serde(default = "default_true")]
    pub visible: bool,
}

impl RendererDef {
    pub fn new(mesh: Mesh) -> Self {
        Self { mesh, color: Color::WHITE, visible: true }
    }
}

/// One node of a prefab tree
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PrefabNode {
    pub name: String,
    #[serde(default)]
    pub transform: Transform,
    #[serde(default)]
    pub layer: u32,
    #[serde(default = "default_true")]
    pub active: bool,
    #[serde(default)]
    pub renderer: Option<RendererDef>,
    #[serde(default)]
    pub children: Vec<PrefabNode>,
}

impl PrefabNode {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            transform: Transform::IDENTITY,
            layer: 0,
            active: true,
            renderer: None,
            children: Vec::new(),
        }
    }

    pub fn with_renderer(mut self, renderer: RendererDef) -> Self {
        self.renderer = Some(renderer);
        self
    }

    pub fn with_transform(mut self, transform: Transform) -> Self {
        self.transform = transform;
        self
    }

    pub fn with_child(mut self, child: PrefabNode) -> Self {
        self.children.push(child);
        self
    }
}

/// A complete prefab: stable id, metadata, and the node tree
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Prefab {
    /// Stable unique identifier, survives edits and renames
    #[serde(default = "generate_prefab_id")]
    pub id: u64,

    /// Human-readable name (also used as filename)
    pub name: String,

    /// Root of the node tree
    pub root: PrefabNode,

    /// Category for organization (e.g. "hair", "torso", "accessories")
    #[serde(default)]
    pub category: String,

    /// Tags for filtering
    #[serde(default)]
    pub tags: Vec<String>,
}

impl Prefab {
    pub fn new(name: impl Into<String>, root: PrefabNode) -> Self {
        Self {
            id: generate_prefab_id(),
            name: name.into(),
            root,
            category: String::new(),
            tags: Vec::new(),
        }
    }

    /// Load a prefab from a `.ron` file
    pub fn load(path: &Path) -> Result<Prefab, PrefabError> {
        let content = std::fs::read_to_string(path)?;
        Self::load_from_str(&content)
    }

    /// Parse a prefab from RON text
    pub fn load_from_str(content: &str) -> Result<Prefab, PrefabError> {
        let prefab: Prefab =
            ron::from_str(content).map_err(|e| PrefabError::Serialization(e.to_string()))?;
        if prefab.name.is_empty() {
            return Err(PrefabError::Validation("prefab has no name".to_string()));
        }
        Ok(prefab)
    }

    /// Save the prefab as pretty-printed RON
    pub fn save(&self, path: &Path) -> Result<(), PrefabError> {
        let content = ron::ser::to_string_pretty(self, ron::ser::PrettyConfig::default())
            .map_err(|e| PrefabError::Serialization(e.to_string()))?;
        std::fs::write(path, content)?;
        Ok(())
    }
}
