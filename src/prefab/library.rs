//! Prefab library - discovery and caching of prefab templates
//!
//! Manages the collection of prefab `.ron` files in a directory. Parse
//! failures during discovery are logged and skipped; a broken file never
//! takes the whole library down.

use std::collections::HashMap;
use std::path::{Path, PathBuf};

use super::prefab::{Prefab, PrefabError};

/// Default directory where prefabs are stored
pub const PREFABS_DIR: &str = "assets/prefabs";

/// A library of prefab templates
#[derive(Debug, Default)]
pub struct PrefabLibrary {
    /// Loaded prefabs keyed by name (without extension)
    prefabs: HashMap<String, Prefab>,
    /// Discovered prefab names, in discovery order
    prefab_names: Vec<String>,
    /// Prefab ID -> name mapping for ID-based lookups
    by_id: HashMap<u64, String>,
    /// Base directory for prefab files
    base_dir: PathBuf,
}

impl PrefabLibrary {
    pub fn new() -> Self {
        Self::with_dir(PREFABS_DIR)
    }

    /// Create a library with a custom base directory
    pub fn with_dir(base_dir: impl Into<PathBuf>) -> Self {
        Self {
            prefabs: HashMap::new(),
            prefab_names: Vec::new(),
            by_id: HashMap::new(),
            base_dir: base_dir.into(),
        }
    }

    /// Discover and load all prefabs from the base directory.
    ///
    /// Prefabs are keyed by filename (without extension). Files that fail
    /// to parse are skipped with a warning.
    pub fn discover(&mut self) -> Result<usize, PrefabError> {
        self.prefabs.clear();
        self.prefab_names.clear();
        self.by_id.clear();

        if !self.base_dir.exists() {
            std::fs::create_dir_all(&self.base_dir)?;
            return Ok(0);
        }

        let mut entries: Vec<_> = std::fs::read_dir(&self.base_dir)?
            .filter_map(|e| e.ok())
            .map(|e| e.path())
            .filter(|p| {
                p.extension()
                    .map(|ext| ext.to_ascii_lowercase() == "ron")
                    .unwrap_or(false)
            })
            .collect();

        // Sort by filename for consistent ordering
        entries.sort();

        for path in entries {
            match Prefab::load(&path) {
                Ok(prefab) => {
                    let name = path
                        .file_stem()
                        .and_then(|s| s.to_str())
                        .unwrap_or(&prefab.name)
                        .to_string();
                    let id = prefab.id;
                    self.prefab_names.push(name.clone());
                    self.by_id.insert(id, name.clone());
                    self.prefabs.insert(name, prefab);
                }
                Err(e) => {
                    log::warn!("failed to load prefab {:?}: {}", path, e);
                }
            }
        }

        Ok(self.prefabs.len())
    }

    /// Get a prefab by name
    pub fn get(&self, name: &str) -> Option<&Prefab> {
        self.prefabs.get(name)
    }

    /// Get a prefab by its stable ID
    pub fn get_by_id(&self, id: u64) -> Option<&Prefab> {
        self.by_id.get(&id).and_then(|name| self.prefabs.get(name))
    }

    pub fn contains(&self, name: &str) -> bool {
        self.prefabs.contains_key(name)
    }

    /// Add a prefab to the library, replacing any same-named entry
    pub fn add(&mut self, prefab: Prefab) {
        let name = prefab.name.clone();
        let id = prefab.id;

        if let Some(old) = self.prefabs.get(&name) {
            self.by_id.remove(&old.id);
        } else {
            self.prefab_names.push(name.clone());
        }

        self.by_id.insert(id, name.clone());
        self.prefabs.insert(name, prefab);
    }

    /// Remove a prefab by name
    pub fn remove(&mut self, name: &str) -> Option<Prefab> {
        let prefab = self.prefabs.remove(name)?;
        self.prefab_names.retain(|n| n != name);
        self.by_id.remove(&prefab.id);
        Some(prefab)
    }

    pub fn len(&self) -> usize {
        self.prefabs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.prefabs.is_empty()
    }

    /// Iterate over prefab names in discovery order
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.prefab_names.iter().map(|s| s.as_str())
    }

    /// Iterate over all prefabs
    pub fn iter(&self) -> impl Iterator<Item = (&str, &Prefab)> {
        self.prefab_names
            .iter()
            .filter_map(|name| self.prefabs.get(name).map(|p| (name.as_str(), p)))
    }

    /// Save a prefab from the library to disk
    pub fn save_prefab(&self, name: &str) -> Result<(), PrefabError> {
        let prefab = self
            .prefabs
            .get(name)
            .ok_or_else(|| PrefabError::Validation(format!("prefab '{}' not found", name)))?;

        std::fs::create_dir_all(&self.base_dir)?;
        let path = self.base_dir.join(format!("{}.ron", name));
        prefab.save(&path)
    }

    /// Generate a unique name based on a base name
    pub fn generate_unique_name(&self, base: &str) -> String {
        if !self.contains(base) {
            return base.to_string();
        }
        let mut counter = 1;
        loop {
            let name = format!("{}_{}", base, counter);
            if !self.contains(&name) {
                return name;
            }
            counter += 1;
        }
    }

    /// Get the base directory path
    pub fn base_dir(&self) -> &Path {
        &self.base_dir
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::prefab::PrefabNode;

    fn sample(name: &str) -> Prefab {
        Prefab::new(name, PrefabNode::new(name))
    }

    #[test]
    fn test_library_operations() {
        let mut lib = PrefabLibrary::with_dir("unused");

        lib.add(sample("hat"));
        assert_eq!(lib.len(), 1);
        assert!(lib.contains("hat"));
        assert!(lib.get("hat").is_some());

        assert!(lib.remove("hat").is_some());
        assert!(lib.is_empty());
    }

    #[test]
    fn test_id_lookup() {
        let mut lib = PrefabLibrary::with_dir("unused");
        let prefab = sample("boots");
        let id = prefab.id;
        lib.add(prefab);

        assert!(lib.get_by_id(id).is_some());
        assert!(lib.get_by_id(id ^ 1).is_none());
    }

    #[test]
    fn test_unique_name_generation() {
        let mut lib = PrefabLibrary::with_dir("unused");
        assert_eq!(lib.generate_unique_name("cape"), "cape");
        lib.add(sample("cape"));
        assert_eq!(lib.generate_unique_name("cape"), "cape_1");
        lib.add(sample("cape_1"));
        assert_eq!(lib.generate_unique_name("cape"), "cape_2");
    }

    #[test]
    fn test_discover_skips_broken_files() {
        let dir = tempfile::tempdir().unwrap();
        let mut lib = PrefabLibrary::with_dir(dir.path());

        sample("good").save(&dir.path().join("good.ron")).unwrap();
        std::fs::write(dir.path().join("broken.ron"), "not ron at all").unwrap();
        std::fs::write(dir.path().join("ignored.txt"), "not a prefab").unwrap();

        let count = lib.discover().unwrap();
        assert_eq!(count, 1);
        assert!(lib.contains("good"));
        assert!(!lib.contains("broken"));
    }

    #[test]
    fn test_discover_missing_dir_creates_it() {
        let dir = tempfile::tempdir().unwrap();
        let nested = dir.path().join("does/not/exist");
        let mut lib = PrefabLibrary::with_dir(&nested);
        assert_eq!(lib.discover().unwrap(), 0);
        assert!(nested.exists());
    }

    #[test]
    fn test_save_and_rediscover() {
        let dir = tempfile::tempdir().unwrap();
        let mut lib = PrefabLibrary::with_dir(dir.path());
        lib.add(sample("helmet"));
        lib.save_prefab("helmet").unwrap();

        let mut fresh = PrefabLibrary::with_dir(dir.path());
        assert_eq!(fresh.discover().unwrap(), 1);
        assert_eq!(fresh.get("helmet").map(|p| p.name.as_str()), Some("helmet"));
    }
}
