//! # Model Index
//!
//! Maps model references from placement records (`models/dev/callout.vmdl`)
//! to exported mesh files (`models/dev/callout_physics.glb`).
//!
//! ## Resolution Order
//!
//! | Step | Match                                   |
//! |------|-----------------------------------------|
//! | a    | key == `<id>_physics`                   |
//! | b    | key == `<id>`                           |
//! | c    | first key ending with `<basename>_physics` |
//! | d    | first key ending with `<basename>`      |


use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use config::constants::{MESH_EXTENSIONS, PHYSICS_SUFFIX};
use walkdir::WalkDir;

use crate::error::MeshError;

/// Normalizes a model reference into a lookup id.
///
/// Lower-cases, converts `\` to `/`, removes `.vmdl_c` and `.vmdl`, then
/// strips one trailing `_c`.
///
/// # Example
///
/// ```rust
/// use callout_mesh::normalize_model_id;
///
/// assert_eq!(normalize_model_id(r"Models\Dev\Callout.vmdl_c"), "models/dev/callout");
/// ```
pub fn normalize_model_id(model_ref: &str) -> String {
    let id = model_ref
        .replace('\\', "/")
        .to_lowercase()
        .replace(".vmdl_c", "")
        .replace(".vmdl", "");
    match id.strip_suffix("_c") {
        Some(stripped) => stripped.to_string(),
        None => id,
    }
}

/// Last path segment of a normalized id.
fn basename(id: &str) -> &str {
    id.rsplit('/').next().unwrap_or(id)
}

/// Sorted lookup table from normalized keys to mesh files.
#[derive(Debug, Clone, Default)]
pub struct ModelIndex {
    entries: BTreeMap<String, PathBuf>,
}

impl ModelIndex {
    /// Scans `root` recursively for mesh files.
    ///
    /// Each file is indexed under its root-relative path without extension
    /// and under its bare stem, both lower-cased.
    pub fn build(root: impl AsRef<Path>) -> Result<Self, MeshError> {
        let root = root.as_ref();
        if !root.is_dir() {
            return Err(MeshError::InvalidRoot {
                path: root.to_path_buf(),
            });
        }

        let mut files: Vec<PathBuf> = WalkDir::new(root)
            .follow_links(true)
            .into_iter()
            .filter_map(Result::ok)
            .filter(|entry| entry.file_type().is_file())
            .map(walkdir::DirEntry::into_path)
            .filter(|path| is_mesh_file(path))
            .collect();
        files.sort();

        let mut index = Self::default();
        for path in files {
            let Ok(relative) = path.strip_prefix(root) else {
                continue;
            };
            let relative_key = relative
                .with_extension("")
                .to_string_lossy()
                .replace('\\', "/")
                .to_lowercase();
            let stem_key = path
                .file_stem()
                .map(|s| s.to_string_lossy().to_lowercase())
                .unwrap_or_default();

            index.entries.insert(relative_key, path.clone());
            if !stem_key.is_empty() {
                index.entries.insert(stem_key, path);
            }
        }

        tracing::debug!(root = %root.display(), keys = index.len(), "Built model index");
        Ok(index)
    }

    /// Index over explicit `(key, path)` pairs. Keys are lower-cased.
    pub fn from_entries<I, K, P>(entries: I) -> Self
    where
        I: IntoIterator<Item = (K, P)>,
        K: AsRef<str>,
        P: Into<PathBuf>,
    {
        Self {
            entries: entries
                .into_iter()
                .map(|(k, p)| (k.as_ref().to_lowercase(), p.into()))
                .collect(),
        }
    }

    /// Finds the mesh file for a model reference, preferring physics meshes.
    pub fn resolve(&self, model_ref: &str) -> Option<&Path> {
        let id = normalize_model_id(model_ref);
        let physics_id = format!("{id}{PHYSICS_SUFFIX}");

        if let Some(path) = self.entries.get(&physics_id).or_else(|| self.entries.get(&id)) {
            return Some(path);
        }

        let base = basename(&id);
        let physics_base = format!("{base}{PHYSICS_SUFFIX}");
        self.find_suffix(&physics_base)
            .or_else(|| self.find_suffix(base))
    }

    fn find_suffix(&self, suffix: &str) -> Option<&Path> {
        self.entries
            .iter()
            .find(|(key, _)| key.ends_with(suffix))
            .map(|(_, path)| path.as_path())
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Indexed keys in sorted order.
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.entries.keys().map(String::as_str)
    }
}

fn is_mesh_file(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| MESH_EXTENSIONS.iter().any(|m| ext.eq_ignore_ascii_case(m)))
}
