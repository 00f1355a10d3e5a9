//! # Mesh Cache
//!
//! Loads each normalized model id at most once per run. Successful loads,
//! failed loads and unresolved references are all remembered, so a
//! reference shared by many placements costs a single lookup.


use std::collections::HashMap;
use std::path::{Path, PathBuf};

use crate::index::{normalize_model_id, ModelIndex};
use crate::loader::{MeshGeometry, MeshLoader};

/// Outcome of loading one model id.
#[derive(Debug, Clone, PartialEq)]
pub enum CacheEntry {
    /// Vertices (and physics metadata, if any) were read from `path`.
    Loaded { path: PathBuf, geometry: MeshGeometry },
    /// The reference resolved to `path` but the file could not be read.
    Failed { path: PathBuf },
    /// No indexed file matched the reference.
    Unresolved,
}

impl CacheEntry {
    pub fn geometry(&self) -> Option<&MeshGeometry> {
        match self {
            Self::Loaded { geometry, .. } => Some(geometry),
            _ => None,
        }
    }

    /// File the reference resolved to, whether or not it loaded.
    pub fn path(&self) -> Option<&Path> {
        match self {
            Self::Loaded { path, .. } | Self::Failed { path } => Some(path),
            Self::Unresolved => None,
        }
    }
}

/// Per-run cache of mesh geometry keyed on normalized model id.
#[derive(Debug)]
pub struct MeshCache<L> {
    loader: L,
    entries: HashMap<String, CacheEntry>,
    loads: usize,
}

impl<L: MeshLoader> MeshCache<L> {
    pub fn new(loader: L) -> Self {
        Self {
            loader,
            entries: HashMap::new(),
            loads: 0,
        }
    }

    /// Resolves and loads `model_ref` unless its id was seen before.
    ///
    /// A failed physics-aware load is retried once as a plain vertex load
    /// with default metadata. If that fails too the id is marked failed.
    pub fn load(&mut self, model_ref: &str, index: &ModelIndex) -> &CacheEntry {
        let id = normalize_model_id(model_ref);
        if self.entries.contains_key(&id) {
            tracing::trace!(%id, "Mesh cache hit");
        } else {
            let entry = self.load_uncached(&id, model_ref, index);
            self.entries.insert(id.clone(), entry);
        }
        &self.entries[&id]
    }

    fn load_uncached(&mut self, id: &str, model_ref: &str, index: &ModelIndex) -> CacheEntry {
        let Some(path) = index.resolve(model_ref) else {
            tracing::debug!(%id, "No mesh file for model");
            return CacheEntry::Unresolved;
        };
        let path = path.to_path_buf();

        self.loads += 1;
        let error = match self.loader.load_vertices_with_physics(&path) {
            Ok(geometry) => return CacheEntry::Loaded { path, geometry },
            Err(error) => error,
        };
        tracing::debug!(path = %path.display(), %error, "Physics-aware load failed, retrying vertices only");
        match self.loader.load_vertices(&path) {
            Ok(vertices) => CacheEntry::Loaded {
                path,
                geometry: MeshGeometry::new(vertices),
            },
            Err(error) => {
                tracing::warn!(path = %path.display(), %error, "Failed to load mesh");
                CacheEntry::Failed { path }
            }
        }
    }

    /// Cached geometry for `model_ref`, without loading.
    pub fn get(&self, model_ref: &str) -> Option<&MeshGeometry> {
        self.entry(model_ref).and_then(CacheEntry::geometry)
    }

    /// Cached entry for `model_ref`, without loading.
    pub fn entry(&self, model_ref: &str) -> Option<&CacheEntry> {
        self.entries.get(&normalize_model_id(model_ref))
    }

    /// Number of model ids handed to the loader so far. A vertex-only retry
    /// belongs to the same load.
    pub fn loads(&self) -> usize {
        self.loads
    }

    /// Number of distinct ids seen.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn loader(&self) -> &L {
        &self.loader
    }
}
