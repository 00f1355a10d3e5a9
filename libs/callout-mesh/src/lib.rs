//! # Callout Mesh
//!
//! Mesh-file side of the callout pipeline: finds the file behind a model
//! reference, reads its vertices and physics footprint, and keeps the result
//! for the rest of the run.
//!
//! ## Architecture
//!
//! ```text
//! model ref ─► index::ModelIndex::resolve ─► loader::MeshLoader ─► cache::MeshCache
//!                                                  │
//!                                      gltf::GltfDocument + physics::PhysicsExtractor
//! ```
//!
//! ## Usage
//!
//! ```rust,no_run
//! use callout_mesh::{GltfLoader, MeshCache, ModelIndex};
//!
//! let index = ModelIndex::build("export/models")?;
//! let mut cache = MeshCache::new(GltfLoader::new());
//! let entry = cache.load("models/dev/callout.vmdl", &index);
//! println!("{:?}", entry.path());
//! # Ok::<(), callout_mesh::MeshError>(())
//! ```

pub mod cache;
pub mod error;
pub mod gltf;
pub mod index;
pub mod loader;
pub mod physics;

#[cfg(test)]
mod test_support;

pub use cache::{CacheEntry, MeshCache};
pub use error::MeshError;
pub use gltf::{GltfDocument, SceneNode};
pub use index::{normalize_model_id, ModelIndex};
pub use loader::{GltfLoader, MeshGeometry, MeshLoader};
pub use physics::{GltfPhysicsExtractor, NoPhysics, PhysicsExtractor};
