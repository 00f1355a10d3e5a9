//! # Mesh Errors
//!
//! Failures of the mesh collaborator. The pipeline never aborts on these:
//! a failed load degrades to vertex-only geometry or becomes a missing model.

use std::path::{Path, PathBuf};

use thiserror::Error;

/// Errors that can occur while indexing or loading mesh files.
#[derive(Debug, Error)]
pub enum MeshError {
    /// The mesh file does not exist.
    #[error("Mesh file not found: {}", path.display())]
    FileNotFound { path: PathBuf },

    /// Reading a file failed.
    #[error("Failed to read {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The file is not a glTF 2.0 JSON document or GLB container.
    #[error("Invalid glTF: {message}")]
    InvalidGltf { message: String },

    /// The glTF JSON chunk could not be deserialized.
    #[error("Invalid glTF JSON: {0}")]
    Json(#[from] serde_json::Error),

    /// A referenced buffer, view or accessor is missing or out of range.
    #[error("Invalid glTF reference: {message}")]
    InvalidReference { message: String },

    /// The document uses a feature this loader does not read.
    #[error("Unsupported glTF feature: {message}")]
    Unsupported { message: String },

    /// The models root is not a readable directory.
    #[error("Models root is not a directory: {}", path.display())]
    InvalidRoot { path: PathBuf },
}

impl MeshError {
    pub fn io(path: impl AsRef<Path>, source: std::io::Error) -> Self {
        let path = path.as_ref().to_path_buf();
        if source.kind() == std::io::ErrorKind::NotFound {
            Self::FileNotFound { path }
        } else {
            Self::Io { path, source }
        }
    }

    pub fn invalid(message: impl Into<String>) -> Self {
        Self::InvalidGltf {
            message: message.into(),
        }
    }

    pub fn reference(message: impl Into<String>) -> Self {
        Self::InvalidReference {
            message: message.into(),
        }
    }

    pub fn unsupported(message: impl Into<String>) -> Self {
        Self::Unsupported {
            message: message.into(),
        }
    }

    /// Whether the error means the file was never there.
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::FileNotFound { .. })
    }
}

impl From<std::io::Error> for MeshError {
    fn from(source: std::io::Error) -> Self {
        if source.kind() == std::io::ErrorKind::UnexpectedEof {
            Self::invalid("unexpected end of binary data")
        } else {
            Self::Io {
                path: PathBuf::new(),
                source,
            }
        }
    }
}
