//! # Pipeline Errors
//!
//! Only the edges of a run can fail: reading the record file, indexing the
//! models root and writing the output. Per-record problems end up in
//! `missingModels` instead.

use std::path::{Path, PathBuf};

use callout_mesh::MeshError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum PipelineError {
    /// The record file could not be read.
    #[error("Failed to read records from {}: {source}", path.display())]
    ReadRecords {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The record file is not valid JSON or has the wrong shape.
    #[error("Invalid records in {}: {message}", path.display())]
    InvalidRecords { path: PathBuf, message: String },

    /// The models root could not be indexed.
    #[error(transparent)]
    Mesh(#[from] MeshError),

    /// The output document could not be written.
    #[error("Failed to write {}: {source}", path.display())]
    WriteOutput {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The output document could not be serialized.
    #[error("Failed to serialize output: {0}")]
    Serialize(#[from] serde_json::Error),
}

impl PipelineError {
    pub fn read_records(path: impl AsRef<Path>, source: std::io::Error) -> Self {
        Self::ReadRecords {
            path: path.as_ref().to_path_buf(),
            source,
        }
    }

    pub fn invalid_records(path: impl AsRef<Path>, message: impl Into<String>) -> Self {
        Self::InvalidRecords {
            path: path.as_ref().to_path_buf(),
            message: message.into(),
        }
    }

    pub fn write_output(path: impl AsRef<Path>, source: std::io::Error) -> Self {
        Self::WriteOutput {
            path: path.as_ref().to_path_buf(),
            source,
        }
    }
}
