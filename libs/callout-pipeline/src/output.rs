//! # Output Document
//!
//! The JSON written for each map. Field names are camelCase; vectors are
//! arrays (`[x, y]`, `[x, y, z]`) and non-finite ratios become `null`.

use std::path::{Path, PathBuf};

use callout_geometry::{Bounds2D, Bounds3D, BoundaryTier, PhysicsMetadata, ProjectionMethod, RotationOrder};
use glam::{DVec2, DVec3};
use serde::{Serialize, Serializer};

use crate::error::PipelineError;

/// A placement that resolved to a mesh and produced a polygon.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ResolvedCallout {
    pub name: Option<String>,
    pub model_ref: String,
    pub origin: DVec3,
    pub angles_deg: DVec3,
    pub scales: DVec3,
    pub rotation_order: RotationOrder,
    pub projection_method: ProjectionMethod,
    pub boundary_tier: BoundaryTier,
    pub vertex_count: usize,
    pub physics_metadata: PhysicsMetadata,
    #[serde(rename = "polygon2D")]
    pub polygon_2d: Vec<DVec2>,
    #[serde(rename = "bbox2D")]
    pub bbox_2d: Bounds2D,
    #[serde(rename = "polygon3D")]
    pub polygon_3d: Vec<DVec3>,
    #[serde(rename = "bbox3D")]
    pub bbox_3d: Bounds3D,
    #[serde(serialize_with = "finite_or_null")]
    pub z_span_ratio: f64,
    pub source_file: Option<String>,
}

/// A placement whose mesh was not found or failed to load.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MissingModel {
    pub place_name: Option<String>,
    pub model_ref: String,
    /// File the reference resolved to, when it resolved but did not load.
    pub resolved_path: Option<PathBuf>,
}

/// Everything produced for one run.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PipelineResult {
    pub rotation_order: RotationOrder,
    pub count: usize,
    pub missing_models: Vec<MissingModel>,
    pub callouts: Vec<ResolvedCallout>,
}

impl PipelineResult {
    pub fn new(rotation_order: RotationOrder, callouts: Vec<ResolvedCallout>, missing_models: Vec<MissingModel>) -> Self {
        Self {
            rotation_order,
            count: callouts.len(),
            missing_models,
            callouts,
        }
    }

    pub fn to_json(&self, pretty: bool) -> Result<Vec<u8>, serde_json::Error> {
        if pretty {
            serde_json::to_vec_pretty(self)
        } else {
            serde_json::to_vec(self)
        }
    }
}

fn finite_or_null<S: Serializer>(value: &f64, serializer: S) -> Result<S::Ok, S::Error> {
    if value.is_finite() {
        serializer.serialize_f64(*value)
    } else {
        serializer.serialize_none()
    }
}

/// Writes `result` to `path`, creating parent directories.
///
/// Pretty output is indented by two spaces; compact output has no
/// whitespace.
pub fn write_json(result: &PipelineResult, path: impl AsRef<Path>, pretty: bool) -> Result<(), PipelineError> {
    let path = path.as_ref();
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent).map_err(|e| PipelineError::write_output(parent, e))?;
    }
    let bytes = result.to_json(pretty)?;
    std::fs::write(path, bytes).map_err(|e| PipelineError::write_output(path, e))?;
    tracing::debug!(path = %path.display(), count = result.count, "Wrote callout document");
    Ok(())
}
