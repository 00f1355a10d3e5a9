//! # Placement Records
//!
//! One record per callout entity, as exported from the map. The exporter is
//! loose about shape, so the reader accepts:
//!
//! - a top-level list, or an object holding the list under `callouts`,
//!   `items` or `data` (first non-empty wins);
//! - `placename`, `name` or `placeName` for the display name;
//! - `model` or `modelRef` for the mesh reference;
//! - `angles` or `anglesDeg`, `file` or `sourceFile`;
//! - a UTF-8 byte order mark.
//!
//! Missing `origin`/`angles` become zeros; missing or empty `scales` become
//! ones. Entries without a model reference are skipped.


use std::path::Path;

use glam::DVec3;
use serde::Deserialize;
use serde_json::Value;

use crate::error::PipelineError;

const LIST_KEYS: [&str; 3] = ["callouts", "items", "data"];

/// A single placed callout marker.
#[derive(Debug, Clone, PartialEq)]
pub struct PlacementRecord {
    pub place_name: Option<String>,
    pub model_ref: String,
    pub origin: DVec3,
    /// `[pitch, yaw, roll]` in degrees.
    pub angles_deg: DVec3,
    pub scales: DVec3,
    pub source_file: Option<String>,
}

impl PlacementRecord {
    /// Record at the world origin with identity angles and scale.
    pub fn new(place_name: Option<&str>, model_ref: impl Into<String>) -> Self {
        Self {
            place_name: place_name.map(str::to_string),
            model_ref: model_ref.into(),
            origin: DVec3::ZERO,
            angles_deg: DVec3::ZERO,
            scales: DVec3::ONE,
            source_file: None,
        }
    }

    pub fn with_origin(mut self, origin: DVec3) -> Self {
        self.origin = origin;
        self
    }

    pub fn with_angles(mut self, angles_deg: DVec3) -> Self {
        self.angles_deg = angles_deg;
        self
    }

    pub fn with_scales(mut self, scales: DVec3) -> Self {
        self.scales = scales;
        self
    }
}

/// Exporter entry before key aliases and defaults are applied.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct RawRecord {
    placename: Option<String>,
    name: Option<String>,
    #[serde(rename = "placeName")]
    place_name: Option<String>,
    model: Option<String>,
    #[serde(rename = "modelRef")]
    model_ref: Option<String>,
    origin: Option<Vec<f64>>,
    angles: Option<Vec<f64>>,
    #[serde(rename = "anglesDeg")]
    angles_deg: Option<Vec<f64>>,
    scales: Option<Vec<f64>>,
    file: Option<String>,
    #[serde(rename = "sourceFile")]
    source_file: Option<String>,
}

impl RawRecord {
    fn into_record(self) -> Option<PlacementRecord> {
        let model_ref = first_non_empty([self.model, self.model_ref])?;
        let scales = match self.scales {
            Some(s) if !s.is_empty() => vec3_or(&s, 1.0),
            _ => DVec3::ONE,
        };
        Some(PlacementRecord {
            place_name: first_non_empty([self.placename, self.name, self.place_name]),
            model_ref,
            origin: self.origin.map_or(DVec3::ZERO, |v| vec3_or(&v, 0.0)),
            angles_deg: self.angles.or(self.angles_deg).map_or(DVec3::ZERO, |v| vec3_or(&v, 0.0)),
            scales,
            source_file: self.file.or(self.source_file),
        })
    }
}

fn first_non_empty<const N: usize>(candidates: [Option<String>; N]) -> Option<String> {
    candidates.into_iter().flatten().find(|s| !s.is_empty())
}

/// First three components, padding short arrays with `fill`.
fn vec3_or(values: &[f64], fill: f64) -> DVec3 {
    let at = |i: usize| values.get(i).copied().unwrap_or(fill);
    DVec3::new(at(0), at(1), at(2))
}

/// Parses placement records from JSON text.
///
/// # Example
///
/// ```rust
/// use callout_pipeline::parse_records;
///
/// let records = parse_records(r#"{"callouts": [{"placename": "A Site", "model": "models/a.vmdl"}]}"#)?;
/// assert_eq!(records[0].place_name.as_deref(), Some("A Site"));
/// # Ok::<(), serde_json::Error>(())
/// ```
pub fn parse_records(text: &str) -> Result<Vec<PlacementRecord>, serde_json::Error> {
    let text = text.strip_prefix('\u{feff}').unwrap_or(text);
    let document: Value = serde_json::from_str(text)?;

    let items = match document {
        Value::Array(items) => items,
        Value::Object(mut map) => LIST_KEYS
            .iter()
            .filter_map(|key| match map.remove(*key) {
                Some(Value::Array(items)) if !items.is_empty() => Some(items),
                _ => None,
            })
            .next()
            .unwrap_or_default(),
        _ => Vec::new(),
    };

    let mut records = Vec::with_capacity(items.len());
    for (position, item) in items.into_iter().enumerate() {
        let raw: RawRecord = serde_json::from_value(item)?;
        match raw.into_record() {
            Some(record) => records.push(record),
            None => tracing::warn!(position, "Skipping placement record without a model reference"),
        }
    }
    Ok(records)
}

/// Reads placement records from a JSON file.
pub fn read_records(path: impl AsRef<Path>) -> Result<Vec<PlacementRecord>, PipelineError> {
    let path = path.as_ref();
    let text = std::fs::read_to_string(path).map_err(|e| PipelineError::read_records(path, e))?;
    let records =
        parse_records(&text).map_err(|e| PipelineError::invalid_records(path, e.to_string()))?;
    tracing::debug!(path = %path.display(), records = records.len(), "Read placement records");
    Ok(records)
}
