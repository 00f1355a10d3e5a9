//! # Callout Pipeline
//!
//! Batch transform from exported placement records and mesh files to a JSON
//! document of flat callout polygons.
//!
//! ## Architecture
//!
//! ```text
//! records::read_records ─► pipeline::CalloutPipeline ─► output::write_json
//!                                  │
//!                    callout-mesh (index, cache, loader)
//!                    callout-geometry (rotation, SRT, boundary, scale)
//! ```
//!
//! ## Usage
//!
//! ```rust,no_run
//! use callout_mesh::GltfLoader;
//! use callout_pipeline::{read_records, write_json, CalloutPipeline, PipelineOptions};
//!
//! let records = read_records("export/maps/de_mirage/report/callouts_found.json")?;
//! let pipeline = CalloutPipeline::new(GltfLoader::new(), PipelineOptions::default());
//! let result = pipeline.process_dir(&records, "export/models")?;
//! write_json(&result, "out/de_mirage_callouts.json", true)?;
//! # Ok::<(), callout_pipeline::PipelineError>(())
//! ```

pub mod error;
pub mod options;
pub mod output;
pub mod pipeline;
pub mod records;

pub use error::PipelineError;
pub use options::{PipelineOptions, RotationChoice};
pub use output::{write_json, MissingModel, PipelineResult, ResolvedCallout};
pub use pipeline::CalloutPipeline;
pub use records::{parse_records, read_records, PlacementRecord};
