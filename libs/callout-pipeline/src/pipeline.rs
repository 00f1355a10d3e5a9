//! # Callout Pipeline
//!
//! Turns placement records into callout polygons.
//!
//! ## Stages
//!
//! ```text
//! records ─► MeshCache (load each model once)
//!         ─► rotation order (fixed, or vote over sampled records)
//!         ─► per record: apply_srt ─► BoundaryExtractor ─► normalize_scale ─► bounds
//! ```
//!
//! A record whose mesh is missing or unreadable goes to `missingModels`;
//! nothing inside a run is fatal.

use std::path::Path;

use callout_geometry::{
    apply_srt, choose_global_order, convex_hull_3d, flatness_ratio, normalize_scale, BoundaryExtractor, Bounds2D,
    Bounds3D, OrderSample, RotationOrder, ScaleOptions,
};
use callout_mesh::{MeshCache, MeshGeometry, MeshLoader, ModelIndex};

use crate::error::PipelineError;
use crate::options::{PipelineOptions, RotationChoice};
use crate::output::{MissingModel, PipelineResult, ResolvedCallout};
use crate::records::PlacementRecord;

/// Batch processor for one map at a time.
///
/// Each call to [`process`](Self::process) uses a fresh mesh cache, so
/// separate maps never share loaded geometry.
#[derive(Debug)]
pub struct CalloutPipeline<L> {
    loader: L,
    options: PipelineOptions,
    extractor: BoundaryExtractor,
}

impl<L: MeshLoader> CalloutPipeline<L> {
    pub fn new(loader: L, options: PipelineOptions) -> Self {
        let extractor = options.boundary_extractor();
        Self {
            loader,
            options,
            extractor,
        }
    }

    pub fn options(&self) -> &PipelineOptions {
        &self.options
    }

    pub fn loader(&self) -> &L {
        &self.loader
    }

    /// Indexes `models_root`, then runs [`process`](Self::process).
    pub fn process_dir(
        &self,
        records: &[PlacementRecord],
        models_root: impl AsRef<Path>,
    ) -> Result<PipelineResult, PipelineError> {
        let index = ModelIndex::build(models_root)?;
        Ok(self.process(records, &index))
    }

    /// Resolves every record against `index`.
    ///
    /// Each record lands in exactly one of `callouts` or `missingModels`, in
    /// input order.
    pub fn process(&self, records: &[PlacementRecord], index: &ModelIndex) -> PipelineResult {
        let mut cache = MeshCache::new(&self.loader);
        for record in records {
            cache.load(&record.model_ref, index);
        }

        let order = self.resolve_order(records, &cache);

        let mut callouts = Vec::with_capacity(records.len());
        let mut missing_models = Vec::new();
        for record in records {
            let entry = cache.entry(&record.model_ref);
            match entry.and_then(|e| e.geometry()) {
                Some(geometry) => callouts.push(self.resolve_record(record, geometry, order)),
                None => {
                    tracing::warn!(
                        place = record.place_name.as_deref().unwrap_or("<unnamed>"),
                        model = %record.model_ref,
                        "Missing model"
                    );
                    missing_models.push(MissingModel {
                        place_name: record.place_name.clone(),
                        model_ref: record.model_ref.clone(),
                        resolved_path: entry.and_then(|e| e.path()).map(Path::to_path_buf),
                    });
                }
            }
        }

        tracing::info!(
            count = callouts.len(),
            missing = missing_models.len(),
            order = %order,
            meshes = cache.len(),
            loads = cache.loads(),
            "Processed callouts"
        );
        PipelineResult::new(order, callouts, missing_models)
    }

    fn resolve_order<C: MeshLoader>(&self, records: &[PlacementRecord], cache: &MeshCache<C>) -> RotationOrder {
        match self.options.rotation {
            RotationChoice::Fixed(order) => order,
            RotationChoice::Auto => {
                let limit = self.options.order_sample_limit;
                let samples = records.iter().filter_map(|record| {
                    cache.get(&record.model_ref).map(|geometry| OrderSample {
                        vertices: &geometry.vertices,
                        scales: record.scales,
                        angles_deg: record.angles_deg,
                        origin: record.origin,
                    })
                });
                choose_global_order(samples, limit)
            }
        }
    }

    fn resolve_record(&self, record: &PlacementRecord, geometry: &MeshGeometry, order: RotationOrder) -> ResolvedCallout {
        let world = apply_srt(&geometry.vertices, record.scales, record.angles_deg, record.origin, order);
        let boundary = self.extractor.extract(&world, self.options.projection);

        let scale = ScaleOptions {
            origin: if self.options.scale_about_origin {
                Some(record.origin.truncate())
            } else {
                self.options.scale.origin
            },
            ..self.options.scale
        };
        let polygon = normalize_scale(&boundary.polygon, Some(&geometry.physics), &scale);

        ResolvedCallout {
            name: record.place_name.clone(),
            model_ref: record.model_ref.clone(),
            origin: record.origin,
            angles_deg: record.angles_deg,
            scales: record.scales,
            rotation_order: order,
            projection_method: self.options.projection,
            boundary_tier: boundary.tier,
            vertex_count: geometry.vertex_count(),
            physics_metadata: geometry.physics,
            bbox_2d: Bounds2D::from_points(&polygon),
            polygon_2d: polygon,
            polygon_3d: convex_hull_3d(&world),
            bbox_3d: Bounds3D::from_points(&world),
            z_span_ratio: flatness_ratio(&world),
            source_file: record.source_file.clone(),
        }
    }
}
