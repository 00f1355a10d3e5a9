//! # Pipeline Options
//!
//! Per-run settings. Numeric defaults come from [`PipelineConfig`].

use std::fmt;
use std::str::FromStr;

use callout_geometry::{BoundaryExtractor, GeometryError, ProjectionMethod, RotationOrder, ScaleOptions};
use config::constants::PipelineConfig;

/// How the rotation order for a run is chosen.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RotationChoice {
    /// Vote over sampled meshes, one order for the whole run.
    #[default]
    Auto,
    /// Use this order for every record.
    Fixed(RotationOrder),
}

impl fmt::Display for RotationChoice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Auto => f.write_str("auto"),
            Self::Fixed(order) => f.write_str(order.name()),
        }
    }
}

impl FromStr for RotationChoice {
    type Err = GeometryError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.eq_ignore_ascii_case("auto") {
            Ok(Self::Auto)
        } else {
            s.parse().map(Self::Fixed)
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PipelineOptions {
    pub rotation: RotationChoice,
    pub projection: ProjectionMethod,
    pub scale: ScaleOptions,
    /// Apply the multiplier about each record's origin instead of the
    /// polygon centroid.
    pub scale_about_origin: bool,
    /// Include the Delaunay alpha shape in the boundary chain.
    pub use_alpha_shape: bool,
    pub alpha: f64,
    pub knn_neighbors: usize,
    /// Records sampled by [`RotationChoice::Auto`].
    pub order_sample_limit: usize,
}

impl Default for PipelineOptions {
    fn default() -> Self {
        Self::from_config(&PipelineConfig::default())
    }
}

impl PipelineOptions {
    pub fn from_config(config: &PipelineConfig) -> Self {
        Self {
            rotation: RotationChoice::Auto,
            projection: ProjectionMethod::default(),
            scale: ScaleOptions {
                min_radius: config.min_radius,
                multiplier: config.multiplier,
                origin: None,
            },
            scale_about_origin: false,
            use_alpha_shape: true,
            alpha: config.alpha,
            knn_neighbors: config.knn_neighbors,
            order_sample_limit: config.order_sample_limit,
        }
    }

    pub fn with_rotation(mut self, rotation: RotationChoice) -> Self {
        self.rotation = rotation;
        self
    }

    pub fn with_projection(mut self, projection: ProjectionMethod) -> Self {
        self.projection = projection;
        self
    }

    /// Boundary chain matching these options.
    pub fn boundary_extractor(&self) -> BoundaryExtractor {
        if self.use_alpha_shape {
            BoundaryExtractor::default().with_alpha(self.alpha)
        } else {
            BoundaryExtractor::without_alpha_shape(self.knn_neighbors)
        }
    }
}
