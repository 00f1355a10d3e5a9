//! Centralized configuration values shared across the callout pipeline.
//!
//! Each public item in this module documents its purpose so that downstream
//! crates can remain declarative and avoid scattering literals.

use std::fmt;

// =============================================================================
// PRECISION CONSTANTS
// =============================================================================

/// Grid size used to merge near-coincident points before boundary extraction.
///
/// A point `p` lands in cell `round(p / DEDUP_EPSILON)`; only the first point
/// of each cell survives.
///
/// # Examples
/// ```
/// use config::constants::DEDUP_EPSILON;
/// assert_eq!(DEDUP_EPSILON, 1.0e-5);
/// ```
pub const DEDUP_EPSILON: f64 = 1.0e-5;

/// Horizontal span at or below which a transformed mesh is treated as a point.
///
/// The flatness ratio of such a mesh is `+inf`, which keeps degenerate meshes
/// from winning the rotation-order vote.
///
/// # Examples
/// ```
/// use config::constants::FLATNESS_SPAN_EPSILON;
/// assert!(FLATNESS_SPAN_EPSILON < 1.0e-6);
/// ```
pub const FLATNESS_SPAN_EPSILON: f64 = 1.0e-9;

/// Plane-distance tolerance used by the 3D QuickHull.
///
/// # Examples
/// ```
/// use config::constants::HULL_EPSILON;
/// assert!(HULL_EPSILON > 0.0);
/// ```
pub const HULL_EPSILON: f64 = 1.0e-9;

// =============================================================================
// BOUNDARY CONSTANTS
// =============================================================================

/// Alpha used by the `alpha_shape` projection.
///
/// Delaunay triangles with a circumradius below `1 / alpha` are kept.
///
/// # Examples
/// ```
/// use config::constants::DEFAULT_ALPHA;
/// assert_eq!(1.0 / DEFAULT_ALPHA, 10.0);
/// ```
pub const DEFAULT_ALPHA: f64 = 0.1;

/// Alpha used by the `top_down` projection when none is requested explicitly.
pub const TOP_DOWN_ALPHA: f64 = DEFAULT_ALPHA;

/// Neighbour count for the approximate concave-hull trace.
///
/// # Examples
/// ```
/// use config::constants::KNN_NEIGHBORS;
/// assert!(KNN_NEIGHBORS >= 2);
/// ```
pub const KNN_NEIGHBORS: usize = 3;

// =============================================================================
// SCALING CONSTANTS
// =============================================================================

/// Minimum centroid-to-vertex radius for callouts without physics metadata.
///
/// # Examples
/// ```
/// use config::constants::DEFAULT_MIN_RADIUS;
/// assert_eq!(DEFAULT_MIN_RADIUS, 100.0);
/// ```
pub const DEFAULT_MIN_RADIUS: f64 = 100.0;

/// Uniform multiplier applied after normalization. `1.0` disables the step.
pub const DEFAULT_SCALE_MULTIPLIER: f64 = 1.0;

// =============================================================================
// RESOLUTION CONSTANTS
// =============================================================================

/// Number of placement records sampled when the rotation order is `auto`.
///
/// # Examples
/// ```
/// use config::constants::{ORDER_SAMPLE_LIMIT, GLOBAL_ORDER_SAMPLE_LIMIT};
/// assert!(ORDER_SAMPLE_LIMIT <= GLOBAL_ORDER_SAMPLE_LIMIT);
/// ```
pub const ORDER_SAMPLE_LIMIT: usize = 6;

/// Upper bound on the samples the global order vote will consume.
pub const GLOBAL_ORDER_SAMPLE_LIMIT: usize = 8;

// =============================================================================
// LAYOUT CONSTANTS
// =============================================================================

/// Suffix of the collision-mesh variant preferred by the model resolver.
pub const PHYSICS_SUFFIX: &str = "_physics";

/// Mesh file extensions picked up by the model index (lower-case, no dot).
pub const MESH_EXTENSIONS: [&str; 2] = ["glb", "gltf"];

/// Default root of the extracted game assets.
pub const DEFAULT_EXPORT_ROOT: &str = "export";

/// Default directory holding exported meshes.
pub const DEFAULT_MODELS_ROOT: &str = "export/models";

/// Default directory for pipeline output documents.
pub const DEFAULT_OUT_DIR: &str = "out";

/// Records file written by the extraction step, relative to a map directory.
pub const RECORDS_RELATIVE_PATH: &str = "report/callouts_found.json";

/// Default map processed when none is given.
pub const DEFAULT_MAP: &str = "de_mirage";

/// Map name that selects every extracted map.
pub const ALL_MAPS: &str = "all";

// =============================================================================
// PIPELINE CONFIG
// =============================================================================

/// Immutable snapshot of the numeric pipeline settings.
///
/// # Examples
/// ```
/// use config::constants::PipelineConfig;
/// let config = PipelineConfig::default();
/// assert_eq!(config.min_radius, 100.0);
/// assert_eq!(config.multiplier, 1.0);
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PipelineConfig {
    /// Minimum radius for callouts without physics metadata.
    pub min_radius: f64,
    /// Uniform multiplier applied after normalization.
    pub multiplier: f64,
    /// Records sampled when resolving the rotation order automatically.
    pub order_sample_limit: usize,
    /// Alpha for the `alpha_shape` projection.
    pub alpha: f64,
    /// Neighbour count for the approximate concave trace.
    pub knn_neighbors: usize,
}

impl PipelineConfig {
    /// Builds a configuration, rejecting values the geometry kernels cannot use.
    ///
    /// # Examples
    /// ```
    /// use config::constants::PipelineConfig;
    /// let cfg = PipelineConfig::new(64.0, 2.0).expect("valid config");
    /// assert_eq!(cfg.multiplier, 2.0);
    /// assert!(PipelineConfig::new(64.0, 0.0).is_err());
    /// ```
    pub fn new(min_radius: f64, multiplier: f64) -> Result<Self, ConfigError> {
        if !min_radius.is_finite() || min_radius < 0.0 {
            return Err(ConfigError::InvalidMinRadius(min_radius));
        }
        if !multiplier.is_finite() || multiplier <= 0.0 {
            return Err(ConfigError::InvalidMultiplier(multiplier));
        }
        Ok(Self {
            min_radius,
            multiplier,
            ..Self::default()
        })
    }

    /// Returns a copy with a different rotation sample limit.
    pub fn with_order_sample_limit(self, limit: usize) -> Result<Self, ConfigError> {
        if limit == 0 {
            return Err(ConfigError::InvalidSampleLimit(limit));
        }
        Ok(Self {
            order_sample_limit: limit,
            ..self
        })
    }
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            min_radius: DEFAULT_MIN_RADIUS,
            multiplier: DEFAULT_SCALE_MULTIPLIER,
            order_sample_limit: ORDER_SAMPLE_LIMIT,
            alpha: DEFAULT_ALPHA,
            knn_neighbors: KNN_NEIGHBORS,
        }
    }
}

/// Error returned when invalid configuration values are provided.
#[derive(Debug, PartialEq)]
pub enum ConfigError {
    /// Raised when the minimum radius is negative or not finite.
    InvalidMinRadius(f64),
    /// Raised when the multiplier is zero, negative or not finite.
    InvalidMultiplier(f64),
    /// Raised when the rotation sample limit is zero.
    InvalidSampleLimit(usize),
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::InvalidMinRadius(value) => {
                write!(f, "min_radius must be a non-negative number: {value}")
            }
            ConfigError::InvalidMultiplier(value) => {
                write!(f, "multiplier must be positive: {value}")
            }
            ConfigError::InvalidSampleLimit(value) => {
                write!(f, "order_sample_limit must be >= 1: {value}")
            }
        }
    }
}

impl std::error::Error for ConfigError {}
