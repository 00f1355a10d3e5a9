//! # Boundary Extraction
//!
//! Reduces a placed mesh to a 2D boundary ring for the map overlay.
//!
//! ## Tier Chain
//!
//! ```text
//! to_xy → dedupe ─┬─ convex_hull ─────────────────────────────► ConvexFallback
//!                 └─ AlphaShape ─(err)─► KnnConcaveHull ─(err)─► convex_hull
//!                    Detailed            Approximate             ConvexFallback
//! ```
//!
//! The concave tiers are [`BoundaryStrategy`] trait objects so callers can
//! remove a capability (for example to pin reproducible output) or inject
//! their own. A failing strategy is logged and skipped, never surfaced.

mod alpha;
mod convex;
mod knn;


use std::fmt;
use std::str::FromStr;

use config::constants::{DEDUP_EPSILON, DEFAULT_ALPHA, KNN_NEIGHBORS, TOP_DOWN_ALPHA};
use glam::{DVec2, DVec3};
use serde::{Deserialize, Serialize};

use crate::error::GeometryError;
use crate::points::{dedupe_points, polygon_area, to_xy};

pub use alpha::{alpha_shape, AlphaShape};
pub use convex::convex_hull;
pub use knn::{concave_hull_knn, KnnConcaveHull};

// =============================================================================
// PUBLIC TYPES
// =============================================================================

/// How a placed mesh is reduced to a 2D ring.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ProjectionMethod {
    /// Concave boundary of the top-down projection.
    #[default]
    TopDown,
    /// Concave boundary with the explicit alpha of the `alpha_shape` method.
    AlphaShape,
    /// Monotone-chain convex hull only.
    ConvexHull,
}

impl ProjectionMethod {
    /// Canonical snake_case name.
    pub fn name(self) -> &'static str {
        match self {
            Self::TopDown => "top_down",
            Self::AlphaShape => "alpha_shape",
            Self::ConvexHull => "convex_hull",
        }
    }
}

impl fmt::Display for ProjectionMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for ProjectionMethod {
    type Err = GeometryError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().replace('-', "_").as_str() {
            "top_down" | "topdown" => Ok(Self::TopDown),
            "alpha_shape" | "alphashape" => Ok(Self::AlphaShape),
            "convex_hull" | "convexhull" => Ok(Self::ConvexHull),
            other => Err(GeometryError::UnknownProjection(other.to_string())),
        }
    }
}

/// Which tier of the chain produced a boundary.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BoundaryTier {
    Detailed,
    Approximate,
    ConvexFallback,
}

/// An extracted ring (no closing duplicate) tagged with its tier.
#[derive(Debug, Clone, PartialEq)]
pub struct Boundary {
    pub polygon: Vec<DVec2>,
    pub tier: BoundaryTier,
}

impl Boundary {
    fn convex(points: &[DVec2]) -> Self {
        Self {
            polygon: convex_hull(points),
            tier: BoundaryTier::ConvexFallback,
        }
    }
}

/// A concave boundary capability.
///
/// Implementations receive deduplicated points (more than three) and must
/// either return a ring or an error; the extractor moves on to the next
/// strategy on error.
pub trait BoundaryStrategy {
    /// Short identifier used in logs.
    fn name(&self) -> &'static str;

    /// Tier reported when this strategy succeeds.
    fn tier(&self) -> BoundaryTier;

    /// Traces a boundary ring around `points`.
    fn trace(&self, points: &[DVec2], alpha: f64) -> Result<Vec<DVec2>, GeometryError>;
}

// =============================================================================
// EXTRACTOR
// =============================================================================

/// Ordered chain of boundary strategies ending in the convex hull.
pub struct BoundaryExtractor {
    strategies: Vec<Box<dyn BoundaryStrategy>>,
    alpha: f64,
    top_down_alpha: f64,
}

impl Default for BoundaryExtractor {
    fn default() -> Self {
        Self::with_strategies(vec![
            Box::new(AlphaShape),
            Box::new(KnnConcaveHull::new(KNN_NEIGHBORS)),
        ])
    }
}

impl fmt::Debug for BoundaryExtractor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let names: Vec<&str> = self.strategies.iter().map(|s| s.name()).collect();
        f.debug_struct("BoundaryExtractor")
            .field("strategies", &names)
            .field("alpha", &self.alpha)
            .field("top_down_alpha", &self.top_down_alpha)
            .finish()
    }
}

impl BoundaryExtractor {
    /// Builds an extractor trying `strategies` in order before the convex hull.
    pub fn with_strategies(strategies: Vec<Box<dyn BoundaryStrategy>>) -> Self {
        Self {
            strategies,
            alpha: DEFAULT_ALPHA,
            top_down_alpha: TOP_DOWN_ALPHA,
        }
    }

    /// Chain without the Delaunay alpha shape: kNN trace, then convex hull.
    pub fn without_alpha_shape(knn_neighbors: usize) -> Self {
        Self::with_strategies(vec![Box::new(KnnConcaveHull::new(knn_neighbors))])
    }

    /// Chain that always returns the convex hull.
    pub fn convex_only() -> Self {
        Self::with_strategies(Vec::new())
    }

    /// Overrides the alpha used by [`ProjectionMethod::AlphaShape`].
    pub fn with_alpha(mut self, alpha: f64) -> Self {
        self.alpha = alpha;
        self
    }

    /// Names of the configured strategies, in attempt order.
    pub fn strategy_names(&self) -> Vec<&'static str> {
        self.strategies.iter().map(|s| s.name()).collect()
    }

    /// Projects world vertices onto XY and extracts a boundary.
    pub fn extract(&self, world: &[DVec3], method: ProjectionMethod) -> Boundary {
        self.extract_xy(&to_xy(world), method)
    }

    /// Extracts a boundary from already projected points.
    pub fn extract_xy(&self, points: &[DVec2], method: ProjectionMethod) -> Boundary {
        let unique = dedupe_points(points, DEDUP_EPSILON);

        let alpha = match method {
            ProjectionMethod::ConvexHull => return Boundary::convex(&unique),
            ProjectionMethod::TopDown => self.top_down_alpha,
            ProjectionMethod::AlphaShape => self.alpha,
        };

        if unique.len() <= 3 {
            return Boundary::convex(&unique);
        }

        for strategy in &self.strategies {
            match strategy.trace(&unique, alpha) {
                Ok(polygon) if is_usable_ring(&polygon) => {
                    return Boundary {
                        polygon,
                        tier: strategy.tier(),
                    };
                }
                Ok(polygon) => {
                    tracing::debug!(
                        strategy = strategy.name(),
                        vertices = polygon.len(),
                        "Boundary strategy returned a degenerate ring, falling back"
                    );
                }
                Err(error) => {
                    tracing::debug!(strategy = strategy.name(), %error, "Boundary strategy failed, falling back");
                }
            }
        }

        Boundary::convex(&unique)
    }
}

/// Extracts a boundary with the default strategy chain.
pub fn extract_boundary(world: &[DVec3], method: ProjectionMethod) -> Boundary {
    BoundaryExtractor::default().extract(world, method)
}

fn is_usable_ring(polygon: &[DVec2]) -> bool {
    polygon.len() >= 3
        && polygon.iter().all(|p| p.is_finite())
        && polygon_area(polygon).abs() > 0.0
}
