//! # Callout Geometry
//!
//! Pure geometry kernels for resolving callout markers into flat map polygons.
//!
//! ## Architecture
//!
//! ```text
//! raw vertices ─► transform::apply_srt ─► boundary::BoundaryExtractor ─► scale::normalize_scale
//!                      ▲
//!        rotation::choose_global_order
//! ```
//!
//! ## Algorithms
//!
//! All algorithms are pure Rust and deterministic:
//! - **Rotation inference**: flatness vote over three Euler compositions
//! - **Boundary**: Delaunay alpha shape, k-nearest-neighbour trace, monotone chain
//! - **3D extent**: QuickHull
//!
//! ## Usage
//!
//! ```rust
//! use callout_geometry::{apply_srt, extract_boundary, ProjectionMethod, RotationOrder};
//! use glam::DVec3;
//!
//! let square = [
//!     DVec3::new(-1.0, -1.0, 0.0),
//!     DVec3::new(1.0, -1.0, 0.0),
//!     DVec3::new(1.0, 1.0, 0.0),
//!     DVec3::new(-1.0, 1.0, 0.0),
//! ];
//! let world = apply_srt(&square, DVec3::ONE, DVec3::ZERO, DVec3::new(10.0, 0.0, 0.0), RotationOrder::RzRxRy);
//! let boundary = extract_boundary(&world, ProjectionMethod::ConvexHull);
//! assert_eq!(boundary.polygon.len(), 4);
//! ```

pub mod boundary;
pub mod error;
pub mod hull3d;
pub mod physics;
pub mod points;
pub mod rotation;
pub mod scale;
pub mod transform;

pub use boundary::{
    convex_hull, extract_boundary, Boundary, BoundaryExtractor, BoundaryStrategy, BoundaryTier,
    ProjectionMethod,
};
pub use error::GeometryError;
pub use hull3d::convex_hull_3d;
pub use physics::PhysicsMetadata;
pub use points::{Bounds2D, Bounds3D};
pub use rotation::{
    choose_best_order, choose_global_order, flatness_ratio, OrderSample, RotationOrder,
};
pub use scale::{normalize_scale, ScaleOptions};
pub use transform::apply_srt;
