//! # Config Crate
//!
//! Centralized configuration constants for the callout geometry pipeline.
//! All magic numbers and tunable parameters are defined here so that the
//! geometry, mesh and pipeline crates agree on tolerances and defaults.
//!
//! ## Usage
//!
//! ```rust
//! use config::constants::{DEDUP_EPSILON, DEFAULT_MIN_RADIUS};
//!
//! // Snap a coordinate onto the deduplication grid
//! let cell = (0.123456789_f64 / DEDUP_EPSILON).round() as i64;
//! assert_eq!(cell, 12346);
//!
//! // Callouts without physics data grow to at least this radius
//! assert!(DEFAULT_MIN_RADIUS > 0.0);
//! ```
//!
//! ## Categories
//!
//! - **Precision**: deduplication grid, span and hull tolerances
//! - **Boundary**: alpha-shape and k-nearest-neighbour parameters
//! - **Scaling**: minimum radius and uniform multiplier defaults
//! - **Resolution**: rotation-order sampling limits
//! - **Layout**: mesh extensions and default export/output paths

pub mod constants;

#[cfg(test)]
mod tests;
