//! # Rotation Order Inference
//!
//! Placement records carry `[pitch, yaw, roll]` angles in degrees, but the
//! axis composition they were authored with is unknown. Callout meshes are
//! thin slabs, so the correct composition is the one that leaves the mesh
//! flattest in world space.
//!
//! ## Candidates
//!
//! | Order      | Composition                |
//! |------------|----------------------------|
//! | `rz_rx_ry` | yaw(Z) · pitch(X) · roll(Y) |
//! | `ry_rx_rz` | yaw(Y) · pitch(X) · roll(Z) |
//! | `rz_ry_rx` | yaw(Z) · roll(Y) · pitch(X) |


use std::fmt;
use std::str::FromStr;

use config::constants::{FLATNESS_SPAN_EPSILON, GLOBAL_ORDER_SAMPLE_LIMIT};
use glam::{DMat3, DVec3};
use serde::{Deserialize, Serialize};

use crate::error::GeometryError;
use crate::transform::apply_srt;

/// Euler composition used to turn `[pitch, yaw, roll]` into a rotation matrix.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RotationOrder {
    /// yaw(Z) · pitch(X) · roll(Y)
    RzRxRy,
    /// yaw(Y) · pitch(X) · roll(Z)
    RyRxRz,
    /// yaw(Z) · roll(Y) · pitch(X)
    RzRyRx,
}

impl RotationOrder {
    /// Candidate orders in vote order. The first entry is the stable default.
    pub const CANDIDATES: [RotationOrder; 3] = [Self::RzRxRy, Self::RyRxRz, Self::RzRyRx];

    /// Canonical snake_case name.
    pub fn name(self) -> &'static str {
        match self {
            Self::RzRxRy => "rz_rx_ry",
            Self::RyRxRz => "ry_rx_rz",
            Self::RzRyRx => "rz_ry_rx",
        }
    }

    /// Builds the 3×3 rotation for `[pitch, yaw, roll]` given in degrees.
    pub fn matrix(self, angles_deg: DVec3) -> DMat3 {
        let pitch = angles_deg.x.to_radians();
        let yaw = angles_deg.y.to_radians();
        let roll = angles_deg.z.to_radians();

        match self {
            Self::RzRxRy => {
                DMat3::from_rotation_z(yaw) * DMat3::from_rotation_x(pitch) * DMat3::from_rotation_y(roll)
            }
            Self::RyRxRz => {
                DMat3::from_rotation_y(yaw) * DMat3::from_rotation_x(pitch) * DMat3::from_rotation_z(roll)
            }
            Self::RzRyRx => {
                DMat3::from_rotation_z(yaw) * DMat3::from_rotation_y(roll) * DMat3::from_rotation_x(pitch)
            }
        }
    }
}

impl Default for RotationOrder {
    fn default() -> Self {
        Self::CANDIDATES[0]
    }
}

impl fmt::Display for RotationOrder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for RotationOrder {
    type Err = GeometryError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "rz_rx_ry" | "rzrxry" | "zxy" => Ok(Self::RzRxRy),
            "ry_rx_rz" | "ryrxrz" | "yxz" => Ok(Self::RyRxRz),
            "rz_ry_rx" | "rzryrx" | "zyx" => Ok(Self::RzRyRx),
            other => Err(GeometryError::UnknownRotationOrder(other.to_string())),
        }
    }
}

// =============================================================================
// FLATNESS
// =============================================================================

/// Ratio of vertical extent to the largest horizontal extent.
///
/// `0.0` is perfectly flat. A horizontal span at or below
/// [`FLATNESS_SPAN_EPSILON`] yields `+inf`; an empty input yields `0.0`.
pub fn flatness_ratio(world: &[DVec3]) -> f64 {
    let Some(first) = world.first() else {
        return 0.0;
    };
    let (min, max) = world
        .iter()
        .fold((*first, *first), |(min, max), v| (min.min(*v), max.max(*v)));
    let span = max - min;
    let xy = span.x.max(span.y);
    if xy <= FLATNESS_SPAN_EPSILON {
        return f64::INFINITY;
    }
    span.z / xy
}

/// One placed mesh used to vote on the rotation order.
#[derive(Debug, Clone, Copy)]
pub struct OrderSample<'a> {
    pub vertices: &'a [DVec3],
    pub scales: DVec3,
    pub angles_deg: DVec3,
    pub origin: DVec3,
}

impl OrderSample<'_> {
    fn ratio(&self, order: RotationOrder) -> f64 {
        let world = apply_srt(self.vertices, self.scales, self.angles_deg, self.origin, order);
        flatness_ratio(&world)
    }
}

/// Picks the flattest order for a single mesh.
///
/// Ties keep the earlier candidate; if every candidate is degenerate the
/// first candidate is returned with a ratio of `+inf`.
pub fn choose_best_order(
    vertices: &[DVec3],
    scales: DVec3,
    angles_deg: DVec3,
    origin: DVec3,
) -> (RotationOrder, f64) {
    let sample = OrderSample {
        vertices,
        scales,
        angles_deg,
        origin,
    };
    let mut best = (RotationOrder::CANDIDATES[0], f64::INFINITY);
    for order in RotationOrder::CANDIDATES {
        let ratio = sample.ratio(order);
        if ratio < best.1 {
            best = (order, ratio);
        }
    }
    best
}

/// Picks one order for a whole map by averaging flatness over samples.
///
/// At most `limit` samples are consumed, and never more than
/// [`GLOBAL_ORDER_SAMPLE_LIMIT`]. With no samples the first candidate is
/// returned so callers always get a stable default.
pub fn choose_global_order<'a, I>(samples: I, limit: usize) -> RotationOrder
where
    I: IntoIterator<Item = OrderSample<'a>>,
{
    let mut sums = [0.0_f64; 3];
    let mut count = 0usize;

    for sample in samples.into_iter().take(limit.min(GLOBAL_ORDER_SAMPLE_LIMIT)) {
        for (sum, order) in sums.iter_mut().zip(RotationOrder::CANDIDATES) {
            *sum += sample.ratio(order);
        }
        count += 1;
    }

    if count == 0 {
        return RotationOrder::default();
    }

    let mut best = (RotationOrder::CANDIDATES[0], f64::INFINITY);
    for (sum, order) in sums.iter().zip(RotationOrder::CANDIDATES) {
        let mean = sum / count as f64;
        if mean < best.1 {
            best = (order, mean);
        }
    }
    tracing::debug!(order = %best.0, mean_ratio = best.1, samples = count, "Resolved global rotation order");
    best.0
}
