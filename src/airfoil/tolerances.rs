//! Scale-relative comparison tolerances for a profile point cloud.

use crate::common::TolZone;
use crate::common::points::{max_abs_y, x_extents};
use crate::geom2::Point2;
use crate::{ProfileError, Result};
use serde::{Deserialize, Serialize};

/// The relative factors used to derive a `ToleranceSet` from a point cloud. The defaults are
/// empirically chosen and work for typical airfoil coordinate files in any length unit, but real
/// world sources vary enough that they are exposed for configuration.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ToleranceFactors {
    /// Fraction of the largest absolute camber used for `y_tol`
    pub camber_rel: f64,

    /// Fraction of the chord used for `x_tol`, and as a lower limit for `y_tol`
    pub chord_rel: f64,

    /// Absolute lower limit for both tolerances
    pub floor: f64,

    /// Fraction of the chord used as the half width of the trailing edge acceptance band in the
    /// validator. The band is never narrower than `x_tol`.
    pub te_band_rel: f64,
}

impl Default for ToleranceFactors {
    fn default() -> Self {
        Self {
            camber_rel: 1.0e-4,
            chord_rel: 1.0e-6,
            floor: 1.0e-9,
            te_band_rel: 1.0e-6,
        }
    }
}

/// Derived scalars used by every geometric comparison on a single point sequence. These must be
/// recomputed whenever the sequence is mutated, since the chord and camber extremes may shift.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ToleranceSet {
    pub x_min: f64,
    pub x_max: f64,
    pub chord: f64,
    pub x_tol: f64,
    pub y_tol: f64,

    /// Half width of the band around the trailing edge x position which is accepted as "at the
    /// trailing edge"
    pub te_band: f64,
}

impl ToleranceSet {
    /// Estimate the tolerances for a point sequence.
    ///
    /// # Arguments
    ///
    /// * `points`: the profile points, in any order
    /// * `factors`: the relative factors to derive the tolerances with
    ///
    /// returns: Result<ToleranceSet, ProfileError>, failing with `DegenerateProfile` if the
    /// points have no positive extent along x (including when there are no points at all)
    pub fn estimate(points: &[Point2], factors: &ToleranceFactors) -> Result<Self> {
        let (x_min, x_max) = x_extents(points).ok_or(ProfileError::DegenerateProfile)?;
        let chord = x_max - x_min;
        if !(chord > 0.0) {
            return Err(ProfileError::DegenerateProfile);
        }

        let x_tol = (chord * factors.chord_rel).max(factors.floor);
        let y_tol = (max_abs_y(points) * factors.camber_rel)
            .max(chord * factors.chord_rel)
            .max(factors.floor);
        let te_band = (chord * factors.te_band_rel).max(x_tol);

        Ok(Self {
            x_min,
            x_max,
            chord,
            x_tol,
            y_tol,
            te_band,
        })
    }

    /// True if the point lies at the trailing edge on the chord line, i.e. within `x_tol` of
    /// `x_max` and within `y_tol` of zero camber
    pub fn is_trailing_edge_point(&self, p: &Point2) -> bool {
        (p.x - self.x_max).abs() <= self.x_tol && p.y.abs() <= self.y_tol
    }

    /// True if the x value is within `x_tol` of the minimum x (the leading edge station)
    pub fn is_leading_edge_x(&self, x: f64) -> bool {
        (x - self.x_min).abs() <= self.x_tol
    }

    /// The zone of x values accepted as the trailing edge, given a trailing edge x candidate
    pub fn trailing_edge_zone(&self, te_x: f64) -> TolZone {
        TolZone::around(te_x, self.te_band)
    }
}
