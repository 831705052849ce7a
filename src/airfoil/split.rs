//! Partitioning of a profile point sequence into lower and upper surface polylines, each ordered
//! by increasing x, suitable for handing to a spline fitter.
//!
//! Real coordinate files range from perfectly paired per-station samples to single dense traces,
//! so the split degrades through three strategies rather than failing outright:
//!
//! 1. `GapStations`: stations are formed from samples separated by "small" x gaps, which works
//!    when upper and lower samples are paired but not at exactly the same x.
//! 2. `ExactStations`: stations are formed from samples with (almost) exactly equal x.
//! 3. `LeadingEdge`: the sequence is cut at its minimum x point.

use crate::airfoil::helpers::{group_stations, positive_x_gaps, station_extremes};
use crate::common::points::{index_of_min_x, sorted_by_x};
use crate::geom2::Point2;
use crate::{ProfileError, Result};
use serde::{Deserialize, Serialize};
use tracing::debug;

/// The gap at this quantile of the sorted positive x gaps is taken as the "small" gap
const SMALL_GAP_QUANTILE: f64 = 0.2;

/// Sampling is regular enough to group by gap if the small gap is at most this fraction of the
/// median gap
const IRREGULAR_GAP_RATIO: f64 = 0.25;

/// Consecutive samples closer than this multiple of the small gap share a station
const STATION_GAP_FACTOR: f64 = 1.5;

/// Fixed absolute x tolerance for the exact station strategy
const EXACT_STATION_TOL: f64 = 1.0e-6;

/// Endpoints further apart than this are joined by a bridging segment
const BRIDGE_TOL: f64 = 1.0e-6;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SplitMethod {
    GapStations,
    ExactStations,
    LeadingEdge,
}

/// A profile separated into its two surfaces. Both polylines are sorted by increasing x and share,
/// or nearly share, their endpoints at the leading and trailing edges.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SplitProfile {
    pub lower: Vec<Point2>,
    pub upper: Vec<Point2>,
    pub method: SplitMethod,
}

impl SplitProfile {
    /// The segment joining the lower and upper surfaces at the leading edge, if their first
    /// points do not coincide
    pub fn leading_edge_bridge(&self) -> Option<(Point2, Point2)> {
        bridge(self.lower.first()?, self.upper.first()?)
    }

    /// The segment closing a blunt trailing edge, if the last points of the two surfaces do not
    /// coincide
    pub fn trailing_edge_bridge(&self) -> Option<(Point2, Point2)> {
        bridge(self.lower.last()?, self.upper.last()?)
    }

    /// Apply the same point transform to both surfaces. Used to carry rigid transforms through to
    /// a profile that was split in its own local frame, since grouping stations by x is not
    /// invariant under rotation.
    pub fn map(&self, f: impl Fn(&[Point2]) -> Vec<Point2>) -> Self {
        Self {
            lower: f(&self.lower),
            upper: f(&self.upper),
            method: self.method,
        }
    }
}

fn bridge(a: &Point2, b: &Point2) -> Option<(Point2, Point2)> {
    if (a - b).norm() > BRIDGE_TOL {
        Some((*a, *b))
    } else {
        None
    }
}

/// Split a profile point sequence into lower and upper surface polylines.
///
/// # Arguments
///
/// * `points`: the profile sequence, in traversal order (the final fallback strategy depends on
///   the order, the station based strategies do not)
///
/// returns: Result<SplitProfile, ProfileError>, failing with `SplitFailed` if either surface
/// ends up with fewer than two points
///
/// # Examples
///
/// ```
/// use foilcsv::airfoil::split_profile;
/// use foilcsv::geom2::points_from;
///
/// let points = points_from(&[(1.0, 0.0), (0.5, 0.05), (0.0, 0.0), (0.5, -0.05), (1.0, 0.0)]);
/// let split = split_profile(&points).unwrap();
/// assert_eq!(split.upper, points_from(&[(0.0, 0.0), (0.5, 0.05), (1.0, 0.0)]));
/// assert_eq!(split.lower, points_from(&[(0.0, 0.0), (0.5, -0.05), (1.0, 0.0)]));
/// ```
pub fn split_profile(points: &[Point2]) -> Result<SplitProfile> {
    let split = split_by_gap_stations(points)
        .or_else(|| split_by_exact_stations(points))
        .unwrap_or_else(|| split_at_leading_edge(points));

    debug!(
        method = ?split.method,
        lower = split.lower.len(),
        upper = split.upper.len(),
        "split profile"
    );

    if split.lower.len() < 2 || split.upper.len() < 2 {
        return Err(ProfileError::SplitFailed);
    }
    Ok(split)
}

fn split_by_gap_stations(points: &[Point2]) -> Option<SplitProfile> {
    if points.len() < 3 {
        return None;
    }
    let sorted = sorted_by_x(points);
    let gaps = positive_x_gaps(&sorted);
    if gaps.len() < 2 {
        return None;
    }

    let small_i = ((gaps.len() as f64 * SMALL_GAP_QUANTILE) as usize).saturating_sub(1);
    let small = gaps[small_i];
    let median = gaps[gaps.len() / 2];
    if median <= 0.0 || small > median * IRREGULAR_GAP_RATIO {
        return None;
    }

    let stations = group_stations(&sorted, small * STATION_GAP_FACTOR);
    if stations.iter().filter(|s| s.len() >= 2).count() < 2 {
        return None;
    }

    let (lower, upper) = stations.iter().filter_map(|s| station_extremes(s)).unzip();
    Some(SplitProfile {
        lower,
        upper,
        method: SplitMethod::GapStations,
    })
}

fn split_by_exact_stations(points: &[Point2]) -> Option<SplitProfile> {
    let sorted = sorted_by_x(points);
    let stations = group_stations(&sorted, EXACT_STATION_TOL);
    let paired = stations.iter().filter(|s| s.len() >= 2).count();
    if paired < 3.max(stations.len() / 4) {
        return None;
    }

    let (lower, upper) = stations
        .iter()
        .filter_map(|s| {
            let x = s.first()?.x;
            let (low, high) = station_extremes(s)?;
            Some((Point2::new(x, low.y), Point2::new(x, high.y)))
        })
        .unzip();

    Some(SplitProfile {
        lower,
        upper,
        method: SplitMethod::ExactStations,
    })
}

fn split_at_leading_edge(points: &[Point2]) -> SplitProfile {
    let (upper, lower) = match index_of_min_x(points) {
        Some(i) => (sorted_by_x(&points[..=i]), sorted_by_x(&points[i..])),
        None => (Vec::new(), Vec::new()),
    };

    SplitProfile {
        lower,
        upper,
        method: SplitMethod::LeadingEdge,
    }
}
