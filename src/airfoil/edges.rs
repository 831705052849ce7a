//! This module contains tools to work with the leading and trailing edges of a profile point
//! sequence: locating the leading edge, and repairing the two common trailing edge defects found
//! in coordinate files (repeated closing rows and small zig-zags from noisy sources).

use crate::airfoil::ToleranceSet;
use crate::airfoil::helpers::{group_stations, station_extremes};
use crate::common::points::x_extents;
use crate::geom2::Point2;
use serde::{Deserialize, Serialize};

/// Which of the two profile surfaces an operation applies to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Surface {
    Upper,
    Lower,
}

impl Surface {
    pub fn name(&self) -> &'static str {
        match self {
            Surface::Upper => "upper",
            Surface::Lower => "lower",
        }
    }
}

/// Which camber value to keep when several samples share a station
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum CamberPick {
    Min,
    Max,
}

/// Parameters for the trailing edge oscillation cleanup
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CleanupParams {
    /// Size of the inspected window ahead of the trailing edge, as a fraction of the chord
    pub window_fraction: f64,

    /// The number of direction reversals in camber within the window needed to count as
    /// oscillation
    pub min_sign_changes: usize,

    /// The camber value kept on the lower surface when collapsing stations, or `None` to leave
    /// the lower surface alone
    pub lower: Option<CamberPick>,

    /// The camber value kept on the upper surface when collapsing stations, or `None` to leave
    /// the upper surface alone
    pub upper: Option<CamberPick>,
}

impl Default for CleanupParams {
    fn default() -> Self {
        Self {
            window_fraction: 0.02,
            min_sign_changes: 2,
            lower: Some(CamberPick::Min),
            upper: None,
        }
    }
}

/// Computes the leading edge point of a profile: the minimum x value, paired with the average
/// camber of every point within `x_tol` of that minimum. Returns `None` for an empty sequence.
///
/// # Arguments
///
/// * `points`: the profile points
/// * `x_tol`: distance along x within which points are considered to be at the leading edge
///
/// returns: Option<OPoint<f64, Const<2>>>
///
/// # Examples
///
/// ```
/// use foilcsv::{Point2, airfoil::leading_edge};
/// let points = vec![Point2::new(1.0, 0.0), Point2::new(0.0, 0.02), Point2::new(0.0, -0.02)];
/// assert_eq!(leading_edge(&points, 1e-6), Some(Point2::new(0.0, 0.0)));
/// ```
pub fn leading_edge(points: &[Point2], x_tol: f64) -> Option<Point2> {
    let (x_min, _) = x_extents(points)?;
    let near = points
        .iter()
        .filter(|p| (p.x - x_min).abs() <= x_tol)
        .map(|p| p.y)
        .collect::<Vec<_>>();

    // The minimum point itself is always in `near`
    let y = near.iter().sum::<f64>() / near.len() as f64;
    Some(Point2::new(x_min, y))
}

/// Returns the first and last index of points within `x_tol` of the minimum x, or `None` if the
/// sequence is empty.
pub fn leading_edge_span(points: &[Point2], tol: &ToleranceSet) -> Option<(usize, usize)> {
    let first = points.iter().position(|p| tol.is_leading_edge_x(p.x))?;
    let last = points.iter().rposition(|p| tol.is_leading_edge_x(p.x))?;
    Some((first, last))
}

/// Counts the consecutive points at the end of the sequence which sit at the trailing edge on the
/// chord line.
pub fn trailing_edge_run(points: &[Point2], tol: &ToleranceSet) -> usize {
    points
        .iter()
        .rev()
        .take_while(|p| tol.is_trailing_edge_point(p))
        .count()
}

/// Removes repeated closing rows at the end of a sequence. Scanning backwards from the end, the
/// run of consecutive trailing edge points is truncated to the first one encountered. Returns
/// `None` if there was nothing to remove.
///
/// # Arguments
///
/// * `points`: the point sequence in traversal order
/// * `tol`: the tolerances of the sequence
///
/// returns: Option<Vec<OPoint<f64, Const<2>>, Global>>
pub fn remove_repeated_trailing_edge(points: &[Point2], tol: &ToleranceSet) -> Option<Vec<Point2>> {
    let run = trailing_edge_run(points, tol);
    if run <= 1 {
        return None;
    }

    let mut result = points[..points.len() - run].to_vec();
    result.push(points[points.len() - 1]);
    Some(result)
}

/// Looks for small zig-zags in camber close to the trailing edge and removes them by collapsing
/// samples which share a station, keeping one camber extreme per station as configured for each
/// surface. The opening and closing points of the sequence are never touched.
///
/// The lower surface window runs from the last leading edge point to the end of the sequence, the
/// upper surface window from the start to the first leading edge point, in both cases restricted
/// to the last `window_fraction` of the chord.
///
/// Returns the new sequence and the surfaces which changed, or `None` if nothing changed.
pub fn cleanup_trailing_edge_oscillation(
    points: &[Point2],
    tol: &ToleranceSet,
    params: &CleanupParams,
) -> Option<(Vec<Point2>, Vec<Surface>)> {
    let (le_first, le_last) = leading_edge_span(points, tol)?;
    let x_start = tol.x_max - tol.chord * params.window_fraction;
    let n = points.len();

    let mut working = points.to_vec();
    let mut changed = Vec::new();

    // The lower surface is done first, since the indices of the upper surface come before it
    // and are unaffected by a change in length.
    if let Some(pick) = params.lower {
        let run_start = le_last + 1;
        let run_end = n.saturating_sub(1);
        if run_start < run_end {
            let window_start = (run_start..run_end).find(|&i| points[i].x >= x_start);
            if let Some(i0) = window_start {
                let window = &points[i0..run_end];
                if let Some(replaced) = collapse_oscillation(window, tol, params, pick, false) {
                    working.splice(i0..run_end, replaced);
                    changed.push(Surface::Lower);
                }
            }
        }
    }

    if let Some(pick) = params.upper {
        let run_start = 1;
        let run_end = le_first;
        if run_start < run_end {
            let window_end = (run_start..run_end).rev().find(|&i| points[i].x >= x_start);
            if let Some(i1) = window_end {
                let window = &points[run_start..=i1];
                if let Some(replaced) = collapse_oscillation(window, tol, params, pick, true) {
                    working.splice(run_start..=i1, replaced);
                    changed.push(Surface::Upper);
                }
            }
        }
    }

    if changed.is_empty() {
        None
    } else {
        Some((working, changed))
    }
}

/// Counts direction reversals in the camber of consecutive points, ignoring steps smaller than
/// `y_tol`
fn camber_reversals(window: &[Point2], y_tol: f64) -> usize {
    let steps = window
        .windows(2)
        .map(|w| w[1].y - w[0].y)
        .filter(|d| d.abs() > y_tol)
        .map(|d| d > 0.0)
        .collect::<Vec<_>>();

    steps.windows(2).filter(|s| s[0] != s[1]).count()
}

fn collapse_oscillation(
    window: &[Point2],
    tol: &ToleranceSet,
    params: &CleanupParams,
    pick: CamberPick,
    descending: bool,
) -> Option<Vec<Point2>> {
    if camber_reversals(window, tol.y_tol) < params.min_sign_changes {
        return None;
    }

    let mut sorted = window.to_vec();
    sorted.sort_by(|a, b| a.x.total_cmp(&b.x));

    let mut collapsed = group_stations(&sorted, tol.x_tol)
        .iter()
        .filter_map(|g| station_extremes(g))
        .map(|(low, high)| match pick {
            CamberPick::Min => low,
            CamberPick::Max => high,
        })
        .collect::<Vec<_>>();

    if descending {
        collapsed.reverse();
    }

    if collapsed == window {
        None
    } else {
        Some(collapsed)
    }
}
