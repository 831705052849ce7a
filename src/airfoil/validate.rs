//! Ordering contract checks for a profile point sequence. A valid sequence starts at the trailing
//! edge, runs along the upper surface to the leading edge, then back along the lower surface to
//! the trailing edge.

use crate::airfoil::ToleranceSet;
use crate::airfoil::camber::{CamberSign, sign_segments};
use crate::airfoil::edges::{leading_edge_span, trailing_edge_run};
use crate::errors::ValidationFailure;
use crate::geom2::Point2;

/// Checks that a point sequence satisfies the canonical profile ordering. The checks run in a
/// fixed order and the first failing one is reported, so each failure describes the earliest
/// problem in the file.
///
/// # Arguments
///
/// * `points`: the point sequence in traversal order
/// * `tol`: the tolerances estimated for the same sequence
///
/// returns: Result<(), ValidationFailure>
pub fn validate(points: &[Point2], tol: &ToleranceSet) -> Result<(), ValidationFailure> {
    use ValidationFailure::*;

    if points.len() < 3 {
        return Err(TooFewPoints);
    }

    if trailing_edge_run(points, tol) > 1 {
        return Err(RepeatedTrailingEdge);
    }

    let first = points[0];
    let upper_te = trailing_edge_candidate(points, |y| y >= -tol.y_tol).unwrap_or(tol.x_max);
    if !tol.trailing_edge_zone(upper_te).contains(first.x) {
        return Err(StartNotAtTrailingEdge);
    }
    if first.y < -tol.y_tol {
        return Err(StartNotOnUpperSurface);
    }

    let last = points[points.len() - 1];
    let lower_te = trailing_edge_candidate(points, |y| y <= tol.y_tol).unwrap_or(tol.x_max);
    if !tol.trailing_edge_zone(lower_te).contains(last.x) {
        return Err(EndNotAtTrailingEdge);
    }
    if last.y > tol.y_tol {
        return Err(EndNotOnLowerSurface);
    }

    let signs = sign_segments(points, tol.y_tol);
    match signs.first() {
        None => return Err(NoCamber),
        Some(CamberSign::Lower) => return Err(LowerSurfaceFirst),
        Some(CamberSign::Upper) => {}
    }
    if signs.len() > 2 {
        return Err(Interleaved);
    }

    let (le_first, le_last) = leading_edge_span(points, tol).ok_or(LeadingEdgeMissing)?;
    let on_chord = points[le_first..=le_last]
        .iter()
        .any(|p| tol.is_leading_edge_x(p.x) && p.y.abs() <= tol.y_tol);
    if !on_chord {
        return Err(LeadingEdgeOffChord);
    }

    let upper = &points[..=le_first];
    if upper.windows(2).any(|w| w[1].x > w[0].x + tol.x_tol) {
        return Err(UpperNotMonotonic);
    }

    let lower = &points[le_last..];
    if lower.windows(2).any(|w| w[1].x < w[0].x - tol.x_tol) {
        return Err(LowerNotMonotonic);
    }

    if upper.iter().any(|p| p.y < -tol.y_tol) {
        return Err(UpperSurfaceBelowChord);
    }
    if lower.iter().any(|p| p.y > tol.y_tol) {
        return Err(LowerSurfaceAboveChord);
    }

    Ok(())
}

/// The largest x among points whose camber passes the filter
fn trailing_edge_candidate(points: &[Point2], leans: impl Fn(f64) -> bool) -> Option<f64> {
    points
        .iter()
        .filter(|p| leans(p.y))
        .map(|p| p.x)
        .max_by(f64::total_cmp)
}
