//! Camber sign analysis. In the profile-local frame the camber of a point is simply its y value,
//! so the sign tells which surface a point belongs to: positive is the upper surface, negative is
//! the lower surface, and points within `y_tol` of the chord line belong to neither.

use crate::geom2::Point2;
use itertools::Itertools;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CamberSign {
    Upper,
    Lower,
}

impl CamberSign {
    /// Classify a camber value, returning `None` for values within `y_tol` of zero
    pub fn of(y: f64, y_tol: f64) -> Option<Self> {
        if y > y_tol {
            Some(CamberSign::Upper)
        } else if y < -y_tol {
            Some(CamberSign::Lower)
        } else {
            None
        }
    }
}

/// Computes the sequence of camber sign segments in traversal order. Points near the chord line
/// are skipped and consecutive equal signs are collapsed, so a cleanly ordered profile yields
/// `[Upper, Lower]`, and a profile which alternates between surfaces yields more than two
/// segments.
///
/// # Arguments
///
/// * `points`: the point sequence in traversal order
/// * `y_tol`: camber values with a magnitude at or below this are ignored
///
/// returns: Vec<CamberSign, Global>
pub fn sign_segments(points: &[Point2], y_tol: f64) -> Vec<CamberSign> {
    points
        .iter()
        .filter_map(|p| CamberSign::of(p.y, y_tol))
        .dedup()
        .collect()
}

/// True if the sign segments show the sequence alternating between the upper and lower surfaces
/// instead of traversing one fully before the other.
pub fn is_interleaved(points: &[Point2], y_tol: f64) -> bool {
    sign_segments(points, y_tol).len() > 2
}
