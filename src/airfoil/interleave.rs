//! Reconstruction of the canonical traversal order (trailing edge, upper surface, leading edge,
//! lower surface, trailing edge) from a profile whose rows alternate between the two surfaces.

use crate::airfoil::ToleranceSet;
use crate::airfoil::camber::CamberSign;
use crate::airfoil::helpers::{group_stations_anchored, median_x_gap};
use crate::common::points::sorted_by_x;
use crate::geom2::Point2;
use crate::{ProfileError, Result};
use std::cmp::Ordering;

/// Stations are formed from samples within this fraction of the median positive x gap of the
/// first sample of the station
const STATION_GAP_FRACTION: f64 = 0.5;

/// Re-order an interleaved point cloud into the canonical traversal.
///
/// The points are grouped into stations of approximately equal x, using a tolerance derived from
/// the median positive x gap and measured from the first member of each station. Points above the
/// chord line go to the upper surface and points below go to the lower surface. Chord line points
/// are placed by position: the outermost one at the maximum x is the trailing edge shared by both
/// surfaces, and the first one at the minimum x is the leading edge, emitted once. Any other chord
/// line point goes to whichever surface its station is missing, and a station made only of chord
/// line points contributes a single point shared by both surfaces. The upper surface is then
/// emitted by decreasing x, followed by the lower surface by increasing x.
///
/// # Arguments
///
/// * `points`: the profile points, in any order
/// * `tol`: the tolerances of the point cloud
///
/// returns: Result<Vec<OPoint<f64, Const<2>>, Global>, ProfileError>, failing with
/// `UnsortableProfile` when the cloud has no extent or lacks one of the surfaces
pub fn sort_interleaved(points: &[Point2], tol: &ToleranceSet) -> Result<Vec<Point2>> {
    if points.is_empty() || !(tol.chord > 0.0) {
        return Err(ProfileError::UnsortableProfile(
            "the profile has no positive chord".into(),
        ));
    }

    let sorted = sorted_by_x(points);
    let median = median_x_gap(&sorted).ok_or_else(|| {
        ProfileError::UnsortableProfile("all points share the same x position".into())
    })?;
    let stations = group_stations_anchored(&sorted, median * STATION_GAP_FRACTION);

    let mut upper = Vec::new();
    let mut lower = Vec::new();
    let mut leading_edge = None;
    let mut trailing_edge = None;

    for station in &stations {
        let mut above = Vec::new();
        let mut below = Vec::new();
        let mut on_chord = Vec::new();
        for p in station {
            match CamberSign::of(p.y, tol.y_tol) {
                Some(CamberSign::Upper) => above.push(*p),
                Some(CamberSign::Lower) => below.push(*p),
                None if (p.x - tol.x_max).abs() <= tol.x_tol => trailing_edge = Some(*p),
                None if tol.is_leading_edge_x(p.x) => {
                    leading_edge.get_or_insert(*p);
                }
                None => on_chord.push(*p),
            }
        }

        if let Some(&shared) = on_chord.first() {
            if above.is_empty() && below.is_empty() {
                upper.push(shared);
                lower.push(shared);
            } else if below.is_empty() {
                lower.extend(on_chord);
            } else {
                upper.extend(on_chord);
            }
        }
        upper.extend(above);
        lower.extend(below);
    }

    if upper.is_empty() {
        return Err(ProfileError::UnsortableProfile(
            "no upper surface points were found".into(),
        ));
    }
    if lower.is_empty() {
        return Err(ProfileError::UnsortableProfile(
            "no lower surface points were found".into(),
        ));
    }

    upper.extend(leading_edge);
    if let Some(te) = trailing_edge {
        upper.push(te);
        lower.push(te);
    }

    upper.sort_by(|a, b| by_x_then_y(b.x, a.x, a.y, b.y));
    lower.sort_by(|a, b| by_x_then_y(a.x, b.x, a.y, b.y));

    upper.extend(lower);
    Ok(upper)
}

fn by_x_then_y(x0: f64, x1: f64, y0: f64, y1: f64) -> Ordering {
    x0.total_cmp(&x1).then(y0.total_cmp(&y1))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::airfoil::ToleranceFactors;
    use crate::airfoil::camber::is_interleaved;
    use crate::geom2::points_from;

    fn tol_of(points: &[Point2]) -> ToleranceSet {
        ToleranceSet::estimate(points, &ToleranceFactors::default()).unwrap()
    }

    #[test]
    fn alternating_rows_are_reordered() {
        let points = points_from(&[
            (1.0, 0.0),
            (0.75, 0.04),
            (0.75, -0.03),
            (0.5, 0.06),
            (0.5, -0.04),
            (0.25, 0.05),
            (0.25, -0.03),
            (0.0, 0.0),
        ]);
        let tol = tol_of(&points);
        assert!(is_interleaved(&points, tol.y_tol));

        let sorted = sort_interleaved(&points, &tol).unwrap();
        assert_eq!(
            sorted,
            points_from(&[
                (1.0, 0.0),
                (0.75, 0.04),
                (0.5, 0.06),
                (0.25, 0.05),
                (0.0, 0.0),
                (0.25, -0.03),
                (0.5, -0.04),
                (0.75, -0.03),
                (1.0, 0.0),
            ])
        );
        assert!(!is_interleaved(&sorted, tol.y_tol));
    }

    #[test]
    fn chord_line_points_fill_missing_surface() {
        // A flat bottomed section where the lower surface samples sit on the chord line
        let points = points_from(&[
            (0.0, 0.0),
            (0.5, 0.08),
            (0.5, 0.0),
            (1.0, 0.0),
            (0.25, 0.06),
            (0.25, 0.0),
        ]);
        let tol = tol_of(&points);
        let sorted = sort_interleaved(&points, &tol).unwrap();
        assert_eq!(
            sorted,
            points_from(&[
                (1.0, 0.0),
                (0.5, 0.08),
                (0.25, 0.06),
                (0.0, 0.0),
                (0.25, 0.0),
                (0.5, 0.0),
                (1.0, 0.0),
            ])
        );
    }

    #[test]
    fn trailing_edge_is_shared_when_stations_crowd_it() {
        let points = points_from(&[
            (1.0, 0.0),
            (0.999, 0.0004),
            (0.999, -0.0003),
            (0.998, 0.0008),
            (0.998, -0.0006),
            (0.5, 0.06),
            (0.5, -0.04),
            (0.25, 0.05),
            (0.25, -0.03),
            (0.0, 0.0),
        ]);
        let tol = tol_of(&points);
        let sorted = sort_interleaved(&points, &tol).unwrap();
        assert_eq!(
            sorted,
            points_from(&[
                (1.0, 0.0),
                (0.999, 0.0004),
                (0.998, 0.0008),
                (0.5, 0.06),
                (0.25, 0.05),
                (0.0, 0.0),
                (0.25, -0.03),
                (0.5, -0.04),
                (0.998, -0.0006),
                (0.999, -0.0003),
                (1.0, 0.0),
            ])
        );
    }

    #[test]
    fn missing_surface_is_unsortable() {
        let points = points_from(&[(0.0, 0.01), (0.5, 0.08), (0.5, 0.07), (1.0, 0.01)]);
        let tol = tol_of(&points);
        assert!(matches!(
            sort_interleaved(&points, &tol),
            Err(ProfileError::UnsortableProfile(_))
        ));
    }

    #[test]
    fn unsortable_without_extent() {
        let points = points_from(&[(0.5, 0.1), (0.5, -0.1), (0.5, 0.2)]);
        let tol = ToleranceSet {
            x_min: 0.5,
            x_max: 0.5,
            chord: 0.0,
            x_tol: 1e-9,
            y_tol: 1e-9,
            te_band: 1e-9,
        };
        assert!(matches!(
            sort_interleaved(&points, &tol),
            Err(ProfileError::UnsortableProfile(_))
        ));
        assert!(sort_interleaved(&[], &tol).is_err());
    }

    #[test]
    fn blunt_trailing_edge_is_kept_open() {
        let points = points_from(&[
            (1.0, 0.002),
            (1.0, -0.002),
            (0.5, 0.06),
            (0.5, -0.04),
            (0.0, 0.0),
        ]);
        let tol = tol_of(&points);
        let sorted = sort_interleaved(&points, &tol).unwrap();
        assert_eq!(
            sorted,
            points_from(&[
                (1.0, 0.002),
                (0.5, 0.06),
                (0.0, 0.0),
                (0.5, -0.04),
                (1.0, -0.002),
            ])
        );
    }
}
