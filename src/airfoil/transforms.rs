//! Pure geometric transforms over profile point sequences. The rigid transforms keep the order of
//! the points, while `mirror` reverses it so that a mirrored profile still starts on its upper
//! surface.

use crate::common::ANGLE_TOL;
use crate::common::points::{transform_points, x_extents};
use crate::geom2::{Iso2, Point2, Rot2};
use crate::geom3::{InPlaneBasis, ReferenceFrame};
use crate::{ProfileError, Result};

/// Uniformly rescale a profile so that its chord equals `target`, keeping the minimum x (the
/// leading edge station) fixed.
///
/// # Arguments
///
/// * `points`: the profile points
/// * `target`: the desired chord length, must be positive
///
/// returns: Result<Vec<OPoint<f64, Const<2>>, Global>, ProfileError>
///
/// # Examples
///
/// ```
/// use foilcsv::airfoil::scale_to_chord;
/// use foilcsv::geom2::points_from;
///
/// let points = points_from(&[(1.0, 0.0), (0.5, 0.05), (0.0, 0.0)]);
/// let scaled = scale_to_chord(&points, 200.0).unwrap();
/// assert_eq!(scaled, points_from(&[(200.0, 0.0), (100.0, 10.0), (0.0, 0.0)]));
/// ```
pub fn scale_to_chord(points: &[Point2], target: f64) -> Result<Vec<Point2>> {
    let (x_min, x_max) = x_extents(points).ok_or(ProfileError::DegenerateProfile)?;
    let chord = x_max - x_min;
    if !(chord > 0.0) {
        return Err(ProfileError::DegenerateProfile);
    }
    if !(target > 0.0) || !target.is_finite() {
        return Err(ProfileError::InvalidParameter(format!(
            "Target chord length must be positive, got {target}."
        )));
    }

    let s = target / chord;
    Ok(points
        .iter()
        .map(|p| Point2::new((p.x - x_min) * s + x_min, p.y * s))
        .collect())
}

/// Flip the profile about its chord line by negating the camber of every point. The order of the
/// points is reversed as well, so that the result still starts on the upper surface.
pub fn mirror(points: &[Point2]) -> Vec<Point2> {
    points.iter().rev().map(|p| Point2::new(p.x, -p.y)).collect()
}

/// Rotate points counter-clockwise by `angle` radians around `pivot`. Angles with a magnitude
/// below `ANGLE_TOL` return an exact copy of the input.
pub fn rotate_about(points: &[Point2], angle: f64, pivot: &Point2) -> Vec<Point2> {
    if angle.abs() < ANGLE_TOL {
        return points.to_vec();
    }
    let iso = Iso2::rotation_wrt_point(Rot2::new(angle), *pivot);
    transform_points(points, &iso)
}

/// Pre-rotate points drawn on a host plane so that local angles are measured against the global
/// reference frame instead of the plane's own, arbitrary, in-plane basis. The rotation is about
/// the plane's local origin.
///
/// # Arguments
///
/// * `points`: the profile points in the plane's local coordinates
/// * `plane`: anything which can report its in-plane basis
/// * `frame`: the global reference directions
///
/// returns: Vec<OPoint<f64, Const<2>>, Global>
pub fn align_to_frame(
    points: &[Point2],
    plane: &impl InPlaneBasis,
    frame: &ReferenceFrame,
) -> Vec<Point2> {
    let angle = plane.in_plane_basis().alignment_angle(frame);
    rotate_about(points, angle, &Point2::origin())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::airfoil::{ToleranceFactors, ToleranceSet, validate};
    use crate::geom2::points_from;
    use crate::geom3::{PlaneBasis, Point3, Vector3};
    use approx::assert_relative_eq;
    use rand::Rng;
    use std::f64::consts::FRAC_PI_2;

    fn diamond() -> Vec<Point2> {
        points_from(&[(1.0, 0.0), (0.5, 0.05), (0.0, 0.0), (0.5, -0.05), (1.0, 0.0)])
    }

    #[test]
    fn scale_round_trip_restores_chord() {
        let points = points_from(&[
            (12.0, 0.0),
            (11.0, 0.3),
            (10.0, 0.0),
            (11.0, -0.2),
            (12.0, 0.0),
        ]);
        let scaled = scale_to_chord(&points, 150.0).unwrap();
        let (a, b) = x_extents(&scaled).unwrap();
        assert_relative_eq!(a, 10.0, epsilon = 1e-9);
        assert_relative_eq!(b - a, 150.0, epsilon = 1e-9);

        let back = scale_to_chord(&scaled, 2.0).unwrap();
        for (p, q) in back.iter().zip(points.iter()) {
            assert_relative_eq!(p, q, epsilon = 1e-9);
        }
    }

    #[test]
    fn scale_rejects_degenerate() {
        let points = points_from(&[(0.5, 0.1), (0.5, -0.1)]);
        assert!(matches!(
            scale_to_chord(&points, 1.0),
            Err(ProfileError::DegenerateProfile)
        ));
        assert!(matches!(
            scale_to_chord(&diamond(), 0.0),
            Err(ProfileError::InvalidParameter(_))
        ));
        assert!(matches!(
            scale_to_chord(&diamond(), -1.0),
            Err(ProfileError::InvalidParameter(_))
        ));
    }

    #[test]
    fn mirror_flips_camber_and_keeps_order() {
        let points = points_from(&[(1.0, 0.0), (0.5, 0.08), (0.0, 0.0), (0.5, -0.02), (1.0, 0.0)]);
        let m = mirror(&points);
        assert_eq!(m[1], Point2::new(0.5, 0.02));
        assert_eq!(m[3], Point2::new(0.5, -0.08));
        assert_eq!(mirror(&m), points);

        let tol = ToleranceSet::estimate(&m, &ToleranceFactors::default()).unwrap();
        assert!(validate(&m, &tol).is_ok());
    }

    #[test]
    fn zero_rotation_is_bit_identical() {
        let points = diamond();
        let pivot = Point2::new(0.3, 0.1);
        assert_eq!(rotate_about(&points, 0.0, &pivot), points);
        assert_eq!(rotate_about(&points, 1e-13, &pivot), points);
    }

    #[test]
    fn quarter_turn_about_pivot() {
        let points = points_from(&[(1.0, 0.0)]);
        let r = rotate_about(&points, FRAC_PI_2, &Point2::new(0.0, 0.0));
        assert_relative_eq!(r[0], Point2::new(0.0, 1.0), epsilon = 1e-12);

        let r = rotate_about(&points, FRAC_PI_2, &Point2::new(1.0, 1.0));
        assert_relative_eq!(r[0], Point2::new(2.0, 1.0), epsilon = 1e-12);
    }

    #[test]
    fn rotation_round_trip() {
        let mut rng = rand::rng();
        let points = (0..50)
            .map(|_| Point2::new(rng.random_range(-10.0..10.0), rng.random_range(-10.0..10.0)))
            .collect::<Vec<_>>();

        for _ in 0..20 {
            let angle = rng.random_range(-3.0..3.0);
            let pivot = Point2::new(rng.random_range(-5.0..5.0), rng.random_range(-5.0..5.0));
            let there = rotate_about(&points, angle, &pivot);
            let back = rotate_about(&there, -angle, &pivot);
            for (p, q) in back.iter().zip(points.iter()) {
                assert_relative_eq!(p, q, epsilon = 1e-9);
            }
        }
    }

    #[test]
    fn alignment_on_rotated_plane() {
        // Local x runs along global Y, so global X is a quarter turn clockwise in the plane
        let plane = PlaneBasis::new(Point3::origin(), Vector3::y(), Vector3::z()).unwrap();
        let aligned =
            align_to_frame(&points_from(&[(1.0, 0.0)]), &plane, &ReferenceFrame::default());
        assert_relative_eq!(aligned[0], Point2::new(0.0, -1.0), epsilon = 1e-12);

        let world = plane.to_world(&aligned[0]);
        assert_relative_eq!(world, Point3::new(1.0, 0.0, 0.0), epsilon = 1e-12);
    }

    #[test]
    fn alignment_on_xy_plane_is_identity() {
        let points = diamond();
        assert_eq!(
            align_to_frame(&points, &PlaneBasis::xy(), &ReferenceFrame::default()),
            points
        );
    }
}
