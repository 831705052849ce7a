//! Common operations on f64 points and point sequences.

use crate::geom2::Point2;
use itertools::{Itertools, MinMaxResult};
use parry3d_f64::na::{AbstractRotation, Isometry, Point};

/// Generic 2 or 3 dimensional transformation of a slice of `Point` entities by an `Isometry`,
/// resulting in an owned `Vec` of new point entities being created and returned.
///
/// # Arguments
///
/// * `points`: a slice of `Point` entities to transform
/// * `transform`: the `Isometry` to apply to each point
///
/// returns: Vec<OPoint<f64, Const<{ D }>>, Global>
///
/// # Examples
///
/// ```
/// use foilcsv::{Point2, Iso2};
/// use foilcsv::common::points::transform_points;
///
/// let points = vec![Point2::new(1.0, 2.0), Point2::new(3.0, 4.0)];
/// let transform = Iso2::translation(1.0, 2.0);
/// let transformed_points = transform_points(&points, &transform);
/// assert_eq!(transformed_points[0], Point2::new(2.0, 4.0));
/// assert_eq!(transformed_points[1], Point2::new(4.0, 6.0));
/// ```
pub fn transform_points<R, const D: usize>(
    points: &[Point<f64, D>],
    transform: &Isometry<f64, R, D>,
) -> Vec<Point<f64, D>>
where
    R: AbstractRotation<f64, D>,
{
    points.iter().map(|p| transform * p).collect()
}

/// Returns the minimum and maximum x values of a sequence of 2D points, or `None` if the sequence
/// is empty.
pub fn x_extents(points: &[Point2]) -> Option<(f64, f64)> {
    match points.iter().map(|p| p.x).minmax_by(|a, b| a.total_cmp(b)) {
        MinMaxResult::NoElements => None,
        MinMaxResult::OneElement(x) => Some((x, x)),
        MinMaxResult::MinMax(a, b) => Some((a, b)),
    }
}

/// Returns the largest absolute y value in a sequence of 2D points, or 0.0 if it is empty
pub fn max_abs_y(points: &[Point2]) -> f64 {
    points.iter().map(|p| p.y.abs()).fold(0.0, f64::max)
}

/// Returns a copy of the points sorted by ascending x. The sort is stable, so points sharing an
/// x value keep their original relative order.
pub fn sorted_by_x(points: &[Point2]) -> Vec<Point2> {
    points
        .iter()
        .copied()
        .sorted_by(|a, b| a.x.total_cmp(&b.x))
        .collect()
}

/// Returns the index of the point with the smallest x value. Ties resolve to the first occurrence.
pub fn index_of_min_x(points: &[Point2]) -> Option<usize> {
    points
        .iter()
        .enumerate()
        .min_by(|(_, a), (_, b)| a.x.total_cmp(&b.x))
        .map(|(i, _)| i)
}
