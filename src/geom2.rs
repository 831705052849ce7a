//! Two dimensional types used for profile points. Profiles live in a local frame where x runs
//! along the chord and y is the camber offset from the chord line.

use parry2d_f64::na::UnitComplex;

pub type Point2 = parry2d_f64::na::Point2<f64>;
pub type Vector2 = parry2d_f64::na::Vector2<f64>;
pub type Iso2 = parry2d_f64::na::Isometry2<f64>;
pub type Rot2 = UnitComplex<f64>;

/// An ordered sequence of profile points. Order is significant: it encodes the direction of
/// travel around the profile perimeter.
pub type PointSequence = Vec<Point2>;

/// Convenience constructor for building point sequences from coordinate tuples
pub fn points_from(coords: &[(f64, f64)]) -> PointSequence {
    coords.iter().map(|(x, y)| Point2::new(*x, *y)).collect()
}
