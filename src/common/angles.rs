//! This module contains common constructs for working with angles

use crate::geom3::Vector3;

/// Rotations smaller than this (in radians) are treated as no rotation at all
pub const ANGLE_TOL: f64 = 1.0e-12;

/// Computes the signed angle from vector `a` to vector `b`, measured counter-clockwise about
/// `axis` (right-hand rule). Both vectors are expected to be perpendicular to the axis, though
/// only their components in the plane perpendicular to the axis contribute to the result.
///
/// # Arguments
///
/// * `a`: the vector the angle is measured from
/// * `b`: the vector the angle is measured to
/// * `axis`: the rotation axis, which does not need to be normalized
///
/// returns: f64 in the range [-pi, pi]
pub fn signed_angle_about(a: &Vector3, b: &Vector3, axis: &Vector3) -> f64 {
    let n = axis.normalize();
    a.cross(b).dot(&n).atan2(a.dot(b))
}
