use crate::common::angles::signed_angle_about;
use crate::geom2::Point2;
use crate::geom3::{Point3, UnitVec3, Vector3};
use crate::{ProfileError, Result};
use serde::{Deserialize, Serialize};

/// Anything a profile can be drawn onto (a sketch, a construction plane, a planar face) only needs
/// to report its in-plane basis for the profile to be placed consistently.
pub trait InPlaneBasis {
    fn in_plane_basis(&self) -> PlaneBasis;
}

/// An orthonormal, right-handed frame attached to a plane. Points in the plane are described by
/// local 2D coordinates along `x_axis` and `y_axis`, and `normal = x_axis × y_axis`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PlaneBasis {
    pub origin: Point3,
    pub x_axis: UnitVec3,
    pub y_axis: UnitVec3,
    pub normal: UnitVec3,
}

impl PlaneBasis {
    /// Build a basis from an in-plane direction and the plane normal. The direction does not need
    /// to be exactly perpendicular to the normal; its component along the normal is removed.
    ///
    /// # Arguments
    ///
    /// * `origin`: the point in space which local (0, 0) maps to
    /// * `x_dir`: a direction lying (approximately) in the plane
    /// * `normal`: the plane normal
    ///
    /// returns: Result<PlaneBasis, ProfileError>
    pub fn new(origin: Point3, x_dir: Vector3, normal: Vector3) -> Result<Self> {
        let n = normal
            .try_normalize(1.0e-12)
            .ok_or_else(|| ProfileError::InvalidParameter("Plane normal has zero length.".into()))?;
        let x = (x_dir - n * x_dir.dot(&n)).try_normalize(1.0e-12).ok_or_else(|| {
            ProfileError::InvalidParameter("Plane x direction is parallel to its normal.".into())
        })?;
        let y = n.cross(&x);

        Ok(Self {
            origin,
            x_axis: UnitVec3::new_unchecked(x),
            y_axis: UnitVec3::new_normalize(y),
            normal: UnitVec3::new_unchecked(n),
        })
    }

    /// The global XY plane, with local axes matching global X and Y
    pub fn xy() -> Self {
        Self::from_axes(Vector3::x(), Vector3::y())
    }

    /// The global XZ plane, with local x along global X and local y along global Z
    pub fn xz() -> Self {
        Self::from_axes(Vector3::x(), Vector3::z())
    }

    /// The global YZ plane, with local x along global Y and local y along global Z
    pub fn yz() -> Self {
        Self::from_axes(Vector3::y(), Vector3::z())
    }

    fn from_axes(x: Vector3, y: Vector3) -> Self {
        Self {
            origin: Point3::origin(),
            x_axis: UnitVec3::new_normalize(x),
            y_axis: UnitVec3::new_normalize(y),
            normal: UnitVec3::new_normalize(x.cross(&y)),
        }
    }

    /// Returns a copy of the basis moved along its normal by `distance`
    pub fn offset(&self, distance: f64) -> Self {
        Self {
            origin: self.origin + self.normal.into_inner() * distance,
            ..*self
        }
    }

    /// Maps a local 2D point in this plane to global 3D space
    pub fn to_world(&self, p: &Point2) -> Point3 {
        self.origin + self.x_axis.into_inner() * p.x + self.y_axis.into_inner() * p.y
    }

    /// Calculates the signed angle (radians, counter-clockwise about the plane normal) from this
    /// plane's local x-axis to the reference frame's primary axis projected into the plane. If the
    /// primary axis is parallel to the normal, the frame's fallback axis is used instead.
    ///
    /// Rotating local points by this angle makes local angles relative to the global reference
    /// rather than to whichever basis the host happened to give the plane.
    pub fn alignment_angle(&self, frame: &ReferenceFrame) -> f64 {
        let n = self.normal.into_inner();
        let projected = |v: &UnitVec3| {
            let v = v.into_inner();
            (v - n * v.dot(&n)).try_normalize(1.0e-9)
        };

        match projected(&frame.primary).or_else(|| projected(&frame.fallback)) {
            Some(r) => signed_angle_about(&self.x_axis.into_inner(), &r, &n),
            None => 0.0,
        }
    }
}

impl InPlaneBasis for PlaneBasis {
    fn in_plane_basis(&self) -> PlaneBasis {
        *self
    }
}

/// The global directions that profile angles are measured against. The fallback axis is used
/// when the primary axis is perpendicular to the drawing plane.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct ReferenceFrame {
    pub primary: UnitVec3,
    pub fallback: UnitVec3,
}

impl Default for ReferenceFrame {
    fn default() -> Self {
        Self {
            primary: Vector3::x_axis(),
            fallback: Vector3::y_axis(),
        }
    }
}
