mod plane3;

pub use plane3::{InPlaneBasis, PlaneBasis, ReferenceFrame};

pub type Point3 = parry3d_f64::na::Point3<f64>;
pub type Vector3 = parry3d_f64::na::Vector3<f64>;
pub type UnitVec3 = parry3d_f64::na::Unit<Vector3>;
