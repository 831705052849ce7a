//! Tools for turning loosely formatted airfoil coordinate files into clean upper and lower surface
//! polylines: parsing, repair of common authoring defects, validation of the point ordering,
//! splitting, and the transforms needed to place profiles onto a host plane.

pub mod airfoil;
pub mod common;
mod errors;
pub mod geom2;
pub mod geom3;
pub mod io;
pub mod pipeline;
pub mod units;

pub use errors::{ProfileError, ValidationFailure};
pub use geom2::{Iso2, Point2, PointSequence, Vector2};
pub use geom3::{Point3, UnitVec3, Vector3};

pub type Result<T> = std::result::Result<T, ProfileError>;
