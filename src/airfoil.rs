//! This module contains structures and algorithms for repairing, validating and splitting airfoil
//! profile point sequences, along with the geometric transforms used to place them.
//!
//! A profile is expected to traverse its perimeter starting at the trailing edge, running along
//! the upper surface to the leading edge, then back along the lower surface to the trailing edge.
//! Coordinate files in the wild often break this contract in a few recurring ways (repeated
//! closing rows, alternating upper/lower rows, small zig-zags near the trailing edge), so the
//! repairs in `corrections` are run before the sequence is checked with `validate`.
//!
//! All comparisons are made against a `ToleranceSet` derived from the extent of the points, so
//! the same code works for profiles given in any length unit.

mod camber;
mod corrections;
mod edges;
pub mod helpers;
mod interleave;
mod split;
mod tolerances;
mod transforms;
mod validate;

pub use camber::{CamberSign, is_interleaved, sign_segments};
pub use corrections::{
    CorrectedProfile, CorrectionLog, CorrectionParams, REMOVED_TRAILING_EDGE_ROWS,
    SORTED_INTERLEAVED, correct_profile,
};
pub use edges::{
    CamberPick, CleanupParams, Surface, cleanup_trailing_edge_oscillation, leading_edge,
    remove_repeated_trailing_edge,
};
pub use interleave::sort_interleaved;
pub use split::{SplitMethod, SplitProfile, split_profile};
pub use tolerances::{ToleranceFactors, ToleranceSet};
pub use transforms::{align_to_frame, mirror, rotate_about, scale_to_chord};
pub use validate::validate;
