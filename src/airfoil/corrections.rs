//! The correction driver, which applies the individual defect repairs in their fixed order and
//! records a human readable description of each one that changed the profile.

use crate::Result;
use crate::airfoil::camber::is_interleaved;
use crate::airfoil::edges::{
    CleanupParams, cleanup_trailing_edge_oscillation, remove_repeated_trailing_edge,
};
use crate::airfoil::interleave::sort_interleaved;
use crate::airfoil::{ToleranceFactors, ToleranceSet};
use crate::geom2::Point2;
use serde::{Deserialize, Serialize};
use std::fmt;
use tracing::{debug, info};

pub const REMOVED_TRAILING_EDGE_ROWS: &str = "Removed repeated trailing-edge rows.";
pub const SORTED_INTERLEAVED: &str = "Sorted interleaved upper/lower surface points.";

/// Ordered descriptions of the corrections applied during a single load. An empty log means the
/// input needed no repair.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CorrectionLog {
    entries: Vec<String>,
}

impl CorrectionLog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, entry: impl Into<String>) {
        let entry = entry.into();
        info!("{entry}");
        self.entries.push(entry);
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn entries(&self) -> &[String] {
        &self.entries
    }

    /// All entries in application order, joined by a single space
    pub fn joined(&self) -> String {
        self.entries.join(" ")
    }
}

impl fmt::Display for CorrectionLog {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.joined())
    }
}

/// Selects which repairs `correct_profile` applies and how
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CorrectionParams {
    pub sort_interleaved: bool,
    pub cleanup_trailing_edge: bool,
    pub tolerances: ToleranceFactors,
    pub cleanup: CleanupParams,

    /// Upper limit on repeated passes, at least one pass is always run
    pub max_passes: usize,
}

impl Default for CorrectionParams {
    fn default() -> Self {
        Self {
            sort_interleaved: true,
            cleanup_trailing_edge: true,
            tolerances: ToleranceFactors::default(),
            cleanup: CleanupParams::default(),
            max_passes: 4,
        }
    }
}

/// A profile after repair, along with the tolerances of the repaired sequence and the log of what
/// was changed
#[derive(Debug, Clone)]
pub struct CorrectedProfile {
    pub points: Vec<Point2>,
    pub tolerances: ToleranceSet,
    pub log: CorrectionLog,
}

/// Run the defect repairs over a profile point sequence. Each pass removes repeated trailing edge
/// rows, then sorts interleaved surfaces, then collapses trailing edge oscillation, recomputing
/// the tolerances after every step that changed the points. Passes repeat until one changes
/// nothing or `max_passes` is reached.
///
/// # Arguments
///
/// * `points`: the parsed profile points, in file order
/// * `params`: the enabled repairs and their parameters
///
/// returns: Result<CorrectedProfile, ProfileError>, failing with `DegenerateProfile` if the points
/// have no chord at any stage, or `UnsortableProfile` if the interleave sort fails
pub fn correct_profile(points: &[Point2], params: &CorrectionParams) -> Result<CorrectedProfile> {
    let factors = &params.tolerances;
    let mut working = points.to_vec();
    let mut tol = ToleranceSet::estimate(&working, factors)?;
    let mut log = CorrectionLog::new();
    debug!(?tol, "estimated tolerances");

    for pass in 0..params.max_passes.max(1) {
        let before = log.len();

        if let Some(fixed) = remove_repeated_trailing_edge(&working, &tol) {
            working = fixed;
            tol = ToleranceSet::estimate(&working, factors)?;
            log.push(REMOVED_TRAILING_EDGE_ROWS);
        }

        if params.sort_interleaved && is_interleaved(&working, tol.y_tol) {
            working = sort_interleaved(&working, &tol)?;
            tol = ToleranceSet::estimate(&working, factors)?;
            log.push(SORTED_INTERLEAVED);
        }

        if params.cleanup_trailing_edge {
            if let Some((fixed, surfaces)) =
                cleanup_trailing_edge_oscillation(&working, &tol, &params.cleanup)
            {
                working = fixed;
                tol = ToleranceSet::estimate(&working, factors)?;
                for s in surfaces {
                    log.push(format!(
                        "Collapsed trailing-edge oscillation on the {} surface.",
                        s.name()
                    ));
                }
            }
        }

        if log.len() == before {
            break;
        }
        debug!(pass, points = working.len(), "correction pass changed the profile");
    }

    Ok(CorrectedProfile {
        points: working,
        tolerances: tol,
        log,
    })
}
