//! The parameterised load pipeline which ties the parser, the repairs and the validator together,
//! and the placement of one or two profiles onto a host plane ready to be drawn.

mod draw;

pub use draw::{CurveSink, DrawnProfile, draw_placed};

use crate::airfoil::{
    CleanupParams, CorrectionLog, CorrectionParams, SplitProfile, ToleranceFactors, ToleranceSet,
    align_to_frame, correct_profile, leading_edge, mirror, rotate_about, scale_to_chord,
    split_profile, validate,
};
use crate::geom2::Point2;
use crate::geom3::{InPlaneBasis, PlaneBasis, ReferenceFrame};
use crate::io::{CsvFormat, ParseMode, read_profile_csv, read_text, write_corrected};
use crate::{ProfileError, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::{info, warn};

/// Offsets with a magnitude below this are treated as zero
const OFFSET_TOL: f64 = 1.0e-9;

/// Behavior toggles and parameters for loading and placing profiles
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
#[serde(default)]
pub struct ProfileOptions {
    /// Re-order profiles whose rows alternate between the upper and lower surface
    pub sort_interleaved: bool,

    /// Collapse small zig-zags near the trailing edge
    pub cleanup_trailing_edge: bool,

    /// Pre-rotate placed profiles so that angles are relative to `frame` rather than to the host
    /// plane's own basis
    pub align_to_host_frame: bool,

    /// Save a corrected copy next to the source file when any repair was applied
    pub write_corrected_file: bool,

    pub parse_mode: ParseMode,
    pub tolerances: ToleranceFactors,
    pub cleanup: CleanupParams,

    /// Upper limit on repeated correction passes over a single profile
    pub max_correction_passes: usize,

    pub frame: ReferenceFrame,
}

impl Default for ProfileOptions {
    fn default() -> Self {
        Self {
            sort_interleaved: true,
            cleanup_trailing_edge: true,
            align_to_host_frame: true,
            write_corrected_file: true,
            parse_mode: ParseMode::default(),
            tolerances: ToleranceFactors::default(),
            cleanup: CleanupParams::default(),
            max_correction_passes: 4,
            frame: ReferenceFrame::default(),
        }
    }
}

impl ProfileOptions {
    /// Load options from a JSON file. Missing fields take their default values.
    pub fn from_json_file(path: &Path) -> Result<Self> {
        let text = read_text(path)?;
        Ok(serde_json::from_str(&text)?)
    }

    /// The subset of the options which drives the defect repairs
    pub fn corrections(&self) -> CorrectionParams {
        CorrectionParams {
            sort_interleaved: self.sort_interleaved,
            cleanup_trailing_edge: self.cleanup_trailing_edge,
            tolerances: self.tolerances,
            cleanup: self.cleanup,
            max_passes: self.max_correction_passes,
        }
    }
}

/// A profile which was read, repaired and accepted by the validator
#[derive(Debug, Clone)]
pub struct LoadedProfile {
    pub points: Vec<Point2>,
    pub tolerances: ToleranceSet,

    /// Descriptions of the repairs applied, empty if the file was used as is
    pub notes: CorrectionLog,

    /// The corrected file if one was written, otherwise the source path
    pub effective_path: PathBuf,

    pub format: CsvFormat,
}

/// Read, repair and validate a profile file.
///
/// # Arguments
///
/// * `path`: the profile coordinate file
/// * `label`: an optional label (such as "Profile 1") prefixed to any error message
/// * `options`: the pipeline options
///
/// returns: Result<LoadedProfile, ProfileError>
pub fn load_profile(
    path: &Path,
    label: Option<&str>,
    options: &ProfileOptions,
) -> Result<LoadedProfile> {
    load_unlabeled(path, options).map_err(|e| {
        warn!(path = %path.display(), error = %e, "rejected profile");
        e.labeled(label)
    })
}

fn load_unlabeled(path: &Path, options: &ProfileOptions) -> Result<LoadedProfile> {
    let parsed = read_profile_csv(path, options.parse_mode)?;
    if parsed.points.len() < 2 {
        return Err(ProfileError::InsufficientData);
    }

    let corrected = correct_profile(&parsed.points, &options.corrections())?;
    validate(&corrected.points, &corrected.tolerances)?;

    let effective_path = if !corrected.log.is_empty() && options.write_corrected_file {
        write_corrected(path, &corrected.points, &parsed.format)?
    } else {
        path.to_path_buf()
    };

    info!(
        path = %path.display(),
        points = corrected.points.len(),
        corrections = corrected.log.len(),
        "loaded profile"
    );

    Ok(LoadedProfile {
        points: corrected.points,
        tolerances: corrected.tolerances,
        notes: corrected.log,
        effective_path,
        format: parsed.format,
    })
}

/// The name a drawn profile takes from its file: the file stem, or "Profile" if there is none
pub fn profile_name_from_path(path: &Path) -> String {
    path.file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .filter(|s| !s.is_empty())
        .unwrap_or_else(|| "Profile".to_string())
}

/// A profile file to place, with the chord length it should be drawn at
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProfileRequest {
    pub path: PathBuf,
    pub label: Option<String>,
    pub depth: f64,
    pub mirror: bool,
}

impl ProfileRequest {
    pub fn new(path: impl Into<PathBuf>, depth: f64) -> Self {
        Self {
            path: path.into(),
            label: None,
            depth,
            mirror: false,
        }
    }
}

/// The optional second profile of a loft, drawn on a plane offset from the first along its
/// normal and rotated about the leading edge of the first
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SecondProfile {
    pub request: Option<ProfileRequest>,

    /// Distance between the two planes, along the first plane's normal
    pub offset: f64,

    /// Rotation of the second profile in radians, positive for nose up
    pub rotation: f64,
}

/// A profile ready to be handed to a curve sink
#[derive(Debug, Clone, Serialize)]
pub struct PlacedProfile {
    pub name: String,

    /// The surfaces in the local coordinates of `plane`
    pub split: SplitProfile,
    pub plane: PlaneBasis,
    pub offset: f64,
    pub notes: CorrectionLog,
    pub effective_path: PathBuf,
}

#[derive(Debug, Clone, Serialize)]
pub struct Placement {
    pub first: PlacedProfile,
    pub second: Option<PlacedProfile>,
}

struct Prepared {
    loaded: LoadedProfile,
    points: Vec<Point2>,
    x_tol: f64,
}

fn prepare(request: &ProfileRequest, label: &str, options: &ProfileOptions) -> Result<Prepared> {
    let label = request.label.as_deref().unwrap_or(label);
    let loaded = load_profile(&request.path, Some(label), options)?;

    let scaled = scale_to_chord(&loaded.points, request.depth).map_err(|e| e.labeled(Some(label)))?;
    let points = if request.mirror {
        mirror(&scaled)
    } else {
        scaled
    };
    let x_tol = ToleranceSet::estimate(&points, &options.tolerances)
        .map_err(|e| e.labeled(Some(label)))?
        .x_tol;

    Ok(Prepared {
        loaded,
        points,
        x_tol,
    })
}

fn check_depth(request: &ProfileRequest, label: &str) -> Result<()> {
    if request.depth > 0.0 && request.depth.is_finite() {
        Ok(())
    } else {
        Err(ProfileError::InvalidParameter(format!(
            "Profile depth ({}) must be greater than zero.",
            label.to_lowercase()
        )))
    }
}

/// Load, scale, align and split one or two profiles for drawing onto a host plane.
///
/// Each profile is split in its own local frame, and the alignment to the reference frame and the
/// rotation of the second profile are then applied to the split surfaces. The second profile is
/// rotated by `-rotation` about the aligned leading edge of the first, matching the host's sign
/// convention.
///
/// # Arguments
///
/// * `first`: the profile drawn on `plane`
/// * `second`: the optional second profile, its plane offset and its rotation
/// * `plane`: the host plane for the first profile
/// * `options`: the pipeline options
///
/// returns: Result<Placement, ProfileError>
pub fn place_profiles(
    first: &ProfileRequest,
    second: &SecondProfile,
    plane: &impl InPlaneBasis,
    options: &ProfileOptions,
) -> Result<Placement> {
    check_depth(first, "Profile 1")?;
    if let Some(request) = &second.request {
        check_depth(request, "Profile 2")?;
    } else if second.offset.abs() > OFFSET_TOL {
        return Err(ProfileError::InvalidParameter(
            "Second profile CSV is required when a non-zero offset is specified.".into(),
        ));
    }

    let basis = plane.in_plane_basis();
    let align = |points: &[Point2]| {
        if options.align_to_host_frame {
            align_to_frame(points, &basis, &options.frame)
        } else {
            points.to_vec()
        }
    };

    let p1 = prepare(first, "Profile 1", options)?;
    let le = leading_edge(&p1.points, p1.x_tol).ok_or(ProfileError::DegenerateProfile)?;
    let pivot = align(std::slice::from_ref(&le))[0];
    let split1 = split_profile(&p1.points).map_err(|e| e.labeled(Some("Profile 1")))?;

    let placed1 = PlacedProfile {
        name: profile_name_from_path(&first.path),
        split: split1.map(align),
        plane: basis,
        offset: 0.0,
        notes: p1.loaded.notes,
        effective_path: p1.loaded.effective_path,
    };

    let placed2 = match &second.request {
        Some(request) => {
            let p2 = prepare(request, "Profile 2", options)?;
            let split2 = split_profile(&p2.points).map_err(|e| e.labeled(Some("Profile 2")))?;
            let rotated = split2
                .map(align)
                .map(|points| rotate_about(points, -second.rotation, &pivot));

            Some(PlacedProfile {
                name: profile_name_from_path(&request.path),
                split: rotated,
                plane: basis.offset(second.offset),
                offset: second.offset,
                notes: p2.loaded.notes,
                effective_path: p2.loaded.effective_path,
            })
        }
        None => None,
    };

    Ok(Placement {
        first: placed1,
        second: placed2,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ValidationFailure;
    use crate::airfoil::REMOVED_TRAILING_EDGE_ROWS;
    use crate::geom2::points_from;
    use crate::geom3::{Point3, Vector3};
    use approx::assert_relative_eq;
    use std::f64::consts::FRAC_PI_2;
    use tempfile::TempDir;

    const DIAMOND: &str = "1.0,0.0\n0.5,0.05\n0.0,0.0\n0.5,-0.05\n1.0,0.0\n";

    fn write_file(dir: &TempDir, name: &str, text: &str) -> PathBuf {
        let path = dir.path().join(name);
        std::fs::write(&path, text).unwrap();
        path
    }

    #[test]
    fn clean_file_loads_in_place() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_file(&dir, "diamond.csv", DIAMOND);

        let loaded = load_profile(&path, None, &ProfileOptions::default()).unwrap();
        assert_eq!(loaded.points.len(), 5);
        assert!(loaded.notes.is_empty());
        assert_eq!(loaded.effective_path, path);
        assert!(!dir.path().join("diamond_sort.csv").exists());
    }

    #[test]
    fn repeated_trailing_edge_is_repaired_and_written() {
        let dir = tempfile::tempdir().unwrap();
        let text = format!("{DIAMOND}1.0,0.0\n1.0,0.0\n");
        let path = write_file(&dir, "foil.csv", &text);

        let loaded = load_profile(&path, None, &ProfileOptions::default()).unwrap();
        assert_eq!(loaded.notes.joined(), REMOVED_TRAILING_EDGE_ROWS);
        assert_eq!(loaded.points.len(), 5);
        assert_eq!(loaded.effective_path, dir.path().join("foil_sort.csv"));

        let rewritten = std::fs::read_to_string(&loaded.effective_path).unwrap();
        assert_eq!(rewritten.lines().count(), 5);
        assert!(rewritten.ends_with("1.00000000,0.00000000\n"));
    }

    #[test]
    fn write_back_can_be_disabled() {
        let dir = tempfile::tempdir().unwrap();
        let text = format!("{DIAMOND}1.0,0.0\n");
        let path = write_file(&dir, "foil.csv", &text);
        let options = ProfileOptions {
            write_corrected_file: false,
            ..Default::default()
        };

        let loaded = load_profile(&path, None, &options).unwrap();
        assert!(!loaded.notes.is_empty());
        assert_eq!(loaded.effective_path, path);
        assert!(!dir.path().join("foil_sort.csv").exists());
    }

    #[test]
    fn zero_chord_is_degenerate() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_file(&dir, "flat.csv", "0.5,0.1\n0.5,-0.1\n");

        let err = load_profile(&path, Some("Profile 1"), &ProfileOptions::default()).unwrap_err();
        assert!(matches!(err.kind(), ProfileError::DegenerateProfile));
        assert_eq!(
            err.to_string(),
            "Profile 1: Invalid profile data: chord length is zero."
        );
    }

    #[test]
    fn empty_file_is_insufficient() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_file(&dir, "empty.csv", "# nothing\nx,y\n");

        let err = load_profile(&path, None, &ProfileOptions::default()).unwrap_err();
        assert!(matches!(err, ProfileError::InsufficientData));
    }

    #[test]
    fn validation_failure_is_labeled() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_file(&dir, "bad.csv", "1.0,0.0\n0.5,-0.05\n0.0,0.0\n0.5,0.05\n1.0,0.0\n");

        let err = load_profile(&path, Some("Profile 2"), &ProfileOptions::default()).unwrap_err();
        assert!(matches!(
            err.kind(),
            ProfileError::ValidationFailed(ValidationFailure::LowerSurfaceFirst)
        ));
        assert!(err.to_string().starts_with("Profile 2: "));
    }

    #[test]
    fn options_from_partial_json() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_file(
            &dir,
            "options.json",
            r#"{"sort_interleaved": false, "parse_mode": "loose",
                "tolerances": {"camber_rel": 0.001}}"#,
        );

        let options = ProfileOptions::from_json_file(&path).unwrap();
        assert!(!options.sort_interleaved);
        assert!(options.cleanup_trailing_edge);
        assert_eq!(options.parse_mode, ParseMode::Loose);
        assert_eq!(options.tolerances.camber_rel, 0.001);
        assert_eq!(options.tolerances.chord_rel, 1.0e-6);

        let params = options.corrections();
        assert!(!params.sort_interleaved);
        assert_eq!(params.tolerances, options.tolerances);
        assert_eq!(params.max_passes, options.max_correction_passes);
        assert_eq!(options.max_correction_passes, 4);
    }

    #[test]
    fn malformed_json_is_config_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_file(&dir, "options.json", "{ not json");
        assert!(matches!(
            ProfileOptions::from_json_file(&path),
            Err(ProfileError::Config(_))
        ));
    }

    #[test]
    fn profile_names() {
        assert_eq!(profile_name_from_path(Path::new("/tmp/naca0012.csv")), "naca0012");
        assert_eq!(profile_name_from_path(Path::new("")), "Profile");
    }

    #[test]
    fn single_profile_is_scaled_and_split() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_file(&dir, "diamond.csv", DIAMOND);
        let first = ProfileRequest::new(&path, 200.0);

        let placement = place_profiles(
            &first,
            &SecondProfile::default(),
            &PlaneBasis::xy(),
            &ProfileOptions::default(),
        )
        .unwrap();
        assert!(placement.second.is_none());

        let placed = placement.first;
        assert_eq!(placed.name, "diamond");
        assert_eq!(placed.split.upper, points_from(&[(0.0, 0.0), (100.0, 10.0), (200.0, 0.0)]));
        assert_eq!(placed.split.lower, points_from(&[(0.0, 0.0), (100.0, -10.0), (200.0, 0.0)]));
    }

    #[test]
    fn mirrored_profile_swaps_surfaces() {
        let dir = tempfile::tempdir().unwrap();
        let text = "1.0,0.0\n0.5,0.08\n0.0,0.0\n0.5,-0.02\n1.0,0.0\n";
        let path = write_file(&dir, "diamond.csv", text);
        let mut first = ProfileRequest::new(&path, 1.0);
        first.mirror = true;

        let placement = place_profiles(
            &first,
            &SecondProfile::default(),
            &PlaneBasis::xy(),
            &ProfileOptions::default(),
        )
        .unwrap();
        assert_eq!(placement.first.split.upper[1], Point2::new(0.5, 0.02));
        assert_eq!(placement.first.split.lower[1], Point2::new(0.5, -0.08));
    }

    #[test]
    fn second_profile_is_offset_and_rotated() {
        let dir = tempfile::tempdir().unwrap();
        let path1 = write_file(&dir, "root.csv", DIAMOND);
        let path2 = write_file(&dir, "tip.csv", DIAMOND);

        let first = ProfileRequest::new(&path1, 2.0);
        let second = SecondProfile {
            request: Some(ProfileRequest::new(&path2, 1.0)),
            offset: 5.0,
            rotation: FRAC_PI_2,
        };

        let placement =
            place_profiles(&first, &second, &PlaneBasis::xy(), &ProfileOptions::default()).unwrap();
        let tip = placement.second.unwrap();
        assert_eq!(tip.name, "tip");
        assert_relative_eq!(tip.plane.origin, Point3::new(0.0, 0.0, 5.0), epsilon = 1e-12);

        // A quarter turn clockwise about the leading edge at the origin sends the trailing edge
        // from (1, 0) to (0, -1)
        let te = tip.split.lower.last().unwrap();
        assert_relative_eq!(*te, Point2::new(0.0, -1.0), epsilon = 1e-12);
    }

    #[test]
    fn rotated_plane_is_aligned() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_file(&dir, "diamond.csv", DIAMOND);
        let plane = PlaneBasis::new(Point3::origin(), Vector3::y(), Vector3::z()).unwrap();

        let placement = place_profiles(
            &ProfileRequest::new(&path, 1.0),
            &SecondProfile::default(),
            &plane,
            &ProfileOptions::default(),
        )
        .unwrap();

        // The chord still runs along global X even though the plane's local x is global Y
        let te = placement.first.split.lower.last().unwrap();
        let world = placement.first.plane.to_world(te);
        assert_relative_eq!(world, Point3::new(1.0, 0.0, 0.0), epsilon = 1e-12);
    }

    #[test]
    fn invalid_placement_parameters() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_file(&dir, "diamond.csv", DIAMOND);
        let options = ProfileOptions::default();

        let result = place_profiles(
            &ProfileRequest::new(&path, 0.0),
            &SecondProfile::default(),
            &PlaneBasis::xy(),
            &options,
        );
        assert!(matches!(result, Err(ProfileError::InvalidParameter(_))));

        let offset_only = SecondProfile {
            offset: 1.0,
            ..Default::default()
        };
        let result = place_profiles(
            &ProfileRequest::new(&path, 1.0),
            &offset_only,
            &PlaneBasis::xy(),
            &options,
        );
        assert!(matches!(result, Err(ProfileError::InvalidParameter(_))));
    }
}
