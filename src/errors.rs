use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// Errors produced while loading, repairing, validating, transforming or splitting a profile.
#[derive(Debug, Error)]
pub enum ProfileError {
    /// Fewer than two usable coordinate rows were found
    #[error("No valid point pairs found in the CSV file.")]
    InsufficientData,

    /// The profile has no extent along x, so nothing can be normalized against the chord
    #[error("Invalid profile data: chord length is zero.")]
    DegenerateProfile,

    /// The interleaved-ordering repair could not produce a usable sequence
    #[error("Unable to sort interleaved profile points: {0}")]
    UnsortableProfile(String),

    /// The sequence does not follow the trailing edge -> upper -> leading edge -> lower ->
    /// trailing edge ordering contract
    #[error("{0}")]
    ValidationFailed(ValidationFailure),

    /// The profile itself was fine, but saving the corrected copy failed
    #[error("Failed to write corrected profile to {}: {source}", path.display())]
    CorrectionWriteFailed { path: PathBuf, source: io::Error },

    #[error("Failed to read profile file {}: {source}", path.display())]
    Read { path: PathBuf, source: io::Error },

    #[error("Not enough points to build upper and lower curves.")]
    SplitFailed,

    #[error("{0}")]
    InvalidParameter(String),

    #[error("Invalid configuration: {0}")]
    Config(#[from] serde_json::Error),

    /// Any other error, prefixed with a caller supplied label such as "Profile 1"
    #[error("{label}: {source}")]
    Labeled {
        label: String,
        source: Box<ProfileError>,
    },
}

impl ProfileError {
    /// Wrap the error with a caller label. Passing `None` (or an empty label) returns the error
    /// unchanged, and an already labeled error has its label replaced rather than stacked.
    pub fn labeled(self, label: Option<&str>) -> Self {
        let Some(label) = label.filter(|l| !l.is_empty()) else {
            return self;
        };

        let source = match self {
            ProfileError::Labeled { source, .. } => source,
            e => Box::new(e),
        };

        ProfileError::Labeled {
            label: label.to_string(),
            source,
        }
    }

    /// Returns the innermost error, looking through any label
    pub fn kind(&self) -> &ProfileError {
        match self {
            ProfileError::Labeled { source, .. } => source.kind(),
            e => e,
        }
    }
}

impl From<ValidationFailure> for ProfileError {
    fn from(value: ValidationFailure) -> Self {
        ProfileError::ValidationFailed(value)
    }
}

/// The specific reason a point sequence was rejected by the validator. Each check has its own
/// variant so that the message shown to the user says what to fix in the file.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum ValidationFailure {
    #[error("Not enough points to validate profile order.")]
    TooFewPoints,

    #[error(
        "CSV ends with repeated trailing-edge points (x near max, y near 0). \
         Remove duplicate rows to avoid zero-length errors."
    )]
    RepeatedTrailingEdge,

    #[error("Profile must start at the trailing edge (x near max).")]
    StartNotAtTrailingEdge,

    #[error("Profile must start on the upper surface (y >= 0).")]
    StartNotOnUpperSurface,

    #[error("Profile must end at the trailing edge (x near max).")]
    EndNotAtTrailingEdge,

    #[error("Profile must end on the lower surface (y <= 0).")]
    EndNotOnLowerSurface,

    #[error("Profile points lie on the chord line; expected upper and lower surfaces.")]
    NoCamber,

    #[error("Profile must start on the upper surface with positive Y values.")]
    LowerSurfaceFirst,

    #[error(
        "Profile points alternate between upper and lower surfaces. \
         Expected all upper points first, then all lower points."
    )]
    Interleaved,

    #[error("Leading edge (min X) not found in profile.")]
    LeadingEdgeMissing,

    #[error("Leading edge (min X) should be near y = 0.")]
    LeadingEdgeOffChord,

    #[error("Upper surface must move toward the leading edge (x decreasing).")]
    UpperNotMonotonic,

    #[error("Lower surface must move toward the trailing edge (x increasing).")]
    LowerNotMonotonic,

    #[error(
        "Upper surface contains negative Y values. \
         Expected positive Y values up to the leading edge."
    )]
    UpperSurfaceBelowChord,

    #[error(
        "Lower surface contains positive Y values. \
         Expected negative Y values after the leading edge."
    )]
    LowerSurfaceAboveChord,
}
