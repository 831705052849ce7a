//! Writing of corrected profiles next to their source files, in the convention of the source.

use crate::geom2::Point2;
use crate::io::CsvFormat;
use crate::{ProfileError, Result};
use std::path::{Path, PathBuf};
use tracing::info;

/// Inserted before the extension of a source file to name its corrected copy
pub const CORRECTED_SUFFIX: &str = "_sort";

/// Derive the path a corrected copy of `path` is written to. A file whose stem already ends in
/// the suffix maps to itself.
///
/// # Examples
///
/// ```
/// use foilcsv::io::corrected_path;
/// use std::path::Path;
///
/// assert_eq!(corrected_path(Path::new("foils/n0012.csv")), Path::new("foils/n0012_sort.csv"));
/// assert_eq!(corrected_path(Path::new("n0012_sort.csv")), Path::new("n0012_sort.csv"));
/// assert_eq!(corrected_path(Path::new("n0012")), Path::new("n0012_sort"));
/// ```
pub fn corrected_path(path: &Path) -> PathBuf {
    let stem = path
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_default();
    if stem.ends_with(CORRECTED_SUFFIX) {
        return path.to_path_buf();
    }

    let name = match path.extension() {
        Some(ext) => format!("{stem}{CORRECTED_SUFFIX}.{}", ext.to_string_lossy()),
        None => format!("{stem}{CORRECTED_SUFFIX}"),
    };
    path.with_file_name(name)
}

fn format_value(value: f64, format: &CsvFormat) -> String {
    let text = format!("{value:.8}");
    if format.delimiter.decimal_comma() {
        text.replace('.', ",")
    } else {
        text
    }
}

/// Render points as file text: one row per point, 8 decimal digits per coordinate, a `0.0` z
/// column when the source had one, and a trailing newline.
pub fn format_profile(points: &[Point2], format: &CsvFormat) -> String {
    let sep = format.delimiter.separator();
    let z = if format.delimiter.decimal_comma() { "0,0" } else { "0.0" };

    let mut text = String::new();
    for p in points {
        let x = format_value(p.x, format);
        let y = format_value(p.y, format);
        let row = if format.has_z {
            format!("{x}{sep}{y}{sep}{z}\n")
        } else {
            format!("{x}{sep}{y}\n")
        };
        text.push_str(&row);
    }
    text
}

/// Write a corrected profile to the path derived from `source` with `corrected_path`, returning
/// the path that was written.
///
/// # Arguments
///
/// * `source`: the path of the file the profile was read from
/// * `points`: the corrected points
/// * `format`: the format detected in the source file
///
/// returns: Result<PathBuf, ProfileError>, failing with `CorrectionWriteFailed`
pub fn write_corrected(source: &Path, points: &[Point2], format: &CsvFormat) -> Result<PathBuf> {
    let path = corrected_path(source);
    std::fs::write(&path, format_profile(points, format)).map_err(|source| {
        ProfileError::CorrectionWriteFailed {
            path: path.clone(),
            source,
        }
    })?;

    info!(path = %path.display(), points = points.len(), "wrote corrected profile");
    Ok(path)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geom2::points_from;
    use crate::io::{Delimiter, ParseMode, read_profile_csv};

    #[test]
    fn comma_format() {
        let text = format_profile(&points_from(&[(1.0, 0.0), (0.5, -0.05)]), &CsvFormat::default());
        assert_eq!(text, "1.00000000,0.00000000\n0.50000000,-0.05000000\n");
    }

    #[test]
    fn semicolon_format_with_z() {
        let format = CsvFormat {
            delimiter: Delimiter::Semicolon,
            has_z: true,
        };
        let text = format_profile(&points_from(&[(0.5, 0.05)]), &format);
        assert_eq!(text, "0,50000000;0,05000000;0,0\n");
    }

    #[test]
    fn whitespace_format() {
        let format = CsvFormat {
            delimiter: Delimiter::Whitespace('\t'),
            has_z: false,
        };
        let text = format_profile(&points_from(&[(0.5, 0.05)]), &format);
        assert_eq!(text, "0.50000000\t0.05000000\n");
    }

    #[test]
    fn written_file_reads_back() {
        let dir = tempfile::tempdir().unwrap();
        let source = dir.path().join("foil.csv");
        let format = CsvFormat {
            delimiter: Delimiter::Semicolon,
            has_z: false,
        };
        let points = points_from(&[(1.0, 0.0), (0.5, 0.05), (0.0, 0.0), (0.5, -0.05), (1.0, 0.0)]);

        let written = write_corrected(&source, &points, &format).unwrap();
        assert_eq!(written, dir.path().join("foil_sort.csv"));

        let parsed = read_profile_csv(&written, ParseMode::Delimited).unwrap();
        assert_eq!(parsed.points, points);
        assert_eq!(parsed.format, format);
    }

    #[test]
    fn write_failure_is_reported() {
        let dir = tempfile::tempdir().unwrap();
        let source = dir.path().join("no_such_dir").join("foil.csv");
        let result = write_corrected(&source, &points_from(&[(1.0, 0.0)]), &CsvFormat::default());
        assert!(matches!(result, Err(ProfileError::CorrectionWriteFailed { .. })));
    }
}
