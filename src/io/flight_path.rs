//! Reader for 3D flight path files: rows of `x[,y[,z]]` in a chosen length unit, converted to
//! centimetres. Rows which do not start with a number (such as headers) are skipped.

use crate::geom3::Point3;
use crate::io::profile_csv::{parse_field, split_fields};
use crate::io::read_text;
use crate::units::LengthUnit;
use crate::{ProfileError, Result};
use tracing::debug;

fn parse_row(line: &str) -> Option<[f64; 3]> {
    let (delimiter, fields) = split_fields(line);
    let mut values = [0.0; 3];
    if fields.is_empty() {
        return None;
    }
    for (v, f) in values.iter_mut().zip(fields.iter()) {
        *v = parse_field(f, delimiter)?;
    }
    Some(values)
}

/// Parse the text of a flight path file into points in centimetres. A missing y or z column is
/// taken as zero.
pub fn parse_flight_path_text(text: &str, unit: LengthUnit) -> Vec<Point3> {
    let k = unit.to_cm();
    text.lines()
        .map(str::trim)
        .filter(|l| !l.is_empty() && !l.starts_with('#'))
        .filter_map(parse_row)
        .map(|[x, y, z]| Point3::new(x * k, y * k, z * k))
        .collect()
}

/// Read a flight path file, converting its coordinates from `unit` to centimetres.
///
/// # Arguments
///
/// * `path`: the file to read
/// * `unit`: the length unit the file's coordinates are given in
///
/// returns: Result<Vec<OPoint<f64, Const<3>>, Global>, ProfileError>, failing with
/// `InsufficientData` if fewer than two points were found, since no path can be drawn through
/// them
pub fn read_flight_path(path: &std::path::Path, unit: LengthUnit) -> Result<Vec<Point3>> {
    let points = parse_flight_path_text(&read_text(path)?, unit);
    debug!(points = points.len(), %unit, "read flight path");

    if points.len() < 2 {
        return Err(ProfileError::InsufficientData);
    }
    Ok(points)
}
