//! Tokenizer for profile coordinate files. Malformed lines are skipped rather than reported, so
//! the only failure a caller sees is a file which cannot be read at all. Deciding whether the
//! points that were found are enough to work with is left to the caller.

use crate::Result;
use crate::geom2::Point2;
use crate::io::read_text;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::sync::OnceLock;
use tracing::debug;

/// The field separator of a coordinate file
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Delimiter {
    /// `;` separated fields with `,` used as the decimal separator
    Semicolon,
    Comma,

    /// Runs of whitespace, remembering the character used so that output can match (a tab or a
    /// space)
    Whitespace(char),
}

impl Delimiter {
    /// Detect the delimiter of a single line. `;` takes priority over `,`, and whitespace is only
    /// used when neither is present.
    pub fn detect(line: &str) -> Self {
        if line.contains(';') {
            Delimiter::Semicolon
        } else if line.contains(',') {
            Delimiter::Comma
        } else if line.contains('\t') {
            Delimiter::Whitespace('\t')
        } else {
            Delimiter::Whitespace(' ')
        }
    }

    /// True if numbers in fields separated by this delimiter use a decimal comma
    pub fn decimal_comma(&self) -> bool {
        matches!(self, Delimiter::Semicolon)
    }

    /// The separator written between fields
    pub fn separator(&self) -> char {
        match self {
            Delimiter::Semicolon => ';',
            Delimiter::Comma => ',',
            Delimiter::Whitespace(c) => *c,
        }
    }
}

/// The layout of a coordinate file, detected from its first accepted data row and used to write
/// corrected copies in the same convention as the source
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CsvFormat {
    pub delimiter: Delimiter,

    /// The source rows had a third (z) column
    pub has_z: bool,
}

impl Default for CsvFormat {
    fn default() -> Self {
        Self {
            delimiter: Delimiter::Comma,
            has_z: false,
        }
    }
}

/// Strategy for turning lines into coordinates
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ParseMode {
    /// Split each line on its detected delimiter and parse the first two fields
    Delimited,

    /// Extract every number-looking substring of each line and take the first two
    Loose,

    /// Use `Delimited`, falling back to `Loose` if it found fewer than two points
    #[default]
    Auto,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ParsedProfile {
    pub points: Vec<Point2>,
    pub format: CsvFormat,

    /// Count of non-blank, non-comment lines which did not yield a point
    pub skipped: usize,
}

/// Lines which carry data, trimmed, in file order
fn data_lines(text: &str) -> impl Iterator<Item = &str> {
    text.lines()
        .map(str::trim)
        .filter(|l| !l.is_empty() && !l.starts_with('#'))
}

/// Split a data line into its non-empty fields, returning the detected delimiter with them
pub(crate) fn split_fields(line: &str) -> (Delimiter, Vec<&str>) {
    let delimiter = Delimiter::detect(line);
    let fields = match delimiter {
        Delimiter::Whitespace(_) => line.split_whitespace().collect(),
        d => line
            .split(d.separator())
            .map(str::trim)
            .filter(|f| !f.is_empty())
            .collect(),
    };
    (delimiter, fields)
}

/// Parse a single numeric field, normalizing a decimal comma when the delimiter implies one.
/// Non-finite values are rejected.
pub(crate) fn parse_field(field: &str, delimiter: Delimiter) -> Option<f64> {
    let value = if delimiter.decimal_comma() {
        field.replace(',', ".").parse::<f64>().ok()?
    } else {
        field.parse::<f64>().ok()?
    };
    value.is_finite().then_some(value)
}

fn parse_delimited(text: &str) -> ParsedProfile {
    let mut points = Vec::new();
    let mut format = None;
    let mut skipped = 0;

    for line in data_lines(text) {
        let (delimiter, fields) = split_fields(line);
        let parsed = match fields.as_slice() {
            [x, y, ..] => parse_field(x, delimiter).zip(parse_field(y, delimiter)),
            _ => None,
        };

        match parsed {
            Some((x, y)) => {
                points.push(Point2::new(x, y));
                format.get_or_insert(CsvFormat {
                    delimiter,
                    has_z: fields.len() >= 3,
                });
            }
            None => skipped += 1,
        }
    }

    ParsedProfile {
        points,
        format: format.unwrap_or_default(),
        skipped,
    }
}

fn number_pattern() -> &'static Regex {
    static NUMBER: OnceLock<Regex> = OnceLock::new();
    NUMBER.get_or_init(|| {
        Regex::new(r"[-+]?(?:\d+\.?\d*|\.\d+)(?:[eE][-+]?\d+)?").expect("invalid regex pattern")
    })
}

fn parse_loose(text: &str) -> ParsedProfile {
    let mut points = Vec::new();
    let mut format = None;
    let mut skipped = 0;

    for line in data_lines(text) {
        let delimiter = Delimiter::detect(line);
        let normalized = if delimiter.decimal_comma() {
            line.replace(',', ".")
        } else {
            line.to_string()
        };

        let values = number_pattern()
            .find_iter(&normalized)
            .filter_map(|m| m.as_str().parse::<f64>().ok())
            .filter(|v| v.is_finite())
            .collect::<Vec<_>>();

        match values.as_slice() {
            [x, y, ..] => {
                points.push(Point2::new(*x, *y));
                format.get_or_insert(CsvFormat {
                    delimiter,
                    has_z: values.len() >= 3,
                });
            }
            _ => skipped += 1,
        }
    }

    ParsedProfile {
        points,
        format: format.unwrap_or_default(),
        skipped,
    }
}

/// Parse the text of a profile coordinate file.
///
/// # Arguments
///
/// * `text`: the full file contents
/// * `mode`: the tokenizer strategy to use
///
/// returns: ParsedProfile
///
/// # Examples
///
/// ```
/// use foilcsv::io::{parse_profile_text, Delimiter, ParseMode};
/// use foilcsv::Point2;
///
/// let parsed = parse_profile_text("1,0;0,0\n0,5;0,05\n", ParseMode::Delimited);
/// assert_eq!(parsed.points, vec![Point2::new(1.0, 0.0), Point2::new(0.5, 0.05)]);
/// assert_eq!(parsed.format.delimiter, Delimiter::Semicolon);
/// ```
pub fn parse_profile_text(text: &str, mode: ParseMode) -> ParsedProfile {
    let parsed = match mode {
        ParseMode::Delimited => parse_delimited(text),
        ParseMode::Loose => parse_loose(text),
        ParseMode::Auto => {
            let delimited = parse_delimited(text);
            if delimited.points.len() >= 2 {
                delimited
            } else {
                debug!("delimited parse found too few points, retrying with loose tokenizer");
                parse_loose(text)
            }
        }
    };

    debug!(
        points = parsed.points.len(),
        skipped = parsed.skipped,
        format = ?parsed.format,
        "parsed profile text"
    );
    parsed
}

/// Read and parse a profile coordinate file. Fails only if the file cannot be read.
pub fn read_profile_csv(path: &Path, mode: ParseMode) -> Result<ParsedProfile> {
    let text = read_text(path)?;
    Ok(parse_profile_text(&text, mode))
}
