//! Reading and writing of the plain text coordinate files that profiles and flight paths are
//! exchanged in.
//!
//! Files hold one record per line. Blank lines and lines starting with `#` are ignored. Fields
//! are separated by `;` (in which case `,` is the decimal separator), by `,`, or by whitespace,
//! and the separator is detected independently on every line.

mod corrected;
mod flight_path;
mod profile_csv;

pub use corrected::{CORRECTED_SUFFIX, corrected_path, format_profile, write_corrected};
pub use flight_path::{parse_flight_path_text, read_flight_path};
pub use profile_csv::{
    CsvFormat, Delimiter, ParseMode, ParsedProfile, parse_profile_text, read_profile_csv,
};

use crate::{ProfileError, Result};
use std::path::Path;

/// Read a whole text file, replacing invalid UTF-8 and dropping a leading byte order mark
pub(crate) fn read_text(path: &Path) -> Result<String> {
    let bytes = std::fs::read(path).map_err(|source| ProfileError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    let text = String::from_utf8_lossy(&bytes);
    Ok(text.trim_start_matches('\u{feff}').to_string())
}
