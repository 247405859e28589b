//! Structural split of an export into header and rows.

use tracing::debug;

use crate::models::record_set::RecordSet;
use crate::schema::LINE_SEPARATOR;

/// Split raw export text into its header line and record lines.
///
/// The first line is the header and every following line is a row, in input
/// order. Nothing is validated here, so this never fails: a trailing newline
/// yields a final empty row and empty input yields an empty header.
pub fn parse(raw: &str) -> RecordSet {
    let mut lines = raw.split(LINE_SEPARATOR);
    let header = lines.next().unwrap_or_default();
    let rows: Vec<String> = lines.map(str::to_string).collect();

    debug!("Parsed export with {} rows", rows.len());

    RecordSet::new(header, rows)
}
