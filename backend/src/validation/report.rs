//! Projection of rule failures into reportable log entries.

use crate::models::{LogEntry, LogKind, RowError};

/// Map each failure to an `ERROR` entry.
///
/// Failures from row-level rules carry no column and report column 0.
pub fn to_logs(errors: &[RowError]) -> Vec<LogEntry> {
    errors
        .iter()
        .map(|error| LogEntry {
            row: Some(error.row),
            column: Some(error.column.unwrap_or(0)),
            kind: LogKind::Error,
            message: error.message.clone(),
        })
        .collect()
}

/// Print every failure to stderr.
pub fn print_errors(errors: &[RowError]) {
    for error in errors {
        eprintln!("Error on row {}: {}", error.row, error.message);
    }
}
