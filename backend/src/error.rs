//! Error types for the Spesafix validation pipeline.
//!
//! - [`TableError`] - Out-of-range access on a [`crate::table::DelimitedTable`]
//! - [`InputError`] - Reading, decoding and converting input files
//! - [`PipelineError`] - Top-level orchestration errors
//! - [`ServerError`] - HTTP layer errors
//!
//! Cell-level rejections are not errors: rules report them as
//! [`crate::models::RowCheck::Invalid`] so a scan never stops early.
//! Only access faults travel through these types.

use thiserror::Error;

// =============================================================================
// Table Access Errors
// =============================================================================

/// Grid access outside the materialized rows/columns.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TableError {
    /// Cell coordinates outside the grid.
    #[error("Cell ({row}, {column}) out of range: table has {rows} rows, row has {columns} columns")]
    IndexOutOfRange {
        row: usize,
        column: usize,
        rows: usize,
        columns: usize,
    },

    /// Row index outside the grid.
    #[error("Row {row} out of range: table has {rows} rows")]
    RowOutOfRange { row: usize, rows: usize },

    /// Column index outside the header row.
    #[error("Column {column} out of range: header has {columns} columns")]
    ColumnOutOfRange { column: usize, columns: usize },

    /// The table has no rows at all.
    #[error("Table is empty")]
    EmptyTable,
}

// =============================================================================
// Input Errors
// =============================================================================

/// Errors while turning a file or upload into delimited text.
#[derive(Debug, Error)]
pub enum InputError {
    /// Failed to read file.
    #[error("Failed to read file: {0}")]
    IoError(#[from] std::io::Error),

    /// Bytes could not be decoded with the detected encoding.
    #[error("Failed to decode content as {encoding}: {message}")]
    EncodingError { encoding: String, message: String },

    /// The spreadsheet reader rejected the workbook.
    #[error("Spreadsheet error: {0}")]
    SpreadsheetError(String),

    /// Workbook without any sheet.
    #[error("Workbook has no sheets")]
    NoSheets,
}

// =============================================================================
// Pipeline Errors (top-level)
// =============================================================================

/// Top-level errors returned by [`crate::pipeline::validate_text`] and friends.
#[derive(Debug, Error)]
pub enum PipelineError {
    /// Input loading error.
    #[error("Input error: {0}")]
    Input(#[from] InputError),

    /// Grid access fault raised by a rule.
    #[error("Table error: {0}")]
    Table(#[from] TableError),

    /// Nothing to validate: no data rows below the header.
    #[error("No data rows to validate")]
    EmptyInput,

    /// Writing the corrected output failed.
    #[error("Failed to save output: {0}")]
    Save(std::io::Error),
}

// =============================================================================
// Server Errors
// =============================================================================

/// HTTP server errors.
#[derive(Debug, Error)]
pub enum ServerError {
    /// Pipeline error.
    #[error("Pipeline error: {0}")]
    Pipeline(#[from] PipelineError),

    /// Invalid request.
    #[error("Invalid request: {0}")]
    BadRequest(String),

    /// Server internal error.
    #[error("Internal server error: {0}")]
    Internal(String),
}

// =============================================================================
// Result Type Aliases
// =============================================================================

/// Result type for table access.
pub type TableResult<T> = Result<T, TableError>;

/// Result type for input loading.
pub type InputResult<T> = Result<T, InputError>;

/// Result type for pipeline operations.
pub type PipelineResult<T> = Result<T, PipelineError>;

/// Result type for server operations.
pub type ServerResult<T> = Result<T, ServerError>;
