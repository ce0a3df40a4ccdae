//! # Spesafix - validation and correction of expense records
//!
//! Spesafix reads healthcare expense records from spreadsheets or delimited
//! text, checks every data row against a fixed 15-column schema, rewrites
//! accepted cells to canonical form and reports every rejection with its row
//! and column.
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────┐     ┌─────────────┐     ┌─────────────┐     ┌─────────────┐
//! │ XLSX / CSV  │────▶│   Parser    │────▶│   Table     │────▶│ Rule engine │
//! │   bytes     │     │ (auto-enc)  │     │ (auto-sep)  │     │ + catalog   │
//! └─────────────┘     └─────────────┘     └─────────────┘     └──────┬──────┘
//!                                                                    ▼
//!                                                     corrected text + logs
//! ```
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use spesafix::{validate_file, Config};
//!
//! let report = validate_file("spese.csv", &Config::from_env())?;
//! for failure in &report.failures {
//!     println!("{}", failure);
//! }
//! ```
//!
//! ## Modules
//!
//! - [`error`] - Hierarchical error types
//! - [`models`] - Column schema, rule outcomes, log entries
//! - [`table`] - Delimited table with separator detection
//! - [`parser`] - Encoding detection and spreadsheet conversion
//! - [`validation`] - Rule engine and error log
//! - [`rules`] - Column rule catalog
//! - [`pipeline`] - End-to-end validation
//! - [`config`] - Environment configuration
//! - [`api`] - HTTP API server

// Core modules
pub mod config;
pub mod error;
pub mod models;

// Input
pub mod parser;
pub mod table;

// Validation
pub mod rules;
pub mod validation;

pub mod pipeline;

// HTTP API
pub mod api;

// =============================================================================
// Re-exports
// =============================================================================

pub use config::Config;

pub use error::{InputError, PipelineError, ServerError, TableError};

pub use models::{CellRule, Column, Correction, LogEntry, LogKind, RowCheck, RowError, EXPECTED_COLUMNS};

pub use table::DelimitedTable;

pub use parser::{decode_content, detect_encoding, load_bytes, load_file, spreadsheet_to_delimited, LoadedInput};

pub use validation::{check_and_fix, check_rows, fix_column, print_errors, to_logs, ColumnReport};

pub use rules::{ChecksumValidator, FiscalCodeValidator, RuleSet};

pub use pipeline::{save, validate_bytes, validate_file, validate_text, validate_text_with, ValidationReport};

// Server
pub mod server {
    pub use crate::api::server::start_server;
}
