//! Catalog of column rules for expense records.
//!
//! | Rule         | Normalization                   | Rejects when                          |
//! |--------------|---------------------------------|---------------------------------------|
//! | column count | -                               | header column count differs           |
//! | row width    | -                               | row has more or fewer cells than header |
//! | fiscal code  | trimmed, upper-cased            | validator rejects the code            |
//! | owner type   | zero-padded to 3 digits         | not an integer, or raw cell longer than 3 |
//! | date         | `DDMMYYYY`                      | see [`date`]                          |
//! | amount       | 2 decimals, dot separator       | see [`amount`]                        |
//!
//! Cell rules rewrite their cell only on success. [`RuleSet`] binds the
//! rules to their collaborators (fiscal-code validator, reference year,
//! expected column count) and dispatches on [`CellRule`].

pub mod amount;
pub mod date;
pub mod fiscal_code;

use chrono::{Datelike, Local};

use crate::config::Config;
use crate::error::TableResult;
use crate::models::{CellRule, RowCheck, RowError, EXPECTED_COLUMNS};
use crate::table::DelimitedTable;

pub use amount::{check_amount, normalize_amount};
pub use date::{check_date, normalize_date, resolve_century};
pub use fiscal_code::{check_fiscal_code, ChecksumValidator, FiscalCodeValidator};

/// Maximum length of an owner-type code.
pub const OWNER_TYPE_WIDTH: usize = 3;

/// Reject every row when the header does not have `expected` columns.
///
/// The row index is not inspected: the check is file-level but reported
/// once per data row.
pub fn check_column_count(table: &DelimitedTable, _row: usize, expected: usize) -> TableResult<RowCheck> {
    let columns = table.column_count();
    if columns != expected {
        return Ok(RowCheck::Invalid(RowError::new(format!(
            "Invalid number of columns: {} (expected {})",
            columns, expected
        ))));
    }
    Ok(RowCheck::Valid)
}

/// Reject a data row whose cell count differs from the header's.
pub fn check_row_width(table: &DelimitedTable, row: usize) -> TableResult<RowCheck> {
    let width = table.row_width(row)?;
    let columns = table.column_count();
    if width != columns {
        return Ok(RowCheck::Invalid(RowError::new(format!(
            "Invalid number of cells: {} (header has {})",
            width, columns
        ))));
    }
    Ok(RowCheck::Valid)
}

/// Left-pad an integer code to three digits.
///
/// Surrounding blanks are dropped, but count toward the length limit.
pub fn check_owner_type(table: &mut DelimitedTable, row: usize, column: usize) -> TableResult<RowCheck> {
    let raw = table.cell(row, column)?;
    let code = raw.trim();

    let reason = if code.is_empty() || !code.bytes().all(|b| b.is_ascii_digit()) {
        Some("not an integer")
    } else if raw.len() > OWNER_TYPE_WIDTH {
        Some("longer than 3 digits")
    } else {
        None
    };

    if let Some(reason) = reason {
        return Ok(RowCheck::Invalid(RowError::cell(CellRule::OwnerType.name(), column, raw, reason)));
    }

    let padded = format!("{:0>width$}", code, width = OWNER_TYPE_WIDTH);
    table.set_cell(row, column, padded)?;
    Ok(RowCheck::Valid)
}

/// The rule catalog with its collaborators.
pub struct RuleSet {
    fiscal_codes: Box<dyn FiscalCodeValidator>,
    reference_year: i32,
    expected_columns: usize,
}

impl RuleSet {
    /// Checksum fiscal-code validation, current year, 15 columns.
    pub fn new() -> Self {
        Self {
            fiscal_codes: Box::new(ChecksumValidator),
            reference_year: Local::now().year(),
            expected_columns: EXPECTED_COLUMNS,
        }
    }

    /// Rules configured from `config`.
    pub fn from_config(config: &Config) -> Self {
        RuleSet::new().with_expected_columns(config.expected_columns)
    }

    /// Use another fiscal-code validator.
    pub fn with_validator(mut self, validator: impl FiscalCodeValidator + 'static) -> Self {
        self.fiscal_codes = Box::new(validator);
        self
    }

    /// Year used to resolve two-digit years.
    pub fn with_reference_year(mut self, year: i32) -> Self {
        self.reference_year = year;
        self
    }

    pub fn with_expected_columns(mut self, columns: usize) -> Self {
        self.expected_columns = columns;
        self
    }

    pub fn reference_year(&self) -> i32 {
        self.reference_year
    }

    pub fn expected_columns(&self) -> usize {
        self.expected_columns
    }

    /// Row-level column-count check, shaped for [`crate::validation::check_rows`].
    pub fn check_column_count(&self, table: &DelimitedTable, row: usize) -> TableResult<RowCheck> {
        check_column_count(table, row, self.expected_columns)
    }

    /// Row-level cell-count check, shaped for [`crate::validation::check_rows`].
    pub fn check_row_width(&self, table: &DelimitedTable, row: usize) -> TableResult<RowCheck> {
        check_row_width(table, row)
    }

    /// Apply `rule` to one cell, shaped for [`crate::validation::check_and_fix`].
    pub fn check_cell(&self, rule: CellRule, table: &mut DelimitedTable, row: usize, column: usize) -> TableResult<RowCheck> {
        match rule {
            CellRule::FiscalCode => check_fiscal_code(table, row, column, self.fiscal_codes.as_ref()),
            CellRule::OwnerType => check_owner_type(table, row, column),
            CellRule::Date => check_date(table, row, column, self.reference_year),
            CellRule::Amount => check_amount(table, row, column),
        }
    }
}

impl Default for RuleSet {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for RuleSet {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RuleSet")
            .field("reference_year", &self.reference_year)
            .field("expected_columns", &self.expected_columns)
            .finish_non_exhaustive()
    }
}
