//! Currency amounts normalized to a 2-decimal, dot-separated string.
//!
//! Two notations are accepted:
//! - European, decimal comma with optional dot-grouped thousands:
//!   `1.234,56`, `12,34`, `12,5`
//! - Plain, dot decimal as emitted by spreadsheet conversion: `12.34`, `100`
//!
//! Double quotes are stripped before matching.

use once_cell::sync::Lazy;
use regex::Regex;

use crate::error::TableResult;
use crate::models::{CellRule, RowCheck, RowError};
use crate::table::DelimitedTable;

static EUROPEAN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^-?(\d{1,3}(\.\d{3})+|\d+),\d{1,2}$").expect("valid european amount pattern")
});

static PLAIN: Lazy<Regex> = Lazy::new(|| Regex::new(r"^-?\d+(\.\d+)?$").expect("valid plain amount pattern"));

/// Normalize `raw` to a `0.00` string, or return why it was rejected.
pub fn normalize_amount(raw: &str) -> Result<String, &'static str> {
    let value = raw.replace('"', "");
    let value = value.trim();

    if value.is_empty() {
        return Err("missing amount");
    }

    let decimal = if EUROPEAN.is_match(value) {
        value.replace('.', "").replace(',', ".")
    } else if PLAIN.is_match(value) {
        value.to_string()
    } else {
        return Err("unrecognized amount format");
    };

    let amount: f64 = decimal.parse().map_err(|_| "not a number")?;
    Ok(format!("{:.2}", amount))
}

/// Rewrite the cell as a 2-decimal amount or reject it.
pub fn check_amount(table: &mut DelimitedTable, row: usize, column: usize) -> TableResult<RowCheck> {
    let raw = table.cell(row, column)?;

    match normalize_amount(raw) {
        Ok(amount) => {
            table.set_cell(row, column, amount)?;
            Ok(RowCheck::Valid)
        }
        Err(reason) => Ok(RowCheck::Invalid(RowError::cell(CellRule::Amount.name(), column, raw, reason))),
    }
}
