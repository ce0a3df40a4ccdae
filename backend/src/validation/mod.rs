//! Rule engine: applies row and cell rules to every data row of a table.
//!
//! Both entry points skip the header (row 0), visit rows in ascending order,
//! never stop at the first rejection, and stamp each failure with its
//! 1-based, header-inclusive row number (the first data row is row 2).
//!
//! A rule rejecting a cell is data ([`RowCheck::Invalid`]). A rule touching a
//! cell outside the grid is an `Err` and aborts the scan.
//!
//! # Example
//!
//! ```
//! use spesafix::{check_and_fix, DelimitedTable, RowCheck};
//!
//! let mut table = DelimitedTable::parse("code;n\nx;1\ny;22", ';');
//! let failures = check_and_fix(&mut table, 1, |t, row, col| {
//!     let value = t.cell(row, col)?.to_string();
//!     if value.len() > 1 {
//!         return Ok(RowCheck::Invalid(spesafix::RowError::new("too long")));
//!     }
//!     t.set_cell(row, col, format!("0{}", value))?;
//!     Ok(RowCheck::Valid)
//! }).unwrap();
//!
//! assert_eq!(failures.len(), 1);
//! assert_eq!(failures[0].row, 3);
//! assert_eq!(table.cell(1, 1).unwrap(), "01");
//! ```

pub mod report;

use crate::error::TableResult;
use crate::models::{Correction, RowCheck, RowError};
use crate::table::DelimitedTable;

pub use report::{print_errors, to_logs};

/// Failures and corrections from one cell rule over one column.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ColumnReport {
    pub failures: Vec<RowError>,
    pub corrections: Vec<Correction>,
}

/// Run a row-level rule on every data row and return the failures.
pub fn check_rows<F>(table: &DelimitedTable, mut check_row: F) -> TableResult<Vec<RowError>>
where
    F: FnMut(&DelimitedTable, usize) -> TableResult<RowCheck>,
{
    let mut errors = Vec::new();

    for row in 1..table.row_count() {
        if let RowCheck::Invalid(mut error) = check_row(table, row)? {
            error.row = row + 1;
            errors.push(error);
        }
    }

    Ok(errors)
}

/// Run a cell rule on `column` of every data row and return the failures.
///
/// The rule may rewrite the cell through [`DelimitedTable::set_cell`] before
/// reporting success.
pub fn check_and_fix<F>(table: &mut DelimitedTable, column: usize, check_cell: F) -> TableResult<Vec<RowError>>
where
    F: FnMut(&mut DelimitedTable, usize, usize) -> TableResult<RowCheck>,
{
    fix_column(table, column, check_cell).map(|report| report.failures)
}

/// Like [`check_and_fix`], also recording every cell a successful rule changed.
pub fn fix_column<F>(table: &mut DelimitedTable, column: usize, mut check_cell: F) -> TableResult<ColumnReport>
where
    F: FnMut(&mut DelimitedTable, usize, usize) -> TableResult<RowCheck>,
{
    let mut report = ColumnReport::default();

    for row in 1..table.row_count() {
        let before = table.cell(row, column).ok().map(str::to_string);

        match check_cell(table, row, column)? {
            RowCheck::Valid => {
                // a row too short for `column` has nothing to audit
                let Some(before) = before else {
                    continue;
                };
                let after = table.cell(row, column)?;
                if before != after {
                    report.corrections.push(Correction {
                        row: row + 1,
                        column,
                        from: before,
                        to: after.to_string(),
                    });
                }
            }
            RowCheck::Invalid(mut error) => {
                error.row = row + 1;
                report.failures.push(error);
            }
        }
    }

    Ok(report)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::TableError;

    fn table() -> DelimitedTable {
        DelimitedTable::parse("h1;h2\na;1\nb;2\nc;3", ';')
    }

    #[test]
    fn test_check_rows_skips_header() {
        let table = table();
        let mut visited = Vec::new();

        let errors = check_rows(&table, |_, row| {
            visited.push(row);
            Ok(RowCheck::Valid)
        })
        .unwrap();

        assert!(errors.is_empty());
        assert_eq!(visited, vec![1, 2, 3]);
    }

    #[test]
    fn test_check_rows_stamps_human_row_numbers() {
        let table = table();
        let errors = check_rows(&table, |_, _| Ok(RowCheck::Invalid(RowError::new("bad")))).unwrap();

        let rows: Vec<usize> = errors.iter().map(|e| e.row).collect();
        assert_eq!(rows, vec![2, 3, 4]);
    }

    #[test]
    fn test_check_and_fix_keeps_going_after_failure() {
        let mut table = table();
        let mut calls = 0;

        let errors = check_and_fix(&mut table, 1, |t, row, col| {
            calls += 1;
            if t.cell(row, col)? == "2" {
                return Ok(RowCheck::Invalid(RowError::cell("n", col, "2", "even")));
            }
            Ok(RowCheck::Valid)
        })
        .unwrap();

        assert_eq!(calls, 3);
        assert_eq!(errors.len(), 1);
        assert_eq!(errors[0].row, 3);
    }

    #[test]
    fn test_fix_column_records_corrections() {
        let mut table = table();

        let report = fix_column(&mut table, 0, |t, row, col| {
            let upper = t.cell(row, col)?.to_uppercase();
            if upper == "B" {
                return Ok(RowCheck::Invalid(RowError::new("no b")));
            }
            t.set_cell(row, col, upper)?;
            Ok(RowCheck::Valid)
        })
        .unwrap();

        assert_eq!(report.failures.len(), 1);
        assert_eq!(report.corrections.len(), 2);
        assert_eq!(report.corrections[0].row, 2);
        assert_eq!(report.corrections[0].to, "A");
        assert_eq!(table.cell(0, 0).unwrap(), "h1");
        assert_eq!(table.cell(2, 0).unwrap(), "b");
    }

    #[test]
    fn test_access_fault_propagates() {
        let mut table = table();
        let result = check_and_fix(&mut table, 7, |t, row, col| {
            t.cell(row, col)?;
            Ok(RowCheck::Valid)
        });

        assert!(matches!(result, Err(TableError::IndexOutOfRange { column: 7, .. })));
    }

    #[test]
    fn test_header_only_table_invokes_nothing() {
        let table = DelimitedTable::parse("a;b", ';');
        let mut calls = 0;
        check_rows(&table, |_, _| {
            calls += 1;
            Ok(RowCheck::Valid)
        })
        .unwrap();
        assert_eq!(calls, 0);
    }

    #[test]
    fn test_fix_column_tolerates_short_row_left_alone() {
        let mut table = DelimitedTable::parse("h1;h2\na;1\n\nc;3", ';');

        let report = fix_column(&mut table, 1, |t, row, col| {
            if t.cell(row, col).is_err() {
                return Ok(RowCheck::Valid);
            }
            t.set_cell(row, col, "x")?;
            Ok(RowCheck::Valid)
        })
        .unwrap();

        assert!(report.failures.is_empty());
        let rows: Vec<usize> = report.corrections.iter().map(|c| c.row).collect();
        assert_eq!(rows, vec![2, 4]);
    }
}
