//! In-memory delimited table with separator auto-detection.
//!
//! A [`DelimitedTable`] is a plain grid of string cells. Row 0 is the header.
//! No quoting or escaping is interpreted: lines are split on the separator
//! as-is, which is what the spreadsheet converter produces.
//!
//! # Example
//!
//! ```
//! use spesafix::DelimitedTable;
//!
//! let table = DelimitedTable::parse("a,b\n1,2", ';');
//! assert_eq!(table.separator(), ',');
//! assert_eq!(table.cell(1, 1).unwrap(), "2");
//! ```

use std::fmt;

use crate::error::{TableError, TableResult};

/// Separators tried, in order, after the caller's preferred one.
pub const FALLBACK_SEPARATORS: [char; 3] = [';', ',', '\t'];

/// A row/column grid parsed from delimited text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DelimitedTable {
    source: String,
    separator: char,
    line_ending: &'static str,
    trailing_newline: bool,
    data: Vec<Vec<String>>,
}

impl DelimitedTable {
    /// Parse `text`, starting with `preferred` as the field separator.
    ///
    /// `preferred` is kept when it gives at least two rows and at least two
    /// header columns. Otherwise `;`, `,` and tab are tried in turn, each
    /// re-splitting the whole text, and the first giving two header columns
    /// wins. When none does, the last candidate's grid is kept and the shape
    /// problem is left to the column-count rule.
    pub fn parse(text: &str, preferred: char) -> Self {
        let line_ending = if text.contains("\r\n") { "\r\n" } else { "\n" };
        let trailing_newline = text.ends_with('\n');

        let body = text
            .strip_suffix(line_ending)
            .or_else(|| text.strip_suffix('\n'))
            .unwrap_or(text);
        let lines: Vec<&str> = body
            .split('\n')
            .map(|line| line.strip_suffix('\r').unwrap_or(line))
            .collect();

        let wide = |data: &[Vec<String>]| data.first().is_some_and(|header| header.len() >= 2);

        let mut separator = preferred;
        let mut data = split_lines(&lines, preferred);
        if data.len() < 2 || !wide(&data) {
            for candidate in FALLBACK_SEPARATORS {
                separator = candidate;
                data = split_lines(&lines, candidate);
                if wide(&data) {
                    break;
                }
            }
        }

        Self {
            source: text.to_string(),
            separator,
            line_ending,
            trailing_newline,
            data,
        }
    }

    /// The raw text this table was parsed from.
    pub fn source(&self) -> &str {
        &self.source
    }

    /// The detected field separator.
    pub fn separator(&self) -> char {
        self.separator
    }

    /// Number of rows, header included.
    pub fn row_count(&self) -> usize {
        self.data.len()
    }

    /// Number of columns, measured on the header row.
    pub fn column_count(&self) -> usize {
        self.data.first().map_or(0, Vec::len)
    }

    /// Number of cells in one row, which may differ from the header's.
    pub fn row_width(&self, row: usize) -> TableResult<usize> {
        self.data.get(row).map(Vec::len).ok_or(TableError::RowOutOfRange {
            row,
            rows: self.row_count(),
        })
    }

    /// The header row.
    pub fn headers(&self) -> TableResult<&[String]> {
        self.data
            .first()
            .map(Vec::as_slice)
            .ok_or(TableError::EmptyTable)
    }

    /// Read one cell (zero-based coordinates).
    pub fn cell(&self, row: usize, column: usize) -> TableResult<&str> {
        self.data
            .get(row)
            .and_then(|cells| cells.get(column))
            .map(String::as_str)
            .ok_or_else(|| self.out_of_range(row, column))
    }

    /// Overwrite one cell (zero-based coordinates).
    pub fn set_cell(&mut self, row: usize, column: usize, value: impl Into<String>) -> TableResult<()> {
        let err = self.out_of_range(row, column);
        let cell = self
            .data
            .get_mut(row)
            .and_then(|cells| cells.get_mut(column))
            .ok_or(err)?;
        *cell = value.into();
        Ok(())
    }

    /// Copy of one row.
    pub fn row(&self, row: usize) -> TableResult<Vec<String>> {
        self.data.get(row).cloned().ok_or(TableError::RowOutOfRange {
            row,
            rows: self.row_count(),
        })
    }

    /// Copy of one column across all rows, header included.
    ///
    /// Fails on the first row too short to hold `column`.
    pub fn column(&self, column: usize) -> TableResult<Vec<String>> {
        if column >= self.column_count() {
            return Err(TableError::ColumnOutOfRange {
                column,
                columns: self.column_count(),
            });
        }
        (0..self.row_count())
            .map(|row| self.cell(row, column).map(str::to_string))
            .collect()
    }

    /// Iterate over all rows, header included.
    pub fn rows(&self) -> impl Iterator<Item = &[String]> {
        self.data.iter().map(Vec::as_slice)
    }

    /// Rejoin the grid into text using the table's separator or `separator`.
    ///
    /// Line endings and the presence of a final newline follow the source.
    pub fn serialize(&self, separator: Option<char>) -> String {
        let sep = separator.unwrap_or(self.separator).to_string();
        let mut out = self
            .data
            .iter()
            .map(|row| row.join(&sep))
            .collect::<Vec<_>>()
            .join(self.line_ending);
        if self.trailing_newline {
            out.push_str(self.line_ending);
        }
        out
    }

    fn out_of_range(&self, row: usize, column: usize) -> TableError {
        TableError::IndexOutOfRange {
            row,
            column,
            rows: self.row_count(),
            columns: self.data.get(row).map_or(0, Vec::len),
        }
    }
}

impl fmt::Display for DelimitedTable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.serialize(None))
    }
}

fn split_lines(lines: &[&str], separator: char) -> Vec<Vec<String>> {
    lines
        .iter()
        .map(|line| line.split(separator).map(str::to_string).collect())
        .collect()
}

/// Printable name of a separator (tab is shown as `TAB`).
pub fn format_separator(separator: char) -> String {
    match separator {
        '\t' => "TAB".to_string(),
        c => c.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_semicolon_round_trip() {
        let text = "a;b;c\n1;2;3\n4;5;6";
        let table = DelimitedTable::parse(text, ';');

        assert_eq!(table.separator(), ';');
        assert_eq!(table.row_count(), 3);
        assert_eq!(table.column_count(), 3);
        assert_eq!(table.serialize(None), text);
    }

    #[test]
    fn test_trailing_newline_round_trip() {
        let text = "a;b\n1;2\n";
        let table = DelimitedTable::parse(text, ';');

        assert_eq!(table.row_count(), 2);
        assert_eq!(table.serialize(None), text);
    }

    #[test]
    fn test_crlf_round_trip() {
        let text = "a;b\r\n1;2\r\n";
        let table = DelimitedTable::parse(text, ';');

        assert_eq!(table.cell(1, 1).unwrap(), "2");
        assert_eq!(table.to_string(), text);
    }

    #[test]
    fn test_detects_comma_when_semicolon_requested() {
        let table = DelimitedTable::parse("name,age\nAlice,30", ';');

        assert_eq!(table.separator(), ',');
        assert_eq!(table.column_count(), 2);
        assert_eq!(table.cell(1, 0).unwrap(), "Alice");
    }

    #[test]
    fn test_detects_tab() {
        let table = DelimitedTable::parse("a\tb\n1\t2", ';');
        assert_eq!(table.separator(), '\t');
    }

    #[test]
    fn test_detects_semicolon_when_comma_requested() {
        let table = DelimitedTable::parse("a;b\n1;2", ',');
        assert_eq!(table.separator(), ';');
    }

    #[test]
    fn test_single_line_keeps_wide_fallback() {
        let table = DelimitedTable::parse("a;b", ',');
        assert_eq!(table.separator(), ';');
        assert_eq!(table.column_count(), 2);
        assert_eq!(table.row_count(), 1);

        let table = DelimitedTable::parse("a;b", ';');
        assert_eq!(table.separator(), ';');
    }

    #[test]
    fn test_no_qualifying_separator_keeps_last_candidate() {
        let table = DelimitedTable::parse("single\nvalue", ';');

        assert_eq!(table.separator(), '\t');
        assert_eq!(table.column_count(), 1);
        assert_eq!(table.row_count(), 2);
    }

    #[test]
    fn test_out_of_range_access_fails() {
        let mut table = DelimitedTable::parse("a;b\n1;2", ';');

        assert!(matches!(
            table.cell(5, 0),
            Err(TableError::IndexOutOfRange { row: 5, .. })
        ));
        assert!(table.set_cell(1, 9, "x").is_err());
        assert!(matches!(table.row(2), Err(TableError::RowOutOfRange { .. })));
        assert!(matches!(table.column(2), Err(TableError::ColumnOutOfRange { .. })));
    }

    #[test]
    fn test_ragged_column_fails() {
        let table = DelimitedTable::parse("a;b\n1", ';');
        assert_eq!(table.row_width(1).unwrap(), 1);
        assert!(table.row_width(2).is_err());
        assert!(table.column(1).is_err());
        assert_eq!(table.column(0).unwrap(), vec!["a", "1"]);
    }

    #[test]
    fn test_row_copy_does_not_alias() {
        let mut table = DelimitedTable::parse("a;b\n1;2", ';');
        let mut row = table.row(1).unwrap();
        row[0] = "changed".to_string();

        assert_eq!(table.cell(1, 0).unwrap(), "1");
        table.set_cell(1, 0, "set").unwrap();
        assert_eq!(table.cell(1, 0).unwrap(), "set");
    }

    #[test]
    fn test_serialize_with_override() {
        let table = DelimitedTable::parse("a;b\n1;2", ';');
        assert_eq!(table.serialize(Some(',')), "a,b\n1,2");
        assert_eq!(table.source(), "a;b\n1;2");
    }

    #[test]
    fn test_empty_text() {
        let table = DelimitedTable::parse("", ';');
        assert_eq!(table.row_count(), 1);
        assert_eq!(table.column_count(), 1);
        assert_eq!(table.serialize(None), "");
    }
}
