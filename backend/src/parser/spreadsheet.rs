//! Spreadsheet to delimited text conversion.
//!
//! Reads the first sheet of a workbook with calamine and emits it with `;`
//! between fields and `\n` between rows.

use calamine::{open_workbook_auto_from_rs, Data, Reader};
use std::io::Cursor;

use crate::error::{InputError, InputResult};

/// Field separator of converted sheets.
pub const SHEET_SEPARATOR: char = ';';

/// Convert the first sheet of an xlsx/xls/ods workbook to delimited text.
pub fn spreadsheet_to_delimited(bytes: &[u8]) -> InputResult<String> {
    let mut workbook = open_workbook_auto_from_rs(Cursor::new(bytes.to_vec()))
        .map_err(|e| InputError::SpreadsheetError(e.to_string()))?;

    let range = workbook
        .worksheet_range_at(0)
        .ok_or(InputError::NoSheets)?
        .map_err(|e| InputError::SpreadsheetError(e.to_string()))?;

    let separator = SHEET_SEPARATOR.to_string();
    let lines: Vec<String> = range
        .rows()
        .map(|row| row.iter().map(render_cell).collect::<Vec<_>>().join(&separator))
        .collect();

    Ok(lines.join("\n"))
}

/// Render one cell the way it would be typed.
///
/// Whole floats lose their `.0` so codes such as `7` stay `7`; date cells
/// become `DD/MM/YYYY`.
pub fn render_cell(cell: &Data) -> String {
    match cell {
        Data::Empty => String::new(),
        Data::String(s) | Data::DateTimeIso(s) | Data::DurationIso(s) => s.clone(),
        Data::Int(i) => i.to_string(),
        Data::Float(f) => render_float(*f),
        Data::Bool(b) => b.to_string(),
        Data::DateTime(dt) => match dt.as_datetime() {
            Some(datetime) => datetime.format("%d/%m/%Y").to_string(),
            None => render_float(dt.as_f64()),
        },
        Data::Error(e) => e.to_string(),
    }
}

fn render_float(value: f64) -> String {
    if value.fract() == 0.0 && value.abs() < 1e15 {
        format!("{}", value as i64)
    } else {
        value.to_string()
    }
}
