//! Date normalization to the canonical `DDMMYYYY` form.
//!
//! Accepted inputs, checked in order:
//!
//! | Input                      | Result                                  |
//! |----------------------------|-----------------------------------------|
//! | 8 digits                   | unchanged                               |
//! | 7 digits                   | left-padded with `0`                    |
//! | `d/m/y` (two slashes)      | day/month padded, 2-digit year resolved |
//! | `YYYY/MM/DD`               | re-rendered                             |
//! | ISO and other common forms | re-rendered                             |
//!
//! A two-digit year greater than the reference year's last two digits is
//! read as 19xx, otherwise as 20xx.

use chrono::{DateTime, Datelike, NaiveDate, NaiveDateTime};

use crate::error::TableResult;
use crate::models::{CellRule, RowCheck, RowError};
use crate::table::DelimitedTable;

const DATE_FORMATS: [&str; 5] = ["%Y-%m-%d", "%d-%m-%Y", "%d.%m.%Y", "%Y/%m/%d", "%d %m %Y"];
const DATETIME_FORMATS: [&str; 2] = ["%Y-%m-%dT%H:%M:%S", "%Y-%m-%d %H:%M:%S"];

/// Normalize `raw` to `DDMMYYYY`, or return why it was rejected.
pub fn normalize_date(raw: &str, reference_year: i32) -> Result<String, &'static str> {
    let value = raw.trim();

    if value.is_empty() {
        return Err("missing date");
    }

    let all_digits = value.bytes().all(|b| b.is_ascii_digit());
    if all_digits && value.len() == 8 {
        return Ok(value.to_string());
    }
    if all_digits && value.len() == 7 {
        return Ok(format!("0{}", value));
    }

    if value.matches('/').count() == 2 {
        return normalize_slashed(value, reference_year)
            .or_else(|reason| parse_generic(value).map(render).ok_or(reason));
    }

    parse_generic(value)
        .map(render)
        .ok_or("unrecognized date format")
}

fn normalize_slashed(value: &str, reference_year: i32) -> Result<String, &'static str> {
    let parts: Vec<&str> = value.split('/').map(str::trim).collect();
    let &[day, month, year] = parts.as_slice() else {
        return Err("unrecognized date format");
    };

    let numeric = |s: &str, max_len: usize| {
        (!s.is_empty() && s.len() <= max_len && s.bytes().all(|b| b.is_ascii_digit()))
            .then(|| s.parse::<u32>().ok())
            .flatten()
    };

    let (Some(d), Some(m), Some(y)) = (numeric(day, 2), numeric(month, 2), numeric(year, 4)) else {
        return Err("unrecognized date format");
    };

    let full_year = match year.len() {
        2 => resolve_century(y as i32, reference_year),
        4 => y as i32,
        _ => return Err("year must have 2 or 4 digits"),
    };

    NaiveDate::from_ymd_opt(full_year, m, d)
        .map(render)
        .ok_or("not a calendar date")
}

/// Expand a two-digit year relative to `reference_year`.
pub fn resolve_century(two_digit_year: i32, reference_year: i32) -> i32 {
    if two_digit_year > reference_year % 100 {
        1900 + two_digit_year
    } else {
        2000 + two_digit_year
    }
}

fn parse_generic(value: &str) -> Option<NaiveDate> {
    DATE_FORMATS
        .iter()
        .find_map(|fmt| NaiveDate::parse_from_str(value, fmt).ok())
        .or_else(|| {
            DATETIME_FORMATS
                .iter()
                .find_map(|fmt| NaiveDateTime::parse_from_str(value, fmt).ok())
                .map(|dt| dt.date())
        })
        .or_else(|| DateTime::parse_from_rfc3339(value).ok().map(|dt| dt.date_naive()))
}

fn render(date: NaiveDate) -> String {
    format!("{:02}{:02}{:04}", date.day(), date.month(), date.year())
}

/// Rewrite the cell as `DDMMYYYY` or reject it.
pub fn check_date(table: &mut DelimitedTable, row: usize, column: usize, reference_year: i32) -> TableResult<RowCheck> {
    let raw = table.cell(row, column)?;

    match normalize_date(raw, reference_year) {
        Ok(date) => {
            table.set_cell(row, column, date)?;
            Ok(RowCheck::Valid)
        }
        Err(reason) => Ok(RowCheck::Invalid(RowError::cell(CellRule::Date.name(), column, raw, reason))),
    }
}
