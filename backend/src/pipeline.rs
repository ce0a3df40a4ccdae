//! High-level validation pipeline.
//!
//! ```text
//! bytes ──▶ parser ──▶ DelimitedTable ──▶ column-count check ──▶ cell rules ──▶ text + logs
//! ```
//!
//! Every data row is visited by every rule, so one pass reports all
//! problems. Cells are rewritten only by rules that accepted them.
//!
//! # Example
//!
//! ```rust,ignore
//! use spesafix::{validate_file, Config};
//!
//! let report = validate_file("spese.xlsx", &Config::default())?;
//! println!("{}", report.summary());
//! std::fs::write("spese.csv", &report.output)?;
//! ```

use serde::Serialize;
use std::path::Path;

use crate::api::logs::{log_error, log_info, log_success};
use crate::config::Config;
use crate::error::{PipelineError, PipelineResult};
use crate::models::{Column, Correction, LogEntry, RowCheck, RowError};
use crate::parser::{load_bytes, load_file, InputSource};
use crate::rules::RuleSet;
use crate::table::{format_separator, DelimitedTable};
use crate::validation::{check_rows, fix_column, to_logs};

/// Outcome of validating one file.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ValidationReport {
    /// Corrected table serialized with the output separator
    pub output: String,
    /// Separator detected in the input
    pub separator: char,
    /// Rows including the header
    pub rows: usize,
    /// Columns of the header row
    pub columns: usize,
    /// All failures: column count, row width, then cell rules in schema order
    pub failures: Vec<RowError>,
    pub corrections: Vec<Correction>,
    /// INFO, ERROR and CORRECTED entries for display
    pub logs: Vec<LogEntry>,
}

impl ValidationReport {
    /// True when no rule rejected anything.
    pub fn is_valid(&self) -> bool {
        self.failures.is_empty()
    }

    pub fn summary(&self) -> String {
        format!(
            "Validated {} data rows: {} errors, {} corrections",
            self.rows.saturating_sub(1),
            self.failures.len(),
            self.corrections.len()
        )
    }
}

/// Validate and correct delimited text.
pub fn validate_text(text: &str, config: &Config) -> PipelineResult<ValidationReport> {
    validate_text_with(text, config, &RuleSet::from_config(config))
}

/// Validate and correct delimited text with an explicit rule set.
pub fn validate_text_with(text: &str, config: &Config, rules: &RuleSet) -> PipelineResult<ValidationReport> {
    let mut table = DelimitedTable::parse(text, config.separator);

    if table.row_count() < 2 {
        return Err(PipelineError::EmptyInput);
    }

    let mut infos = vec![
        LogEntry::info(format!("Detected separator: '{}'", format_separator(table.separator()))),
        LogEntry::info(format!(
            "Read {} data rows, {} columns",
            table.row_count() - 1,
            table.column_count()
        )),
    ];
    for entry in &infos {
        log_info(&entry.message);
    }

    let mut failures = check_rows(&table, |t, row| rules.check_column_count(t, row))?;
    failures.extend(check_rows(&table, |t, row| rules.check_row_width(t, row))?);
    let mut corrections = Vec::new();

    for column in Column::ALL {
        let Some(rule) = column.rule() else {
            continue;
        };
        let index = column.index();
        if index >= table.column_count() {
            let entry = LogEntry::info(format!("Column {} ({}) missing, {} check skipped", index, column, rule.name()));
            log_info(&entry.message);
            infos.push(entry);
            continue;
        }

        let report = fix_column(&mut table, index, |t, row, col| {
            // already reported by the row-width check
            if t.cell(row, col).is_err() {
                return Ok(RowCheck::Valid);
            }
            rules.check_cell(rule, t, row, col)
        })?;
        failures.extend(report.failures);
        corrections.extend(report.corrections);
    }

    let mut logs = infos;
    logs.extend(to_logs(&failures));
    logs.extend(corrections.iter().map(LogEntry::from));

    if failures.is_empty() {
        log_success(format!("No errors, {} cells corrected", corrections.len()));
    } else {
        log_error(format!("{} errors, {} cells corrected", failures.len(), corrections.len()));
    }

    Ok(ValidationReport {
        output: table.serialize(config.output_separator),
        separator: table.separator(),
        rows: table.row_count(),
        columns: table.column_count(),
        failures,
        corrections,
        logs,
    })
}

/// Validate uploaded bytes (spreadsheet or delimited text).
pub fn validate_bytes(bytes: &[u8], config: &Config) -> PipelineResult<ValidationReport> {
    let input = load_bytes(bytes)?;
    announce(input.source, &input.encoding);
    validate_text(&input.text, config)
}

/// Validate a file on disk (spreadsheet or delimited text).
pub fn validate_file<P: AsRef<Path>>(path: P, config: &Config) -> PipelineResult<ValidationReport> {
    let input = load_file(path)?;
    announce(input.source, &input.encoding);
    validate_text(&input.text, config)
}

fn announce(source: InputSource, encoding: &str) {
    match source {
        InputSource::Spreadsheet => log_info("Converted first sheet of workbook"),
        InputSource::Text => log_info(format!("Detected encoding: {}", encoding)),
    }
}

/// Write `text` to `path`, replacing any existing file.
pub fn save<P: AsRef<Path>>(text: &str, path: P) -> PipelineResult<()> {
    std::fs::write(path, text).map_err(PipelineError::Save)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::LogKind;

    const HEADER: &str = "cf_proprietario;tipo;cf_assistito;data_doc;num_doc;suffisso;dispositivo;data_pag;tipo_op;voce;importo;tracciato;tipo_doc;opposizione;natura_iva";

    fn rules() -> RuleSet {
        RuleSet::new().with_reference_year(2026)
    }

    fn row(cells: [&str; 15]) -> String {
        cells.join(";")
    }

    fn valid_row() -> String {
        row([
            "rssmra80a01h501u",
            "7",
            "BNCLRA70M55L219Y",
            "1/2/23",
            "12",
            "",
            "1",
            "15042024",
            "I",
            "SR",
            "1.234,56",
            "SI",
            "F",
            "N",
            "",
        ])
    }

    #[test]
    fn test_end_to_end_valid_row() {
        let text = format!("{}\n{}", HEADER, valid_row());

        let report = validate_text_with(&text, &Config::default(), &rules()).unwrap();

        assert!(report.is_valid(), "{:?}", report.failures);
        assert_eq!(report.rows, 2);
        assert_eq!(report.columns, 15);

        let table = DelimitedTable::parse(&report.output, ';');
        assert_eq!(table.row_count(), 2);
        assert_eq!(table.column_count(), 15);
        assert_eq!(table.cell(1, 0).unwrap(), "RSSMRA80A01H501U");
        assert_eq!(table.cell(1, 1).unwrap(), "007");
        assert_eq!(table.cell(1, 3).unwrap(), "01022023");
        assert_eq!(table.cell(1, 7).unwrap(), "15042024");
        assert_eq!(table.cell(1, 10).unwrap(), "1234.56");
        assert_eq!(table.cell(1, 9).unwrap(), "SR");
    }

    #[test]
    fn test_corrections_are_audited() {
        let text = format!("{}\n{}", HEADER, valid_row());

        let report = validate_text_with(&text, &Config::default(), &rules()).unwrap();

        let corrected: Vec<usize> = report.corrections.iter().map(|c| c.column).collect();
        assert_eq!(corrected, vec![0, 1, 3, 10]);
        assert!(report.corrections.iter().all(|c| c.row == 2));
        let kinds = report.logs.iter().filter(|l| l.kind == LogKind::Corrected).count();
        assert_eq!(kinds, 4);
    }

    #[test]
    fn test_all_failures_reported_in_one_pass() {
        let bad = row([
            "nope", "abcd", "RSSMRA80A01H501U", "", "1", "", "", "1/2/23", "", "", "abc", "", "", "", "",
        ]);
        let text = format!("{}\n{}\n{}", HEADER, bad, valid_row());

        let report = validate_text_with(&text, &Config::default(), &rules()).unwrap();

        let columns: Vec<Option<usize>> = report.failures.iter().map(|f| f.column).collect();
        assert_eq!(columns, vec![Some(0), Some(1), Some(3), Some(10)]);
        assert!(report.failures.iter().all(|f| f.row == 2));
        assert_eq!(report.logs.iter().filter(|l| l.kind == LogKind::Error).count(), 4);

        // rejected cells are left as they were, accepted ones are rewritten
        let table = DelimitedTable::parse(&report.output, ';');
        assert_eq!(table.cell(1, 0).unwrap(), "nope");
        assert_eq!(table.cell(1, 7).unwrap(), "01022023");
        assert_eq!(table.cell(2, 0).unwrap(), "RSSMRA80A01H501U");
    }

    #[test]
    fn test_wrong_column_count_reported_per_row() {
        let header: Vec<&str> = HEADER.split(';').take(14).collect();
        let data: Vec<String> = valid_row().split(';').take(14).map(str::to_string).collect();
        let text = format!("{}\n{}\n{}", header.join(";"), data.join(";"), data.join(";"));

        let report = validate_text_with(&text, &Config::default(), &rules()).unwrap();

        let structural: Vec<&RowError> = report.failures.iter().filter(|f| f.column.is_none()).collect();
        assert_eq!(structural.len(), 2);
        assert!(structural[0].message.contains("14"));
        assert_eq!(report.columns, 14);
    }

    #[test]
    fn test_missing_rule_column_is_skipped() {
        let text = "a;b;c\nrssmra80a01h501u;7;BNCLRA70M55L219Y";

        let report = validate_text_with(text, &Config::default(), &rules()).unwrap();

        assert_eq!(report.failures.len(), 1);
        assert!(report.logs.iter().any(|l| l.message.contains("check skipped")));
        assert!(report.output.starts_with("a;b;c\nRSSMRA80A01H501U;007;"));
    }

    #[test]
    fn test_short_rows_are_reported_not_fatal() {
        let text = format!("{}\n{}\n\nshort\n{}", HEADER, valid_row(), valid_row());

        let report = validate_text_with(&text, &Config::default(), &rules()).unwrap();

        let rows: Vec<usize> = report.failures.iter().map(|f| f.row).collect();
        assert_eq!(rows, vec![3, 4, 3, 4]);
        assert!(report.failures[0].message.contains("Invalid number of cells: 1"));
        // cells a short row does have are still checked
        assert_eq!(report.failures[2].column, Some(0));
        assert_eq!(report.failures[3].column, Some(0));

        let table = DelimitedTable::parse(&report.output, ';');
        assert_eq!(table.cell(1, 1).unwrap(), "007");
        assert_eq!(table.cell(4, 1).unwrap(), "007");
        assert_eq!(table.cell(2, 0).unwrap(), "");
    }

    #[test]
    fn test_header_only_is_empty_input() {
        let result = validate_text(HEADER, &Config::default());
        assert!(matches!(result, Err(PipelineError::EmptyInput)));
    }

    #[test]
    fn test_comma_input_with_output_override() {
        let data = valid_row().replace("1.234,56", "12.34");
        let text = format!("{}\n{}", HEADER.replace(';', ","), data.replace(';', ","));
        let config = Config {
            output_separator: Some(';'),
            ..Config::default()
        };

        let report = validate_text_with(&text, &config, &rules()).unwrap();

        assert_eq!(report.separator, ',');
        assert!(report.output.starts_with("cf_proprietario;tipo;"));
    }

    #[test]
    fn test_untouched_text_round_trips() {
        let text = "a;b\nx;y\n";
        let table = DelimitedTable::parse(text, ';');
        assert_eq!(table.serialize(None), text);
    }

    #[test]
    fn test_validate_bytes_and_save() {
        let text = format!("{}\n{}\n", HEADER, valid_row());
        let report = validate_bytes(text.as_bytes(), &Config::default()).unwrap();
        assert!(report.output.ends_with('\n'));

        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("out.csv");
        save(&report.output, &path).unwrap();
        assert_eq!(std::fs::read_to_string(&path).unwrap(), report.output);

        let again = validate_file(&path, &Config::default()).unwrap();
        assert!(again.corrections.is_empty());
    }
}
