//! REST API types for frontend integration.

use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use uuid::Uuid;

use crate::models::LogEntry;
use crate::pipeline::ValidationReport;
use crate::table::format_separator;

/// Response sent after an upload has been validated.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ValidateResponse {
    /// Unique job identifier
    pub job_id: String,

    /// Status: "valid" or "invalid"
    pub status: String,

    /// Name of the uploaded file, if sent
    pub file_name: Option<String>,

    /// Separator detected in the upload
    pub separator: String,

    /// Rows including the header
    pub rows: usize,

    pub columns: usize,

    /// Corrected delimited text, ready to download
    pub output: String,

    /// INFO, ERROR and CORRECTED entries
    pub logs: Vec<LogEntry>,

    pub stats: ValidationStats,
}

/// Counters for the summary banner
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ValidationStats {
    pub errors: usize,
    pub corrections: usize,
}

impl ValidateResponse {
    pub fn new(report: ValidationReport, file_name: Option<String>) -> Self {
        ValidateResponse {
            job_id: Uuid::new_v4().to_string(),
            status: if report.is_valid() { "valid" } else { "invalid" }.to_string(),
            file_name,
            separator: format_separator(report.separator),
            rows: report.rows,
            columns: report.columns,
            stats: ValidationStats {
                errors: report.failures.len(),
                corrections: report.corrections.len(),
            },
            output: report.output,
            logs: report.logs,
        }
    }
}

/// Create an error response
pub fn error_response(error: &str) -> Value {
    json!({
        "jobId": Uuid::new_v4().to_string(),
        "status": "error",
        "error": error,
        "output": "",
        "logs": [],
        "stats": { "errors": 0, "corrections": 0 }
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Correction, RowError};

    fn report(failures: Vec<RowError>) -> ValidationReport {
        ValidationReport {
            output: "a;b\n1;2".to_string(),
            separator: '\t',
            rows: 2,
            columns: 2,
            failures,
            corrections: vec![Correction {
                row: 2,
                column: 1,
                from: "7".into(),
                to: "007".into(),
            }],
            logs: vec![LogEntry::info("Detected separator: 'TAB'")],
        }
    }

    #[test]
    fn test_valid_report_response() {
        let response = ValidateResponse::new(report(vec![]), Some("spese.csv".into()));

        assert_eq!(response.status, "valid");
        assert_eq!(response.separator, "TAB");
        assert_eq!(response.stats.corrections, 1);

        let json = serde_json::to_value(&response).unwrap();
        assert_eq!(json["fileName"], "spese.csv");
        assert_eq!(json["logs"][0]["kind"], "INFO");
    }

    #[test]
    fn test_invalid_report_response() {
        let response = ValidateResponse::new(report(vec![RowError::new("Invalid number of columns: 2")]), None);
        assert_eq!(response.status, "invalid");
        assert_eq!(response.stats.errors, 1);
    }

    #[test]
    fn test_error_response_shape() {
        let value = error_response("No file provided");
        assert_eq!(value["status"], "error");
        assert_eq!(value["error"], "No file provided");
    }
}
