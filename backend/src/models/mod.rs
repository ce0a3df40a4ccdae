//! Domain models for the Spesafix validation pipeline.
//!
//! - [`Column`] - The fixed 15-column expense record schema
//! - [`CellRule`] - Validation/correction rule bound to a column
//! - [`RowCheck`] / [`RowError`] - Outcome of one rule on one row
//! - [`Correction`] - Audit record of a cell rewritten by a rule
//! - [`LogEntry`] / [`LogKind`] - Reportable entries for display

use serde::{Deserialize, Serialize};
use std::fmt;

// =============================================================================
// Column Schema
// =============================================================================

/// Number of columns in a well-formed expense record.
pub const EXPECTED_COLUMNS: usize = 15;

/// The semantic columns of an expense record, in file order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Column {
    OwnerFiscalCode,
    OwnerType,
    AssistedFiscalCode,
    DocumentDate,
    DocumentNumber,
    DocumentNumberSuffix,
    Device,
    PaymentDate,
    OperationType,
    ExpenseItem,
    Amount,
    PaymentTracked,
    DocumentType,
    OppositionExercised,
    VatNatureCode,
}

impl Column {
    /// All columns in index order.
    pub const ALL: [Column; EXPECTED_COLUMNS] = [
        Column::OwnerFiscalCode,
        Column::OwnerType,
        Column::AssistedFiscalCode,
        Column::DocumentDate,
        Column::DocumentNumber,
        Column::DocumentNumberSuffix,
        Column::Device,
        Column::PaymentDate,
        Column::OperationType,
        Column::ExpenseItem,
        Column::Amount,
        Column::PaymentTracked,
        Column::DocumentType,
        Column::OppositionExercised,
        Column::VatNatureCode,
    ];

    /// Zero-based position in the file.
    pub fn index(self) -> usize {
        self as usize
    }

    pub fn from_index(index: usize) -> Option<Self> {
        Self::ALL.get(index).copied()
    }

    /// Human-readable field name.
    pub fn name(self) -> &'static str {
        match self {
            Column::OwnerFiscalCode => "owner fiscal code",
            Column::OwnerType => "owner type",
            Column::AssistedFiscalCode => "assisted fiscal code",
            Column::DocumentDate => "document date",
            Column::DocumentNumber => "document number",
            Column::DocumentNumberSuffix => "document number suffix",
            Column::Device => "device",
            Column::PaymentDate => "payment date",
            Column::OperationType => "operation type",
            Column::ExpenseItem => "expense item",
            Column::Amount => "amount",
            Column::PaymentTracked => "payment tracked",
            Column::DocumentType => "document type",
            Column::OppositionExercised => "opposition exercised",
            Column::VatNatureCode => "VAT nature code",
        }
    }

    /// The rule that validates and normalizes this column, if any.
    pub fn rule(self) -> Option<CellRule> {
        match self {
            Column::OwnerFiscalCode | Column::AssistedFiscalCode => Some(CellRule::FiscalCode),
            Column::OwnerType => Some(CellRule::OwnerType),
            Column::DocumentDate | Column::PaymentDate => Some(CellRule::Date),
            Column::Amount => Some(CellRule::Amount),
            Column::DocumentNumber
            | Column::DocumentNumberSuffix
            | Column::Device
            | Column::OperationType
            | Column::ExpenseItem
            | Column::PaymentTracked
            | Column::DocumentType
            | Column::OppositionExercised
            | Column::VatNatureCode => None,
        }
    }
}

impl fmt::Display for Column {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Per-cell rules of the catalog.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CellRule {
    FiscalCode,
    OwnerType,
    Date,
    Amount,
}

impl CellRule {
    pub fn name(self) -> &'static str {
        match self {
            CellRule::FiscalCode => "fiscal code",
            CellRule::OwnerType => "owner type",
            CellRule::Date => "date",
            CellRule::Amount => "amount",
        }
    }
}

// =============================================================================
// Rule Outcomes
// =============================================================================

/// A rule failure on one row.
///
/// `row` is 1-based and counts the header, so the first data row is row 2.
/// Rules leave it at 0; the engine stamps it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RowError {
    pub row: usize,
    pub column: Option<usize>,
    pub message: String,
}

impl RowError {
    /// A failure not tied to one column (e.g. wrong column count).
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            row: 0,
            column: None,
            message: message.into(),
        }
    }

    /// A cell failure. The message carries rule, column and raw value.
    pub fn cell(rule: &str, column: usize, value: &str, reason: &str) -> Self {
        Self {
            row: 0,
            column: Some(column),
            message: format!("Invalid {}, column {}: \"{}\" ({})", rule, column, value, reason),
        }
    }
}

impl fmt::Display for RowError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Row {}: {}", self.row, self.message)
    }
}

/// Outcome of evaluating one rule on one row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RowCheck {
    Valid,
    Invalid(RowError),
}

impl RowCheck {
    pub fn is_valid(&self) -> bool {
        matches!(self, RowCheck::Valid)
    }
}

/// A cell rewritten to canonical form by a successful rule.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Correction {
    /// 1-based, header-adjusted like [`RowError::row`].
    pub row: usize,
    pub column: usize,
    pub from: String,
    pub to: String,
}

// =============================================================================
// Log Entries
// =============================================================================

/// Category of a reportable entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum LogKind {
    Error,
    Info,
    Corrected,
}

/// A reportable outcome for display.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LogEntry {
    pub row: Option<usize>,
    pub column: Option<usize>,
    pub kind: LogKind,
    pub message: String,
}

impl LogEntry {
    pub fn info(message: impl Into<String>) -> Self {
        Self {
            row: None,
            column: None,
            kind: LogKind::Info,
            message: message.into(),
        }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self {
            row: None,
            column: None,
            kind: LogKind::Error,
            message: message.into(),
        }
    }

    pub fn at(mut self, row: usize, column: usize) -> Self {
        self.row = Some(row);
        self.column = Some(column);
        self
    }
}

impl From<&Correction> for LogEntry {
    fn from(c: &Correction) -> Self {
        Self {
            row: Some(c.row),
            column: Some(c.column),
            kind: LogKind::Corrected,
            message: format!("\"{}\" -> \"{}\"", c.from, c.to),
        }
    }
}
