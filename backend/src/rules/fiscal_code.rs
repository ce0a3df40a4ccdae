//! Italian fiscal code (codice fiscale) checks.
//!
//! The rule only normalizes the cell; deciding whether a code is valid is
//! delegated to a [`FiscalCodeValidator`]. [`ChecksumValidator`] is the
//! default: structural pattern (omocodia substitutions allowed) plus the
//! check character.

use once_cell::sync::Lazy;
use regex::Regex;

use crate::error::TableResult;
use crate::models::{CellRule, RowCheck, RowError};
use crate::table::DelimitedTable;

/// Decides whether a normalized (trimmed, upper-case) code is valid.
pub trait FiscalCodeValidator: Send + Sync {
    fn is_valid(&self, code: &str) -> bool;
}

static STRUCTURE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^[A-Z]{6}[0-9LMNPQRSTUV]{2}[ABCDEHLMPRST][0-9LMNPQRSTUV]{2}[A-Z][0-9LMNPQRSTUV]{3}[A-Z]$")
        .expect("valid fiscal code pattern")
});

// Values of characters in odd (1st, 3rd, ...) positions, for 0-9 then A-Z.
const ODD_DIGITS: [u32; 10] = [1, 0, 5, 7, 9, 13, 15, 17, 19, 21];
const ODD_LETTERS: [u32; 26] = [
    1, 0, 5, 7, 9, 13, 15, 17, 19, 21, 2, 4, 18, 20, 11, 3, 6, 8, 12, 14, 16, 10, 22, 25, 24, 23,
];

/// Pattern and check-character validation.
#[derive(Debug, Clone, Copy, Default)]
pub struct ChecksumValidator;

impl ChecksumValidator {
    /// Check character for the first 15 characters of a code.
    pub fn check_char(body: &str) -> Option<char> {
        let mut sum = 0;
        for (i, c) in body.chars().enumerate() {
            let value = match (i % 2 == 0, c) {
                (true, '0'..='9') => ODD_DIGITS[c as usize - '0' as usize],
                (true, 'A'..='Z') => ODD_LETTERS[c as usize - 'A' as usize],
                (false, '0'..='9') => c as u32 - '0' as u32,
                (false, 'A'..='Z') => c as u32 - 'A' as u32,
                _ => return None,
            };
            sum += value;
        }
        char::from_u32('A' as u32 + sum % 26)
    }
}

impl FiscalCodeValidator for ChecksumValidator {
    fn is_valid(&self, code: &str) -> bool {
        if !STRUCTURE.is_match(code) {
            return false;
        }
        let (body, check) = code.split_at(15);
        Self::check_char(body).is_some_and(|c| check.starts_with(c))
    }
}

/// Trim and upper-case the cell; keep it only if `validator` accepts it.
pub fn check_fiscal_code(
    table: &mut DelimitedTable,
    row: usize,
    column: usize,
    validator: &dyn FiscalCodeValidator,
) -> TableResult<RowCheck> {
    let raw = table.cell(row, column)?;
    let code = raw.trim().to_uppercase();

    if !validator.is_valid(&code) {
        return Ok(RowCheck::Invalid(RowError::cell(
            CellRule::FiscalCode.name(),
            column,
            raw,
            "checksum or format mismatch",
        )));
    }

    table.set_cell(row, column, code)?;
    Ok(RowCheck::Valid)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_known_valid_codes() {
        let v = ChecksumValidator;
        assert!(v.is_valid("RSSMRA80A01H501U"));
        assert!(v.is_valid("BNCLRA70M55L219Y"));
    }

    #[test]
    fn test_wrong_check_char() {
        assert!(!ChecksumValidator.is_valid("RSSMRA80A01H501A"));
    }

    #[test]
    fn test_wrong_structure() {
        let v = ChecksumValidator;
        assert!(!v.is_valid(""));
        assert!(!v.is_valid("rssmra80a01h501u"));
        assert!(!v.is_valid("RSSMRA80Z01H501U"));
        assert!(!v.is_valid("12345678901"));
    }

    #[test]
    fn test_lower_case_is_normalized_not_rejected() {
        let mut table = DelimitedTable::parse("cf;x\n rssmra80a01h501u ;1", ';');

        let check = check_fiscal_code(&mut table, 1, 0, &ChecksumValidator).unwrap();

        assert!(check.is_valid());
        assert_eq!(table.cell(1, 0).unwrap(), "RSSMRA80A01H501U");
    }

    #[test]
    fn test_rejection_leaves_cell_untouched() {
        let mut table = DelimitedTable::parse("cf;x\nnope;1", ';');

        let check = check_fiscal_code(&mut table, 1, 0, &ChecksumValidator).unwrap();

        match check {
            RowCheck::Invalid(err) => {
                assert!(err.message.contains("fiscal code"));
                assert!(err.message.contains("\"nope\""));
                assert_eq!(err.column, Some(0));
            }
            RowCheck::Valid => panic!("expected rejection"),
        }
        assert_eq!(table.cell(1, 0).unwrap(), "nope");
    }

    struct AcceptAll;

    impl FiscalCodeValidator for AcceptAll {
        fn is_valid(&self, _code: &str) -> bool {
            true
        }
    }

    #[test]
    fn test_external_validator_decides() {
        let mut table = DelimitedTable::parse("cf;x\nabc;1", ';');

        let check = check_fiscal_code(&mut table, 1, 0, &AcceptAll).unwrap();

        assert!(check.is_valid());
        assert_eq!(table.cell(1, 0).unwrap(), "ABC");
    }
}
