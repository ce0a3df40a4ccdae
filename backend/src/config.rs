//! Runtime configuration.
//!
//! Values come from the environment (a `.env` file is loaded first when
//! present). Command-line flags override them.
//!
//! | Variable                      | Default             |
//! |-------------------------------|---------------------|
//! | `SPESAFIX_SEPARATOR`          | `;`                 |
//! | `SPESAFIX_OUTPUT_SEPARATOR`   | detected separator  |
//! | `SPESAFIX_EXPECTED_COLUMNS`   | `15`                |
//! | `SPESAFIX_PORT`               | `3000`              |
//! | `SPESAFIX_MAX_UPLOAD_BYTES`   | 50 MB               |

use std::env;

use crate::models::EXPECTED_COLUMNS;

/// Default HTTP port.
pub const DEFAULT_PORT: u16 = 3000;

/// Default upload limit (50 MB).
pub const DEFAULT_MAX_UPLOAD_BYTES: usize = 50 * 1024 * 1024;

/// Pipeline and server settings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    /// Separator tried first when splitting input text.
    pub separator: char,
    /// Separator for serialized output; `None` keeps the detected one.
    pub output_separator: Option<char>,
    pub expected_columns: usize,
    pub port: u16,
    pub max_upload_bytes: usize,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            separator: ';',
            output_separator: None,
            expected_columns: EXPECTED_COLUMNS,
            port: DEFAULT_PORT,
            max_upload_bytes: DEFAULT_MAX_UPLOAD_BYTES,
        }
    }
}

impl Config {
    /// Build from `SPESAFIX_*` variables, loading `.env` if present.
    ///
    /// Unparseable values fall back to the defaults.
    pub fn from_env() -> Self {
        let _ = dotenvy::dotenv();
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Build from an arbitrary key lookup.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();

        Self {
            separator: lookup("SPESAFIX_SEPARATOR")
                .and_then(|v| parse_separator(&v))
                .unwrap_or(defaults.separator),
            output_separator: lookup("SPESAFIX_OUTPUT_SEPARATOR").and_then(|v| parse_separator(&v)),
            expected_columns: lookup("SPESAFIX_EXPECTED_COLUMNS")
                .and_then(|v| v.trim().parse().ok())
                .unwrap_or(defaults.expected_columns),
            port: lookup("SPESAFIX_PORT")
                .and_then(|v| v.trim().parse().ok())
                .unwrap_or(defaults.port),
            max_upload_bytes: lookup("SPESAFIX_MAX_UPLOAD_BYTES")
                .and_then(|v| v.trim().parse().ok())
                .unwrap_or(defaults.max_upload_bytes),
        }
    }
}

/// Parse a separator setting: a single character, or `tab` / `\t`.
pub fn parse_separator(value: &str) -> Option<char> {
    match value {
        "tab" | "TAB" | "\\t" => Some('\t'),
        _ => {
            let mut chars = value.chars();
            match (chars.next(), chars.next()) {
                (Some(c), None) => Some(c),
                _ => None,
            }
        }
    }
}
