//! Input loading: raw bytes to delimited text.
//!
//! Spreadsheets (xlsx, xls, ods) are converted through [`spreadsheet`];
//! anything else is treated as delimited text and decoded after encoding
//! detection. No table logic lives here.

pub mod spreadsheet;

use serde::Serialize;
use std::path::Path;

use crate::error::{InputError, InputResult};

pub use spreadsheet::spreadsheet_to_delimited;

/// Where the text of a [`LoadedInput`] came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum InputSource {
    Text,
    Spreadsheet,
}

/// Decoded delimited text with loading metadata.
#[derive(Debug, Clone)]
pub struct LoadedInput {
    pub text: String,
    /// Detected encoding (`utf-8` for spreadsheets)
    pub encoding: String,
    pub source: InputSource,
}

/// Detect the encoding of raw bytes using chardet
pub fn detect_encoding(bytes: &[u8]) -> String {
    let result = chardet::detect(bytes);
    let charset = result.0;

    match charset.to_lowercase().as_str() {
        "ascii" | "utf-8" | "utf8" | "" => "utf-8".to_string(),
        "iso-8859-1" | "iso-8859-15" | "latin-1" | "latin1" => "iso-8859-1".to_string(),
        "windows-1252" | "cp1252" => "windows-1252".to_string(),
        other => other.to_string(),
    }
}

/// Decode bytes to string using the specified encoding.
///
/// A leading UTF-8 byte-order mark is dropped.
pub fn decode_content(bytes: &[u8], encoding: &str) -> InputResult<String> {
    let bytes = bytes.strip_prefix(b"\xEF\xBB\xBF").unwrap_or(bytes);

    let text = match encoding.to_lowercase().as_str() {
        "utf-8" | "utf8" | "ascii" => match std::str::from_utf8(bytes) {
            Ok(s) => s.to_string(),
            Err(_) => encoding_rs::WINDOWS_1252.decode(bytes).0.into_owned(),
        },
        "iso-8859-1" | "latin-1" | "latin1" => encoding_rs::ISO_8859_15.decode(bytes).0.into_owned(),
        "windows-1252" | "cp1252" => encoding_rs::WINDOWS_1252.decode(bytes).0.into_owned(),
        other => {
            let codec = encoding_rs::Encoding::for_label(other.as_bytes()).ok_or_else(|| {
                InputError::EncodingError {
                    encoding: other.to_string(),
                    message: "unsupported encoding".to_string(),
                }
            })?;
            let (decoded, _, had_errors) = codec.decode(bytes);
            if had_errors {
                return Err(InputError::EncodingError {
                    encoding: other.to_string(),
                    message: "malformed byte sequence".to_string(),
                });
            }
            decoded.into_owned()
        }
    };

    Ok(text)
}

/// Whether the bytes look like a workbook (ZIP container or OLE2 compound file).
pub fn is_spreadsheet(bytes: &[u8]) -> bool {
    const ZIP: &[u8] = b"PK\x03\x04";
    const OLE2: &[u8] = &[0xD0, 0xCF, 0x11, 0xE0, 0xA1, 0xB1, 0x1A, 0xE1];
    bytes.starts_with(ZIP) || bytes.starts_with(OLE2)
}

/// Turn uploaded or file bytes into delimited text.
pub fn load_bytes(bytes: &[u8]) -> InputResult<LoadedInput> {
    if is_spreadsheet(bytes) {
        return Ok(LoadedInput {
            text: spreadsheet_to_delimited(bytes)?,
            encoding: "utf-8".to_string(),
            source: InputSource::Spreadsheet,
        });
    }

    let encoding = detect_encoding(bytes);
    let text = decode_content(bytes, &encoding)?;
    Ok(LoadedInput {
        text,
        encoding,
        source: InputSource::Text,
    })
}

/// Read a file and load it with [`load_bytes`].
pub fn load_file<P: AsRef<Path>>(path: P) -> InputResult<LoadedInput> {
    let bytes = std::fs::read(path.as_ref())?;
    load_bytes(&bytes)
}
