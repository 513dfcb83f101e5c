//! File-set level format configuration.
//!
//! Delimiter and encoding are fixed per generation of source files and are
//! always supplied by the caller; nothing here falls back to the platform
//! text encoding.

use std::borrow::Cow;
use std::fmt;
use std::str::FromStr;

use encoding_rs::UTF_8;
use encoding_rs::mem::decode_latin1;
use serde::{Deserialize, Serialize};

/// Glob matching the raw yearly exports.
pub const DEFAULT_RAW_PATTERN: &str = "data/voos_*.csv";

/// Glob matching the normalized files the report is served from.
pub const DEFAULT_NORMALIZED_PATTERN: &str = "data/normalized/voos_*.csv";

/// Directory the batch normalizer writes into.
pub const DEFAULT_OUTPUT_DIR: &str = "data/normalized";

/// Text encodings a source file set may use.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum TextEncoding {
    #[default]
    Utf8,
    /// Strict ISO-8859-1: every byte maps to the code point of the same
    /// value, including the C1 range 0x80-0x9F.
    Latin1,
}

impl TextEncoding {
    /// Decodes `bytes`, returning the text and whether any input was
    /// malformed. A UTF-8 BOM is dropped; Latin-1 never fails.
    pub fn decode(self, bytes: &[u8]) -> (Cow<'_, str>, bool) {
        match self {
            TextEncoding::Utf8 => UTF_8.decode_with_bom_removal(bytes),
            TextEncoding::Latin1 => (decode_latin1(bytes), false),
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            TextEncoding::Utf8 => "utf-8",
            TextEncoding::Latin1 => "latin-1",
        }
    }
}

impl fmt::Display for TextEncoding {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for TextEncoding {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "utf8" | "utf-8" => Ok(TextEncoding::Utf8),
            "latin1" | "latin-1" | "iso-8859-1" => {
                Ok(TextEncoding::Latin1)
            }
            other => Err(format!("unsupported encoding: {other}")),
        }
    }
}

/// Delimiter and encoding of one source file set.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SourceFormat {
    pub delimiter: u8,
    pub encoding: TextEncoding,
}

impl SourceFormat {
    pub fn new(delimiter: u8, encoding: TextEncoding) -> Self {
        Self {
            delimiter,
            encoding,
        }
    }

    /// Raw yearly exports: semicolon-delimited Latin-1.
    pub fn raw() -> Self {
        Self::new(b';', TextEncoding::Latin1)
    }

    /// Files written by the batch normalizer: comma-delimited UTF-8.
    pub fn normalized() -> Self {
        Self::new(b',', TextEncoding::Utf8)
    }
}

impl Default for SourceFormat {
    fn default() -> Self {
        Self::normalized()
    }
}

impl fmt::Display for SourceFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "delimiter {:?}, {}",
            char::from(self.delimiter),
            self.encoding
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_encoding_labels() {
        assert_eq!("latin1".parse::<TextEncoding>(), Ok(TextEncoding::Latin1));
        assert_eq!("ISO-8859-1".parse::<TextEncoding>(), Ok(TextEncoding::Latin1));
        assert_eq!("UTF-8".parse::<TextEncoding>(), Ok(TextEncoding::Utf8));
        assert!("utf-16".parse::<TextEncoding>().is_err());
    }

    #[test]
    fn presets() {
        assert_eq!(SourceFormat::raw().delimiter, b';');
        assert_eq!(SourceFormat::raw().encoding, TextEncoding::Latin1);
        assert_eq!(SourceFormat::default(), SourceFormat::normalized());
        assert_eq!(
            SourceFormat::raw().to_string(),
            "delimiter ';', latin-1"
        );
    }
}
