//! Delimiter and encoding detection for files of unknown format.

use std::fs::File;
use std::io::Read;
use std::path::{Path, PathBuf};

use tracing::debug;

use crate::error::{IngestError, Result};
use crate::format::{SourceFormat, TextEncoding};

/// Bytes read from the start of a file.
pub const SNIFF_SAMPLE_BYTES: usize = 2048;

/// Delimiters considered, in preference order.
pub const CANDIDATE_DELIMITERS: [u8; 4] = [b';', b',', b'|', b'\t'];

/// What was detected in a file's leading sample.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SniffReport {
    pub path: PathBuf,
    pub format: SourceFormat,
    /// The decoded sample, up to the last complete line when truncated.
    pub sample: String,
}

impl SniffReport {
    pub fn delimiter_char(&self) -> char {
        char::from(self.format.delimiter)
    }
}

/// Detects the delimiter and encoding of one file.
pub fn sniff_file(path: &Path) -> Result<SniffReport> {
    let file = File::open(path).map_err(|e| {
        if e.kind() == std::io::ErrorKind::NotFound {
            IngestError::FileNotFound {
                path: path.to_path_buf(),
            }
        } else {
            IngestError::FileRead {
                path: path.to_path_buf(),
                source: e,
            }
        }
    })?;
    let mut bytes = Vec::with_capacity(SNIFF_SAMPLE_BYTES);
    let read = file
        .take(SNIFF_SAMPLE_BYTES as u64 + 1)
        .read_to_end(&mut bytes)
        .map_err(|e| IngestError::FileRead {
            path: path.to_path_buf(),
            source: e,
        })?;
    let truncated = read > SNIFF_SAMPLE_BYTES;
    bytes.truncate(SNIFF_SAMPLE_BYTES);
    sniff_bytes(path, &bytes, truncated)
}

/// Detects the format of an in-memory sample.
///
/// `truncated` says whether the sample stops before the end of the file;
/// if so, its last line is partial and does not take part in detection.
pub fn sniff_bytes(path: &Path, bytes: &[u8], truncated: bool) -> Result<SniffReport> {
    let bytes = bytes.strip_prefix(b"\xef\xbb\xbf").unwrap_or(bytes);
    let encoding = detect_encoding(bytes, truncated);
    let (text, _) = encoding.decode(bytes);

    let mut lines: Vec<&str> = text.lines().collect();
    if truncated && lines.len() > 1 {
        lines.pop();
    }
    lines.retain(|line| !line.trim().is_empty());

    let delimiter = detect_delimiter(&lines).ok_or_else(|| IngestError::DelimiterNotDetected {
        path: path.to_path_buf(),
    })?;
    debug!(
        path = %path.display(),
        delimiter = %char::from(delimiter).escape_default(),
        encoding = %encoding,
        lines = lines.len(),
        "format detected"
    );
    Ok(SniffReport {
        path: path.to_path_buf(),
        format: SourceFormat::new(delimiter, encoding),
        sample: lines.join("\n"),
    })
}

fn detect_encoding(bytes: &[u8], truncated: bool) -> TextEncoding {
    match std::str::from_utf8(bytes) {
        Ok(_) => TextEncoding::Utf8,
        // A multi-byte sequence cut at the sample boundary.
        Err(e) if truncated && e.error_len().is_none() => TextEncoding::Utf8,
        Err(_) => TextEncoding::Latin1,
    }
}

/// Picks the candidate that splits every line into the same number of
/// cells. Among consistent candidates the most frequent wins; without any,
/// the most frequent candidate overall is used.
fn detect_delimiter(lines: &[&str]) -> Option<u8> {
    let mut best_consistent: Option<(u8, usize)> = None;
    let mut best_overall: Option<(u8, usize)> = None;

    for delimiter in CANDIDATE_DELIMITERS {
        let counts: Vec<usize> = lines
            .iter()
            .map(|line| count_unquoted(line, delimiter))
            .collect();
        let total: usize = counts.iter().sum();
        if total == 0 {
            continue;
        }
        let consistent = counts.first().is_some_and(|first| {
            *first > 0 && counts.iter().all(|count| count == first)
        });
        if consistent && best_consistent.is_none_or(|(_, best)| total > best) {
            best_consistent = Some((delimiter, total));
        }
        if best_overall.is_none_or(|(_, best)| total > best) {
            best_overall = Some((delimiter, total));
        }
    }
    best_consistent.or(best_overall).map(|(delimiter, _)| delimiter)
}

fn count_unquoted(line: &str, delimiter: u8) -> usize {
    let mut in_quotes = false;
    let mut count = 0;
    for byte in line.bytes() {
        if byte == b'"' {
            in_quotes = !in_quotes;
        } else if byte == delimiter && !in_quotes {
            count += 1;
        }
    }
    count
}
