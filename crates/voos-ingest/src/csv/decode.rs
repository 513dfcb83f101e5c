//! Byte-to-text decoding for configured encodings.

use std::borrow::Cow;
use std::path::Path;

use crate::error::{IngestError, Result};
use crate::format::TextEncoding;

/// Decodes file bytes with the configured encoding, dropping a leading BOM.
///
/// Malformed input is an error rather than a lossy replacement so that a
/// file exported in the wrong encoding is reported instead of silently
/// producing garbled headers.
pub fn decode_bytes<'a>(
    path: &Path,
    bytes: &'a [u8],
    encoding: TextEncoding,
) -> Result<Cow<'a, str>> {
    let (text, had_errors) = encoding.decode(bytes);
    if had_errors {
        return Err(IngestError::Decode {
            path: path.to_path_buf(),
            encoding: encoding.as_str(),
        });
    }
    Ok(text)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn decodes_latin1_accents() {
        let bytes = b"\xd3rg\xe3o;Hist\xf3rico";
        let text = decode_bytes(Path::new("x.csv"), bytes, TextEncoding::Latin1).unwrap();
        assert_eq!(text, "Órgão;Histórico");
    }

    #[test]
    fn latin1_keeps_c1_bytes_as_code_points() {
        let bytes = b"Hist\xf3rico \x96 voo";
        let text = decode_bytes(Path::new("x.csv"), bytes, TextEncoding::Latin1).unwrap();
        assert_eq!(text, "Histórico \u{96} voo");
    }

    #[test]
    fn strips_utf8_bom() {
        let bytes = "\u{feff}Data,Origem".as_bytes();
        let text = decode_bytes(Path::new("x.csv"), bytes, TextEncoding::Utf8).unwrap();
        assert_eq!(text, "Data,Origem");
    }

    #[test]
    fn rejects_latin1_bytes_as_utf8() {
        let bytes = b"\xd3rg\xe3o";
        let result = decode_bytes(Path::new("x.csv"), bytes, TextEncoding::Utf8);
        assert!(matches!(result, Err(IngestError::Decode { .. })));
    }
}
