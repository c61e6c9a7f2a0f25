//! Text extraction: uploaded bytes plus a declared content type in, document text out.
//!
//! Classification trusts the declared media type only. No content sniffing.

pub mod handlers;
pub mod pdf;

use serde::Serialize;
use thiserror::Error;

#[derive(Debug, Error, PartialEq)]
pub enum ExtractError {
    #[error("unsupported content type '{0}'")]
    UnsupportedContentType(String),

    #[error("{0}")]
    Decode(String),
}

/// The two upload kinds the analyzer accepts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum ContentKind {
    #[serde(rename = "application/pdf")]
    Pdf,
    #[serde(rename = "text/plain")]
    PlainText,
}

impl ContentKind {
    /// Classifies a declared media type. Parameters (`; charset=...`) and case are ignored.
    pub fn from_declared(content_type: &str) -> Result<Self, ExtractError> {
        let essence = content_type
            .split(';')
            .next()
            .unwrap_or_default()
            .trim()
            .to_ascii_lowercase();
        match essence.as_str() {
            "application/pdf" => Ok(ContentKind::Pdf),
            "text/plain" => Ok(ContentKind::PlainText),
            _ => Err(ExtractError::UnsupportedContentType(content_type.to_string())),
        }
    }
}

/// Extracts document text from an uploaded artifact.
///
/// CPU-bound for PDFs; async callers run this inside `spawn_blocking`.
pub fn extract_text(kind: ContentKind, data: &[u8]) -> Result<String, ExtractError> {
    match kind {
        ContentKind::Pdf => pdf::extract_pdf_text(data),
        ContentKind::PlainText => extract_plain_text(data),
    }
}

/// Decodes a plain-text upload verbatim. Invalid UTF-8 is a decode failure.
pub fn extract_plain_text(data: &[u8]) -> Result<String, ExtractError> {
    String::from_utf8(data.to_vec())
        .map_err(|e| ExtractError::Decode(format!("Text upload is not valid UTF-8: {e}")))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_classifies_pdf() {
        assert_eq!(
            ContentKind::from_declared("application/pdf").unwrap(),
            ContentKind::Pdf
        );
    }

    #[test]
    fn test_classifies_text_with_charset_param() {
        assert_eq!(
            ContentKind::from_declared("Text/Plain; charset=utf-8").unwrap(),
            ContentKind::PlainText
        );
    }

    #[test]
    fn test_rejects_unknown_content_type() {
        let err = ContentKind::from_declared("application/msword").unwrap_err();
        assert_eq!(
            err,
            ExtractError::UnsupportedContentType("application/msword".to_string())
        );
    }

    #[test]
    fn test_rejects_empty_content_type() {
        assert!(ContentKind::from_declared("").is_err());
    }

    #[test]
    fn test_plain_text_is_returned_verbatim() {
        let inputs = [
            "",
            "Responsible for the budget.\n",
            "  leading and trailing whitespace  \r\n",
            "Unicode survives: café → naïve résumé ✓",
        ];
        for input in inputs {
            let out = extract_text(ContentKind::PlainText, input.as_bytes()).unwrap();
            assert_eq!(out, input, "plain text must round-trip unchanged");
        }
    }

    #[test]
    fn test_invalid_utf8_is_decode_error() {
        let err = extract_text(ContentKind::PlainText, &[0x66, 0x6f, 0xff, 0xfe]).unwrap_err();
        assert!(matches!(err, ExtractError::Decode(_)));
    }
}
