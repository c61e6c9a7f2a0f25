//! PDF text extraction.
//!
//! `pdf_extract` does the heavy lifting page by page. It can panic on malformed input
//! rather than returning errors, so every call is wrapped in `catch_unwind`. When the
//! whole-document pass fails, a per-page pass over `lopdf` keeps every page that still
//! yields text. Only a document that cannot be loaded at all is a decode failure.

use std::panic::{self, AssertUnwindSafe};

use tracing::{debug, warn};

use super::ExtractError;

/// Extracts the text of every page, concatenated in page order with no separator.
///
/// Pages with no text layer (scanned images) contribute `""`.
pub fn extract_pdf_text(data: &[u8]) -> Result<String, ExtractError> {
    let pages = match extract_pages(data) {
        Ok(pages) => pages,
        Err(reason) => {
            warn!("Whole-document PDF extraction failed ({reason}); retrying page by page");
            salvage_pages(data)?
        }
    };
    debug!("Extracted {} PDF page(s)", pages.len());
    Ok(pages.into_iter().map(page_text).collect())
}

fn extract_pages(data: &[u8]) -> Result<Vec<String>, String> {
    let result = panic::catch_unwind(AssertUnwindSafe(|| {
        pdf_extract::extract_text_from_mem_by_pages(data)
    }));
    match result {
        Ok(Ok(pages)) => Ok(pages),
        Ok(Err(e)) => Err(format!("PDF extraction failed: {e}")),
        Err(_) => Err("PDF extraction panicked (malformed document)".to_string()),
    }
}

/// Loads the document with `lopdf` and extracts each page independently.
fn salvage_pages(data: &[u8]) -> Result<Vec<String>, ExtractError> {
    let document = panic::catch_unwind(AssertUnwindSafe(|| lopdf::Document::load_mem(data)))
        .map_err(|_| ExtractError::Decode("PDF could not be parsed (malformed document)".into()))?
        .map_err(|e| ExtractError::Decode(format!("PDF could not be parsed: {e}")))?;

    let pages = document
        .get_pages()
        .keys()
        .map(|&page_no| {
            let result =
                panic::catch_unwind(AssertUnwindSafe(|| document.extract_text(&[page_no])));
            match result {
                Ok(Ok(text)) => text,
                Ok(Err(e)) => {
                    warn!("Page {page_no} yielded no text: {e}");
                    String::new()
                }
                Err(_) => {
                    warn!("Page {page_no} panicked during extraction");
                    String::new()
                }
            }
        })
        .collect();
    Ok(pages)
}

/// A page that yields only whitespace has no text layer worth keeping.
fn page_text(raw: String) -> String {
    if raw.trim().is_empty() {
        String::new()
    } else {
        raw
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use lopdf::content::{Content, Operation};
    use lopdf::{dictionary, Document, Object, Stream};

    /// Builds a minimal PDF with one page per entry; `None` pages carry no text at all.
    pub(crate) fn build_pdf(pages: &[Option<&str>]) -> Vec<u8> {
        let mut doc = Document::with_version("1.5");
        let pages_id = doc.new_object_id();
        let font_id = doc.add_object(dictionary! {
            "Type" => "Font",
            "Subtype" => "Type1",
            "BaseFont" => "Helvetica",
            "Encoding" => "WinAnsiEncoding",
        });
        let resources_id = doc.add_object(dictionary! {
            "Font" => dictionary! { "F1" => font_id },
        });

        let mut kids: Vec<Object> = Vec::new();
        for page in pages {
            let operations = match page {
                Some(text) => vec![
                    Operation::new("BT", vec![]),
                    Operation::new("Tf", vec!["F1".into(), 12.into()]),
                    Operation::new("Td", vec![72.into(), 700.into()]),
                    Operation::new("Tj", vec![Object::string_literal(*text)]),
                    Operation::new("ET", vec![]),
                ],
                None => vec![],
            };
            let content = Content { operations };
            let content_id =
                doc.add_object(Stream::new(dictionary! {}, content.encode().unwrap()));
            let page_id = doc.add_object(dictionary! {
                "Type" => "Page",
                "Parent" => pages_id,
                "Contents" => content_id,
            });
            kids.push(page_id.into());
        }

        let count = kids.len() as i64;
        doc.objects.insert(
            pages_id,
            Object::Dictionary(dictionary! {
                "Type" => "Pages",
                "Kids" => kids,
                "Count" => count,
                "Resources" => resources_id,
                "MediaBox" => vec![0.into(), 0.into(), 595.into(), 842.into()],
            }),
        );
        let catalog_id = doc.add_object(dictionary! {
            "Type" => "Catalog",
            "Pages" => pages_id,
        });
        doc.trailer.set("Root", catalog_id);

        let mut out = Vec::new();
        doc.save_to(&mut out).unwrap();
        out
    }

    #[test]
    fn test_garbage_bytes_are_decode_error() {
        let err = extract_pdf_text(b"not a pdf at all").unwrap_err();
        assert!(matches!(err, ExtractError::Decode(_)));
    }

    #[test]
    fn test_header_only_pdf_is_decode_error() {
        let err = extract_pdf_text(b"%PDF-1.4\n%%EOF\n").unwrap_err();
        assert!(matches!(err, ExtractError::Decode(_)));
    }

    #[test]
    fn test_pages_without_text_layer_extract_to_empty_string() {
        let pdf = build_pdf(&[None, None]);
        let text = extract_pdf_text(&pdf).unwrap();
        assert_eq!(text, "", "scanned pages must yield an empty string, not an error");
    }

    #[test]
    fn test_text_pages_concatenate_in_page_order() {
        let pdf = build_pdf(&[Some("Alpha page"), None, Some("Omega page")]);
        let text = extract_pdf_text(&pdf).unwrap();
        let alpha = text.find("Alpha").expect("first page text present");
        let omega = text.find("Omega").expect("last page text present");
        assert!(alpha < omega, "page order must be preserved: {text:?}");
    }

    #[test]
    fn test_page_text_blanks_whitespace_only_pages() {
        assert_eq!(page_text("\n\n  \n".to_string()), "");
        assert_eq!(page_text("\nLed a team\n".to_string()), "\nLed a team\n");
    }
}
