//! Document model boundary: bytes in, bytes out.
//!
//! The engine operates on [`lopdf::Document`] object graphs. This module is
//! the only place where raw byte buffers cross into and out of that
//! representation, so parse and serialize failures are mapped to their
//! dedicated error kinds here and nowhere else.

use lopdf::Document;
use serde::{Deserialize, Serialize};

use crate::error::{PdfError, Result};

/// Parse an in-memory byte buffer into a document.
///
/// Reconstructs the full page order and every object reachable from the
/// trailer. The input buffer is never mutated.
///
/// # Errors
///
/// Returns [`PdfError::Parse`] when the bytes are not a well-formed PDF
/// (bad header, truncated body, broken cross-reference structure).
pub fn parse(bytes: &[u8]) -> Result<Document> {
    Document::load_mem(bytes).map_err(PdfError::parse)
}

/// Serialize a document back into a byte buffer.
///
/// Page order is preserved exactly; the resulting buffer parses back into an
/// equivalent document.
///
/// # Errors
///
/// Returns [`PdfError::Serialize`] if the document cannot be written. For a
/// structurally valid document this is unreachable.
pub fn serialize(doc: &mut Document) -> Result<Vec<u8>> {
    let mut buffer = Vec::new();
    doc.save_to(&mut buffer).map_err(PdfError::serialize)?;
    Ok(buffer)
}

/// Number of pages in a document.
pub fn page_count(doc: &Document) -> usize {
    doc.get_pages().len()
}

/// Summary of a parsed document, for pre-validation display.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DocumentSummary {
    /// Number of pages in the document.
    pub page_count: usize,

    /// PDF version string, e.g. "1.7".
    pub version: String,

    /// Number of indirect objects in the object table.
    pub object_count: usize,

    /// Dimensions of the first page (width, height) in points, if available.
    pub page_dimensions: Option<(f32, f32)>,
}

/// Summarize a byte buffer without keeping the parsed document around.
///
/// # Errors
///
/// Returns [`PdfError::Parse`] when the bytes are not a valid document.
pub fn summarize(bytes: &[u8]) -> Result<DocumentSummary> {
    let doc = parse(bytes)?;
    Ok(summarize_document(&doc))
}

/// Summarize an already parsed document.
pub fn summarize_document(doc: &Document) -> DocumentSummary {
    let pages = doc.get_pages();

    // First page MediaBox, if it is present and well-formed.
    let page_dimensions = pages.values().next().and_then(|&page_id| {
        let page_dict = doc.get_dictionary(page_id).ok()?;
        match page_dict.get(b"MediaBox").ok()? {
            lopdf::Object::Array(arr) if arr.len() >= 4 => {
                let width = arr[2].as_float().ok()?;
                let height = arr[3].as_float().ok()?;
                Some((width, height))
            }
            _ => None,
        }
    });

    DocumentSummary {
        page_count: pages.len(),
        version: doc.version.clone(),
        object_count: doc.objects.len(),
        page_dimensions,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::build_pdf_bytes;

    #[test]
    fn test_parse_rejects_garbage() {
        let result = parse(b"this is not a pdf");
        assert!(matches!(result, Err(PdfError::Parse(_))));
    }

    #[test]
    fn test_parse_rejects_empty_input() {
        assert!(parse(&[]).is_err());
    }

    #[test]
    fn test_round_trip_preserves_pages() {
        let bytes = build_pdf_bytes(3);

        let mut doc = parse(&bytes).unwrap();
        assert_eq!(page_count(&doc), 3);

        let reserialized = serialize(&mut doc).unwrap();
        let reparsed = parse(&reserialized).unwrap();
        assert_eq!(page_count(&reparsed), 3);
    }

    #[test]
    fn test_summarize() {
        let bytes = build_pdf_bytes(2);
        let summary = summarize(&bytes).unwrap();

        assert_eq!(summary.page_count, 2);
        assert!(summary.object_count > 0);
        assert_eq!(summary.page_dimensions, Some((612.0, 792.0)));
    }

    #[test]
    fn test_summary_serializes_to_json() {
        let bytes = build_pdf_bytes(1);
        let summary = summarize(&bytes).unwrap();
        let json = serde_json::to_string(&summary).unwrap();
        assert!(json.contains("\"pageCount\":1"));
    }
}
