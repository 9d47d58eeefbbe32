//! Splitting a document into independent single-page documents.
//!
//! Each selected page becomes its own document carrying the transitive
//! closure of objects the page references. Outputs are serialized
//! separately and never share object tables, so every one of them opens on
//! its own.
//!
//! The batch is fail-fast: one bad page aborts the whole split and nothing
//! is returned.

use std::str::FromStr;

use lopdf::{Document, Object, ObjectId};

use crate::document;
use crate::error::{PdfError, Result};
use crate::range::PageSelection;

/// Page attributes a leaf may inherit from its page-tree ancestors.
const INHERITABLE_PAGE_KEYS: [&[u8]; 4] = [b"Resources", b"MediaBox", b"CropBox", b"Rotate"];

/// Which pages of the source document to extract.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SplitMode {
    /// Every page, one output per page.
    #[default]
    All,
    /// Pages named by a range expression (see [`PageSelection::parse`]).
    Range,
}

impl FromStr for SplitMode {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "all" => Ok(Self::All),
            "range" => Ok(Self::Range),
            _ => Err(format!("Invalid split mode: {s}. Must be one of: all, range")),
        }
    }
}

/// One split output: a deterministic filename and the serialized document.
#[derive(Debug, Clone)]
pub struct SplitPage {
    /// `page_{n}.pdf` with the 1-based source page number.
    pub filename: String,

    /// A complete, independently parseable single-page document.
    pub bytes: Vec<u8>,
}

/// Split a PDF byte buffer into single-page documents.
///
/// With [`SplitMode::All`] every page is selected; with [`SplitMode::Range`]
/// the selection comes from `range_expr`. An empty selection (empty or
/// fully-invalid expression) yields an empty Vec, not an error — the caller
/// decides whether that deserves a warning. Outputs are in ascending page
/// order.
///
/// # Errors
///
/// Returns [`PdfError::Parse`] for invalid input bytes and
/// [`PdfError::SplitFailed`] if any selected page cannot be extracted; no
/// partial batch is returned.
pub fn split(input: &[u8], mode: SplitMode, range_expr: &str) -> Result<Vec<SplitPage>> {
    let source = document::parse(input)?;
    let total_pages = document::page_count(&source);

    let selection = match mode {
        SplitMode::All => PageSelection::all(total_pages),
        SplitMode::Range => PageSelection::parse(range_expr, total_pages),
    };

    split_document(&source, &selection)
}

/// Split an already parsed document according to a page selection.
pub fn split_document(source: &Document, selection: &PageSelection) -> Result<Vec<SplitPage>> {
    let mut outputs = Vec::with_capacity(selection.len());

    for index in selection.iter() {
        let page_number = (index + 1) as u32;
        let bytes = extract_single_page(source, page_number)?;

        outputs.push(SplitPage {
            filename: format!("page_{page_number}.pdf"),
            bytes,
        });
    }

    Ok(outputs)
}

/// Build an independent document holding only `page_number` (1-based).
fn extract_single_page(source: &Document, page_number: u32) -> Result<Vec<u8>> {
    let mut single = source.clone();

    let page_id = *single.get_pages().get(&page_number).ok_or_else(|| {
        PdfError::split_failed(format!("page {page_number} not found in page tree"))
    })?;

    let pages_root_id = single
        .catalog()
        .and_then(|catalog| catalog.get(b"Pages"))
        .and_then(Object::as_reference)
        .map_err(|e| PdfError::split_failed(format!("no page tree root: {e}")))?;

    // Attributes inherited from ancestors must survive the ancestors being
    // cut away below.
    flatten_inherited_attributes(&mut single, page_id);

    let pages_dict = single
        .get_object_mut(pages_root_id)
        .and_then(Object::as_dict_mut)
        .map_err(|e| PdfError::split_failed(format!("page tree root is not a dictionary: {e}")))?;
    pages_dict.set("Kids", vec![Object::Reference(page_id)]);
    pages_dict.set("Count", Object::Integer(1));

    let page_dict = single
        .get_object_mut(page_id)
        .and_then(Object::as_dict_mut)
        .map_err(|e| PdfError::split_failed(format!("page {page_number} is not a dictionary: {e}")))?;
    page_dict.set("Parent", Object::Reference(pages_root_id));

    // Everything the remaining page does not reach is dropped.
    single.prune_objects();
    single.renumber_objects();

    document::serialize(&mut single)
}

/// Copy Resources, MediaBox, CropBox and Rotate down onto the page if it
/// only inherits them from a page-tree ancestor. Needed whenever a page is
/// about to lose its original parent chain.
pub(crate) fn flatten_inherited_attributes(doc: &mut Document, page_id: ObjectId) {
    for key in INHERITABLE_PAGE_KEYS {
        let mut inherited = None;
        let mut node = page_id;
        let mut visited = Vec::new();

        while let Ok(dict) = doc.get_dictionary(node) {
            if let Ok(value) = dict.get(key) {
                if node != page_id {
                    inherited = Some(value.clone());
                }
                break;
            }
            // Guard against Parent cycles in malformed trees.
            if visited.contains(&node) {
                break;
            }
            visited.push(node);

            match dict.get(b"Parent").and_then(Object::as_reference) {
                Ok(parent) => node = parent,
                Err(_) => break,
            }
        }

        if let Some(value) = inherited
            && let Ok(page) = doc.get_object_mut(page_id).and_then(Object::as_dict_mut)
        {
            page.set(key, value);
        }
    }
}
