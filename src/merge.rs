//! Concatenating documents while preserving page order and resources.
//!
//! The first source becomes the base; every subsequent source is renumbered
//! past the destination's highest object id, its objects are moved into the
//! destination table and its pages are appended to the destination page
//! tree. Page order within each source is preserved exactly; source order is
//! the caller's order.

use lopdf::{Document, Object, ObjectId, dictionary};

use crate::document;
use crate::error::{PdfError, Result};

/// Merge PDF byte buffers into a single document.
///
/// Inputs are concatenated in the given order. Zero inputs produce a
/// minimal empty document and a single input round-trips through the
/// document model unchanged; callers that require at least two inputs
/// enforce that themselves.
///
/// # Errors
///
/// Any unparseable source fails the whole merge with [`PdfError::Parse`];
/// structural problems in a page tree surface as [`PdfError::MergeFailed`].
///
/// # Examples
///
/// ```no_run
/// # fn example(a: Vec<u8>, b: Vec<u8>) -> pdftoolbox::Result<()> {
/// let merged = pdftoolbox::merge::merge(&[a, b])?;
/// # Ok(())
/// # }
/// ```
pub fn merge(inputs: &[Vec<u8>]) -> Result<Vec<u8>> {
    let mut docs = Vec::with_capacity(inputs.len());
    for bytes in inputs {
        docs.push(document::parse(bytes)?);
    }

    let mut merged = merge_documents(docs)?;
    document::serialize(&mut merged)
}

/// Merge already parsed documents into one.
pub fn merge_documents(docs: Vec<Document>) -> Result<Document> {
    let mut docs = docs.into_iter();

    let Some(mut merged) = docs.next() else {
        return Ok(empty_document());
    };
    let mut max_id = merged.max_id;
    let mut last_info = merged
        .trailer
        .get(b"Info")
        .and_then(Object::as_reference)
        .ok();

    for mut doc in docs {
        // Renumber incoming objects past everything already placed.
        doc.renumber_objects_with(max_id + 1);
        max_id = doc.max_id;

        if let Ok(info) = doc.trailer.get(b"Info").and_then(Object::as_reference) {
            last_info = Some(info);
        }

        let doc_pages: Vec<ObjectId> = doc.get_pages().into_values().collect();
        merged.objects.extend(doc.objects);

        add_pages_to_tree(&mut merged, &doc_pages)?;
    }

    // Metadata is carried opportunistically: the last source wins.
    if let Some(info) = last_info {
        merged.trailer.set("Info", Object::Reference(info));
    }

    // Source catalogs and page-tree roots are orphans now.
    merged.max_id = max_id;
    merged.prune_objects();
    merged.renumber_objects();

    Ok(merged)
}

/// Append pages to the merged document's page tree and repoint their Parent
/// at the destination root.
fn add_pages_to_tree(merged: &mut Document, page_ids: &[ObjectId]) -> Result<()> {
    let pages_id = merged
        .catalog()
        .and_then(|catalog| catalog.get(b"Pages"))
        .and_then(Object::as_reference)
        .map_err(|e| PdfError::merge_failed(format!("failed to get pages reference: {e}")))?;

    let pages_dict = merged
        .get_object_mut(pages_id)
        .and_then(Object::as_dict_mut)
        .map_err(|e| PdfError::merge_failed(format!("failed to get pages object: {e}")))?;

    let kids = pages_dict
        .get_mut(b"Kids")
        .map_err(|_| PdfError::merge_failed("Pages dictionary missing Kids array"))?;
    let Object::Array(kids_array) = kids else {
        return Err(PdfError::merge_failed("Kids is not an array"));
    };
    for &page_id in page_ids {
        kids_array.push(Object::Reference(page_id));
    }

    let current_count = pages_dict.get(b"Count").and_then(Object::as_i64).unwrap_or(0);
    let new_count = current_count + page_ids.len() as i64;
    pages_dict.set("Count", Object::Integer(new_count));

    for &page_id in page_ids {
        // The page is about to leave its original parent chain; pull any
        // inherited attributes down first.
        crate::split::flatten_inherited_attributes(merged, page_id);

        let page_dict = merged
            .get_object_mut(page_id)
            .and_then(Object::as_dict_mut)
            .map_err(|e| PdfError::merge_failed(format!("appended page is not a dictionary: {e}")))?;
        page_dict.set("Parent", Object::Reference(pages_id));
    }

    Ok(())
}

/// A valid document with no pages, for the zero-input case.
fn empty_document() -> Document {
    let mut doc = Document::with_version("1.5");
    let pages_id = doc.add_object(dictionary! {
        "Type" => "Pages",
        "Kids" => Vec::<Object>::new(),
        "Count" => 0i64,
    });
    let catalog_id = doc.add_object(dictionary! {
        "Type" => "Catalog",
        "Pages" => pages_id,
    });
    doc.trailer.set("Root", catalog_id);
    doc
}
