//! PDF compression: content-stream re-encoding and object deduplication.
//!
//! Compression never changes page count, order, or decoded page content.
//! It works in three passes over the object graph:
//!
//! 1. Re-encode every page's content streams with FlateDecode at the
//!    quality-selected effort level.
//! 2. Merge byte-identical objects, rewriting all references to the
//!    surviving copy.
//! 3. Prune objects no longer reachable from the trailer and renumber the
//!    remaining ids densely.

use std::collections::{HashMap, HashSet};
use std::hash::{Hash, Hasher};
use std::io::Write;
use std::str::FromStr;

use flate2::Compression;
use flate2::write::ZlibEncoder;
use lopdf::{Dictionary, Document, Object, ObjectId, StringFormat};
use serde::{Deserialize, Serialize};

use crate::document;
use crate::error::{PdfError, Result};

/// Compression effort level.
///
/// Affects only the encoder configuration, never the structure of the
/// output: all levels run the same passes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Quality {
    /// Least effort, fastest; largest output.
    Low,
    /// Balanced effort (default).
    #[default]
    Medium,
    /// Maximum effort; smallest output.
    High,
}

impl Quality {
    /// Map the quality knob to a flate2 compression level.
    pub(crate) fn flate_level(self) -> Compression {
        match self {
            Self::Low => Compression::fast(),
            Self::Medium => Compression::default(),
            Self::High => Compression::best(),
        }
    }
}

impl FromStr for Quality {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "low" => Ok(Self::Low),
            "medium" => Ok(Self::Medium),
            "high" => Ok(Self::High),
            _ => Err(format!(
                "Invalid quality: {s}. Must be one of: low, medium, high"
            )),
        }
    }
}

/// Size statistics for a compression run, computed from the whole input and
/// output buffers.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CompressionStats {
    /// Size of the input buffer in bytes.
    pub original_size: usize,

    /// Size of the output buffer in bytes.
    pub compressed_size: usize,

    /// Size reduction in percent; 0 when the input was empty. Negative when
    /// the output grew.
    pub reduction_pct: f64,
}

impl CompressionStats {
    /// Compute stats from input/output sizes.
    pub fn new(original_size: usize, compressed_size: usize) -> Self {
        let reduction_pct = if original_size == 0 {
            0.0
        } else {
            (original_size as f64 - compressed_size as f64) / original_size as f64 * 100.0
        };

        Self {
            original_size,
            compressed_size,
            reduction_pct,
        }
    }
}

/// Per-pass counters for a document-level compression run.
#[derive(Debug, Clone, Copy, Default)]
pub struct CompressReport {
    /// Content streams re-encoded.
    pub streams_recoded: usize,

    /// Byte-identical objects merged away.
    pub objects_deduplicated: usize,

    /// Unreachable objects removed.
    pub objects_pruned: usize,
}

/// Compress a PDF byte buffer.
///
/// Parses the input, compresses the document in place, serializes it back
/// and reports size statistics. The input buffer is never mutated.
///
/// # Errors
///
/// Returns [`PdfError::Parse`] for invalid input and propagates
/// serialization errors; on a structurally valid document the transform
/// itself does not fail.
///
/// # Examples
///
/// ```no_run
/// use pdftoolbox::compress::{Quality, compress};
///
/// # fn example(input: &[u8]) -> pdftoolbox::Result<()> {
/// let (output, stats) = compress(input, Quality::Medium)?;
/// println!("reduced by {:.1}%", stats.reduction_pct);
/// # Ok(())
/// # }
/// ```
pub fn compress(input: &[u8], quality: Quality) -> Result<(Vec<u8>, CompressionStats)> {
    let mut doc = document::parse(input)?;
    compress_document(&mut doc, quality)?;
    let output = document::serialize(&mut doc)?;
    let stats = CompressionStats::new(input.len(), output.len());
    Ok((output, stats))
}

/// Compress an already parsed document in place.
pub fn compress_document(doc: &mut Document, quality: Quality) -> Result<CompressReport> {
    let streams_recoded = recompress_content_streams(doc, quality)?;
    let objects_deduplicated = merge_identical_objects(doc);
    let objects_pruned = doc.prune_objects().len();
    doc.renumber_objects();

    Ok(CompressReport {
        streams_recoded,
        objects_deduplicated,
        objects_pruned,
    })
}

/// Stream filter situation, as far as re-encoding is concerned.
enum ContentFilter {
    /// No Filter entry: raw bytes.
    Plain,
    /// A single FlateDecode filter.
    Flate,
    /// Anything else; left untouched.
    Other,
}

fn content_filter(dict: &Dictionary) -> ContentFilter {
    match dict.get(b"Filter") {
        Err(_) => ContentFilter::Plain,
        Ok(Object::Name(name)) if name == b"FlateDecode" => ContentFilter::Flate,
        Ok(Object::Array(filters)) if filters.len() == 1 => match &filters[0] {
            Object::Name(name) if name == b"FlateDecode" => ContentFilter::Flate,
            _ => ContentFilter::Other,
        },
        Ok(_) => ContentFilter::Other,
    }
}

/// Re-encode the content streams of every page with FlateDecode.
///
/// Streams carrying any other filter are left alone; their decode path is
/// not ours to rewrite. A stream shared by several pages is only processed
/// once.
fn recompress_content_streams(doc: &mut Document, quality: Quality) -> Result<usize> {
    let mut content_ids: Vec<ObjectId> = Vec::new();
    let mut seen = HashSet::new();
    for (_, page_id) in doc.get_pages() {
        for id in doc.get_page_contents(page_id) {
            if seen.insert(id) {
                content_ids.push(id);
            }
        }
    }

    let mut recoded = 0;
    for id in content_ids {
        let Ok(stream) = doc.get_object_mut(id).and_then(Object::as_stream_mut) else {
            continue;
        };

        let data = match content_filter(&stream.dict) {
            ContentFilter::Plain => stream.content.clone(),
            ContentFilter::Flate => match stream.decompressed_content() {
                Ok(data) => data,
                // Undecodable stream: leave as found.
                Err(_) => continue,
            },
            ContentFilter::Other => continue,
        };

        let encoded = deflate(&data, quality.flate_level())?;
        stream.dict.set("Filter", Object::Name(b"FlateDecode".to_vec()));
        stream.dict.remove(b"DecodeParms");
        stream.set_content(encoded);
        recoded += 1;
    }

    Ok(recoded)
}

fn deflate(data: &[u8], level: Compression) -> Result<Vec<u8>> {
    let mut encoder = ZlibEncoder::new(Vec::new(), level);
    encoder.write_all(data).map_err(PdfError::serialize)?;
    encoder.finish().map_err(PdfError::serialize)
}

/// Merge byte-identical objects across the whole document.
///
/// Objects are grouped by a recursive content fingerprint and each group is
/// confirmed by structural equality before merging. Within a group the
/// lowest object id survives and every reference to a duplicate is rewritten
/// to it, so the pass is deterministic regardless of table iteration order.
///
/// Page, page-tree and catalog dictionaries are never candidates: two
/// visually identical pages must stay two pages.
///
/// Returns the number of objects removed.
pub fn merge_identical_objects(doc: &mut Document) -> usize {
    let protected = structural_ids(doc);

    let mut groups: HashMap<u64, Vec<ObjectId>> = HashMap::new();
    for (&id, object) in &doc.objects {
        if protected.contains(&id) {
            continue;
        }
        groups.entry(fingerprint(object)).or_default().push(id);
    }

    let mut replacements: HashMap<ObjectId, ObjectId> = HashMap::new();
    for mut ids in groups.into_values() {
        if ids.len() < 2 {
            continue;
        }
        ids.sort_unstable();
        let survivor = ids[0];
        for &duplicate in &ids[1..] {
            // Fingerprints can collide; confirm before merging.
            if doc.objects.get(&duplicate) == doc.objects.get(&survivor) {
                replacements.insert(duplicate, survivor);
            }
        }
    }

    if replacements.is_empty() {
        return 0;
    }

    doc.traverse_objects(|object| {
        if let Object::Reference(id) = object
            && let Some(&survivor) = replacements.get(id)
        {
            *id = survivor;
        }
    });

    for duplicate in replacements.keys() {
        doc.objects.remove(duplicate);
    }

    replacements.len()
}

/// Ids that must never be merged: the catalog, page-tree nodes, pages, and
/// anything the trailer points at directly.
fn structural_ids(doc: &Document) -> HashSet<ObjectId> {
    let mut ids = HashSet::new();

    for key in [b"Root".as_slice(), b"Info".as_slice(), b"Encrypt".as_slice()] {
        if let Ok(id) = doc.trailer.get(key).and_then(Object::as_reference) {
            ids.insert(id);
        }
    }

    for (&id, object) in &doc.objects {
        if let Ok(dict) = object.as_dict()
            && let Ok(type_name) = dict.get(b"Type").and_then(Object::as_name)
            && (type_name == b"Page" || type_name == b"Pages" || type_name == b"Catalog")
        {
            ids.insert(id);
        }
    }

    ids
}

fn fingerprint(object: &Object) -> u64 {
    let mut hasher = std::collections::hash_map::DefaultHasher::new();
    hash_object(object, &mut hasher);
    hasher.finish()
}

fn hash_object<H: Hasher>(object: &Object, hasher: &mut H) {
    match object {
        Object::Null => 0u8.hash(hasher),
        Object::Boolean(value) => {
            1u8.hash(hasher);
            value.hash(hasher);
        }
        Object::Integer(value) => {
            2u8.hash(hasher);
            value.hash(hasher);
        }
        Object::Real(value) => {
            3u8.hash(hasher);
            value.to_bits().hash(hasher);
        }
        Object::String(bytes, format) => {
            4u8.hash(hasher);
            bytes.hash(hasher);
            matches!(format, StringFormat::Hexadecimal).hash(hasher);
        }
        Object::Name(name) => {
            5u8.hash(hasher);
            name.hash(hasher);
        }
        Object::Array(items) => {
            6u8.hash(hasher);
            items.len().hash(hasher);
            for item in items {
                hash_object(item, hasher);
            }
        }
        Object::Dictionary(dict) => {
            7u8.hash(hasher);
            hash_dictionary(dict, hasher);
        }
        Object::Stream(stream) => {
            8u8.hash(hasher);
            hash_dictionary(&stream.dict, hasher);
            stream.content.hash(hasher);
        }
        Object::Reference(id) => {
            9u8.hash(hasher);
            id.hash(hasher);
        }
    }
}

fn hash_dictionary<H: Hasher>(dict: &Dictionary, hasher: &mut H) {
    dict.len().hash(hasher);
    for (key, value) in dict.iter() {
        key.hash(hasher);
        hash_object(value, hasher);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::{build_pdf, build_pdf_bytes};
    use lopdf::dictionary;

    #[test]
    fn test_quality_from_str() {
        assert_eq!(Quality::from_str("low").unwrap(), Quality::Low);
        assert_eq!(Quality::from_str("MEDIUM").unwrap(), Quality::Medium);
        assert_eq!(Quality::from_str("high").unwrap(), Quality::High);
        assert!(Quality::from_str("ultra").is_err());
    }

    #[test]
    fn test_stats_reduction() {
        let stats = CompressionStats::new(1000, 250);
        assert_eq!(stats.reduction_pct, 75.0);
    }

    #[test]
    fn test_stats_zero_original_size() {
        let stats = CompressionStats::new(0, 0);
        assert_eq!(stats.reduction_pct, 0.0);
    }

    #[test]
    fn test_stats_negative_reduction() {
        // Output grew; the percentage goes negative, never panics.
        let stats = CompressionStats::new(100, 150);
        assert_eq!(stats.reduction_pct, -50.0);
    }

    #[test]
    fn test_compress_preserves_pages_and_content() {
        let bytes = build_pdf_bytes(3);
        let source = crate::document::parse(&bytes).unwrap();
        let original_contents: Vec<Vec<u8>> = source
            .get_pages()
            .values()
            .map(|&id| source.get_page_content(id).unwrap())
            .collect();

        let (output, stats) = compress(&bytes, Quality::High).unwrap();
        assert_eq!(stats.original_size, bytes.len());
        assert_eq!(stats.compressed_size, output.len());

        let compressed = crate::document::parse(&output).unwrap();
        let pages = compressed.get_pages();
        assert_eq!(pages.len(), 3);

        // Stored encoding changed; decoded content did not.
        for (i, &page_id) in pages.values().enumerate() {
            let content = compressed.get_page_content(page_id).unwrap();
            assert_eq!(content, original_contents[i]);
        }
    }

    #[test]
    fn test_compress_marks_streams_flate() {
        let mut doc = build_pdf(1);
        let report = compress_document(&mut doc, Quality::Medium).unwrap();
        assert_eq!(report.streams_recoded, 1);

        let page_id = *doc.get_pages().values().next().unwrap();
        let content_id = doc.get_page_contents(page_id)[0];
        let stream = doc.get_object(content_id).and_then(Object::as_stream).unwrap();
        assert!(matches!(content_filter(&stream.dict), ContentFilter::Flate));
    }

    #[test]
    fn test_compress_invalid_input() {
        assert!(compress(b"not a pdf", Quality::Medium).is_err());
    }

    #[test]
    fn test_merge_identical_objects_rewrites_references() {
        let mut doc = build_pdf(2);

        // Two byte-identical annotation dictionaries behind distinct ids.
        let extra_a = doc.add_object(dictionary! {
            "S" => "GoTo",
            "D" => Object::string_literal("top"),
        });
        let extra_b = doc.add_object(dictionary! {
            "S" => "GoTo",
            "D" => Object::string_literal("top"),
        });
        assert_ne!(extra_a, extra_b);

        let page_ids: Vec<_> = doc.get_pages().into_values().collect();
        for (page_id, extra) in page_ids.iter().zip([extra_a, extra_b]) {
            let page = doc
                .get_object_mut(*page_id)
                .and_then(Object::as_dict_mut)
                .unwrap();
            page.set("Dest", Object::Reference(extra));
        }

        let removed = merge_identical_objects(&mut doc);
        assert_eq!(removed, 1);

        let survivor = extra_a.min(extra_b);
        assert!(doc.objects.contains_key(&survivor));
        assert!(!doc.objects.contains_key(&extra_a.max(extra_b)));

        for page_id in page_ids {
            let page = doc.get_dictionary(page_id).unwrap();
            let dest = page.get(b"Dest").and_then(Object::as_reference).unwrap();
            assert_eq!(dest, survivor);
        }
    }

    #[test]
    fn test_identical_pages_are_not_merged() {
        // Pages share one resources object already; give both pages
        // byte-identical dictionaries apart from their ids.
        let bytes = build_pdf_bytes(2);
        let (output, _) = compress(&bytes, Quality::Medium).unwrap();
        let doc = crate::document::parse(&output).unwrap();
        assert_eq!(doc.get_pages().len(), 2);
    }

    #[test]
    fn test_compress_removes_orphans() {
        let mut doc = build_pdf(1);
        doc.add_object(dictionary! { "Unused" => "Orphan" });

        let report = compress_document(&mut doc, Quality::Medium).unwrap();
        assert!(report.objects_pruned >= 1);
    }
}
