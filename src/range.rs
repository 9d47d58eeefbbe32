//! Lenient page-range parsing.
//!
//! A range expression is a comma-separated list of 1-based page numbers and
//! inclusive ranges, e.g. `"1-3, 5, 7-10"`. Parsing never fails: malformed
//! tokens and out-of-range values are silently dropped, and an expression
//! with nothing usable in it simply yields an empty selection. Callers treat
//! an empty selection as "nothing to do", not as an error.
//!
//! This skip-invalid policy is a compatibility contract; do not tighten it.

use std::collections::BTreeSet;

/// A validated set of zero-based page indices.
///
/// Indices are deduplicated, strictly within `[0, total_pages)`, and stored
/// in ascending order.
///
/// # Examples
///
/// ```
/// use pdftoolbox::range::PageSelection;
///
/// let sel = PageSelection::parse("1-3,5,7-10", 10);
/// assert_eq!(sel.indices(), &[0, 1, 2, 4, 6, 7, 8, 9]);
///
/// // Malformed and out-of-range tokens are dropped, never an error.
/// let sel = PageSelection::parse("abc,1-x,99", 5);
/// assert!(sel.is_empty());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct PageSelection {
    indices: Vec<usize>,
}

impl PageSelection {
    /// Parse a range expression against a document's page count.
    ///
    /// Each comma-separated token is either a single 1-based page number or
    /// an inclusive `A-B` range. Whitespace is ignored. Tokens that do not
    /// parse, and values outside `[1, total_pages]`, are skipped.
    pub fn parse(expr: &str, total_pages: usize) -> Self {
        let mut picked = BTreeSet::new();

        for token in expr.split(',') {
            let token: String = token.chars().filter(|c| !c.is_whitespace()).collect();
            if token.is_empty() {
                continue;
            }

            if let Some((start, end)) = token.split_once('-') {
                let (Ok(start), Ok(end)) = (start.parse::<usize>(), end.parse::<usize>()) else {
                    continue;
                };
                for page in start.max(1)..=end.min(total_pages) {
                    picked.insert(page - 1);
                }
            } else if let Ok(page) = token.parse::<usize>()
                && (1..=total_pages).contains(&page)
            {
                picked.insert(page - 1);
            }
        }

        Self {
            indices: picked.into_iter().collect(),
        }
    }

    /// Select every page of a document: indices `0..total_pages`.
    pub fn all(total_pages: usize) -> Self {
        Self {
            indices: (0..total_pages).collect(),
        }
    }

    /// Zero-based indices in ascending order.
    pub fn indices(&self) -> &[usize] {
        &self.indices
    }

    /// Iterate over the selected zero-based indices.
    pub fn iter(&self) -> impl Iterator<Item = usize> + '_ {
        self.indices.iter().copied()
    }

    /// Number of selected pages.
    pub fn len(&self) -> usize {
        self.indices.len()
    }

    /// Whether nothing was selected.
    pub fn is_empty(&self) -> bool {
        self.indices.is_empty()
    }

    /// Check whether a zero-based index is selected.
    pub fn contains(&self, index: usize) -> bool {
        self.indices.binary_search(&index).is_ok()
    }

    /// 1-based page numbers, for display.
    pub fn page_numbers(&self) -> Vec<usize> {
        self.indices.iter().map(|i| i + 1).collect()
    }
}
