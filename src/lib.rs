//! pdftoolbox - Transform PDF documents: compress, split, merge.
//!
//! This library provides a bytes-in, bytes-out engine for reworking PDF
//! documents. It supports:
//!
//! - Content-stream compression with a quality knob
//! - Duplicate-object merging and orphan removal
//! - Splitting into independent single-page documents
//! - Merging documents in order with full object remapping
//! - Lenient page-range expressions ("1-3,5,7-10")
//! - Packing split outputs into a zip archive
//!
//! # Examples
//!
//! ## Compress
//!
//! ```no_run
//! use pdftoolbox::compress::{Quality, compress};
//!
//! # fn example(input: &[u8]) -> pdftoolbox::Result<()> {
//! let (output, stats) = compress(input, Quality::High)?;
//! println!("saved {:.1}%", stats.reduction_pct);
//! # Ok(())
//! # }
//! ```
//!
//! ## Split and pack
//!
//! ```no_run
//! use pdftoolbox::split::{SplitMode, split};
//! use pdftoolbox::archive::pack_archive;
//!
//! # fn example(input: &[u8]) -> pdftoolbox::Result<()> {
//! let pages = split(input, SplitMode::Range, "1-3,5")?;
//! let zip = pack_archive(&pages)?;
//! # Ok(())
//! # }
//! ```
//!
//! ## Merge
//!
//! ```no_run
//! # fn example(a: Vec<u8>, b: Vec<u8>) -> pdftoolbox::Result<()> {
//! let merged = pdftoolbox::merge::merge(&[a, b])?;
//! # Ok(())
//! # }
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod archive;
pub mod cli;
pub mod compress;
pub mod document;
pub mod error;
pub mod io;
pub mod merge;
pub mod range;
pub mod split;
pub mod utils;

#[cfg(test)]
pub(crate) mod test_support;

pub use compress::{CompressionStats, Quality};
pub use error::{PdfError, Result};
pub use range::PageSelection;
pub use split::{SplitMode, SplitPage};

/// Library version from Cargo.toml.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Library name.
pub const NAME: &str = env!("CARGO_PKG_NAME");
