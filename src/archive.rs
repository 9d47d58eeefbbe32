//! Zip packing for split outputs.
//!
//! A generic archive writer: names and byte buffers go in, one deflated zip
//! buffer comes out. Nothing in here knows about PDFs.

use std::io::{Cursor, Write};

use zip::ZipWriter;
use zip::write::SimpleFileOptions;

use crate::error::{PdfError, Result};
use crate::split::SplitPage;

/// Bundle files into a single zip archive, preserving input order.
///
/// # Errors
///
/// Returns [`PdfError::Archive`] if an entry cannot be written.
pub fn pack_archive(files: &[SplitPage]) -> Result<Vec<u8>> {
    let mut buffer = Vec::new();
    {
        let mut zip = ZipWriter::new(Cursor::new(&mut buffer));
        let options =
            SimpleFileOptions::default().compression_method(zip::CompressionMethod::Deflated);

        for file in files {
            zip.start_file(file.filename.as_str(), options)
                .map_err(|e| PdfError::Archive(format!("failed to create zip entry: {e}")))?;
            zip.write_all(&file.bytes)
                .map_err(|e| PdfError::Archive(format!("failed to write zip entry: {e}")))?;
        }

        zip.finish()
            .map_err(|e| PdfError::Archive(format!("failed to finalize zip: {e}")))?;
    }

    Ok(buffer)
}
