//! Async file loading and writing for the CLI layer.
//!
//! The engine itself is bytes-in, bytes-out; this module is the only place
//! that touches the filesystem. Batches are loaded concurrently with bounded
//! parallelism while preserving the caller's input order.

use std::path::{Path, PathBuf};

use futures::stream::{self, StreamExt};

use crate::error::Result;

/// Default number of files loaded concurrently in a batch.
pub const DEFAULT_CONCURRENCY: usize = 4;

/// A file loaded into memory, paired with its source path.
#[derive(Debug, Clone)]
pub struct InputFile {
    /// Path the bytes were read from.
    pub path: PathBuf,

    /// Raw file contents.
    pub bytes: Vec<u8>,
}

impl InputFile {
    /// File size in bytes.
    pub fn size(&self) -> usize {
        self.bytes.len()
    }
}

/// Read a single file into memory.
pub async fn read_file(path: &Path) -> Result<InputFile> {
    let bytes = tokio::fs::read(path).await?;
    Ok(InputFile {
        path: path.to_path_buf(),
        bytes,
    })
}

/// Read a batch of files concurrently.
///
/// Results come back in input order regardless of completion order. The
/// first failed read fails the whole batch.
pub async fn read_all(paths: &[PathBuf], concurrency: usize) -> Result<Vec<InputFile>> {
    let concurrency = concurrency.max(1);

    let tasks = paths.iter().enumerate().map(|(idx, path)| {
        let path = path.clone();
        async move { (idx, read_file(&path).await) }
    });

    let mut indexed: Vec<(usize, Result<InputFile>)> = stream::iter(tasks)
        .buffer_unordered(concurrency)
        .collect::<Vec<_>>()
        .await;
    indexed.sort_by_key(|(idx, _)| *idx);

    let mut files = Vec::with_capacity(paths.len());
    for (_, result) in indexed {
        files.push(result?);
    }

    Ok(files)
}

/// Write bytes to a file, creating parent directories as needed.
pub async fn write_file(path: &Path, bytes: &[u8]) -> Result<()> {
    if let Some(parent) = path.parent()
        && !parent.as_os_str().is_empty()
    {
        tokio::fs::create_dir_all(parent).await?;
    }
    tokio::fs::write(path, bytes).await?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::PdfError;
    use tempfile::TempDir;

    fn create_file(dir: &TempDir, name: &str, contents: &[u8]) -> PathBuf {
        let path = dir.path().join(name);
        std::fs::write(&path, contents).unwrap();
        path
    }

    #[tokio::test]
    async fn test_read_single_file() {
        let dir = TempDir::new().unwrap();
        let path = create_file(&dir, "a.pdf", b"hello");

        let file = read_file(&path).await.unwrap();
        assert_eq!(file.bytes, b"hello");
        assert_eq!(file.path, path);
        assert_eq!(file.size(), 5);
    }

    #[tokio::test]
    async fn test_read_missing_file() {
        let result = read_file(Path::new("/nonexistent/missing.pdf")).await;
        assert!(matches!(result, Err(PdfError::Io(_))));
    }

    #[tokio::test]
    async fn test_read_all_preserves_order() {
        let dir = TempDir::new().unwrap();
        let paths = vec![
            create_file(&dir, "c.pdf", b"c"),
            create_file(&dir, "a.pdf", b"a"),
            create_file(&dir, "b.pdf", b"b"),
        ];

        let files = read_all(&paths, 2).await.unwrap();
        let contents: Vec<&[u8]> = files.iter().map(|f| f.bytes.as_slice()).collect();
        assert_eq!(contents, vec![b"c" as &[u8], b"a", b"b"]);
    }

    #[tokio::test]
    async fn test_read_all_fails_on_missing_file() {
        let dir = TempDir::new().unwrap();
        let paths = vec![
            create_file(&dir, "a.pdf", b"a"),
            dir.path().join("missing.pdf"),
        ];

        assert!(read_all(&paths, 2).await.is_err());
    }

    #[tokio::test]
    async fn test_write_creates_parent_dirs() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("nested/out/result.pdf");

        write_file(&path, b"data").await.unwrap();
        assert_eq!(std::fs::read(&path).unwrap(), b"data");
    }
}
