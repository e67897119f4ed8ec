//! Local filesystem upload store

use std::path::PathBuf;

use async_trait::async_trait;
use axum::body::Bytes;
use chrono::Utc;
use clap::Parser;
use tracing::debug;
use uuid::Uuid;

use crate::domain::uploads::{FileRef, FileStore, StorageError};

/// Upload storage configuration
#[derive(Clone, Debug, Parser)]
pub struct StorageConfig {
    /// Directory uploaded resumes are written to
    #[arg(long, env = "UPLOAD_DIR", default_value = "uploads")]
    pub upload_dir: PathBuf,
}

/// Writes uploads into a single directory
#[derive(Clone, Debug)]
pub struct LocalFileStore {
    root: PathBuf,
}

impl LocalFileStore {
    /// Creates a store rooted at `root`. The directory must already exist.
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// Unique on-disk name: `{epoch-millis}-{uuid}-{name}`
    fn stored_name(original_name: &str) -> String {
        format!(
            "{}-{}-{}",
            Utc::now().timestamp_millis(),
            Uuid::now_v7().simple(),
            sanitize(original_name)
        )
    }
}

/// Keeps only the final path component, so a crafted name cannot escape the upload directory.
fn sanitize(original_name: &str) -> String {
    let name = original_name
        .rsplit(['/', '\\'])
        .next()
        .unwrap_or_default()
        .trim();

    match name {
        "" | "." | ".." => "resume".to_string(),
        name => name.to_string(),
    }
}

#[async_trait]
impl FileStore for LocalFileStore {
    async fn store(&self, original_name: &str, bytes: Bytes) -> Result<FileRef, StorageError> {
        let path = self.root.join(Self::stored_name(original_name));

        tokio::fs::write(&path, &bytes)
            .await
            .map_err(|source| StorageError::Write {
                path: path.clone(),
                source,
            })?;

        debug!(path = %path.display(), size = bytes.len(), "stored upload");

        Ok(FileRef {
            stored_path: path,
            original_name: original_name.to_string(),
        })
    }
}

#[cfg(test)]
mod tests {
    use testresult::TestResult;

    use super::*;

    #[test]
    fn test_sanitize() {
        assert_eq!(sanitize("cv.pdf"), "cv.pdf");
        assert_eq!(sanitize("../../etc/passwd"), "passwd");
        assert_eq!(sanitize("C:\\Users\\dana\\cv.pdf"), "cv.pdf");
        assert_eq!(sanitize("dir/"), "resume");
        assert_eq!(sanitize(".."), "resume");
    }

    #[tokio::test]
    async fn test_store_writes_bytes_and_keeps_original_name() -> TestResult {
        let dir = tempfile::tempdir()?;
        let store = LocalFileStore::new(dir.path());

        let file = store.store("cv.pdf", Bytes::from_static(b"%PDF-1.4")).await?;

        assert_eq!(file.original_name, "cv.pdf");
        assert!(file.stored_path.starts_with(dir.path()));

        let stored_name = file
            .stored_path
            .file_name()
            .and_then(|n| n.to_str())
            .unwrap_or_default();
        let (millis, rest) = stored_name.split_once('-').unwrap_or_default();

        assert!(millis.parse::<i64>().is_ok());
        assert!(rest.ends_with("-cv.pdf"));
        assert_eq!(tokio::fs::read(&file.stored_path).await?, b"%PDF-1.4");

        Ok(())
    }

    #[tokio::test]
    async fn test_same_name_uploads_never_collide() -> TestResult {
        let dir = tempfile::tempdir()?;
        let store = LocalFileStore::new(dir.path());

        let (first, second) = tokio::join!(
            store.store("cv.pdf", Bytes::from_static(b"first")),
            store.store("cv.pdf", Bytes::from_static(b"second")),
        );
        let (first, second) = (first?, second?);

        assert_ne!(first.stored_path, second.stored_path);
        assert_eq!(tokio::fs::read(&first.stored_path).await?, b"first");
        assert_eq!(tokio::fs::read(&second.stored_path).await?, b"second");

        Ok(())
    }

    #[tokio::test]
    async fn test_missing_directory_is_a_storage_error() -> TestResult {
        let dir = tempfile::tempdir()?;
        let store = LocalFileStore::new(dir.path().join("missing"));

        let result = store.store("cv.pdf", Bytes::from_static(b"x")).await;

        assert!(matches!(result, Err(StorageError::Write { .. })));

        Ok(())
    }
}
