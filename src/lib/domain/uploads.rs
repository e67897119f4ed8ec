//! Uploaded file storage

use std::path::PathBuf;

use async_trait::async_trait;
use axum::body::Bytes;
use thiserror::Error;

#[cfg(test)]
use mockall::mock;

/// A stored upload
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FileRef {
    /// Where the bytes were written
    pub stored_path: PathBuf,

    /// The file name the client uploaded
    pub original_name: String,
}

/// Errors that can occur while storing an upload
#[derive(Debug, Error)]
pub enum StorageError {
    /// Writing the file failed
    #[error("could not write upload to {}", path.display())]
    Write {
        /// Destination path
        path: PathBuf,

        /// Underlying I/O error
        #[source]
        source: std::io::Error,
    },
}

/// Persists uploaded files
#[async_trait]
pub trait FileStore: Clone + Send + Sync + 'static {
    /// Store `bytes` under a unique name derived from `original_name`.
    ///
    /// # Returns
    /// - [`Ok`] with a [`FileRef`] pointing at the written file.
    /// - [`Err`] with a [`StorageError`] if the file could not be written.
    async fn store(&self, original_name: &str, bytes: Bytes) -> Result<FileRef, StorageError>;
}

#[cfg(test)]
mock! {
    pub FileStore {}

    impl Clone for FileStore {
        fn clone(&self) -> Self;
    }

    #[async_trait]
    impl FileStore for FileStore {
        async fn store(&self, original_name: &str, bytes: Bytes) -> Result<FileRef, StorageError>;
    }
}
