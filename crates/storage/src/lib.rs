pub mod filesystem;
pub mod upload;

use async_trait::async_trait;
use common::file_utils::FilenameValidationError;
use std::path::{Path, PathBuf};
use thiserror::Error;

pub use filesystem::FilesystemStorage;
pub use upload::PendingUpload;

#[derive(Debug, Error)]
pub enum StorageError {
    #[error("Invalid file name: {0}")]
    InvalidFileName(FilenameValidationError),
    #[error("Invalid file path {requested:?}: {reason}")]
    InvalidPath {
        requested: String,
        reason: &'static str,
    },
    #[error("File not found: {0}")]
    NotFound(PathBuf),
    #[error("Failed to create directory {path}: {source}")]
    CreateDir {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("Error creating file: {source}")]
    CreateFile {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("Error saving file: {source}")]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("Failed to open file {path}: {source}")]
    Open {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("Failed to resolve path {path}: {source}")]
    Resolve {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// An opened file ready to be streamed back
#[derive(Debug)]
pub struct StoredFile {
    pub path: PathBuf,
    pub file: tokio::fs::File,
    pub len: u64,
}

/// Storage backend for uploaded files, scoped to a single root directory
#[async_trait]
pub trait Storage: Send + Sync {
    /// Root directory every stored file lives under
    fn root(&self) -> &Path;

    /// Create the root directory if it does not exist yet
    async fn ensure_root(&self) -> Result<(), StorageError>;

    /// Start streaming a file that will land at `<root>/<filename>`.
    /// `filename` must be a bare file name. Nothing is visible under that name
    /// until the returned upload is committed.
    async fn begin_upload(&self, filename: &str) -> Result<PendingUpload, StorageError>;

    /// Write `content` to `<root>/<filename>` in one go, replacing any
    /// existing file
    async fn store_file(&self, filename: &str, content: &[u8]) -> Result<PathBuf, StorageError> {
        let mut upload = self.begin_upload(filename).await?;
        upload.write_chunk(content).await?;
        upload.commit().await
    }

    /// Open a file by its path relative to the root
    async fn open_file(&self, requested: &str) -> Result<StoredFile, StorageError>;
}
