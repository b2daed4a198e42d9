//! In-progress uploads

use crate::StorageError;
use std::io;
use std::path::{Path, PathBuf};
use tempfile::TempPath;
use tokio::io::AsyncWriteExt;
use tracing::debug;

/// An upload being streamed into a temporary file inside the root.
///
/// The target name only appears once [`PendingUpload::commit`] renames the
/// temporary file over it. Dropping an uncommitted upload deletes the
/// temporary file.
#[derive(Debug)]
pub struct PendingUpload {
    target: PathBuf,
    temp_path: TempPath,
    file: tokio::fs::File,
    written: u64,
}

impl PendingUpload {
    pub(crate) fn new(target: PathBuf, temp_path: TempPath, file: tokio::fs::File) -> Self {
        Self {
            target,
            temp_path,
            file,
            written: 0,
        }
    }

    /// Final location of the file once committed
    pub fn target(&self) -> &Path {
        &self.target
    }

    /// Bytes written so far
    pub fn written(&self) -> u64 {
        self.written
    }

    pub async fn write_chunk(&mut self, chunk: &[u8]) -> Result<(), StorageError> {
        self.file
            .write_all(chunk)
            .await
            .map_err(|source| StorageError::Write {
                path: self.target.clone(),
                source,
            })?;
        self.written += chunk.len() as u64;
        Ok(())
    }

    /// Flush to disk and move the file into place, replacing any existing file
    pub async fn commit(self) -> Result<PathBuf, StorageError> {
        let Self {
            target,
            temp_path,
            mut file,
            written,
        } = self;

        let write_err = |source| StorageError::Write {
            path: target.clone(),
            source,
        };
        file.flush().await.map_err(write_err)?;
        file.sync_all().await.map_err(write_err)?;
        drop(file);

        // rename replaces a symlink at the target instead of following it
        let destination = target.clone();
        let persisted = tokio::task::spawn_blocking(move || {
            temp_path.persist(&destination).map_err(|e| e.error)
        })
        .await
        .unwrap_or_else(|e| Err(io::Error::new(io::ErrorKind::Other, e)));

        persisted.map_err(|source| StorageError::CreateFile {
            path: target.clone(),
            source,
        })?;

        debug!(path = ?target, bytes = written, "Stored file");
        Ok(target)
    }
}
