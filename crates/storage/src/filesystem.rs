//! Filesystem-based storage implementation

use crate::{PendingUpload, Storage, StorageError, StoredFile};
use async_trait::async_trait;
use common::file_utils::{self, FilenameValidationError};
use std::io::ErrorKind;
#[cfg(unix)]
use std::os::unix::fs::PermissionsExt;
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

const OUTSIDE_ROOT: &str = "resolves outside the root directory";

/// Temporary upload files are `.upload-<random>.part` inside the root
const TEMP_PREFIX: &str = ".upload-";
const TEMP_SUFFIX: &str = ".part";

/// Filesystem-based storage implementation
pub struct FilesystemStorage {
    root: PathBuf,
}

impl FilesystemStorage {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    fn invalid_path(requested: &str, e: FilenameValidationError) -> StorageError {
        StorageError::InvalidPath {
            requested: requested.to_string(),
            reason: e.message(),
        }
    }

    /// Check that `path`, once symlinks are resolved, still lives under the
    /// canonical root.
    ///
    /// A target that cannot be resolved (missing, a file used as a directory,
    /// a name too long, a symlink loop) is `NotFound`, except for a dangling
    /// symlink which is refused outright. Only a root that fails to resolve
    /// is a `Resolve` error.
    async fn ensure_contained(&self, path: &Path, requested: &str) -> Result<(), StorageError> {
        let root = match tokio::fs::canonicalize(&self.root).await {
            Ok(root) => root,
            Err(e) if e.kind() == ErrorKind::NotFound => {
                return Err(StorageError::NotFound(path.to_path_buf()))
            }
            Err(source) => {
                return Err(StorageError::Resolve {
                    path: self.root.clone(),
                    source,
                })
            }
        };

        let target = match tokio::fs::canonicalize(path).await {
            Ok(target) => target,
            Err(e) if e.kind() == ErrorKind::NotFound => {
                // A symlink whose target is missing would be followed on create
                if tokio::fs::symlink_metadata(path).await.is_ok() {
                    warn!(path = ?path, "Refusing dangling symlink");
                    return Err(StorageError::InvalidPath {
                        requested: requested.to_string(),
                        reason: OUTSIDE_ROOT,
                    });
                }
                return Err(StorageError::NotFound(path.to_path_buf()));
            }
            Err(e) => {
                debug!(path = ?path, error = %e, "Target does not resolve");
                return Err(StorageError::NotFound(path.to_path_buf()));
            }
        };

        if !target.starts_with(&root) {
            warn!(requested = ?requested, target = ?target, "Path resolves outside root");
            return Err(StorageError::InvalidPath {
                requested: requested.to_string(),
                reason: OUTSIDE_ROOT,
            });
        }

        Ok(())
    }
}

#[async_trait]
impl Storage for FilesystemStorage {
    fn root(&self) -> &Path {
        &self.root
    }

    async fn ensure_root(&self) -> Result<(), StorageError> {
        let mut builder = tokio::fs::DirBuilder::new();
        builder.recursive(true);
        #[cfg(unix)]
        builder.mode(0o755);
        builder
            .create(&self.root)
            .await
            .map_err(|source| StorageError::CreateDir {
                path: self.root.clone(),
                source,
            })
    }

    async fn begin_upload(&self, filename: &str) -> Result<PendingUpload, StorageError> {
        file_utils::validate_filename(filename).map_err(StorageError::InvalidFileName)?;

        self.ensure_root().await?;

        let target = file_utils::join_within_root(&self.root, filename)
            .map_err(|e| Self::invalid_path(filename, e))?;

        match self.ensure_contained(&target, filename).await {
            Ok(()) | Err(StorageError::NotFound(_)) => {}
            Err(e) => return Err(e),
        }

        // Hidden sibling in the root so the final rename stays on one filesystem
        let root = self.root.clone();
        let created = tokio::task::spawn_blocking(move || {
            let mut builder = tempfile::Builder::new();
            builder.prefix(TEMP_PREFIX).suffix(TEMP_SUFFIX);
            #[cfg(unix)]
            builder.permissions(std::fs::Permissions::from_mode(0o644));
            builder.tempfile_in(&root)
        })
        .await
        .unwrap_or_else(|e| Err(std::io::Error::new(ErrorKind::Other, e)));

        let temp = created.map_err(|source| StorageError::CreateFile {
            path: target.clone(),
            source,
        })?;
        let (file, temp_path) = temp.into_parts();

        debug!(target = ?target, temp = ?temp_path, "Upload started");
        Ok(PendingUpload::new(
            target,
            temp_path,
            tokio::fs::File::from_std(file),
        ))
    }

    async fn open_file(&self, requested: &str) -> Result<StoredFile, StorageError> {
        // Lexical check first: a traversal attempt never reaches the filesystem
        let file_path = file_utils::join_within_root(&self.root, requested)
            .map_err(|e| Self::invalid_path(requested, e))?;

        self.ensure_contained(&file_path, requested).await?;

        let metadata = tokio::fs::metadata(&file_path)
            .await
            .map_err(|_| StorageError::NotFound(file_path.clone()))?;
        if !metadata.is_file() {
            return Err(StorageError::NotFound(file_path));
        }

        let file = tokio::fs::File::open(&file_path)
            .await
            .map_err(|source| StorageError::Open {
                path: file_path.clone(),
                source,
            })?;

        Ok(StoredFile {
            path: file_path,
            file,
            len: metadata.len(),
        })
    }
}
