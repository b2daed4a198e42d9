//! Server application state management

use common::ServerSettings;
use std::sync::Arc;
use storage::{FilesystemStorage, Storage, StorageError};
use tracing::info;

/// Immutable per-process state shared by every worker
pub struct AppState {
    pub settings: ServerSettings,
    pub storage: Arc<dyn Storage>,
}

impl AppState {
    pub fn new(settings: ServerSettings) -> Self {
        let storage: Arc<dyn Storage> = Arc::new(FilesystemStorage::new(&settings.upload_dir));
        Self { settings, storage }
    }

    /// Build the state and make sure the upload directory exists
    pub async fn initialize(settings: ServerSettings) -> Result<Self, StorageError> {
        let state = Self::new(settings);
        state.storage.ensure_root().await?;
        info!("Upload directory ready: {:?}", state.storage.root());
        Ok(state)
    }
}
