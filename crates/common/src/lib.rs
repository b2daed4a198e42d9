pub mod config;
pub mod constants;
pub mod file_utils;

pub use config::{ClientConfig, ClientSettings, ConfigError, ServerConfig, ServerSettings};

use serde::{Deserialize, Serialize};

/// Query parameters accepted by the download endpoint
#[derive(Serialize, Deserialize, Clone, Debug, Default)]
pub struct DownloadQuery {
    pub file: Option<String>, // Name relative to the upload directory
}

/// Response from health check endpoint
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq)]
pub struct HealthResponse {
    pub status: String, // "ok" when healthy
}

impl HealthResponse {
    pub fn ok() -> Self {
        Self {
            status: constants::HEALTH_STATUS_OK.to_string(),
        }
    }

    pub fn is_ok(&self) -> bool {
        self.status == constants::HEALTH_STATUS_OK
    }
}
