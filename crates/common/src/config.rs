//! YAML configuration for the server and client.
//!
//! Both files carry a single top-level section (`server:` or `client:`). The
//! loader only decodes; it does not check that directories exist or that
//! hosts resolve.

use serde::de::DeserializeOwned;
use serde::Deserialize;
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("Failed to parse config file {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_yaml::Error,
    },
}

/// Server configuration file (`server:` section)
#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    pub server: ServerSettings,
}

/// Settings for the upload/download server
#[derive(Debug, Clone, Deserialize)]
pub struct ServerSettings {
    /// Bind host
    pub host: String,
    /// Bind port
    pub port: u16,
    /// PEM certificate chain
    pub cert_file: PathBuf,
    /// PEM private key
    pub key_file: PathBuf,
    /// Directory uploads are written to and downloads are served from
    pub upload_dir: PathBuf,
    /// Maximum accepted upload size in bytes
    pub max_file_size: u64,
    /// MIME types or extensions; parsed but not enforced
    #[serde(default)]
    pub allowed_types: Vec<String>,
}

impl ServerSettings {
    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

/// Client configuration file (`client:` section)
#[derive(Debug, Clone, Deserialize)]
pub struct ClientConfig {
    pub client: ClientSettings,
}

/// Settings for the transfer client
#[derive(Debug, Clone, Deserialize)]
pub struct ClientSettings {
    pub server_host: String,
    pub server_port: u16,
    /// Where downloaded files are written
    pub download_dir: PathBuf,
    // Retry knobs are read but every call is a single attempt.
    #[serde(default)]
    pub max_retries: u32,
    #[serde(default)]
    pub retry_delay: u64,
    /// Disable TLS certificate verification
    #[serde(default)]
    pub skip_verify: bool,
}

impl ClientSettings {
    /// `https://host:port` without a trailing slash
    pub fn base_url(&self) -> String {
        format!("https://{}:{}", self.server_host, self.server_port)
    }
}

impl ServerConfig {
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        load_yaml(path.as_ref())
    }
}

impl ClientConfig {
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        load_yaml(path.as_ref())
    }
}

fn load_yaml<T: DeserializeOwned>(path: &Path) -> Result<T, ConfigError> {
    let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    serde_yaml::from_str(&content).map_err(|source| ConfigError::Parse {
        path: path.to_path_buf(),
        source,
    })
}
