use anyhow::{Context, Result};
use common::constants::{DOWNLOAD_ENDPOINT, DOWNLOAD_QUERY_PARAM};
use common::{file_utils, ClientSettings};
use log::info;
use reqwest::blocking::Client;
use std::fs::{self, File};
use std::io;
use std::path::PathBuf;

/// Handles file downloads into a local directory
pub struct FileDownloader {
    client: Client,
    server: String,
    download_dir: PathBuf,
}

impl FileDownloader {
    /// Create a new file downloader
    pub fn new(client: Client, server: String, download_dir: PathBuf) -> Self {
        Self {
            client,
            server,
            download_dir,
        }
    }

    /// Download endpoint URL
    pub fn url(&self) -> String {
        format!("{}{}", self.server, DOWNLOAD_ENDPOINT)
    }

    /// Where `name` lands locally. Names that would leave the download
    /// directory are refused.
    pub fn destination(&self, name: &str) -> Result<PathBuf> {
        file_utils::join_within_root(&self.download_dir, name)
            .map_err(|e| anyhow::anyhow!("Refusing to save {:?}: {}", name, e))
    }

    /// Download `name` and write it under the download directory
    pub fn download_file(&self, name: &str) -> Result<PathBuf> {
        // The name goes to the server as-is; the server owns the path check
        let mut response = self
            .client
            .get(self.url())
            .query(&[(DOWNLOAD_QUERY_PARAM, name)])
            .send()
            .context("Failed to connect to server")?;

        let status = response.status();
        if !status.is_success() {
            let error_text = response
                .text()
                .unwrap_or_else(|_| "Unknown error".to_string());
            anyhow::bail!("Download failed with status {}: {}", status, error_text);
        }

        let destination = self.destination(name)?;
        fs::create_dir_all(&self.download_dir).with_context(|| {
            format!(
                "Failed to create download directory {}",
                self.download_dir.display()
            )
        })?;
        if let Some(parent) = destination.parent() {
            fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create directory {}", parent.display()))?;
        }

        let mut file = File::create(&destination)
            .with_context(|| format!("Failed to create file {}", destination.display()))?;
        let bytes = io::copy(&mut response, &mut file)
            .with_context(|| format!("Failed to save file {}", destination.display()))?;

        info!("Wrote {} bytes to {}", bytes, destination.display());
        Ok(destination)
    }
}

/// Download a file from the server described by `settings`
pub fn download_file(client: &Client, settings: &ClientSettings, name: &str) -> Result<PathBuf> {
    let downloader = FileDownloader::new(
        client.clone(),
        settings.base_url(),
        settings.download_dir.clone(),
    );
    let destination = downloader.download_file(name)?;

    println!("File downloaded successfully to {}", destination.display());
    Ok(destination)
}
