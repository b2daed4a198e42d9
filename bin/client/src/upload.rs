use crate::constants::UPLOAD_MIME_TYPE;
use anyhow::{Context, Result};
use common::constants::{UPLOAD_ENDPOINT, UPLOAD_FIELD_NAME};
use common::ClientSettings;
use log::info;
use reqwest::blocking::{multipart, Client};
use std::fs::File;
use std::path::Path;

/// Handles file uploads to the server
pub struct FileUploader {
    client: Client,
    server: String,
}

impl FileUploader {
    /// Create a new file uploader
    pub fn new(client: Client, server: String) -> Self {
        Self { client, server }
    }

    /// Upload endpoint URL
    pub fn url(&self) -> String {
        format!("{}{}", self.server, UPLOAD_ENDPOINT)
    }

    /// Upload a single local file. Returns the name the file was sent under.
    pub fn upload_file(&self, path: &Path) -> Result<String> {
        let (form, filename) = self.build_multipart_form(path)?;

        let response = self
            .client
            .post(self.url())
            .multipart(form)
            .send()
            .context("Failed to connect to server")?;

        let status = response.status();
        let text = response
            .text()
            .unwrap_or_else(|_| "Unknown error".to_string());
        if !status.is_success() {
            anyhow::bail!("Upload failed with status {}: {}", status, text);
        }

        info!("Server response: {}", text.trim());
        Ok(filename)
    }

    /// Build the single-part form. The file is streamed from disk rather
    /// than read into memory.
    fn build_multipart_form(&self, path: &Path) -> Result<(multipart::Form, String)> {
        let file = File::open(path)
            .with_context(|| format!("Failed to open file {}", path.display()))?;
        let len = file
            .metadata()
            .with_context(|| format!("Failed to read metadata of {}", path.display()))?
            .len();

        // The server keeps only the base name anyway
        let filename = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .ok_or_else(|| anyhow::anyhow!("Path has no file name: {}", path.display()))?;

        let part = multipart::Part::reader_with_length(file, len)
            .file_name(filename.clone())
            .mime_str(UPLOAD_MIME_TYPE)
            .context("Failed to set MIME type")?;

        Ok((
            multipart::Form::new().part(UPLOAD_FIELD_NAME, part),
            filename,
        ))
    }
}

/// Upload a file to the server described by `settings`
pub fn upload_file(client: &Client, settings: &ClientSettings, path: &Path) -> Result<String> {
    let uploader = FileUploader::new(client.clone(), settings.base_url());
    let filename = uploader.upload_file(path)?;

    info!("Uploaded file: {}", filename);
    println!("File {} uploaded successfully", filename);
    Ok(filename)
}
