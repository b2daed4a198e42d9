//! HTTPS transport for the client

use crate::constants::REQUEST_TIMEOUT_SECS;
use anyhow::{Context, Result};
use common::ClientSettings;
use log::warn;
use reqwest::blocking::Client;
use std::time::Duration;

/// Build the blocking HTTPS client used for every request
pub fn build_http_client(settings: &ClientSettings) -> Result<Client> {
    if settings.skip_verify {
        warn!("TLS certificate verification is disabled (skip_verify: true)");
    }

    Client::builder()
        .timeout(Duration::from_secs(REQUEST_TIMEOUT_SECS))
        .danger_accept_invalid_certs(settings.skip_verify)
        .build()
        .context("Failed to create HTTP client")
}
