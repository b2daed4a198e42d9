//! TLS configuration for the HTTPS listener

use anyhow::{Context, Result};
use std::fs::File;
use std::io::BufReader;
use std::path::Path;
use std::sync::Arc;

/// Load a PEM certificate chain and private key into a rustls server config
/// backed by the ring provider.
pub fn load_rustls_config(cert_file: &Path, key_file: &Path) -> Result<rustls::ServerConfig> {
    let cert_reader = &mut BufReader::new(
        File::open(cert_file)
            .with_context(|| format!("Failed to open certificate file {:?}", cert_file))?,
    );
    let key_reader = &mut BufReader::new(
        File::open(key_file).with_context(|| format!("Failed to open key file {:?}", key_file))?,
    );

    let certs = rustls_pemfile::certs(cert_reader)
        .collect::<Result<Vec<_>, _>>()
        .with_context(|| format!("Failed to parse certificates from {:?}", cert_file))?;
    if certs.is_empty() {
        anyhow::bail!("No certificates found in {:?}", cert_file);
    }

    let key = rustls_pemfile::private_key(key_reader)
        .with_context(|| format!("Failed to parse private key from {:?}", key_file))?
        .ok_or_else(|| anyhow::anyhow!("No private key found in {:?}", key_file))?;

    let provider = Arc::new(rustls::crypto::ring::default_provider());
    rustls::ServerConfig::builder_with_provider(provider)
        .with_safe_default_protocol_versions()
        .context("Failed to select TLS protocol versions")?
        .with_no_client_auth()
        .with_single_cert(certs, key)
        .context("Certificate and private key do not form a valid pair")
}
