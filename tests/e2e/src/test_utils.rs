use anyhow::{Context, Result};
use common::{ClientSettings, HealthResponse, ServerSettings};
use reqwest::blocking::Client;
use std::fs;
use std::net::SocketAddr;
use std::path::{Path, PathBuf};
use std::sync::mpsc;
use std::thread;
use std::time::Duration;
use tempfile::TempDir;

const SERVER_START_TIMEOUT: Duration = Duration::from_secs(10);

/// A running server plus the client side pointed at it. The temporary
/// directory holds certificates, uploads and downloads.
pub struct TestEnv {
    pub dir: TempDir,
    pub server: ServerSettings,
    pub client: ClientSettings,
    pub http: Client,
    pub addr: SocketAddr,
}

impl TestEnv {
    pub fn start(max_file_size: u64) -> Result<Self> {
        let dir = tempfile::tempdir().context("Failed to create temp dir")?;
        let (cert_file, key_file) = write_self_signed_cert(dir.path())?;

        let server = ServerSettings {
            host: "127.0.0.1".to_string(),
            port: 0,
            cert_file,
            key_file,
            upload_dir: dir.path().join("uploads"),
            max_file_size,
            allowed_types: Vec::new(),
        };
        let addr = spawn_server(server.clone())?;

        let client = ClientSettings {
            server_host: addr.ip().to_string(),
            server_port: addr.port(),
            download_dir: dir.path().join("downloads"),
            max_retries: 0,
            retry_delay: 0,
            skip_verify: true,
        };
        let http = client::transport::build_http_client(&client)?;
        wait_for_server(&http, &client.base_url())?;

        Ok(Self {
            dir,
            server,
            client,
            http,
            addr,
        })
    }

    pub fn upload_dir(&self) -> &Path {
        &self.server.upload_dir
    }

    pub fn download_dir(&self) -> &Path {
        &self.client.download_dir
    }

    /// Directory for files the client uploads from
    pub fn source_dir(&self) -> Result<PathBuf> {
        let dir = self.dir.path().join("source");
        fs::create_dir_all(&dir)?;
        Ok(dir)
    }
}

/// Write a self-signed certificate for 127.0.0.1 and return (cert, key)
pub fn write_self_signed_cert(dir: &Path) -> Result<(PathBuf, PathBuf)> {
    let cert = rcgen::generate_simple_self_signed(vec![
        "localhost".to_string(),
        "127.0.0.1".to_string(),
    ])
    .context("Failed to generate certificate")?;

    let cert_path = dir.join("server.crt");
    let key_path = dir.join("server.key");
    fs::write(
        &cert_path,
        cert.serialize_pem().context("Failed to serialize certificate")?,
    )?;
    fs::write(&key_path, cert.serialize_private_key_pem())?;
    Ok((cert_path, key_path))
}

/// Run the server on its own actix system thread and return the bound address
pub fn spawn_server(settings: ServerSettings) -> Result<SocketAddr> {
    let (tx, rx) = mpsc::channel();

    thread::spawn(move || {
        let system = actix_web::rt::System::new();
        system.block_on(async move {
            match server::start(settings).await {
                Ok((http_server, addrs)) => {
                    let _ = tx.send(
                        addrs
                            .first()
                            .copied()
                            .ok_or_else(|| anyhow::anyhow!("Server bound no address")),
                    );
                    let _ = http_server.await;
                }
                Err(e) => {
                    let _ = tx.send(Err(e));
                }
            }
        });
    });

    rx.recv_timeout(SERVER_START_TIMEOUT)
        .context("Server did not start in time")?
}

pub fn wait_for_server(http: &Client, base_url: &str) -> Result<()> {
    let health_url = format!("{}{}", base_url, common::constants::HEALTH_ENDPOINT);

    for i in 0..30 {
        let healthy = http
            .get(&health_url)
            .send()
            .and_then(|response| response.json::<HealthResponse>())
            .map(|health| health.is_ok())
            .unwrap_or(false);
        if healthy {
            return Ok(());
        }
        if i < 29 {
            thread::sleep(Duration::from_millis(100));
        }
    }

    anyhow::bail!("Server did not become ready at {}", health_url);
}

/// Create a file of `size` bytes with a repeating, position-dependent pattern
pub fn create_test_file(dir: &Path, name: &str, size: usize) -> Result<PathBuf> {
    let content: Vec<u8> = (0..size).map(|i| (i % 251) as u8).collect();
    let path = dir.join(name);
    fs::write(&path, content).with_context(|| format!("Failed to create test file: {:?}", path))?;
    Ok(path)
}
