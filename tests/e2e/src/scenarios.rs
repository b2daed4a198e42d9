use crate::filesystem_validator;
use crate::test_utils::{create_test_file, spawn_server, wait_for_server, write_self_signed_cert, TestEnv};
use anyhow::{Context, Result};
use client::{download, transport, upload};
use common::{ClientConfig, ServerConfig};
use std::fs;
use tracing::info;

const MIB: u64 = 1024 * 1024;

/// A named end-to-end check
pub type Scenario = (&'static str, fn() -> Result<()>);

pub const ALL: &[Scenario] = &[
    ("upload and download round trip", upload_download_round_trip),
    ("oversized upload is rejected", oversized_upload_rejected),
    ("path traversal is rejected", traversal_rejected),
    ("missing file is not found", missing_file_not_found),
    ("repeated upload overwrites", repeated_upload_overwrites),
    ("config files drive both sides", config_files_drive_both_sides),
    ("missing client config fails", missing_client_config_fails),
];

fn expect_error_containing<T>(result: Result<T>, needle: &str) -> Result<()> {
    match result {
        Ok(_) => anyhow::bail!("Expected an error containing {:?}, got success", needle),
        Err(e) => {
            let msg = format!("{:#}", e);
            if !msg.contains(needle) {
                anyhow::bail!("Expected an error containing {:?}, got {:?}", needle, msg);
            }
            info!("Got expected error: {}", msg);
            Ok(())
        }
    }
}

pub fn upload_download_round_trip() -> Result<()> {
    let env = TestEnv::start(MIB)?;
    let source = create_test_file(&env.source_dir()?, "report.pdf", 10 * 1024)?;

    let name = upload::upload_file(&env.http, &env.client, &source)?;
    if name != "report.pdf" {
        anyhow::bail!("Uploaded under unexpected name {:?}", name);
    }
    filesystem_validator::validate_stored_file(env.upload_dir(), "report.pdf", &source)?;

    let destination = download::download_file(&env.http, &env.client, "report.pdf")?;
    if destination != env.download_dir().join("report.pdf") {
        anyhow::bail!("Downloaded to unexpected path {:?}", destination);
    }
    filesystem_validator::validate_downloaded_file(env.download_dir(), "report.pdf", &source)
}

pub fn oversized_upload_rejected() -> Result<()> {
    let env = TestEnv::start(MIB)?;
    let source = create_test_file(&env.source_dir()?, "big.bin", 2 * MIB as usize)?;

    expect_error_containing(
        upload::upload_file(&env.http, &env.client, &source),
        "File too large",
    )?;
    filesystem_validator::validate_absent(&env.upload_dir().join("big.bin"))?;
    filesystem_validator::validate_empty_dir(env.upload_dir())
}

pub fn traversal_rejected() -> Result<()> {
    let env = TestEnv::start(MIB)?;
    fs::write(env.dir.path().join("secret.txt"), b"outside the upload dir")?;

    for name in ["../../etc/passwd", "../secret.txt", "/etc/passwd"] {
        expect_error_containing(
            download::download_file(&env.http, &env.client, name),
            "Invalid file path",
        )
        .with_context(|| format!("download {:?}", name))?;
    }
    filesystem_validator::validate_absent(env.download_dir())
}

pub fn missing_file_not_found() -> Result<()> {
    let env = TestEnv::start(MIB)?;

    expect_error_containing(
        download::download_file(&env.http, &env.client, "never-uploaded.txt"),
        "404",
    )?;
    expect_error_containing(
        download::download_file(&env.http, &env.client, "never-uploaded.txt"),
        "File not found",
    )?;
    filesystem_validator::validate_absent(&env.download_dir().join("never-uploaded.txt"))
}

pub fn repeated_upload_overwrites() -> Result<()> {
    let env = TestEnv::start(MIB)?;
    let source_dir = env.source_dir()?;

    let first = create_test_file(&source_dir, "notes.txt", 4096)?;
    upload::upload_file(&env.http, &env.client, &first)?;

    fs::write(&first, b"second version")?;
    upload::upload_file(&env.http, &env.client, &first)?;
    upload::upload_file(&env.http, &env.client, &first)?;

    filesystem_validator::validate_stored_file(env.upload_dir(), "notes.txt", &first)
}

/// Same round trip, but both sides read their settings from YAML files
pub fn config_files_drive_both_sides() -> Result<()> {
    let dir = tempfile::tempdir()?;
    let (cert, key) = write_self_signed_cert(dir.path())?;
    let uploads = dir.path().join("uploads");
    let downloads = dir.path().join("downloads");

    let server_yaml = dir.path().join("server.yaml");
    fs::write(
        &server_yaml,
        format!(
            "server:\n  host: \"127.0.0.1\"\n  port: 0\n  cert_file: {:?}\n  key_file: {:?}\n  \
             upload_dir: {:?}\n  max_file_size: 1048576\n  allowed_types:\n    - \"application/pdf\"\n",
            cert, key, uploads
        ),
    )?;
    let server_config = ServerConfig::load(&server_yaml)?;
    let addr = spawn_server(server_config.server)?;

    let client_yaml = dir.path().join("client.yaml");
    fs::write(
        &client_yaml,
        format!(
            "client:\n  server_host: \"127.0.0.1\"\n  server_port: {}\n  download_dir: {:?}\n  \
             max_retries: 3\n  retry_delay: 5\n  skip_verify: true\n",
            addr.port(),
            downloads
        ),
    )?;
    let settings = ClientConfig::load(&client_yaml)?.client;
    let http = transport::build_http_client(&settings)?;
    wait_for_server(&http, &settings.base_url())?;

    let source_dir = dir.path().join("source");
    fs::create_dir_all(&source_dir)?;
    let source = create_test_file(&source_dir, "data.bin", 1000)?;

    upload::upload_file(&http, &settings, &source)?;
    filesystem_validator::validate_stored_file(&uploads, "data.bin", &source)?;
    download::download_file(&http, &settings, "data.bin")?;
    filesystem_validator::validate_downloaded_file(&downloads, "data.bin", &source)
}

pub fn missing_client_config_fails() -> Result<()> {
    let dir = tempfile::tempdir()?;
    let result = ClientConfig::load(dir.path().join("absent.yaml")).map_err(anyhow::Error::from);
    expect_error_containing(result, "Failed to read config file")
}
