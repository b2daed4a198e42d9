//! HTTPS file transfer client

use clap::{ArgGroup, Parser};
use client::constants::DEFAULT_CONFIG_PATH;
use client::{download, logger, transport, upload};
use common::ClientConfig;
use log::{debug, error};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "client")]
#[command(about = "Upload files to and download files from the transfer server")]
#[command(group(
    ArgGroup::new("action")
        .required(true)
        .multiple(true)
        .args(["upload", "download"])
))]
struct Cli {
    /// Local file to upload
    #[arg(short, long, value_name = "PATH")]
    upload: Option<PathBuf>,
    /// Name of a file to download from the server
    #[arg(short, long, value_name = "NAME")]
    download: Option<String>,
    /// Client configuration file
    #[arg(short, long, default_value = DEFAULT_CONFIG_PATH)]
    config: PathBuf,
}

fn main() {
    logger::init();

    let cli = Cli::parse();
    if let Err(e) = run(cli) {
        error!("{:#}", e);
        std::process::exit(1);
    }
}

fn run(cli: Cli) -> anyhow::Result<()> {
    let config = ClientConfig::load(&cli.config)?;
    let settings = config.client;

    debug!(
        "Retries not implemented, ignoring max_retries={} retry_delay={}",
        settings.max_retries, settings.retry_delay
    );

    let client = transport::build_http_client(&settings)?;

    // Upload runs first when both are given
    if let Some(path) = cli.upload {
        upload::upload_file(&client, &settings, &path)?;
    }
    if let Some(name) = cli.download {
        download::download_file(&client, &settings, &name)?;
    }

    Ok(())
}
