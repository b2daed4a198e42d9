use clap::{Arg, Command};
use common::ServerConfig;
use server::constants::DEFAULT_CONFIG_PATH;
use tracing::{error, info};

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    // Filter out actix-server worker shutdown messages
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
                tracing_subscriber::EnvFilter::new("info")
                    .add_directive("actix_server::worker=warn".parse().unwrap())
                    .add_directive("actix_server::accept=warn".parse().unwrap())
            }),
        )
        .with_writer(std::io::stderr)
        .init();

    info!("Starting transfer server (PID: {})", std::process::id());

    let matches = Command::new("server")
        .about("HTTPS file upload and download server")
        .arg(
            Arg::new("config")
                .long("config")
                .value_name("PATH")
                .help("Server configuration file")
                .default_value(DEFAULT_CONFIG_PATH),
        )
        .get_matches();

    let config_path = matches
        .get_one::<String>("config")
        .map(|s| s.as_str())
        .unwrap_or(DEFAULT_CONFIG_PATH);

    let config = ServerConfig::load(config_path).map_err(|e| {
        error!("Failed to load config: {}", e);
        std::io::Error::new(std::io::ErrorKind::InvalidInput, e.to_string())
    })?;

    let (http_server, addrs) = server::start(config.server).await.map_err(|e| {
        error!("Failed to start server: {:#}", e);
        std::io::Error::new(std::io::ErrorKind::Other, format!("{:#}", e))
    })?;

    for addr in &addrs {
        info!("Server bound successfully to https://{}", addr);
    }

    // Runs until a shutdown signal arrives
    http_server.await
}
