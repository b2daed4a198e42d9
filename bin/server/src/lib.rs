//! HTTPS file transfer server

pub mod constants;
pub mod handlers;
pub mod state;
pub mod tls;

use actix_web::{dev::Server, web, App, HttpServer};
use anyhow::{Context, Result};
use common::ServerSettings;
use state::AppState;
use std::net::SocketAddr;
use tracing::info;

/// Load TLS material, prepare the upload directory and bind the listener.
/// The returned server only starts accepting once it is awaited or spawned.
pub async fn start(settings: ServerSettings) -> Result<(Server, Vec<SocketAddr>)> {
    let tls_config = tls::load_rustls_config(&settings.cert_file, &settings.key_file)
        .context("Failed to load TLS configuration")?;

    if !settings.allowed_types.is_empty() {
        info!(
            allowed_types = ?settings.allowed_types,
            "allowed_types is configured but not enforced"
        );
    }

    let bind_address = settings.bind_address();
    let state = web::Data::new(
        AppState::initialize(settings)
            .await
            .context("Failed to create upload directory")?,
    );

    let server = HttpServer::new(move || {
        App::new()
            .app_data(state.clone())
            .configure(handlers::configure)
    })
    .bind_rustls_0_23(bind_address.as_str(), tls_config)
    .with_context(|| format!("Failed to bind to {}", bind_address))?;

    let addrs = server.addrs();
    Ok((server.run(), addrs))
}
