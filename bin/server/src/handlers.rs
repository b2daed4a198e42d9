//! HTTP request handlers

pub mod download;
pub mod error;
pub mod health;
pub mod upload;

use actix_web::web;
use common::constants::{DOWNLOAD_ENDPOINT, UPLOAD_ENDPOINT};

/// Register every endpoint. Methods other than the routed one get 405.
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::resource(UPLOAD_ENDPOINT)
            .route(web::post().to(upload::upload))
            .default_service(web::route().to(error::method_not_allowed)),
    )
    .service(
        web::resource(DOWNLOAD_ENDPOINT)
            .route(web::get().to(download::download))
            .default_service(web::route().to(error::method_not_allowed)),
    )
    .service(health::health);
}
