use crate::constants::METHOD_NOT_ALLOWED;
use actix_web::HttpResponse;
use storage::StorageError;
use tracing::{error, warn};

/// Helper function for bad request errors carrying their cause
pub fn handle_error<E: std::fmt::Display>(msg: &str, e: E) -> actix_web::Error {
    warn!("{}: {}", msg, e);
    actix_web::error::ErrorBadRequest(format!("{}: {}", msg, e))
}

/// Helper function for bad request errors with a fixed message
pub fn bad_request(msg: &'static str) -> actix_web::Error {
    warn!("{}", msg);
    actix_web::error::ErrorBadRequest(msg)
}

/// Helper function for server errors
pub fn handle_server_error<E: std::fmt::Display>(msg: &'static str, e: E) -> actix_web::Error {
    error!("{}: {}", msg, e);
    actix_web::error::ErrorInternalServerError(msg)
}

/// Helper function for not found errors
pub fn handle_not_found<E: std::fmt::Display>(e: E) -> actix_web::Error {
    warn!("File not found: {}", e);
    actix_web::error::ErrorNotFound("File not found")
}

/// Map a storage failure onto the status the client should see
pub fn handle_storage_error(e: StorageError) -> actix_web::Error {
    match e {
        StorageError::InvalidFileName(reason) => handle_error("Invalid file name", reason),
        StorageError::InvalidPath { .. } => {
            warn!("{}", e);
            actix_web::error::ErrorBadRequest("Invalid file path")
        }
        StorageError::NotFound(_) | StorageError::Open { .. } => handle_not_found(e),
        StorageError::CreateDir { .. } | StorageError::Resolve { .. } => {
            handle_server_error("Server error", e)
        }
        StorageError::CreateFile { .. } | StorageError::Write { .. } => {
            error!("{}", e);
            actix_web::error::ErrorInternalServerError(e.to_string())
        }
    }
}

/// Fallback for every method a resource does not route
pub async fn method_not_allowed() -> HttpResponse {
    HttpResponse::MethodNotAllowed()
        .content_type("text/plain; charset=utf-8")
        .body(METHOD_NOT_ALLOWED)
}
