use actix_web::{get, HttpResponse, Responder};
use common::HealthResponse;

/// Liveness check; answers as soon as the listener accepts connections
#[get("/health")]
pub async fn health() -> impl Responder {
    HttpResponse::Ok().json(HealthResponse::ok())
}
