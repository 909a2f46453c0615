use actix_web::{HttpResponse, Responder};
use serde::Serialize;

#[derive(Serialize)]
struct HealthResponse {
    status: &'static str,
}

/// Liveness only; the upstream client is not consulted.
pub async fn handler() -> impl Responder {
    HttpResponse::Ok().json(HealthResponse { status: "ok" })
}
