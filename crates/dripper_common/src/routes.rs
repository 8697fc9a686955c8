// --- File: crates/dripper_common/src/routes.rs ---

use axum::{routing::get, Json, Router};
use serde::Serialize;

/// Health probe payload.
#[derive(Serialize, Debug)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct HealthResponse {
    #[cfg_attr(feature = "openapi", schema(example = "ok"))]
    pub status: &'static str,
    #[cfg_attr(feature = "openapi", schema(example = "dripper-scheduler"))]
    pub service: &'static str,
}

pub async fn health_handler() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok",
        service: "dripper-scheduler",
    })
}

/// Routes shared by every deployment, nested under `/api` by the backend.
pub fn routes() -> Router {
    Router::new().route("/health", get(health_handler))
}
