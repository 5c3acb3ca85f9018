use axum::{response::IntoResponse, Json};
use serde_json::json;
use tracing::instrument;

#[instrument]
pub async fn handler() -> impl IntoResponse {
    tracing::debug!("health check");

    Json(json!({ "status": "UP" }))
}
