use axum::{
    extract::DefaultBodyLimit,
    http::{header, StatusCode},
    routing::{get, post},
    Json, Router,
};
use serde_json::json;

use crate::context::AppContext;
use crate::handlers;

pub fn router(ctx: AppContext) -> Router {
    Router::new()
        .route("/", get(handlers::frontend::handler))
        .route("/upload/", post(handlers::upload::handler))
        .route(
            "/transcriptions",
            get(handlers::transcriptions::list_handler),
        )
        .route(
            "/transcriptions/{transcription_id}/segments",
            get(handlers::segments::list_handler),
        )
        .route("/health", get(handlers::health::handler))
        .fallback(|| async {
            (
                StatusCode::NOT_FOUND,
                [(header::CONTENT_TYPE, "application/json")],
                Json(json!({
                    "message": "not found",
                })),
            )
        })
        // uploads are not size limited
        .layer(DefaultBodyLimit::disable())
        .with_state(ctx)
}
