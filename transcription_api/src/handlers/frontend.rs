use axum::{extract::State, http::header, response::IntoResponse};

use super::blocking;
use crate::context::AppContext;
use crate::error::ApiError;

/// Serves the frontend page, re-reading it from disk on every request.
pub async fn handler(
    State(ctx): State<AppContext>,
) -> Result<impl IntoResponse, ApiError> {
    let page = blocking(move || {
        Ok(ctx.assets.read(&ctx.config.frontend_file)?)
    })
    .await?;

    Ok(([(header::CONTENT_TYPE, "text/html; charset=utf-8")], page))
}
