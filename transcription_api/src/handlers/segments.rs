use axum::{
    extract::{Path, State},
    Json,
};
use types::Segment;

use super::blocking;
use crate::context::AppContext;
use crate::error::ApiError;

/// Lists the segments of one transcription.
///
/// An unknown transcription id is not an error: it has no segments, so the
/// response is an empty list.
pub async fn list_handler(
    Path(transcription_id): Path<i64>,
    State(ctx): State<AppContext>,
) -> Result<Json<Vec<Segment>>, ApiError> {
    let segments =
        blocking(move || Ok(ctx.store.list_segments(transcription_id)?))
            .await?;

    tracing::info!(
        "listed {} segments for transcription {transcription_id}",
        segments.len()
    );

    Ok(Json(segments))
}
