use axum::{extract::State, Json};
use types::Transcription;

use super::blocking;
use crate::context::AppContext;
use crate::error::ApiError;

/// Lists every transcription in whatever order the store returns them.
pub async fn list_handler(
    State(ctx): State<AppContext>,
) -> Result<Json<Vec<Transcription>>, ApiError> {
    let transcriptions =
        blocking(move || Ok(ctx.store.list_transcriptions()?)).await?;

    tracing::info!("listed {} transcriptions", transcriptions.len());

    Ok(Json(transcriptions))
}
