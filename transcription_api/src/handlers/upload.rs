use axum::{
    body::Bytes,
    extract::{Multipart, State},
    Json,
};
use types::UploadResponse;

use super::blocking;
use crate::context::AppContext;
use crate::error::ApiError;
use crate::files::is_plain_filename;

/// Stores an uploaded audio file and records a placeholder transcription
/// for it.
///
/// The file lands in the upload directory under the name the client sent,
/// replacing any earlier upload with the same name. The transcription row
/// starts with empty text and an unknown language.
pub async fn handler(
    State(ctx): State<AppContext>,
    mut multipart: Multipart,
) -> Result<Json<UploadResponse>, ApiError> {
    let (filename, contents) = read_file_field(&mut multipart).await?;

    if !is_plain_filename(&filename) {
        return Err(ApiError::InvalidFilename(filename));
    }

    tracing::info!("storing upload {filename} ({} bytes)", contents.len());

    let transcription_id = blocking(move || {
        ctx.uploads.write(&filename, &contents)?;
        Ok(ctx.store.insert_transcription(&filename)?)
    })
    .await?;

    tracing::info!("created transcription {transcription_id}");

    Ok(Json(UploadResponse::uploaded(transcription_id)))
}

async fn read_file_field(
    multipart: &mut Multipart,
) -> Result<(String, Bytes), ApiError> {
    while let Some(field) = multipart.next_field().await? {
        if field.name() != Some("file") {
            continue;
        }

        let Some(filename) = field.file_name().map(ToString::to_string) else {
            continue;
        };

        let contents = field.bytes().await?;

        return Ok((filename, contents));
    }

    Err(ApiError::MissingFile)
}
