use axum::{
    extract::multipart::MultipartError,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

use crate::db::StoreError;

#[derive(Debug, Error)]
pub enum ApiError {
    #[error("storage error: {0}")]
    Store(#[from] StoreError),

    #[error("file system error: {0}")]
    Files(#[from] std::io::Error),

    #[error("malformed multipart body: {0}")]
    Multipart(#[from] MultipartError),

    #[error("no `file` field with a filename in the upload")]
    MissingFile,

    #[error("invalid filename: {0:?}")]
    InvalidFilename(String),

    #[error("background task failed: {0}")]
    Task(#[from] tokio::task::JoinError),
}

impl ApiError {
    fn status(&self) -> StatusCode {
        match self {
            Self::Store(_) | Self::Files(_) | Self::Task(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
            Self::Multipart(e) => e.status(),
            Self::MissingFile => StatusCode::UNPROCESSABLE_ENTITY,
            Self::InvalidFilename(_) => StatusCode::BAD_REQUEST,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();

        let message = if status.is_server_error() {
            tracing::error!("request failed: {self}");
            "internal server error".to_string()
        } else {
            tracing::warn!("request rejected: {self}");
            self.to_string()
        };

        (status, Json(json!({ "message": message }))).into_response()
    }
}
