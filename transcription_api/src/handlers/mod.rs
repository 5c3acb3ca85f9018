pub mod frontend;
pub mod health;
pub mod segments;
pub mod transcriptions;
pub mod upload;

use crate::error::ApiError;

/// Runs store and file system work off the async runtime.
async fn blocking<T, F>(f: F) -> Result<T, ApiError>
where
    F: FnOnce() -> Result<T, ApiError> + Send + 'static,
    T: Send + 'static,
{
    tokio::task::spawn_blocking(f).await?
}
