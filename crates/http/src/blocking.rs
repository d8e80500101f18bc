//! Helper for running blocking storage calls in async handlers.
//!
//! Spawns the closure on the blocking pool, turns a join failure into
//! `ApiError::Internal` and maps the storage error through
//! `From<StorageError> for ApiError`.

use tokio::task::spawn_blocking;
use wortschatz_storage::StorageError;

use crate::api_error::ApiError;

/// Runs a blocking closure and returns its value.
///
/// # Example
/// ```ignore
/// let storage = state.storage.clone();
/// let names = blocking_result(move || storage.list_topics()).await?;
/// ```
pub async fn blocking_result<T, F>(f: F) -> Result<T, ApiError>
where
    F: FnOnce() -> Result<T, StorageError> + Send + 'static,
    T: Send + 'static,
{
    spawn_blocking(f)
        .await
        .map_err(|e| {
            tracing::error!("Join error: {}", e);
            ApiError::Internal(anyhow::anyhow!("blocking task failed: {e}"))
        })?
        .map_err(|e| {
            if matches!(e, StorageError::NotFound { .. } | StorageError::InvalidInput(_)) {
                tracing::debug!("Rejected request: {}", e);
            } else {
                tracing::error!("Storage error: {}", e);
            }
            ApiError::from(e)
        })
}
