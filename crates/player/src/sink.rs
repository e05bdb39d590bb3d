//! The [`ProgressSink`] trait: the player's view of the backend.

use reelhub_core::types::DbId;

/// Errors from a progress sink.
///
/// The player never retries on these -- a failed persist is simply
/// superseded by the next report, and a failed load falls back to 0.
#[derive(Debug, thiserror::Error)]
pub enum SinkError {
    /// The HTTP request itself failed (network, DNS, TLS, etc.).
    #[error("request failed: {0}")]
    Request(#[from] reqwest::Error),

    /// The backend returned a non-2xx status code.
    #[error("backend error ({status}): {body}")]
    Api {
        /// HTTP status code.
        status: u16,
        /// Raw response body for debugging.
        body: String,
    },
}

/// Backend operations the player needs.
///
/// Implemented over HTTP by [`HttpProgressSink`](crate::HttpProgressSink)
/// and by recording mocks in tests.
#[async_trait::async_trait]
pub trait ProgressSink: Send + Sync {
    /// Fetch the previously stored watch position, 0 when none exists.
    async fn load_watched_time(&self, video_id: DbId) -> Result<f64, SinkError>;

    /// Persist the current watch position.
    async fn save_watched_time(&self, video_id: DbId, watched_time: f64)
        -> Result<(), SinkError>;

    /// Register one view for the video.
    async fn increment_views(&self, video_id: DbId) -> Result<(), SinkError>;
}
