use std::sync::Arc;

use reelhub_media::MediaStore;

use crate::config::ServerConfig;

/// Shared application state available to all Axum handlers via
/// `State<AppState>`.
///
/// This is cheaply cloneable (inner data is behind `Arc` or is already
/// `Clone`).
#[derive(Clone)]
pub struct AppState {
    /// Database connection pool.
    pub pool: reelhub_db::DbPool,
    /// Server configuration (JWT secret, origins, timeouts).
    pub config: Arc<ServerConfig>,
    /// Media host client. A trait object so tests can swap in a mock.
    pub media: Arc<dyn MediaStore>,
}
