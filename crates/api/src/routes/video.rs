//! Route definitions for the `/videos` resource.

use axum::extract::DefaultBodyLimit;
use axum::routing::{get, post};
use axum::Router;

use crate::handlers::video;
use crate::state::AppState;

/// Routes mounted at `/videos`.
///
/// The upload route carries its own body limit sized for video files;
/// every other route keeps the framework default.
pub fn router() -> Router<AppState> {
    Router::new()
        .route(
            "/upload",
            post(video::upload).layer(DefaultBodyLimit::max(video::MAX_UPLOAD_BYTES)),
        )
        .route("/", get(video::list))
        .route("/user/{user_id}", get(video::list_by_user))
        .route("/incviews/{id}", post(video::increment_views))
        .route("/watched", post(video::save_watched_time))
        .route("/watched/{video_id}", get(video::get_watched_time))
        .route(
            "/{id}",
            get(video::get_by_id)
                .put(video::update)
                .delete(video::delete),
        )
}
