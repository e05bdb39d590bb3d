//! Watch-progress entity model.

use reelhub_core::types::{DbId, Timestamp};
use serde::Serialize;
use sqlx::FromRow;

/// One watch-progress record: how far `user_id` got into `video_id`.
///
/// At most one row exists per (user, video) pair, enforced by
/// `uq_watched_videos_user_video` and upsert-only writes.
#[derive(Debug, Clone, FromRow, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct WatchedVideo {
    pub id: DbId,
    pub user_id: DbId,
    pub video_id: DbId,
    pub watched_time: f64,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}
