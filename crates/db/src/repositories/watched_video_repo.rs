//! Repository for the `watched_videos` table.

use reelhub_core::types::DbId;
use sqlx::PgPool;

use crate::models::watched_video::WatchedVideo;

/// Column list for `watched_videos` queries.
const COLUMNS: &str = "id, user_id, video_id, watched_time, created_at, updated_at";

/// Provides watch-progress reads and upserts.
pub struct WatchedVideoRepo;

impl WatchedVideoRepo {
    /// Upsert the watch position for a (user, video) pair.
    ///
    /// A single `ON CONFLICT` statement keyed on
    /// `uq_watched_videos_user_video` makes this atomic: concurrent
    /// reports for the same pair update the one row instead of racing
    /// into duplicates. The stored value is always the incoming one --
    /// last write wins, no max against the prior value.
    pub async fn upsert(
        pool: &PgPool,
        user_id: DbId,
        video_id: DbId,
        watched_time: f64,
    ) -> Result<WatchedVideo, sqlx::Error> {
        let query = format!(
            "INSERT INTO watched_videos (user_id, video_id, watched_time)
             VALUES ($1, $2, $3)
             ON CONFLICT (user_id, video_id) DO UPDATE
             SET watched_time = EXCLUDED.watched_time
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, WatchedVideo>(&query)
            .bind(user_id)
            .bind(video_id)
            .bind(watched_time)
            .fetch_one(pool)
            .await
    }

    /// Find the watch record for a (user, video) pair.
    ///
    /// Absence is a normal state (the user never played the video), not
    /// an error.
    pub async fn find(
        pool: &PgPool,
        user_id: DbId,
        video_id: DbId,
    ) -> Result<Option<WatchedVideo>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM watched_videos WHERE user_id = $1 AND video_id = $2"
        );
        sqlx::query_as::<_, WatchedVideo>(&query)
            .bind(user_id)
            .bind(video_id)
            .fetch_optional(pool)
            .await
    }
}
