//! Repository for the `videos` table.

use reelhub_core::types::DbId;
use sqlx::PgPool;

use crate::models::video::{CreateVideo, UpdateVideo, Video, VideoWithOwner, VideoWithOwnerRow};

/// Column list shared across plain-row queries.
const COLUMNS: &str =
    "id, title, description, user_id, media_url, thumbnail_url, views, \
     duration_seconds, created_at, updated_at";

/// Column list for queries joined with the owner row.
const JOINED_COLUMNS: &str =
    "v.id, v.title, v.description, v.user_id, v.media_url, v.thumbnail_url, v.views, \
     v.duration_seconds, v.created_at, u.username AS owner_username";

/// Provides CRUD operations for the video catalog.
pub struct VideoRepo;

impl VideoRepo {
    /// Insert a new video, returning the created row.
    pub async fn create(pool: &PgPool, input: &CreateVideo) -> Result<Video, sqlx::Error> {
        let query = format!(
            "INSERT INTO videos (title, description, user_id, media_url, thumbnail_url, duration_seconds)
             VALUES ($1, $2, $3, $4, $5, $6)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Video>(&query)
            .bind(&input.title)
            .bind(&input.description)
            .bind(input.user_id)
            .bind(&input.media_url)
            .bind(&input.thumbnail_url)
            .bind(input.duration_seconds)
            .fetch_one(pool)
            .await
    }

    /// Find a video by ID (no owner join). Used by ownership checks.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Video>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM videos WHERE id = $1");
        sqlx::query_as::<_, Video>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Find a video with its owner summary.
    pub async fn find_with_owner(
        pool: &PgPool,
        id: DbId,
    ) -> Result<Option<VideoWithOwner>, sqlx::Error> {
        let query = format!(
            "SELECT {JOINED_COLUMNS}
             FROM videos v
             JOIN users u ON u.id = v.user_id
             WHERE v.id = $1"
        );
        let row = sqlx::query_as::<_, VideoWithOwnerRow>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await?;
        Ok(row.map(VideoWithOwner::from))
    }

    /// List the whole catalog with owner summaries, newest first.
    pub async fn list_with_owner(pool: &PgPool) -> Result<Vec<VideoWithOwner>, sqlx::Error> {
        let query = format!(
            "SELECT {JOINED_COLUMNS}
             FROM videos v
             JOIN users u ON u.id = v.user_id
             ORDER BY v.created_at DESC"
        );
        let rows = sqlx::query_as::<_, VideoWithOwnerRow>(&query)
            .fetch_all(pool)
            .await?;
        Ok(rows.into_iter().map(VideoWithOwner::from).collect())
    }

    /// List one user's videos with owner summaries, newest first.
    pub async fn list_by_user(
        pool: &PgPool,
        user_id: DbId,
    ) -> Result<Vec<VideoWithOwner>, sqlx::Error> {
        let query = format!(
            "SELECT {JOINED_COLUMNS}
             FROM videos v
             JOIN users u ON u.id = v.user_id
             WHERE v.user_id = $1
             ORDER BY v.created_at DESC"
        );
        let rows = sqlx::query_as::<_, VideoWithOwnerRow>(&query)
            .bind(user_id)
            .fetch_all(pool)
            .await?;
        Ok(rows.into_iter().map(VideoWithOwner::from).collect())
    }

    /// Update a video. Only non-`None` fields in `input` are applied.
    ///
    /// Returns `None` if no row with the given `id` exists. Ownership is
    /// checked by the handler before calling this.
    pub async fn update(
        pool: &PgPool,
        id: DbId,
        input: &UpdateVideo,
    ) -> Result<Option<Video>, sqlx::Error> {
        let query = format!(
            "UPDATE videos SET
                title = COALESCE($2, title),
                description = COALESCE($3, description),
                thumbnail_url = COALESCE($4, thumbnail_url)
             WHERE id = $1
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Video>(&query)
            .bind(id)
            .bind(&input.title)
            .bind(&input.description)
            .bind(&input.thumbnail_url)
            .fetch_optional(pool)
            .await
    }

    /// Delete a video. Returns `true` if a row was removed.
    ///
    /// Watch-progress records referencing the video are removed by the
    /// `ON DELETE CASCADE` rule.
    pub async fn delete(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM videos WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    /// Atomically increment the view counter by exactly 1.
    ///
    /// Returns `true` if the video exists. A single UPDATE means
    /// concurrent callers can never lose an increment.
    pub async fn increment_views(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("UPDATE videos SET views = views + 1 WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
