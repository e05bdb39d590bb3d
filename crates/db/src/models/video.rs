//! Video catalog entity model and DTOs.

use reelhub_core::types::{DbId, Timestamp};
use serde::Serialize;
use sqlx::FromRow;

/// Full video row from the `videos` table.
#[derive(Debug, Clone, FromRow, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Video {
    pub id: DbId,
    pub title: String,
    pub description: Option<String>,
    pub user_id: DbId,
    pub media_url: String,
    pub thumbnail_url: Option<String>,
    pub views: i64,
    pub duration_seconds: Option<f64>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// Owner summary embedded in catalog responses: id + username only.
#[derive(Debug, Clone, Serialize)]
pub struct OwnerSummary {
    pub id: DbId,
    pub username: String,
}

/// A video joined with its owner summary, as returned by list/detail
/// endpoints.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct VideoWithOwner {
    pub id: DbId,
    pub title: String,
    pub description: Option<String>,
    pub user_id: DbId,
    pub media_url: String,
    pub thumbnail_url: Option<String>,
    pub views: i64,
    pub duration_seconds: Option<f64>,
    pub created_at: Timestamp,
    pub user: OwnerSummary,
}

/// Flat join row backing [`VideoWithOwner`] (sqlx cannot map nested
/// structs from a single row).
#[derive(Debug, FromRow)]
pub struct VideoWithOwnerRow {
    pub id: DbId,
    pub title: String,
    pub description: Option<String>,
    pub user_id: DbId,
    pub media_url: String,
    pub thumbnail_url: Option<String>,
    pub views: i64,
    pub duration_seconds: Option<f64>,
    pub created_at: Timestamp,
    pub owner_username: String,
}

impl From<VideoWithOwnerRow> for VideoWithOwner {
    fn from(row: VideoWithOwnerRow) -> Self {
        Self {
            id: row.id,
            title: row.title,
            description: row.description,
            user_id: row.user_id,
            media_url: row.media_url,
            thumbnail_url: row.thumbnail_url,
            views: row.views,
            duration_seconds: row.duration_seconds,
            created_at: row.created_at,
            user: OwnerSummary {
                id: row.user_id,
                username: row.owner_username,
            },
        }
    }
}

/// DTO for creating a new video record.
#[derive(Debug)]
pub struct CreateVideo {
    pub title: String,
    pub description: Option<String>,
    pub user_id: DbId,
    pub media_url: String,
    pub thumbnail_url: Option<String>,
    pub duration_seconds: Option<f64>,
}

/// DTO for updating a video. Only non-`None` fields are applied.
#[derive(Debug, Default)]
pub struct UpdateVideo {
    pub title: Option<String>,
    pub description: Option<String>,
    pub thumbnail_url: Option<String>,
}
