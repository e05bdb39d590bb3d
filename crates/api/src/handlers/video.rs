//! Handlers for the `/videos` resource.
//!
//! Covers upload (multipart, media host storage + derived thumbnail),
//! public catalog reads, owner-gated update/delete, the unauthenticated
//! view counter, and per-user watch-progress tracking.

use axum::extract::{Multipart, Path, State};
use axum::http::StatusCode;
use axum::Json;
use base64::engine::general_purpose::STANDARD as BASE64;
use base64::Engine;
use reelhub_core::error::CoreError;
use reelhub_core::progress::clamp_watched_time;
use reelhub_core::types::DbId;
use reelhub_db::models::video::{CreateVideo, UpdateVideo, Video, VideoWithOwner};
use reelhub_db::models::watched_video::WatchedVideo;
use reelhub_db::repositories::{VideoRepo, WatchedVideoRepo};
use reelhub_media::{public_id_from_url, MediaKind};
use serde::{Deserialize, Serialize};

use crate::error::{AppError, AppResult};
use crate::middleware::auth::AuthUser;
use crate::state::AppState;

/// Maximum accepted upload size (150 MiB), enforced per-route.
pub const MAX_UPLOAD_BYTES: usize = 150 * 1024 * 1024;

// ---------------------------------------------------------------------------
// Request / response types
// ---------------------------------------------------------------------------

/// Request body for `PUT /videos/{id}`.
///
/// A replacement thumbnail arrives inline as base64 (optionally as a
/// `data:` URL) rather than multipart, mirroring the edit form.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateVideoRequest {
    pub title: Option<String>,
    pub description: Option<String>,
    pub thumbnail_base64: Option<String>,
    pub thumbnail_filename: Option<String>,
}

/// Request body for `POST /videos/watched`.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SaveWatchedTimeRequest {
    pub video_id: DbId,
    pub watched_time: f64,
}

/// Response body for `GET /videos/watched/{videoId}`.
///
/// `recorded` distinguishes "never watched" (0.0 by convention) from a
/// genuinely stored zero.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct WatchedTimeResponse {
    pub watched_time: f64,
    pub recorded: bool,
}

/// Parsed `multipart/form-data` fields of an upload request.
#[derive(Debug, Default)]
struct UploadForm {
    title: Option<String>,
    description: Option<String>,
    duration: Option<f64>,
    video: Option<(String, Vec<u8>)>,
}

// ---------------------------------------------------------------------------
// Upload
// ---------------------------------------------------------------------------

/// POST /api/videos/upload
///
/// Accepts a multipart form with `title`, optional `description` and
/// `duration` (seconds), and a required `video` file field. The file is
/// stored on the media host, a thumbnail is derived from it, and the
/// catalog row is created last.
pub async fn upload(
    State(state): State<AppState>,
    user: AuthUser,
    multipart: Multipart,
) -> AppResult<(StatusCode, Json<Video>)> {
    let form = read_upload_form(multipart).await?;

    let title = form
        .title
        .filter(|t| !t.trim().is_empty())
        .ok_or_else(|| AppError::Core(CoreError::Validation("Title is required".into())))?;
    let (filename, bytes) = form
        .video
        .ok_or_else(|| AppError::BadRequest("No video file uploaded".into()))?;

    // Store the binary first; the catalog row must never point at
    // nothing.
    let uploaded = state.media.upload_video(&filename, bytes).await?;

    // Thumbnail derivation is best-effort: a video without a thumbnail
    // beats a failed upload.
    let thumbnail_url = match state.media.derive_thumbnail(&uploaded.public_id).await {
        Ok(thumb) => Some(thumb.url),
        Err(e) => {
            tracing::warn!(public_id = %uploaded.public_id, error = %e, "Thumbnail derivation failed");
            None
        }
    };

    let video = VideoRepo::create(
        &state.pool,
        &CreateVideo {
            title,
            description: form.description.filter(|d| !d.is_empty()),
            user_id: user.user_id,
            media_url: uploaded.url,
            thumbnail_url,
            duration_seconds: form.duration,
        },
    )
    .await?;

    tracing::info!(video_id = video.id, user_id = user.user_id, "Video uploaded");
    Ok((StatusCode::CREATED, Json(video)))
}

/// Drain a multipart stream into an [`UploadForm`].
async fn read_upload_form(mut multipart: Multipart) -> AppResult<UploadForm> {
    let mut form = UploadForm::default();

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| AppError::BadRequest(e.to_string()))?
    {
        let name = field.name().unwrap_or("").to_string();
        match name.as_str() {
            "title" => {
                form.title = Some(read_text(field).await?);
            }
            "description" => {
                form.description = Some(read_text(field).await?);
            }
            "duration" => {
                let text = read_text(field).await?;
                let parsed = text.trim().parse::<f64>().map_err(|_| {
                    AppError::Core(CoreError::Validation(
                        "Duration must be a number of seconds".into(),
                    ))
                })?;
                form.duration = (parsed.is_finite() && parsed > 0.0).then_some(parsed);
            }
            "video" => {
                let content_type = field.content_type().unwrap_or("").to_string();
                if !content_type.starts_with("video/") {
                    return Err(AppError::Core(CoreError::Validation(
                        "Only video files are allowed".into(),
                    )));
                }
                let filename = field.file_name().unwrap_or("upload.mp4").to_string();
                let data = field
                    .bytes()
                    .await
                    .map_err(|e| AppError::BadRequest(e.to_string()))?;
                form.video = Some((filename, data.to_vec()));
            }
            _ => {} // ignore unknown fields
        }
    }

    Ok(form)
}

async fn read_text(field: axum::extract::multipart::Field<'_>) -> AppResult<String> {
    field
        .text()
        .await
        .map_err(|e| AppError::BadRequest(e.to_string()))
}

// ---------------------------------------------------------------------------
// Catalog reads (public)
// ---------------------------------------------------------------------------

/// GET /api/videos
pub async fn list(State(state): State<AppState>) -> AppResult<Json<Vec<VideoWithOwner>>> {
    let videos = VideoRepo::list_with_owner(&state.pool).await?;
    Ok(Json(videos))
}

/// GET /api/videos/{id}
pub async fn get_by_id(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<Json<VideoWithOwner>> {
    let video = VideoRepo::find_with_owner(&state.pool, id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Video",
            id,
        }))?;
    Ok(Json(video))
}

/// GET /api/videos/user/{userId}
pub async fn list_by_user(
    State(state): State<AppState>,
    Path(user_id): Path<DbId>,
) -> AppResult<Json<Vec<VideoWithOwner>>> {
    let videos = VideoRepo::list_by_user(&state.pool, user_id).await?;
    Ok(Json(videos))
}

/// POST /api/videos/incviews/{id}
///
/// Unauthenticated and unbounded: every call is one view. The counter
/// update is a single atomic SQL increment, so concurrent calls cannot
/// lose updates.
pub async fn increment_views(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<Json<serde_json::Value>> {
    if !VideoRepo::increment_views(&state.pool, id).await? {
        return Err(AppError::Core(CoreError::NotFound {
            entity: "Video",
            id,
        }));
    }
    Ok(Json(serde_json::json!({ "msg": "View incremented" })))
}

// ---------------------------------------------------------------------------
// Owner-gated mutations
// ---------------------------------------------------------------------------

/// Fetch a video and verify the caller owns it: 404 when absent, 403 on
/// an ownership mismatch. Applied uniformly to update and delete.
async fn fetch_owned_video(state: &AppState, id: DbId, user: &AuthUser) -> AppResult<Video> {
    let video = VideoRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Video",
            id,
        }))?;

    if video.user_id != user.user_id {
        return Err(AppError::Core(CoreError::Forbidden(
            "You do not own this video".into(),
        )));
    }

    Ok(video)
}

/// PUT /api/videos/{id}
pub async fn update(
    State(state): State<AppState>,
    user: AuthUser,
    Path(id): Path<DbId>,
    Json(input): Json<UpdateVideoRequest>,
) -> AppResult<Json<VideoWithOwner>> {
    fetch_owned_video(&state, id, &user).await?;

    // An inline thumbnail replaces the stored one; the old media object
    // is left to the host's own garbage collection.
    let thumbnail_url = match input.thumbnail_base64 {
        Some(encoded) => {
            let bytes = decode_base64_payload(&encoded)?;
            let filename = input
                .thumbnail_filename
                .unwrap_or_else(|| "thumbnail.jpg".to_string());
            let uploaded = state.media.upload_image(&filename, bytes).await?;
            Some(uploaded.url)
        }
        None => None,
    };

    let updated = VideoRepo::update(
        &state.pool,
        id,
        &UpdateVideo {
            title: input.title,
            description: input.description,
            thumbnail_url,
        },
    )
    .await?
    .ok_or(AppError::Core(CoreError::NotFound {
        entity: "Video",
        id,
    }))?;

    // Re-read with the owner summary so the response matches the
    // catalog read shape.
    let video = VideoRepo::find_with_owner(&state.pool, updated.id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Video",
            id,
        }))?;
    Ok(Json(video))
}

/// DELETE /api/videos/{id}
///
/// Media host deletion is attempted first but is best-effort: failures
/// are logged and the catalog row is removed regardless. An orphaned
/// media object is acceptable; a catalog row pointing at deleted media
/// is not.
pub async fn delete(
    State(state): State<AppState>,
    user: AuthUser,
    Path(id): Path<DbId>,
) -> AppResult<Json<serde_json::Value>> {
    let video = fetch_owned_video(&state, id, &user).await?;

    if let Some(public_id) = public_id_from_url(&video.media_url) {
        if let Err(e) = state.media.delete(MediaKind::Video, public_id).await {
            tracing::warn!(video_id = id, public_id, error = %e, "Failed to delete media object");
        }
    }
    if let Some(thumbnail_url) = &video.thumbnail_url {
        if let Some(public_id) = public_id_from_url(thumbnail_url) {
            if let Err(e) = state.media.delete(MediaKind::Image, public_id).await {
                tracing::warn!(video_id = id, public_id, error = %e, "Failed to delete thumbnail object");
            }
        }
    }

    VideoRepo::delete(&state.pool, id).await?;

    tracing::info!(video_id = id, user_id = user.user_id, "Video deleted");
    Ok(Json(serde_json::json!({ "message": "Video deleted successfully" })))
}

/// Decode an inline base64 payload, accepting both raw base64 and
/// `data:<mime>;base64,<payload>` URLs.
fn decode_base64_payload(encoded: &str) -> AppResult<Vec<u8>> {
    let payload = encoded
        .rsplit_once(";base64,")
        .map_or(encoded, |(_, payload)| payload);
    BASE64
        .decode(payload)
        .map_err(|_| AppError::Core(CoreError::Validation("Invalid base64 thumbnail".into())))
}

// ---------------------------------------------------------------------------
// Watch progress
// ---------------------------------------------------------------------------

/// POST /api/videos/watched
///
/// Upsert the caller's watch position for a video. The write is a single
/// atomic upsert keyed on the (user, video) unique constraint; the value
/// is clamped against zero but otherwise stored verbatim (last write
/// wins, even when the position moves backwards).
pub async fn save_watched_time(
    State(state): State<AppState>,
    user: AuthUser,
    Json(input): Json<SaveWatchedTimeRequest>,
) -> AppResult<Json<WatchedVideo>> {
    // A watch record has no meaning without the video it refers to.
    if VideoRepo::find_by_id(&state.pool, input.video_id)
        .await?
        .is_none()
    {
        return Err(AppError::Core(CoreError::NotFound {
            entity: "Video",
            id: input.video_id,
        }));
    }

    let watched_time = clamp_watched_time(input.watched_time);
    let record =
        WatchedVideoRepo::upsert(&state.pool, user.user_id, input.video_id, watched_time).await?;
    Ok(Json(record))
}

/// GET /api/videos/watched/{videoId}
///
/// Read the caller's watch position. A pair with no record is a normal
/// answer (`watchedTime: 0`, `recorded: false`), not an error.
pub async fn get_watched_time(
    State(state): State<AppState>,
    user: AuthUser,
    Path(video_id): Path<DbId>,
) -> AppResult<Json<WatchedTimeResponse>> {
    let record = WatchedVideoRepo::find(&state.pool, user.user_id, video_id).await?;
    let response = match record {
        Some(record) => WatchedTimeResponse {
            watched_time: record.watched_time,
            recorded: true,
        },
        None => WatchedTimeResponse {
            watched_time: 0.0,
            recorded: false,
        },
    };
    Ok(Json(response))
}
