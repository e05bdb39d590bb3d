//! Repository-level tests for watch-progress upsert semantics.

use sqlx::PgPool;

use reelhub_core::types::DbId;
use reelhub_db::models::user::CreateUser;
use reelhub_db::models::video::CreateVideo;
use reelhub_db::repositories::{UserRepo, VideoRepo, WatchedVideoRepo};

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

async fn create_user(pool: &PgPool, username: &str) -> DbId {
    let input = CreateUser {
        username: username.to_string(),
        email: format!("{username}@test.com"),
        password_hash: "$argon2id$fake".to_string(),
    };
    UserRepo::create(pool, &input)
        .await
        .expect("user creation should succeed")
        .id
}

async fn create_video(pool: &PgPool, user_id: DbId, title: &str) -> DbId {
    let input = CreateVideo {
        title: title.to_string(),
        description: None,
        user_id,
        media_url: format!("https://media.test/videos/{title}.mp4"),
        thumbnail_url: None,
        duration_seconds: Some(120.0),
    };
    VideoRepo::create(pool, &input)
        .await
        .expect("video creation should succeed")
        .id
}

// ---------------------------------------------------------------------------
// Upsert semantics
// ---------------------------------------------------------------------------

/// First report for a pair creates the record.
#[sqlx::test(migrations = "./migrations")]
async fn test_upsert_creates_on_first_report(pool: PgPool) {
    let user_id = create_user(&pool, "viewer").await;
    let video_id = create_video(&pool, user_id, "clip").await;

    let record = WatchedVideoRepo::upsert(&pool, user_id, video_id, 12.5)
        .await
        .unwrap();
    assert_eq!(record.user_id, user_id);
    assert_eq!(record.video_id, video_id);
    assert_eq!(record.watched_time, 12.5);
}

/// Repeated reports replace the stored value; the literal last write wins
/// even when it moves backwards.
#[sqlx::test(migrations = "./migrations")]
async fn test_upsert_last_write_wins(pool: PgPool) {
    let user_id = create_user(&pool, "viewer").await;
    let video_id = create_video(&pool, user_id, "clip").await;

    for t in [5.0, 30.0, 8.0] {
        WatchedVideoRepo::upsert(&pool, user_id, video_id, t)
            .await
            .unwrap();
    }

    let record = WatchedVideoRepo::find(&pool, user_id, video_id)
        .await
        .unwrap()
        .expect("record should exist");
    assert_eq!(record.watched_time, 8.0, "stored value is the last report");

    // Still exactly one row for the pair.
    let count: (i64,) = sqlx::query_as(
        "SELECT COUNT(*) FROM watched_videos WHERE user_id = $1 AND video_id = $2",
    )
    .bind(user_id)
    .bind(video_id)
    .fetch_one(&pool)
    .await
    .unwrap();
    assert_eq!(count.0, 1);
}

/// Distinct users tracking the same video get independent records.
#[sqlx::test(migrations = "./migrations")]
async fn test_upsert_is_per_user(pool: PgPool) {
    let alice = create_user(&pool, "alice").await;
    let bob = create_user(&pool, "bob").await;
    let video_id = create_video(&pool, alice, "clip").await;

    WatchedVideoRepo::upsert(&pool, alice, video_id, 10.0)
        .await
        .unwrap();
    WatchedVideoRepo::upsert(&pool, bob, video_id, 99.0)
        .await
        .unwrap();

    let alice_record = WatchedVideoRepo::find(&pool, alice, video_id)
        .await
        .unwrap()
        .unwrap();
    assert_eq!(alice_record.watched_time, 10.0);
}

/// A pair with no record reads as `None`, not an error.
#[sqlx::test(migrations = "./migrations")]
async fn test_find_absent_is_none(pool: PgPool) {
    let user_id = create_user(&pool, "viewer").await;
    let video_id = create_video(&pool, user_id, "clip").await;

    let record = WatchedVideoRepo::find(&pool, user_id, video_id)
        .await
        .unwrap();
    assert!(record.is_none());
}

// ---------------------------------------------------------------------------
// Cascades
// ---------------------------------------------------------------------------

/// Deleting a video removes the watch records referencing it.
#[sqlx::test(migrations = "./migrations")]
async fn test_video_delete_cascades_to_watch_records(pool: PgPool) {
    let user_id = create_user(&pool, "viewer").await;
    let video_id = create_video(&pool, user_id, "clip").await;
    WatchedVideoRepo::upsert(&pool, user_id, video_id, 42.0)
        .await
        .unwrap();

    assert!(VideoRepo::delete(&pool, video_id).await.unwrap());

    let count: (i64,) = sqlx::query_as("SELECT COUNT(*) FROM watched_videos")
        .fetch_one(&pool)
        .await
        .unwrap();
    assert_eq!(count.0, 0, "cascade should remove the watch record");
}
