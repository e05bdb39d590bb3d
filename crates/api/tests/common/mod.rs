//! Shared helpers for HTTP-level integration tests.
//!
//! Builds the real application router (same middleware stack as
//! production) on top of a per-test database, with the media host
//! replaced by an in-process mock.

#![allow(dead_code)]

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use axum::body::Body;
use axum::http::header::{CONTENT_TYPE, COOKIE, SET_COOKIE};
use axum::http::{Request, Response, StatusCode};
use axum::Router;
use http_body_util::BodyExt;
use sqlx::PgPool;
use tower::ServiceExt;

use reelhub_api::auth::jwt::JwtConfig;
use reelhub_api::config::ServerConfig;
use reelhub_api::router::build_app_router;
use reelhub_api::state::AppState;
use reelhub_media::{MediaKind, MediaStore, MediaStoreError, MediaUpload};

// ---------------------------------------------------------------------------
// Mock media store
// ---------------------------------------------------------------------------

/// In-process [`MediaStore`] yielding deterministic URLs and recording
/// deletions. Failure flags simulate a broken media host.
pub struct MockMediaStore {
    counter: AtomicUsize,
    pub deleted: Mutex<Vec<(MediaKind, String)>>,
    pub fail_uploads: bool,
    pub fail_deletes: bool,
}

impl MockMediaStore {
    pub fn new() -> Arc<Self> {
        Arc::new(Self {
            counter: AtomicUsize::new(0),
            deleted: Mutex::new(Vec::new()),
            fail_uploads: false,
            fail_deletes: false,
        })
    }

    /// A store whose delete calls always fail (uploads still work).
    pub fn failing_deletes() -> Arc<Self> {
        Arc::new(Self {
            counter: AtomicUsize::new(0),
            deleted: Mutex::new(Vec::new()),
            fail_uploads: false,
            fail_deletes: true,
        })
    }

    /// A store whose upload calls always fail.
    pub fn failing_uploads() -> Arc<Self> {
        Arc::new(Self {
            counter: AtomicUsize::new(0),
            deleted: Mutex::new(Vec::new()),
            fail_uploads: true,
            fail_deletes: false,
        })
    }

    pub fn deleted(&self) -> Vec<(MediaKind, String)> {
        self.deleted.lock().unwrap().clone()
    }

    fn next_id(&self, prefix: &str) -> String {
        let n = self.counter.fetch_add(1, Ordering::SeqCst);
        format!("{prefix}-{n}")
    }

    fn unavailable() -> MediaStoreError {
        MediaStoreError::Api {
            status: 503,
            body: "media host unavailable".to_string(),
        }
    }
}

#[async_trait::async_trait]
impl MediaStore for MockMediaStore {
    async fn upload_video(
        &self,
        _filename: &str,
        _bytes: Vec<u8>,
    ) -> Result<MediaUpload, MediaStoreError> {
        if self.fail_uploads {
            return Err(Self::unavailable());
        }
        let public_id = self.next_id("vid");
        Ok(MediaUpload {
            url: format!("https://media.test/video/{public_id}.mp4"),
            public_id,
        })
    }

    async fn upload_image(
        &self,
        _filename: &str,
        _bytes: Vec<u8>,
    ) -> Result<MediaUpload, MediaStoreError> {
        if self.fail_uploads {
            return Err(Self::unavailable());
        }
        let public_id = self.next_id("img");
        Ok(MediaUpload {
            url: format!("https://media.test/image/{public_id}.jpg"),
            public_id,
        })
    }

    async fn derive_thumbnail(
        &self,
        video_public_id: &str,
    ) -> Result<MediaUpload, MediaStoreError> {
        if self.fail_uploads {
            return Err(Self::unavailable());
        }
        let public_id = format!("thumb-{video_public_id}");
        Ok(MediaUpload {
            url: format!("https://media.test/image/{public_id}.jpg"),
            public_id,
        })
    }

    async fn delete(&self, kind: MediaKind, public_id: &str) -> Result<(), MediaStoreError> {
        self.deleted
            .lock()
            .unwrap()
            .push((kind, public_id.to_string()));
        if self.fail_deletes {
            return Err(Self::unavailable());
        }
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// App construction
// ---------------------------------------------------------------------------

/// Build a test `ServerConfig` with safe defaults and a fixed secret.
pub fn test_config() -> ServerConfig {
    ServerConfig {
        host: "127.0.0.1".to_string(),
        port: 0,
        cors_origins: vec!["http://localhost:5173".to_string()],
        request_timeout_secs: 30,
        jwt: JwtConfig {
            secret: "test-secret-that-is-long-enough-for-hmac".to_string(),
            session_expiry_days: 7,
        },
    }
}

/// Build the full application router with the given database pool and a
/// fresh mock media store.
pub fn build_test_app(pool: PgPool) -> Router {
    build_test_app_with_media(pool, MockMediaStore::new())
}

/// Build the full application router with an explicit media store (for
/// failure-injection tests).
pub fn build_test_app_with_media(pool: PgPool, media: Arc<dyn MediaStore>) -> Router {
    let config = test_config();
    let state = AppState {
        pool,
        config: Arc::new(config.clone()),
        media,
    };
    build_app_router(state, &config)
}

// ---------------------------------------------------------------------------
// Request helpers
// ---------------------------------------------------------------------------

pub async fn get(app: Router, uri: &str) -> Response<Body> {
    let request = Request::builder().uri(uri).body(Body::empty()).unwrap();
    app.oneshot(request).await.unwrap()
}

pub async fn get_auth(app: Router, uri: &str, cookie: &str) -> Response<Body> {
    let request = Request::builder()
        .uri(uri)
        .header(COOKIE, cookie)
        .body(Body::empty())
        .unwrap();
    app.oneshot(request).await.unwrap()
}

pub async fn post_json(app: Router, uri: &str, body: serde_json::Value) -> Response<Body> {
    let request = Request::builder()
        .method("POST")
        .uri(uri)
        .header(CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .unwrap();
    app.oneshot(request).await.unwrap()
}

pub async fn post_json_auth(
    app: Router,
    uri: &str,
    body: serde_json::Value,
    cookie: &str,
) -> Response<Body> {
    let request = Request::builder()
        .method("POST")
        .uri(uri)
        .header(CONTENT_TYPE, "application/json")
        .header(COOKIE, cookie)
        .body(Body::from(body.to_string()))
        .unwrap();
    app.oneshot(request).await.unwrap()
}

pub async fn post_empty(app: Router, uri: &str) -> Response<Body> {
    let request = Request::builder()
        .method("POST")
        .uri(uri)
        .body(Body::empty())
        .unwrap();
    app.oneshot(request).await.unwrap()
}

pub async fn put_json_auth(
    app: Router,
    uri: &str,
    body: serde_json::Value,
    cookie: &str,
) -> Response<Body> {
    let request = Request::builder()
        .method("PUT")
        .uri(uri)
        .header(CONTENT_TYPE, "application/json")
        .header(COOKIE, cookie)
        .body(Body::from(body.to_string()))
        .unwrap();
    app.oneshot(request).await.unwrap()
}

pub async fn delete_auth(app: Router, uri: &str, cookie: &str) -> Response<Body> {
    let request = Request::builder()
        .method("DELETE")
        .uri(uri)
        .header(COOKIE, cookie)
        .body(Body::empty())
        .unwrap();
    app.oneshot(request).await.unwrap()
}

/// Deserialize a response body as JSON.
pub async fn body_json(response: Response<Body>) -> serde_json::Value {
    let bytes = response
        .into_body()
        .collect()
        .await
        .expect("body should be readable")
        .to_bytes();
    serde_json::from_slice(&bytes).expect("body should be valid JSON")
}

/// Extract the `jwt=...` pair from a response's Set-Cookie headers.
pub fn session_cookie(response: &Response<Body>) -> String {
    response
        .headers()
        .get_all(SET_COOKIE)
        .iter()
        .filter_map(|v| v.to_str().ok())
        .find(|v| v.starts_with("jwt="))
        .expect("response should set the jwt cookie")
        .split(';')
        .next()
        .unwrap()
        .to_string()
}

// ---------------------------------------------------------------------------
// Auth flow helpers
// ---------------------------------------------------------------------------

/// Sign up a user via the API and return the response body plus the
/// session cookie pair.
pub async fn signup_user(app: Router, username: &str) -> (serde_json::Value, String) {
    let body = serde_json::json!({
        "username": username,
        "email": format!("{username}@test.com"),
        "password": "test_password_123!",
    });
    let response = post_json(app, "/api/auth/signup", body).await;
    assert_eq!(response.status(), StatusCode::CREATED);
    let cookie = session_cookie(&response);
    (body_json(response).await, cookie)
}

// ---------------------------------------------------------------------------
// Multipart upload helpers
// ---------------------------------------------------------------------------

/// Boundary used by [`upload_body`].
pub const BOUNDARY: &str = "reelhub-test-boundary";

/// Build a `multipart/form-data` upload body.
pub fn upload_body(
    title: Option<&str>,
    duration: Option<&str>,
    video: Option<(&str, &str, &[u8])>,
) -> Vec<u8> {
    let mut body = Vec::new();

    if let Some(title) = title {
        body.extend_from_slice(
            format!(
                "--{BOUNDARY}\r\nContent-Disposition: form-data; name=\"title\"\r\n\r\n{title}\r\n"
            )
            .as_bytes(),
        );
    }
    if let Some(duration) = duration {
        body.extend_from_slice(
            format!(
                "--{BOUNDARY}\r\nContent-Disposition: form-data; name=\"duration\"\r\n\r\n{duration}\r\n"
            )
            .as_bytes(),
        );
    }
    if let Some((filename, content_type, bytes)) = video {
        body.extend_from_slice(
            format!(
                "--{BOUNDARY}\r\nContent-Disposition: form-data; name=\"video\"; \
                 filename=\"{filename}\"\r\nContent-Type: {content_type}\r\n\r\n"
            )
            .as_bytes(),
        );
        body.extend_from_slice(bytes);
        body.extend_from_slice(b"\r\n");
    }

    body.extend_from_slice(format!("--{BOUNDARY}--\r\n").as_bytes());
    body
}

/// POST a multipart upload with a session cookie.
pub async fn post_upload(app: Router, body: Vec<u8>, cookie: &str) -> Response<Body> {
    let request = Request::builder()
        .method("POST")
        .uri("/api/videos/upload")
        .header(
            CONTENT_TYPE,
            format!("multipart/form-data; boundary={BOUNDARY}"),
        )
        .header(COOKIE, cookie)
        .body(Body::from(body))
        .unwrap();
    app.oneshot(request).await.unwrap()
}

/// Upload a small test video for `cookie`'s user, returning the created
/// video JSON.
pub async fn upload_test_video(app: Router, cookie: &str, title: &str) -> serde_json::Value {
    let body = upload_body(
        Some(title),
        Some("120.0"),
        Some(("clip.mp4", "video/mp4", b"fake-video-bytes")),
    );
    let response = post_upload(app, body, cookie).await;
    assert_eq!(response.status(), StatusCode::CREATED);
    body_json(response).await
}
