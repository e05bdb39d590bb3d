pub mod auth;
pub mod health;
pub mod video;

use axum::Router;

use crate::state::AppState;

/// Build the `/api` route tree.
///
/// Route hierarchy:
///
/// ```text
/// /auth/signup                 signup (public, sets session cookie)
/// /auth/login                  login (public, sets session cookie)
/// /auth/logout                 logout (public, clears cookie)
/// /auth/check                  session check (requires auth)
///
/// /videos/upload               upload (auth, multipart)
/// /videos                      list catalog (public)
/// /videos/{id}                 get (public), update/delete (auth + owner)
/// /videos/user/{userId}        one user's uploads (public)
/// /videos/incviews/{id}        view increment (public, unbounded)
/// /videos/watched              save watch position (auth)
/// /videos/watched/{videoId}    read watch position (auth)
/// ```
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .nest("/auth", auth::router())
        .nest("/videos", video::router())
}
