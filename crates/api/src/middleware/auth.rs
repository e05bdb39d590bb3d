//! Session-cookie authentication extractor for Axum handlers.

use axum::extract::FromRequestParts;
use axum::http::request::Parts;
use reelhub_core::error::CoreError;
use reelhub_core::types::DbId;
use reelhub_db::repositories::UserRepo;
use tower_cookies::Cookies;

use crate::auth::cookie::SESSION_COOKIE;
use crate::auth::jwt::validate_token;
use crate::error::AppError;
use crate::state::AppState;

/// Authenticated user resolved from the `jwt` session cookie.
///
/// Use this as an extractor parameter in any handler that requires
/// authentication; public handlers simply omit it:
///
/// ```ignore
/// async fn my_handler(user: AuthUser) -> AppResult<Json<()>> {
///     tracing::info!(user_id = user.user_id, "handling request");
///     Ok(Json(()))
/// }
/// ```
///
/// The extractor runs before the handler body, so a rejected request
/// never partially executes the guarded logic. It resolves the token
/// subject against the database on every request -- a deleted user's
/// still-valid token yields 404, not a ghost identity -- and only ever
/// carries the id/username/email projection, never the password hash.
#[derive(Debug, Clone)]
pub struct AuthUser {
    /// The user's internal database id (from `claims.sub`).
    pub user_id: DbId,
    pub username: String,
    pub email: String,
}

impl FromRequestParts<AppState> for AuthUser {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let cookies = Cookies::from_request_parts(parts, state)
            .await
            .map_err(|_| {
                AppError::InternalError("Cookie layer is not installed".into())
            })?;

        let token = cookies
            .get(SESSION_COOKIE)
            .map(|c| c.value().to_string())
            .ok_or_else(|| {
                AppError::Core(CoreError::Unauthorized("No session token provided".into()))
            })?;

        let claims = validate_token(&token, &state.config.jwt).map_err(|_| {
            AppError::Core(CoreError::Unauthorized(
                "Session token is invalid or expired".into(),
            ))
        })?;

        let identity = UserRepo::find_identity_by_id(&state.pool, claims.sub)
            .await
            .map_err(|e| {
                tracing::error!(error = %e, "Failed to resolve session user");
                AppError::InternalError("Failed to resolve session user".into())
            })?
            .ok_or(AppError::Core(CoreError::NotFound {
                entity: "User",
                id: claims.sub,
            }))?;

        Ok(AuthUser {
            user_id: identity.id,
            username: identity.username,
            email: identity.email,
        })
    }
}
