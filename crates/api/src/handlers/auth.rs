//! Handlers for the `/auth` resource (signup, login, logout, check).

use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use reelhub_core::error::CoreError;
use reelhub_core::types::{DbId, Timestamp};
use reelhub_db::models::user::{CreateUser, User};
use reelhub_db::repositories::UserRepo;
use serde::{Deserialize, Serialize};
use tower_cookies::Cookies;
use validator::Validate;

use crate::auth::cookie::{build_session_cookie, clear_session_cookie};
use crate::auth::jwt::generate_session_token;
use crate::auth::password::{hash_password, validate_password_strength, verify_password};
use crate::error::{AppError, AppResult};
use crate::middleware::auth::AuthUser;
use crate::state::AppState;

// ---------------------------------------------------------------------------
// Request / response types
// ---------------------------------------------------------------------------

/// Request body for `POST /auth/signup`.
#[derive(Debug, Deserialize, Validate)]
pub struct SignupRequest {
    #[validate(length(min = 1, message = "All fields are required"))]
    pub username: String,
    #[validate(email(message = "Invalid email address"))]
    pub email: String,
    pub password: String,
}

/// Request body for `POST /auth/login`.
#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

/// Public user info returned by signup and session checks.
#[derive(Debug, Serialize)]
pub struct SessionUser {
    pub id: DbId,
    pub username: String,
    pub email: String,
}

/// Login response: the session user plus the account creation time.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LoginResponse {
    pub id: DbId,
    pub username: String,
    pub email: String,
    pub created_at: Timestamp,
}

// ---------------------------------------------------------------------------
// Handlers
// ---------------------------------------------------------------------------

/// POST /api/auth/signup
///
/// Create an account and establish a session in one step.
pub async fn signup(
    State(state): State<AppState>,
    cookies: Cookies,
    Json(input): Json<SignupRequest>,
) -> AppResult<(StatusCode, Json<SessionUser>)> {
    // 1. Field validation (presence, email shape, password policy).
    input
        .validate()
        .map_err(|e| AppError::Core(CoreError::Validation(e.to_string())))?;
    validate_password_strength(&input.password)
        .map_err(|e| AppError::Core(CoreError::Validation(e)))?;

    // 2. Reject duplicate emails up front. The uq_users_email constraint
    //    still backstops a concurrent signup race (mapped to 409).
    if UserRepo::find_by_email(&state.pool, &input.email)
        .await?
        .is_some()
    {
        return Err(AppError::Core(CoreError::Validation(
            "Email already exists".into(),
        )));
    }

    // 3. Hash and create.
    let password_hash = hash_password(&input.password)
        .map_err(|e| AppError::InternalError(format!("Password hashing error: {e}")))?;
    let user = UserRepo::create(
        &state.pool,
        &CreateUser {
            username: input.username,
            email: input.email,
            password_hash,
        },
    )
    .await?;

    // 4. Establish the session.
    establish_session(&state, &cookies, &user)?;

    Ok((
        StatusCode::CREATED,
        Json(SessionUser {
            id: user.id,
            username: user.username,
            email: user.email,
        }),
    ))
}

/// POST /api/auth/login
///
/// Authenticate with email + password and establish a session.
pub async fn login(
    State(state): State<AppState>,
    cookies: Cookies,
    Json(input): Json<LoginRequest>,
) -> AppResult<Json<LoginResponse>> {
    // A single message for both unknown email and bad password, so the
    // endpoint cannot be used to probe which emails are registered.
    let invalid = || AppError::Core(CoreError::Unauthorized("Invalid email or password".into()));

    let user = UserRepo::find_by_email(&state.pool, &input.email)
        .await?
        .ok_or_else(invalid)?;

    let password_valid = verify_password(&input.password, &user.password_hash)
        .map_err(|e| AppError::InternalError(format!("Password verification error: {e}")))?;
    if !password_valid {
        return Err(invalid());
    }

    establish_session(&state, &cookies, &user)?;

    Ok(Json(LoginResponse {
        id: user.id,
        username: user.username,
        email: user.email,
        created_at: user.created_at,
    }))
}

/// POST /api/auth/logout
///
/// Overwrite the session cookie with an immediately-expiring empty value.
/// Client-state only: an already-issued token stays valid until its
/// natural expiry (no server-side revocation list exists).
pub async fn logout(cookies: Cookies) -> Json<serde_json::Value> {
    cookies.add(clear_session_cookie());
    Json(serde_json::json!({ "message": "Logged out successfully" }))
}

/// GET /api/auth/check
///
/// Echo the identity the access guard resolved for the current session.
pub async fn check(user: AuthUser) -> Json<SessionUser> {
    Json(SessionUser {
        id: user.user_id,
        username: user.username,
        email: user.email,
    })
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

/// Issue a session token for `user` and attach it as the `jwt` cookie.
fn establish_session(state: &AppState, cookies: &Cookies, user: &User) -> AppResult<()> {
    let token = generate_session_token(user.id, &state.config.jwt)
        .map_err(|e| AppError::InternalError(format!("Token generation error: {e}")))?;
    cookies.add(build_session_cookie(token, &state.config.jwt));
    Ok(())
}
