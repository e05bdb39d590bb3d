//! User entity model and DTOs.

use reelhub_core::types::{DbId, Timestamp};
use serde::Serialize;
use sqlx::FromRow;

/// Full user row from the `users` table.
///
/// Contains the password hash -- NEVER serialize this to API responses.
/// Use [`UserIdentity`] for anything external-facing.
#[derive(Debug, Clone, FromRow)]
pub struct User {
    pub id: DbId,
    pub username: String,
    pub email: String,
    pub password_hash: String,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// Public projection of a user: the only shape handlers ever expose.
///
/// Also the projection the access guard attaches to a request, so the
/// password hash never travels past the repository layer.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct UserIdentity {
    pub id: DbId,
    pub username: String,
    pub email: String,
}

/// DTO for creating a new user.
#[derive(Debug)]
pub struct CreateUser {
    pub username: String,
    pub email: String,
    pub password_hash: String,
}
