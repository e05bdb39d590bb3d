//! Domain error taxonomy shared by every layer.
//!
//! Handlers map these onto HTTP statuses: `Validation` -> 400,
//! `Unauthorized` -> 401, `Forbidden` -> 403, `NotFound` -> 404,
//! `Conflict` -> 409, `Internal` -> 500.

use crate::types::DbId;

#[derive(Debug, thiserror::Error)]
pub enum CoreError {
    /// A referenced entity does not exist (video, user, ...).
    #[error("Entity not found: {entity} with id {id}")]
    NotFound { entity: &'static str, id: DbId },

    /// Missing or malformed input.
    #[error("Validation failed: {0}")]
    Validation(String),

    /// A unique constraint was violated (e.g. duplicate email).
    #[error("Conflict: {0}")]
    Conflict(String),

    /// Missing, invalid, or expired session.
    #[error("Unauthorized: {0}")]
    Unauthorized(String),

    /// Authenticated, but not the owner of the resource.
    #[error("Forbidden: {0}")]
    Forbidden(String),

    #[error("Internal error: {0}")]
    Internal(String),
}
