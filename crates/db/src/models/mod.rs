//! Domain model structs and DTOs.
//!
//! Each submodule contains:
//! - A `FromRow` entity struct matching the database row
//! - Create/update DTOs used by the repositories
//!
//! Serialized types use camelCase field names: the JSON wire format is
//! part of the public API contract.

pub mod user;
pub mod video;
pub mod watched_video;
