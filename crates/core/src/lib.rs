//! Shared domain types, error taxonomy, and the watch-progress state
//! machine.
//!
//! This crate has zero internal dependencies so it can be used by the
//! API server, the repository layer, and the playback client alike.

pub mod error;
pub mod progress;
pub mod types;
