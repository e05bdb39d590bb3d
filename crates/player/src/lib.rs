//! Playback-side watch-progress driver.
//!
//! [`PlayerSession`] is the explicit per-playback store object: it owns
//! the pure [`ProgressTracker`](reelhub_core::progress::ProgressTracker)
//! state machine, the single live debounce timer, the resume-seek latch,
//! and the one-shot view-increment gate. All backend traffic goes through
//! the [`ProgressSink`] trait; [`HttpProgressSink`] is the production
//! implementation against the HTTP API.

pub mod http;
pub mod session;
pub mod sink;

pub use http::HttpProgressSink;
pub use session::PlayerSession;
pub use sink::{ProgressSink, SinkError};
