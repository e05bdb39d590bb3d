//! Watch-progress tracking state machine.
//!
//! A playing video reports its position many times per second. Persisting
//! every tick would hammer the backend, so the tracker keeps a marker of
//! the last persisted position and decides per tick:
//!
//! - position moved more than [`PERSIST_DELTA_SECS`] away from the marker
//!   (seek, or 5 s of ordinary playback) -> persist immediately,
//! - otherwise -> (re)schedule a delayed persist [`DEBOUNCE`] from now,
//!   replacing any previously scheduled one.
//!
//! Pause and unmount bypass the debounce entirely so the final position is
//! never silently lost. The machine is pure: callers pass `now` explicitly
//! and own the actual timer; at most one delayed persist is pending at any
//! time.

use std::time::Duration;

/// Position delta (seconds of media time) that triggers an immediate
/// persist instead of a debounced one.
pub const PERSIST_DELTA_SECS: f64 = 5.0;

/// Quiet period before a debounced persist fires.
pub const DEBOUNCE: Duration = Duration::from_secs(3);

/// Clamp an incoming watched time to the valid range.
///
/// The stored value is always the literal reported position, clamped only
/// against zero. Non-finite input (NaN, infinities) also collapses to 0.
pub fn clamp_watched_time(t: f64) -> f64 {
    if t.is_finite() && t > 0.0 {
        t
    } else {
        0.0
    }
}

/// A delayed persist scheduled by [`ProgressTracker::tick`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PendingFlush {
    /// Position to persist when the flush fires.
    pub position: f64,
    /// Monotonic instant (caller-supplied clock) at which it fires.
    pub due_at: Duration,
}

/// Per-playback-session progress tracker.
///
/// Fields mirror the design: `{ last_persisted, pending }` with three
/// externally driven transitions (`tick`, `pause`, `unmount`) plus `poll`
/// for the timer the caller runs. Methods return the position to persist,
/// if any; the caller performs the actual write.
#[derive(Debug)]
pub struct ProgressTracker {
    last_persisted: f64,
    pending: Option<PendingFlush>,
}

impl ProgressTracker {
    /// Create a tracker resuming from a previously stored position.
    ///
    /// The resume position counts as already persisted, so playback that
    /// continues from it does not immediately re-write the same value.
    pub fn new(resume_position: f64) -> Self {
        Self {
            last_persisted: clamp_watched_time(resume_position),
            pending: None,
        }
    }

    /// The last position handed out for persistence.
    pub fn last_persisted(&self) -> f64 {
        self.last_persisted
    }

    /// Deadline of the currently scheduled delayed persist, if any.
    pub fn pending_deadline(&self) -> Option<Duration> {
        self.pending.map(|p| p.due_at)
    }

    /// A playback position tick.
    ///
    /// Returns `Some(position)` when the position must be persisted right
    /// away; otherwise schedules a delayed persist at `now + DEBOUNCE`,
    /// replacing any earlier schedule (at most one timer is ever live).
    pub fn tick(&mut self, position: f64, now: Duration) -> Option<f64> {
        let position = clamp_watched_time(position);
        if (position - self.last_persisted).abs() > PERSIST_DELTA_SECS {
            self.pending = None;
            self.last_persisted = position;
            return Some(position);
        }
        self.pending = Some(PendingFlush {
            position,
            due_at: now + DEBOUNCE,
        });
        None
    }

    /// Fire a due delayed persist, if one is pending.
    ///
    /// Callers invoke this when their timer elapses (or opportunistically
    /// with the current clock). A flush fires at most once.
    pub fn poll(&mut self, now: Duration) -> Option<f64> {
        match self.pending {
            Some(flush) if now >= flush.due_at => {
                self.pending = None;
                self.last_persisted = flush.position;
                Some(flush.position)
            }
            _ => None,
        }
    }

    /// Explicit pause: persist the exact position regardless of the
    /// threshold, cancelling any scheduled delayed persist.
    pub fn pause(&mut self, position: f64) -> f64 {
        let position = clamp_watched_time(position);
        self.pending = None;
        self.last_persisted = position;
        position
    }

    /// Teardown: cancel the pending timer and return the final position to
    /// persist, or `None` when playback never progressed past zero.
    ///
    /// After this the pending flush is gone, so a timer that was already
    /// scheduled can never produce a second, late write.
    pub fn unmount(&mut self, position: f64) -> Option<f64> {
        self.pending = None;
        let position = clamp_watched_time(position);
        if position > 0.0 {
            self.last_persisted = position;
            Some(position)
        } else {
            None
        }
    }
}
