//! Per-playback session state: resume, debounced persistence, teardown.

use std::sync::Arc;

use tokio::sync::Mutex;
use tokio::task::JoinHandle;
use tokio::time::Instant;

use reelhub_core::progress::{ProgressTracker, DEBOUNCE};
use reelhub_core::types::DbId;

use crate::sink::ProgressSink;

/// Fraction of the video that must be watched before the session reports
/// a view. Purely client-side; the server accepts every increment.
const VIEW_THRESHOLD: f64 = 0.5;

/// Explicit store object for one playback of one video.
///
/// Owns the pure progress state machine plus everything the machine
/// deliberately leaves to its caller: the actual debounce timer (at most
/// one live at a time), the resume-seek latch, the half-watched view
/// gate, and the network calls. Persist calls are spawned so the session
/// keeps accepting position ticks while a write is in flight; a late
/// response after teardown is logged and ignored.
pub struct PlayerSession {
    video_id: DbId,
    duration_seconds: Option<f64>,
    sink: Arc<dyn ProgressSink>,
    tracker: Arc<Mutex<ProgressTracker>>,
    /// Clock origin for the tracker's monotonic `now` values.
    origin: Instant,
    /// Handle of the single scheduled debounce task, if any.
    timer: Option<JoinHandle<()>>,
    /// Resume position, handed out exactly once by [`take_resume_seek`].
    ///
    /// [`take_resume_seek`]: Self::take_resume_seek
    resume_position: Option<f64>,
    view_reported: bool,
    last_position: f64,
}

impl PlayerSession {
    /// Start a session: fetch the stored watch position and prime the
    /// tracker with it.
    ///
    /// A fetch failure is not fatal -- the session logs it and starts
    /// from zero; watch progress is best-effort by design.
    pub async fn mount(
        video_id: DbId,
        duration_seconds: Option<f64>,
        sink: Arc<dyn ProgressSink>,
    ) -> Self {
        let resume = match sink.load_watched_time(video_id).await {
            Ok(t) => t,
            Err(e) => {
                tracing::warn!(video_id, error = %e, "Failed to fetch watch position, starting from zero");
                0.0
            }
        };

        Self {
            video_id,
            duration_seconds,
            sink,
            tracker: Arc::new(Mutex::new(ProgressTracker::new(resume))),
            origin: Instant::now(),
            timer: None,
            resume_position: (resume > 0.0).then_some(resume),
            view_reported: false,
            last_position: 0.0,
        }
    }

    /// Take the position the player should seek to, exactly once.
    ///
    /// Returns `None` on every later call (and when there was nothing to
    /// resume), so external position updates can never re-trigger the
    /// initial seek.
    pub fn take_resume_seek(&mut self) -> Option<f64> {
        self.resume_position.take()
    }

    /// Handle a playback position tick.
    pub async fn on_tick(&mut self, position: f64) {
        self.last_position = position;
        self.maybe_report_view(position);

        let now = self.origin.elapsed();
        let immediate = self.tracker.lock().await.tick(position, now);

        match immediate {
            Some(position) => {
                self.cancel_timer();
                self.spawn_persist(position);
            }
            None => self.reschedule_timer(),
        }
    }

    /// Handle an explicit pause: persist right away, bypassing the
    /// debounce.
    pub async fn on_pause(&mut self, position: f64) {
        self.last_position = position;
        self.cancel_timer();
        let position = self.tracker.lock().await.pause(position);
        self.spawn_persist(position);
    }

    /// Tear the session down, flushing the last known position.
    ///
    /// The pending debounce timer is cancelled first so it cannot race a
    /// late write past the teardown; the final persist (skipped when the
    /// position never left zero) is awaited, not spawned.
    pub async fn unmount(mut self) {
        self.cancel_timer();
        let flush = self.tracker.lock().await.unmount(self.last_position);
        if let Some(position) = flush {
            if let Err(e) = self.sink.save_watched_time(self.video_id, position).await {
                tracing::warn!(
                    video_id = self.video_id,
                    position,
                    error = %e,
                    "Failed to flush final watch position",
                );
            }
        }
    }

    /// Report a view once the position crosses half the duration.
    fn maybe_report_view(&mut self, position: f64) {
        if self.view_reported {
            return;
        }
        let Some(duration) = self.duration_seconds else {
            return;
        };
        if duration > 0.0 && position >= duration * VIEW_THRESHOLD {
            self.view_reported = true;
            let sink = Arc::clone(&self.sink);
            let video_id = self.video_id;
            tokio::spawn(async move {
                if let Err(e) = sink.increment_views(video_id).await {
                    tracing::warn!(video_id, error = %e, "Failed to report view");
                }
            });
        }
    }

    /// Replace the scheduled debounce task with a fresh one.
    ///
    /// Even if an old task wins the race against `abort`, its `poll`
    /// sees the replaced (later) deadline and does nothing, so at most
    /// one delayed persist can ever fire.
    fn reschedule_timer(&mut self) {
        self.cancel_timer();

        let tracker = Arc::clone(&self.tracker);
        let sink = Arc::clone(&self.sink);
        let origin = self.origin;
        let video_id = self.video_id;

        self.timer = Some(tokio::spawn(async move {
            tokio::time::sleep(DEBOUNCE).await;
            let fired = tracker.lock().await.poll(origin.elapsed());
            if let Some(position) = fired {
                if let Err(e) = sink.save_watched_time(video_id, position).await {
                    tracing::warn!(video_id, position, error = %e, "Failed to persist watch position");
                }
            }
        }));
    }

    fn cancel_timer(&mut self) {
        if let Some(timer) = self.timer.take() {
            timer.abort();
        }
    }

    /// Persist in the background so ticks keep flowing while the write
    /// is in flight. Failures are logged and superseded by the next
    /// report.
    fn spawn_persist(&self, position: f64) {
        let sink = Arc::clone(&self.sink);
        let video_id = self.video_id;
        tokio::spawn(async move {
            if let Err(e) = sink.save_watched_time(video_id, position).await {
                tracing::warn!(video_id, position, error = %e, "Failed to persist watch position");
            }
        });
    }
}
