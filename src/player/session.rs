use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use crate::audio::Generation;
use crate::catalog::Track;

/// Immutable snapshot of the list a track was selected from.
pub type Queue = Arc<[Track]>;

#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub enum PlayerState {
    #[default]
    Idle,
    Paused,
    Playing,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Status {
    Playing,
    Paused,
}

/// Transient state of the active player. Exists only while a track is selected.
#[derive(Debug, Clone)]
pub struct PlaybackSession {
    pub queue: Queue,
    /// Index of the current track in `queue`.
    pub position: usize,
    /// Resolved audio locator handed to the device.
    pub source: PathBuf,
    pub status: Status,
    /// 0..=100, never NaN.
    pub progress: f64,
    /// Last duration reported by the device.
    pub duration: Option<Duration>,
    pub generation: Generation,
    /// The device confirmed the load for `generation`.
    pub ready: bool,
    /// The last load attempt failed; resuming retries it.
    pub load_failed: bool,
    /// The device reported the end while paused; resuming advances.
    pub ended: bool,
}

impl PlaybackSession {
    pub fn track(&self) -> &Track {
        &self.queue[self.position]
    }

    pub fn is_playing(&self) -> bool {
        self.status == Status::Playing
    }

    /// Duration usable for seeking: known and non-zero.
    pub fn seekable_duration(&self) -> Option<Duration> {
        self.duration.filter(|d| !d.is_zero())
    }
}

/// Percentage of `duration` covered by `position`, clamped to 0..=100.
///
/// Missing or zero duration yields 0.
pub fn progress_percent(position: Duration, duration: Option<Duration>) -> f64 {
    let Some(total) = duration.filter(|d| !d.is_zero()) else {
        return 0.0;
    };
    let pct = position.as_secs_f64() / total.as_secs_f64() * 100.0;
    if pct.is_finite() {
        pct.clamp(0.0, 100.0)
    } else {
        0.0
    }
}

/// Bring a user supplied seek percentage into 0..=100; NaN becomes 0.
pub fn sanitize_percent(percent: f64) -> f64 {
    if percent.is_nan() {
        0.0
    } else {
        percent.clamp(0.0, 100.0)
    }
}
