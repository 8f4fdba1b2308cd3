use std::path::PathBuf;
use std::time::Duration;

use tracing::{debug, info, warn};

use crate::audio::{AudioDevice, DeviceEvent, Generation};
use crate::catalog::Track;

use super::session::{
    PlaybackSession, PlayerState, Queue, Status, progress_percent, sanitize_percent,
};

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum PlaybackError {
    #[error("cannot select from an empty list")]
    EmptyQueue,
    #[error("index {index} is out of bounds for a list of {len}")]
    IndexOutOfBounds { index: usize, len: usize },
}

/// Owns the playback session and is the only thing that drives the device.
pub struct PlaybackController<D> {
    device: D,
    songs_dir: PathBuf,
    generation: Generation,
    session: Option<PlaybackSession>,
}

impl<D: AudioDevice> PlaybackController<D> {
    pub fn new(device: D, songs_dir: impl Into<PathBuf>) -> Self {
        Self {
            device,
            songs_dir: songs_dir.into(),
            generation: Generation::default(),
            session: None,
        }
    }

    pub fn state(&self) -> PlayerState {
        match &self.session {
            None => PlayerState::Idle,
            Some(s) if s.is_playing() => PlayerState::Playing,
            Some(_) => PlayerState::Paused,
        }
    }

    pub fn session(&self) -> Option<&PlaybackSession> {
        self.session.as_ref()
    }

    pub fn current_track(&self) -> Option<&Track> {
        self.session.as_ref().map(PlaybackSession::track)
    }

    pub fn is_playing(&self) -> bool {
        self.state() == PlayerState::Playing
    }

    /// Progress of the current track, 0 when idle.
    pub fn progress(&self) -> f64 {
        self.session.as_ref().map_or(0.0, |s| s.progress)
    }

    pub fn device(&self) -> &D {
        &self.device
    }

    /// Start playing `queue[index]`. Any earlier selection is superseded: its
    /// late device events are ignored from now on.
    pub fn select(&mut self, queue: Queue, index: usize) -> Result<(), PlaybackError> {
        if queue.is_empty() {
            return Err(PlaybackError::EmptyQueue);
        }
        if index >= queue.len() {
            return Err(PlaybackError::IndexOutOfBounds {
                index,
                len: queue.len(),
            });
        }
        self.start(queue, index);
        Ok(())
    }

    fn start(&mut self, queue: Queue, position: usize) {
        self.generation = self.generation.next();
        let source = queue[position].source_in(&self.songs_dir);
        info!(track = %queue[position].display(), source = %source.display(), "selected");

        self.device.load(&source, self.generation);
        self.session = Some(PlaybackSession {
            queue,
            position,
            source,
            status: Status::Playing,
            progress: 0.0,
            duration: None,
            generation: self.generation,
            ready: false,
            load_failed: false,
            ended: false,
        });
    }

    /// Pause when playing, resume when paused. No-op when idle.
    pub fn toggle_play(&mut self) {
        let Some(session) = self.session.as_mut() else {
            return;
        };

        match session.status {
            Status::Playing => {
                self.device.pause();
                session.status = Status::Paused;
            }
            Status::Paused => {
                if session.ended {
                    // The track ran out while paused; resuming moves on like a normal end.
                    self.next();
                    return;
                }
                session.status = Status::Playing;
                if session.load_failed {
                    session.load_failed = false;
                    self.device.load(&session.source, session.generation);
                } else if session.ready {
                    self.device.play(session.generation);
                }
                // Otherwise play is issued once the device reports `Ready`.
            }
        }
    }

    /// Jump to `percent` of the current track. Progress follows immediately;
    /// without a known duration nothing is sent and progress reads 0.
    pub fn seek(&mut self, percent: f64) {
        let Some(session) = self.session.as_mut() else {
            return;
        };
        let percent = sanitize_percent(percent);

        match session.seekable_duration() {
            Some(total) => {
                self.device.seek(total.mul_f64(percent / 100.0));
                session.progress = percent;
                session.ended = false;
            }
            None => {
                debug!("seek ignored, duration unknown");
                session.progress = 0.0;
            }
        }
    }

    /// Seek relative to the current progress.
    pub fn seek_by(&mut self, delta_percent: f64) {
        if self.session.is_some() {
            self.seek(self.progress() + delta_percent);
        }
    }

    /// Advance within the selection snapshot, wrapping to the first track.
    pub fn next(&mut self) {
        let Some(session) = self.session.as_ref() else {
            return;
        };
        let queue = session.queue.clone();
        let next = (session.position + 1) % queue.len();
        self.start(queue, next);
    }

    /// Step back within the selection snapshot, wrapping to the last track.
    pub fn previous(&mut self) {
        let Some(session) = self.session.as_ref() else {
            return;
        };
        let queue = session.queue.clone();
        let prev = (session.position + queue.len() - 1) % queue.len();
        self.start(queue, prev);
    }

    /// Pause the device and forget the session.
    pub fn close(&mut self) {
        if self.session.take().is_some() {
            self.device.pause();
            // Anything still in flight for the closed session is stale.
            self.generation = self.generation.next();
            debug!("player closed");
        }
    }

    /// Apply an event reported by the device.
    pub fn handle_event(&mut self, event: DeviceEvent) {
        let current = self.session.as_ref().map(|s| s.generation);
        if current != Some(event.generation()) {
            debug!(?event, "ignoring stale device event");
            return;
        }

        match event {
            DeviceEvent::Ready { duration, .. } => self.on_ready(duration),
            DeviceEvent::LoadFailed { reason, .. } => {
                warn!("could not load track: {reason}");
                if let Some(session) = self.session.as_mut() {
                    session.status = Status::Paused;
                    session.ready = false;
                    session.load_failed = true;
                }
            }
            DeviceEvent::PlayStarted { .. } => {
                // The user may have paused while play was in flight.
                if !self.is_playing() {
                    self.device.pause();
                }
            }
            DeviceEvent::PlayFailed { reason, .. } => {
                warn!("playback was rejected: {reason}");
                if let Some(session) = self.session.as_mut() {
                    session.status = Status::Paused;
                }
            }
            DeviceEvent::TimeUpdate {
                position, duration, ..
            } => self.on_time_update(position, duration),
            DeviceEvent::Ended { .. } => self.on_ended(),
        }
    }

    fn on_ready(&mut self, duration: Option<Duration>) {
        let Some(session) = self.session.as_mut() else {
            return;
        };
        session.ready = true;
        session.duration = duration;
        if session.is_playing() {
            self.device.play(session.generation);
        }
    }

    fn on_time_update(&mut self, position: Duration, duration: Option<Duration>) {
        let Some(session) = self.session.as_mut() else {
            return;
        };
        if duration.is_some() {
            session.duration = duration;
        }
        if session.is_playing() {
            session.progress = progress_percent(position, session.duration);
        }
    }

    fn on_ended(&mut self) {
        if self.is_playing() {
            debug!("track ended, advancing");
            self.next();
        } else if let Some(session) = self.session.as_mut() {
            // Paused just as the sink drained.
            debug!("track ended while paused");
            session.ended = true;
            session.progress = 100.0;
        }
    }
}
