//! Device-facing types shared by the controller and the audio thread.

use std::path::{Path, PathBuf};
use std::time::Duration;

/// Monotonic selection counter. Every load is tagged with one, and events for
/// an older generation are stale.
#[derive(Debug, Copy, Clone, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Generation(u64);

impl Generation {
    pub fn next(self) -> Self {
        Self(self.0.wrapping_add(1))
    }
}

/// The capability the playback controller drives. Implementations never block
/// the caller: outcomes come back as [`DeviceEvent`]s.
pub trait AudioDevice {
    /// Replace whatever is loaded with `source`. Answered by `Ready` or `LoadFailed`.
    fn load(&mut self, source: &Path, generation: Generation);
    /// Start or resume playback. Answered by `PlayStarted` or `PlayFailed`.
    fn play(&mut self, generation: Generation);
    fn pause(&mut self);
    /// Jump to `position` in the loaded source.
    fn seek(&mut self, position: Duration);
}

#[derive(Debug, Clone, PartialEq)]
pub enum DeviceEvent {
    /// Loading finished; `duration` is `None` when the decoder cannot tell.
    Ready {
        generation: Generation,
        duration: Option<Duration>,
    },
    LoadFailed {
        generation: Generation,
        reason: String,
    },
    PlayStarted {
        generation: Generation,
    },
    PlayFailed {
        generation: Generation,
        reason: String,
    },
    TimeUpdate {
        generation: Generation,
        position: Duration,
        duration: Option<Duration>,
    },
    Ended {
        generation: Generation,
    },
}

impl DeviceEvent {
    pub fn generation(&self) -> Generation {
        match self {
            Self::Ready { generation, .. }
            | Self::LoadFailed { generation, .. }
            | Self::PlayStarted { generation }
            | Self::PlayFailed { generation, .. }
            | Self::TimeUpdate { generation, .. }
            | Self::Ended { generation } => *generation,
        }
    }
}

#[derive(Debug)]
pub enum AudioCmd {
    /// Decode `source` into a paused sink.
    Load {
        source: PathBuf,
        generation: Generation,
    },
    /// Resume the loaded sink if it still belongs to `generation`.
    Play { generation: Generation },
    /// Pause without unloading.
    Pause,
    /// Jump to an absolute position in the loaded source.
    Seek(Duration),
    /// Quit the audio thread, fading out over `fade_out` (zero stops at once).
    Quit { fade_out: Duration },
}
