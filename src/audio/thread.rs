use std::path::PathBuf;
use std::sync::mpsc::{Receiver, RecvTimeoutError, Sender};
use std::thread;
use std::thread::JoinHandle;
use std::time::{Duration, Instant};

use rodio::{OutputStream, OutputStreamBuilder, Sink};
use tracing::{debug, error, info, warn};

use crate::config::AudioSettings;

use super::sink::create_sink_at;
use super::types::{AudioCmd, DeviceEvent, Generation};

/// The one source currently held by the audio thread.
struct Loaded {
    source: PathBuf,
    generation: Generation,
    sink: Sink,
    duration: Option<Duration>,
    // Track start time and accumulated elapsed when paused.
    started_at: Option<Instant>,
    accumulated: Duration,
    ended: bool,
}

impl Loaded {
    fn playing(&self) -> bool {
        self.started_at.is_some()
    }

    fn elapsed(&self) -> Duration {
        let e = self.accumulated + self.started_at.map_or(Duration::ZERO, |st| st.elapsed());
        match self.duration {
            Some(d) => e.min(d),
            None => e,
        }
    }

    fn play(&mut self) {
        if self.started_at.is_none() {
            self.sink.play();
            self.started_at = Some(Instant::now());
        }
    }

    fn pause(&mut self) {
        self.sink.pause();
        if let Some(st) = self.started_at.take() {
            self.accumulated += st.elapsed();
        }
    }

    fn time_update(&self) -> DeviceEvent {
        DeviceEvent::TimeUpdate {
            generation: self.generation,
            position: self.elapsed(),
            duration: self.duration,
        }
    }
}

/// What the audio thread does with a `Play` command.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub(super) enum PlayDecision {
    Start,
    /// The command belongs to a selection that was replaced by a later load.
    Stale { loaded: Generation },
    Reject(&'static str),
}

/// Decide on `Play { requested }` given the loaded source's generation and
/// whether it already ran to the end.
pub(super) fn play_decision(
    loaded: Option<(Generation, bool)>,
    requested: Generation,
) -> PlayDecision {
    match loaded {
        None => PlayDecision::Reject("nothing loaded"),
        Some((generation, _)) if generation != requested => {
            PlayDecision::Stale { loaded: generation }
        }
        Some((_, true)) => PlayDecision::Reject("track already ended"),
        Some((_, false)) => PlayDecision::Start,
    }
}

fn fade_out_sink(sink: &Sink, fade_out: Duration) {
    if fade_out.is_zero() {
        sink.set_volume(0.0);
        return;
    }
    let steps: u32 = 20;
    let step = (fade_out / steps).max(Duration::from_millis(1));
    sink.set_volume(1.0);
    for i in 1..=steps {
        let t = i as f32 / steps as f32;
        sink.set_volume(1.0 - t);
        thread::sleep(step);
    }
    sink.set_volume(0.0);
}

fn emit(events: &Sender<DeviceEvent>, event: DeviceEvent) {
    if events.send(event).is_err() {
        debug!("device event dropped, controller is gone");
    }
}

fn open_stream() -> Option<OutputStream> {
    match OutputStreamBuilder::open_default_stream() {
        Ok(mut stream) => {
            // rodio logs to stderr when OutputStream is dropped. That's useful in debugging,
            // but noisy for a TUI app.
            stream.log_on_drop(false);
            Some(stream)
        }
        Err(e) => {
            error!("no audio output device: {e}");
            None
        }
    }
}

pub(super) fn spawn_audio_thread(
    rx: Receiver<AudioCmd>,
    events: Sender<DeviceEvent>,
    audio_settings: AudioSettings,
) -> JoinHandle<()> {
    thread::spawn(move || {
        let stream = open_stream();
        let tick = Duration::from_millis(audio_settings.tick_ms.max(10));
        let mut current: Option<Loaded> = None;

        loop {
            match rx.recv_timeout(tick) {
                Ok(cmd) => match cmd {
                    AudioCmd::Load { source, generation } => {
                        // Only one track may be loaded at a time.
                        if let Some(old) = current.take() {
                            old.sink.stop();
                        }

                        let Some(stream) = stream.as_ref() else {
                            emit(
                                &events,
                                DeviceEvent::LoadFailed {
                                    generation,
                                    reason: "no audio output device".to_string(),
                                },
                            );
                            continue;
                        };

                        match create_sink_at(stream, &source, Duration::ZERO) {
                            Ok(prepared) => {
                                info!(source = %source.display(), "loaded");
                                let duration = prepared.duration;
                                current = Some(Loaded {
                                    source,
                                    generation,
                                    sink: prepared.sink,
                                    duration,
                                    started_at: None,
                                    accumulated: Duration::ZERO,
                                    ended: false,
                                });
                                emit(&events, DeviceEvent::Ready { generation, duration });
                            }
                            Err(e) => {
                                warn!("load failed: {e}");
                                emit(
                                    &events,
                                    DeviceEvent::LoadFailed {
                                        generation,
                                        reason: e.to_string(),
                                    },
                                );
                            }
                        }
                    }

                    AudioCmd::Play { generation } => {
                        let loaded_state = current.as_ref().map(|l| (l.generation, l.ended));
                        match play_decision(loaded_state, generation) {
                            PlayDecision::Start => {
                                if let Some(loaded) = current.as_mut() {
                                    loaded.play();
                                }
                                emit(&events, DeviceEvent::PlayStarted { generation });
                            }
                            PlayDecision::Stale { loaded } => {
                                debug!(
                                    requested = ?generation,
                                    ?loaded,
                                    "ignoring play for a superseded selection"
                                );
                            }
                            PlayDecision::Reject(reason) => emit(
                                &events,
                                DeviceEvent::PlayFailed {
                                    generation,
                                    reason: reason.to_string(),
                                },
                            ),
                        }
                    }

                    AudioCmd::Pause => {
                        if let Some(loaded) = current.as_mut() {
                            loaded.pause();
                        }
                    }

                    AudioCmd::Seek(target) => {
                        // Scrubbing: rebuild the current sink and skip into the file.
                        // This uses `Source::skip_duration` (works for common formats).
                        let (Some(loaded), Some(stream)) = (current.as_mut(), stream.as_ref())
                        else {
                            continue;
                        };
                        let target = match loaded.duration {
                            Some(d) => target.min(d),
                            None => target,
                        };

                        match create_sink_at(stream, &loaded.source, target) {
                            Ok(prepared) => {
                                let was_playing = loaded.playing();
                                loaded.sink.stop();
                                loaded.sink = prepared.sink;
                                loaded.accumulated = target;
                                loaded.started_at = None;
                                loaded.ended = false;
                                if was_playing {
                                    loaded.play();
                                }
                                emit(&events, loaded.time_update());
                            }
                            Err(e) => warn!("seek failed, keeping position: {e}"),
                        }
                    }

                    AudioCmd::Quit { fade_out } => {
                        if let Some(loaded) = current.take() {
                            if loaded.playing() {
                                // Fade out gently before stopping.
                                fade_out_sink(&loaded.sink, fade_out);
                            }
                            loaded.sink.stop();
                        }
                        break;
                    }
                },
                Err(RecvTimeoutError::Timeout) => {
                    // Periodic position report and end-of-track check.
                    let Some(loaded) = current.as_mut() else {
                        continue;
                    };
                    if !loaded.playing() {
                        continue;
                    }
                    if loaded.sink.empty() {
                        loaded.pause();
                        loaded.ended = true;
                        emit(
                            &events,
                            DeviceEvent::Ended {
                                generation: loaded.generation,
                            },
                        );
                    } else {
                        emit(&events, loaded.time_update());
                    }
                }
                Err(RecvTimeoutError::Disconnected) => break,
            }
        }
    })
}
