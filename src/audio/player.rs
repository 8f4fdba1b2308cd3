use std::path::Path;
use std::sync::Mutex;
use std::sync::mpsc::{self, Receiver, Sender};
use std::thread::JoinHandle;
use std::time::Duration;

use tracing::debug;

use crate::config::AudioSettings;

use super::thread::spawn_audio_thread;
use super::types::{AudioCmd, AudioDevice, DeviceEvent, Generation};

/// Handle to the `rodio` audio thread.
pub struct AudioPlayer {
    tx: Sender<AudioCmd>,
    join: Mutex<Option<JoinHandle<()>>>,
}

impl AudioPlayer {
    /// Spawn the audio thread. Device events arrive on the returned receiver.
    pub fn spawn(audio_settings: AudioSettings) -> (Self, Receiver<DeviceEvent>) {
        let (tx, rx) = mpsc::channel::<AudioCmd>();
        let (event_tx, event_rx) = mpsc::channel::<DeviceEvent>();

        let audio_handle = spawn_audio_thread(rx, event_tx, audio_settings);

        let player = Self {
            tx,
            join: Mutex::new(Some(audio_handle)),
        };
        (player, event_rx)
    }

    pub fn send(&self, cmd: AudioCmd) -> Result<(), mpsc::SendError<AudioCmd>> {
        self.tx.send(cmd)
    }

    fn send_or_log(&self, cmd: AudioCmd) {
        if let Err(e) = self.send(cmd) {
            debug!("audio thread is gone, dropped {:?}", e.0);
        }
    }

    pub fn quit_softly(&self, fade_out: Duration) {
        let _ = self.send(AudioCmd::Quit { fade_out });

        if let Ok(mut j) = self.join.lock() {
            if let Some(h) = j.take() {
                let _ = h.join();
            }
        }
    }
}

impl AudioDevice for AudioPlayer {
    fn load(&mut self, source: &Path, generation: Generation) {
        self.send_or_log(AudioCmd::Load {
            source: source.to_path_buf(),
            generation,
        });
    }

    fn play(&mut self, generation: Generation) {
        self.send_or_log(AudioCmd::Play { generation });
    }

    fn pause(&mut self) {
        self.send_or_log(AudioCmd::Pause);
    }

    fn seek(&mut self, position: Duration) {
        self.send_or_log(AudioCmd::Seek(position));
    }
}
