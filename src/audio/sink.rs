//! Utilities for creating `rodio` sinks from audio files.
//!
//! The helper here encapsulates opening/decoding a file and preparing a
//! paused `Sink` at the requested start position.

use std::fs::File;
use std::io::BufReader;
use std::path::{Path, PathBuf};
use std::time::Duration;

use rodio::decoder::DecoderError;
use rodio::{Decoder, OutputStream, Sink, Source};

#[derive(Debug, thiserror::Error)]
pub(super) enum SinkError {
    #[error("failed to open {path:?}: {source}")]
    Open {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("failed to decode {path:?}: {source}")]
    Decode { path: PathBuf, source: DecoderError },
}

/// A paused sink plus the total duration reported by the decoder.
pub(super) struct PreparedSink {
    pub sink: Sink,
    pub duration: Option<Duration>,
}

/// Create a paused `Sink` for `path` that starts playback at `start_at`.
pub(super) fn create_sink_at(
    handle: &OutputStream,
    path: &Path,
    start_at: Duration,
) -> Result<PreparedSink, SinkError> {
    let file = File::open(path).map_err(|source| SinkError::Open {
        path: path.to_path_buf(),
        source,
    })?;

    let decoder = Decoder::new(BufReader::new(file)).map_err(|source| SinkError::Decode {
        path: path.to_path_buf(),
        source,
    })?;
    let duration = decoder.total_duration();

    let sink = Sink::connect_new(handle.mixer());
    // `skip_duration` is our seeking primitive; even Duration::ZERO is fine.
    sink.append(decoder.skip_duration(start_at));
    sink.pause();

    Ok(PreparedSink { sink, duration })
}
