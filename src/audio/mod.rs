//! Audio playback via rodio.
//!
//! A thin wrapper around an output stream and a sink. The player reports
//! its position in seconds, which makes it the timeline's [`Clock`] during
//! a karaoke session.

use std::fs;
use std::io::BufReader;
use std::path::{Path, PathBuf};

use rodio::{Decoder, OutputStream, OutputStreamBuilder, Sink, Source};

use crate::timeline::Clock;

#[derive(Debug, thiserror::Error)]
pub enum AudioError {
    #[error("audio file not found: {}", path.display())]
    FileNotFound { path: PathBuf },

    #[error("failed to open audio output device: {0}")]
    Device(#[from] rodio::StreamError),

    #[error("failed to read audio file: {0}")]
    Read(#[from] std::io::Error),

    #[error("failed to decode audio file: {0}")]
    Decode(#[from] rodio::decoder::DecoderError),
}

/// A playing (or paused) audio file.
pub struct AudioPlayer {
    // Dropping the stream silences the sink; keep it alive for the
    // player's lifetime.
    _stream: OutputStream,
    sink: Sink,
    total_duration: Option<f64>,
}

impl std::fmt::Debug for AudioPlayer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AudioPlayer")
            .field("total_duration", &self.total_duration)
            .finish_non_exhaustive()
    }
}

impl AudioPlayer {
    /// Open the default output device and start playing `path`.
    pub fn open(path: &Path) -> Result<Self, AudioError> {
        if !path.is_file() {
            return Err(AudioError::FileNotFound {
                path: path.to_path_buf(),
            });
        }

        let stream = OutputStreamBuilder::from_default_device()?.open_stream_or_fallback()?;
        let sink = Sink::connect_new(stream.mixer());

        let file = fs::File::open(path)?;
        let source = Decoder::new(BufReader::new(file))?;
        let total_duration = source.total_duration().map(|d| d.as_secs_f64());
        sink.append(source);

        tracing::debug!(
            "playing {} (duration {:?})",
            path.display(),
            total_duration
        );

        Ok(Self {
            _stream: stream,
            sink,
            total_duration,
        })
    }

    /// Seconds of audio played so far.
    pub fn position_secs(&self) -> f64 {
        self.sink.get_pos().as_secs_f64()
    }

    /// Track length in seconds, when the decoder knows it. Compressed
    /// formats often do not report one; callers fall back to an estimate.
    pub fn total_duration(&self) -> Option<f64> {
        self.total_duration
    }

    pub fn is_paused(&self) -> bool {
        self.sink.is_paused()
    }

    pub fn toggle_pause(&self) {
        if self.sink.is_paused() {
            self.sink.play();
        } else {
            self.sink.pause();
        }
    }

    /// True once the sink has drained the whole track.
    pub fn is_finished(&self) -> bool {
        self.sink.empty()
    }

    pub fn stop(&self) {
        self.sink.stop();
    }

    /// Volume as a 0..=100 percentage, for the status line.
    pub fn volume_percent(&self) -> u32 {
        (self.sink.volume() * 100.0).round() as u32
    }
}

impl Clock for AudioPlayer {
    fn elapsed_seconds(&self) -> f64 {
        self.position_secs()
    }
}
