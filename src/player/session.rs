//! The karaoke playback session.
//!
//! A single-threaded cooperative loop: poll the transport for the current
//! position, query the timeline, redraw when the active line changes or the
//! refresh interval elapses. The timeline is immutable and every query is
//! pure, so the loop needs no locking.

use std::io::{self, Write};
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::{Duration, Instant};

use anyhow::Result;
use crossterm::event::{self, Event, KeyCode, KeyEventKind, KeyModifiers};
use crossterm::{cursor, execute, terminal};

use crate::audio::AudioPlayer;
use crate::config::PlaybackConfig;
use crate::timeline::{Clock, Timeline};
use crate::ui::Theme;

use super::screen::{self, FrameData};

/// Playback transport the session polls.
///
/// [`AudioPlayer`] is the real implementation; the trait keeps the session
/// decoupled from the audio backend and lets tests drive the loop's
/// queries with a fake position source.
pub trait Transport: Clock {
    fn is_finished(&self) -> bool;
    fn is_paused(&self) -> bool;
    fn toggle_pause(&self);
    fn volume_percent(&self) -> u32;
}

impl Transport for AudioPlayer {
    fn is_finished(&self) -> bool {
        AudioPlayer::is_finished(self)
    }

    fn is_paused(&self) -> bool {
        AudioPlayer::is_paused(self)
    }

    fn toggle_pause(&self) {
        AudioPlayer::toggle_pause(self)
    }

    fn volume_percent(&self) -> u32 {
        AudioPlayer::volume_percent(self)
    }
}

/// How the session ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionOutcome {
    /// The track played to the end.
    Finished,
    /// The user stopped playback.
    Stopped,
}

/// Loop tuning, taken from the playback config.
#[derive(Debug, Clone)]
pub struct SessionOptions {
    pub poll_interval: Duration,
    pub refresh_interval: Duration,
    pub preview_window_secs: f64,
}

impl SessionOptions {
    pub fn from_config(config: &PlaybackConfig) -> Self {
        Self {
            poll_interval: Duration::from_millis(config.poll_interval_ms),
            refresh_interval: Duration::from_millis(config.refresh_interval_ms),
            preview_window_secs: config.preview_window_secs,
        }
    }
}

/// One karaoke playback session over an immutable timeline.
pub struct KaraokeSession {
    title: String,
    artist: String,
    timeline: Timeline,
    total_duration: f64,
    options: SessionOptions,
    theme: Theme,
}

impl KaraokeSession {
    pub fn new(
        title: impl Into<String>,
        artist: impl Into<String>,
        timeline: Timeline,
        total_duration: f64,
        options: SessionOptions,
    ) -> Self {
        Self {
            title: title.into(),
            artist: artist.into(),
            timeline,
            total_duration,
            options,
            theme: Theme::default(),
        }
    }

    /// Estimate a track length when the decoder reports none: the last
    /// lyric timestamp plus a ten second tail.
    pub fn fallback_duration(timeline: &Timeline) -> f64 {
        timeline.last().map_or(0.0, |line| line.timestamp + 10.0)
    }

    fn frame_data<'a>(&'a self, transport: &dyn Transport, t: f64) -> FrameData<'a> {
        FrameData {
            title: &self.title,
            artist: &self.artist,
            timeline: &self.timeline,
            t,
            total_duration: self.total_duration,
            preview_window_secs: self.options.preview_window_secs,
            paused: transport.is_paused(),
            volume_percent: transport.volume_percent(),
        }
    }

    /// Run the playback loop until the track finishes or the user stops it.
    ///
    /// `stop` is the Ctrl-C backstop for terminals where raw mode is
    /// unavailable; the loop just stops polling when it flips.
    pub fn run<T: Transport>(&self, transport: &T, stop: &AtomicBool) -> Result<SessionOutcome> {
        let raw = RawModeGuard::try_enable();
        if raw.is_none() {
            tracing::debug!("raw mode unavailable, key controls disabled");
        }

        let mut stdout = io::stdout();
        let mut last_active: Option<Option<usize>> = None;
        let mut last_render = Instant::now();

        let outcome = loop {
            if stop.load(Ordering::Relaxed) {
                break SessionOutcome::Stopped;
            }
            if transport.is_finished() {
                break SessionOutcome::Finished;
            }

            if raw.is_some() {
                // poll() doubles as the loop's sleep.
                if event::poll(self.options.poll_interval)? {
                    match event::read()? {
                        Event::Key(key) if key.kind == KeyEventKind::Press => match key.code {
                            KeyCode::Char('q') | KeyCode::Esc => break SessionOutcome::Stopped,
                            KeyCode::Char('c')
                                if key.modifiers.contains(KeyModifiers::CONTROL) =>
                            {
                                break SessionOutcome::Stopped
                            }
                            KeyCode::Char(' ') => {
                                transport.toggle_pause();
                                last_active = None;
                            }
                            _ => {}
                        },
                        Event::Resize(_, _) => last_active = None,
                        _ => {}
                    }
                }
            } else {
                std::thread::sleep(self.options.poll_interval);
            }

            let t = transport.elapsed_seconds();
            let active = self.timeline.active_index(t);
            let due = last_render.elapsed() >= self.options.refresh_interval;

            if last_active != Some(active) || due {
                last_active = Some(active);
                last_render = Instant::now();
                self.draw(&mut stdout, transport, t)?;
            }
        };

        drop(raw);
        Ok(outcome)
    }

    fn draw(&self, stdout: &mut io::Stdout, transport: &dyn Transport, t: f64) -> Result<()> {
        let width = terminal_width();
        let lines = screen::frame_lines(&self.theme, width, &self.frame_data(transport, t));

        execute!(
            stdout,
            terminal::Clear(terminal::ClearType::All),
            cursor::MoveTo(0, 0)
        )?;
        for line in lines {
            // Raw mode needs explicit carriage returns.
            write!(stdout, "{}\r\n", line)?;
        }
        stdout.flush()?;

        Ok(())
    }

    /// Print the end-of-song summary (cooked mode).
    pub fn print_summary(&self, transport: &dyn Transport) -> Result<()> {
        let t = transport.elapsed_seconds();
        let lines = screen::summary_lines(
            &self.theme,
            terminal_width(),
            &self.frame_data(transport, t),
        );

        let mut stdout = io::stdout();
        execute!(
            stdout,
            terminal::Clear(terminal::ClearType::All),
            cursor::MoveTo(0, 0)
        )?;
        for line in lines {
            writeln!(stdout, "{}", line)?;
        }

        Ok(())
    }
}

fn terminal_width() -> usize {
    terminal_size::terminal_size().map_or(70, |(w, _)| (w.0 as usize).clamp(40, 100))
}

/// Raw mode with guaranteed restore.
struct RawModeGuard;

impl RawModeGuard {
    fn try_enable() -> Option<Self> {
        if terminal::enable_raw_mode().is_err() {
            return None;
        }
        let _ = execute!(io::stdout(), cursor::Hide);
        Some(Self)
    }
}

impl Drop for RawModeGuard {
    fn drop(&mut self) {
        let _ = execute!(io::stdout(), cursor::Show);
        let _ = terminal::disable_raw_mode();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::timeline::LyricLine;
    use std::cell::Cell;

    struct FakeTransport {
        position: Cell<f64>,
        paused: Cell<bool>,
    }

    impl FakeTransport {
        fn at(position: f64) -> Self {
            Self {
                position: Cell::new(position),
                paused: Cell::new(false),
            }
        }
    }

    impl Clock for FakeTransport {
        fn elapsed_seconds(&self) -> f64 {
            self.position.get()
        }
    }

    impl Transport for FakeTransport {
        fn is_finished(&self) -> bool {
            false
        }

        fn is_paused(&self) -> bool {
            self.paused.get()
        }

        fn toggle_pause(&self) {
            self.paused.set(!self.paused.get());
        }

        fn volume_percent(&self) -> u32 {
            100
        }
    }

    fn session() -> KaraokeSession {
        let timeline = Timeline::new(vec![
            LyricLine::new(0.0, "first"),
            LyricLine::new(5.0, "second"),
        ])
        .unwrap();
        KaraokeSession::new(
            "Title",
            "Artist",
            timeline,
            120.0,
            SessionOptions::from_config(&PlaybackConfig::default()),
        )
    }

    #[test]
    fn options_come_from_playback_config() {
        let options = SessionOptions::from_config(&PlaybackConfig::default());
        assert_eq!(options.poll_interval, Duration::from_millis(100));
        assert_eq!(options.refresh_interval, Duration::from_millis(500));
        assert_eq!(options.preview_window_secs, 10.0);
    }

    #[test]
    fn fallback_duration_is_last_timestamp_plus_tail() {
        let timeline = Timeline::new(vec![LyricLine::new(200.0, "end")]).unwrap();
        assert_eq!(KaraokeSession::fallback_duration(&timeline), 210.0);
        assert_eq!(KaraokeSession::fallback_duration(&Timeline::default()), 0.0);
    }

    #[test]
    fn frame_data_reflects_transport_state() {
        let session = session();
        let transport = FakeTransport::at(6.0);
        transport.toggle_pause();

        let data = session.frame_data(&transport, transport.elapsed_seconds());
        assert!(data.paused);
        assert_eq!(data.t, 6.0);
        assert_eq!(data.timeline.active_index(data.t), Some(1));
    }
}
