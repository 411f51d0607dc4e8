//! Karaoke playback.
//!
//! - `session`: the polling loop tying the audio transport to the timeline
//! - `screen`: frame rendering, kept free of terminal I/O

pub mod screen;
pub mod session;

pub use session::{KaraokeSession, SessionOptions, SessionOutcome, Transport};
