//! Command-line interface definition.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

#[derive(Debug, Parser)]
#[command(
    name = "kara",
    version,
    about = "Terminal karaoke player",
    long_about = "Play audio with time-synced LRC lyrics in the terminal.\n\
                  Run without a subcommand to pick a song from your library."
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Command>,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Play one audio file with synced lyrics
    Play(PlayArgs),

    /// Download synced lyrics from LRCLIB
    Fetch(FetchArgs),

    /// Download audio from a video URL (via yt-dlp)
    Get(GetArgs),

    /// Shift every timestamp in an LRC file by a constant offset
    Shift(ShiftArgs),

    /// List the songs in the library
    List,

    /// Manage configuration
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },
}

#[derive(Debug, Args)]
pub struct PlayArgs {
    /// Audio file to play
    pub audio: PathBuf,

    /// Lyrics file (found next to the audio file when omitted)
    #[arg(long)]
    pub lyrics: Option<PathBuf>,

    /// Play audio only, without lyrics
    #[arg(long, conflicts_with = "lyrics")]
    pub no_lyrics: bool,

    /// Shift lyric timing by this many seconds (positive = later)
    #[arg(long, allow_negative_numbers = true, default_value_t = 0.0)]
    pub offset: f64,

    /// Override the displayed song title
    #[arg(long)]
    pub title: Option<String>,

    /// Override the displayed artist
    #[arg(long)]
    pub artist: Option<String>,
}

#[derive(Debug, Args)]
pub struct FetchArgs {
    /// Artist name
    pub artist: String,

    /// Track title
    pub track: String,

    /// Output file (defaults to "<artist> - <track>.lrc" in the lyrics folder)
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Track length in seconds, to pick between versions
    #[arg(long)]
    pub duration: Option<f64>,
}

#[derive(Debug, Args)]
pub struct GetArgs {
    /// Video page URL
    pub url: String,

    /// Destination folder (defaults to the songs folder)
    #[arg(long)]
    pub dir: Option<PathBuf>,

    /// Output filename, without extension (defaults to the video title)
    #[arg(short, long)]
    pub name: Option<String>,
}

#[derive(Debug, Args)]
pub struct ShiftArgs {
    /// Input LRC file
    pub input: PathBuf,

    /// Offset in seconds (positive = lyrics appear later)
    #[arg(allow_negative_numbers = true)]
    pub offset: f64,

    /// Output file (defaults to "<input stem>_adjusted.lrc")
    #[arg(short, long)]
    pub output: Option<PathBuf>,
}

#[derive(Debug, Subcommand)]
pub enum ConfigAction {
    /// Print the current configuration as TOML
    Show,
    /// Print the config file path
    Path,
    /// Open the config file in $EDITOR
    Edit,
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn cli_definition_is_consistent() {
        Cli::command().debug_assert();
    }

    #[test]
    fn shift_accepts_negative_offset() {
        let cli = Cli::parse_from(["kara", "shift", "song.lrc", "-1.5"]);
        match cli.command {
            Some(Command::Shift(args)) => assert_eq!(args.offset, -1.5),
            other => panic!("unexpected command: {:?}", other),
        }
    }

    #[test]
    fn play_offset_defaults_to_zero() {
        let cli = Cli::parse_from(["kara", "play", "song.mp3"]);
        match cli.command {
            Some(Command::Play(args)) => {
                assert_eq!(args.offset, 0.0);
                assert!(!args.no_lyrics);
            }
            other => panic!("unexpected command: {:?}", other),
        }
    }
}
