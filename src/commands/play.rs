//! `kara play` and the interactive song picker.

use std::io::{self, BufRead, Write};
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, OnceLock};
use std::thread;
use std::time::Duration;

use anyhow::{bail, Context, Result};

use kara::audio::AudioPlayer;
use kara::config::Config;
use kara::library::{split_artist_title, LyricsIndex, Song, UNKNOWN_ARTIST};
use kara::lrc::LrcDocument;
use kara::player::{KaraokeSession, SessionOptions, SessionOutcome};
use kara::timeline::Timeline;
use kara::ui::Theme;

use crate::cli::PlayArgs;

use super::list;

/// Process-wide stop flag, flipped by Ctrl-C.
///
/// The handler can only be installed once, so the flag is shared across
/// every song played in one interactive session and reset before each run.
fn stop_flag() -> &'static Arc<AtomicBool> {
    static FLAG: OnceLock<Arc<AtomicBool>> = OnceLock::new();
    FLAG.get_or_init(|| {
        let flag = Arc::new(AtomicBool::new(false));
        let handler_flag = Arc::clone(&flag);
        if let Err(err) = ctrlc::set_handler(move || handler_flag.store(true, Ordering::Relaxed)) {
            tracing::warn!("could not install Ctrl-C handler: {err}");
        }
        flag
    })
}

/// `kara play <file>`: play one audio file directly.
pub fn direct(config: &Config, args: &PlayArgs) -> Result<()> {
    let stem = args
        .audio
        .file_stem()
        .and_then(|s| s.to_str())
        .unwrap_or("Unknown Song");
    let (stem_artist, stem_title) = split_artist_title(stem);

    let title = args.title.clone().unwrap_or(stem_title);
    let artist = args
        .artist
        .clone()
        .or(stem_artist)
        .unwrap_or_else(|| UNKNOWN_ARTIST.to_string());

    let lyrics_path = if args.no_lyrics {
        None
    } else {
        match &args.lyrics {
            Some(path) => {
                if !path.is_file() {
                    bail!("lyrics file not found: {}", path.display());
                }
                Some(path.clone())
            }
            None => find_lyrics_for(config, &args.audio, stem),
        }
    };

    play_song(config, &args.audio, lyrics_path.as_deref(), args.offset, &title, &artist)
}

/// `kara` with no subcommand: pick songs from the library until quit.
pub fn interactive(config: &Config) -> Result<()> {
    let theme = Theme::default();

    println!("{}", theme.header_text(&"=".repeat(70)));
    println!("{}", theme.header_text("  KARA - terminal karaoke"));
    println!("{}", theme.header_text(&"=".repeat(70)));
    println!();

    let library = list::scan_library(config, &theme)?;
    if library.is_empty() {
        list::print_empty_hint(config, &theme);
        return Ok(());
    }

    loop {
        list::print_song_list(&theme, &library);
        println!();

        let choice = prompt(
            &theme,
            "Enter song number to play (or 'q' to quit): ",
        )?;
        if stop_flag().load(Ordering::Relaxed) {
            break;
        }
        if choice.eq_ignore_ascii_case("q") {
            break;
        }

        let Ok(number) = choice.parse::<usize>() else {
            println!("{}", theme.error_text("Invalid input, enter a number."));
            continue;
        };
        let Some(song) = library.get_numbered(number) else {
            println!(
                "{}",
                theme.error_text(&format!(
                    "Invalid choice, enter a number from 1 to {}",
                    library.len()
                ))
            );
            continue;
        };

        if !confirm_song(&theme, song)? {
            continue;
        }

        if let Err(err) = play_library_song(config, song) {
            println!("{}", theme.error_text(&format!("Playback failed: {err:#}")));
        }
        if stop_flag().load(Ordering::Relaxed) {
            break;
        }

        let again = prompt(&theme, "Play another song? (y/n): ")?;
        if !again.eq_ignore_ascii_case("y") {
            break;
        }
    }

    println!("{}", theme.primary_text("Thanks for singing!"));
    Ok(())
}

/// Warn about missing lyrics; true means go ahead.
fn confirm_song(theme: &Theme, song: &Song) -> Result<bool> {
    if song.has_lyrics() {
        return Ok(true);
    }

    println!(
        "{}",
        theme.accent_text("This song has no lyrics file; audio will play without lyrics.")
    );
    println!(
        "{}",
        theme.secondary_text(&format!(
            "Get lyrics with: kara fetch \"{}\" \"{}\"",
            song.artist, song.title
        ))
    );
    let answer = prompt(theme, "Play anyway? (y/n): ")?;
    Ok(answer.eq_ignore_ascii_case("y"))
}

fn play_library_song(config: &Config, song: &Song) -> Result<()> {
    play_song(
        config,
        &song.audio_path,
        song.lyrics_path.as_deref(),
        0.0,
        &song.title,
        &song.artist,
    )
}

/// Look for a lyrics file in the configured lyrics folder, then next to
/// the audio file.
fn find_lyrics_for(config: &Config, audio: &Path, stem: &str) -> Option<PathBuf> {
    let configured = LyricsIndex::scan(&config.lyrics_dir());
    if let Some(path) = configured.best_match(stem) {
        return Some(path.to_path_buf());
    }

    let sibling = LyricsIndex::scan(audio.parent()?);
    sibling.best_match(stem).map(Path::to_path_buf)
}

/// Load lyrics, start the audio, and run the karaoke loop.
fn play_song(
    config: &Config,
    audio: &Path,
    lyrics: Option<&Path>,
    offset: f64,
    title: &str,
    artist: &str,
) -> Result<()> {
    let theme = Theme::default();

    let timeline = match lyrics {
        Some(path) => {
            println!(
                "{}",
                theme.primary_text(&format!("Loading lyrics from: {}", path.display()))
            );
            let timeline = LrcDocument::parse(path)?.timeline();
            if timeline.is_empty() {
                println!(
                    "{}",
                    theme.accent_text("No timestamped lines in the lyrics file; playing audio only.")
                );
            } else {
                println!(
                    "{}",
                    theme.success_text(&format!("Loaded {} lyric line(s)", timeline.len()))
                );
            }
            if offset != 0.0 {
                timeline.shifted(offset)
            } else {
                timeline
            }
        }
        None => {
            println!(
                "{}",
                theme.accent_text("No lyrics file available; playing audio only.")
            );
            Timeline::default()
        }
    };

    println!();
    println!(
        "{} {}",
        theme.header_text("Now starting:"),
        theme.bold_text(&format!("{title} - {artist}"))
    );

    let stop = stop_flag();
    stop.store(false, Ordering::Relaxed);

    countdown(&theme, config.playback.lead_in_secs, stop);
    if stop.load(Ordering::Relaxed) {
        println!("{}", theme.accent_text("Cancelled."));
        return Ok(());
    }

    let player = AudioPlayer::open(audio)
        .with_context(|| format!("Failed to play {}", audio.display()))?;

    let total_duration = player
        .total_duration()
        .unwrap_or_else(|| KaraokeSession::fallback_duration(&timeline));

    let session = KaraokeSession::new(
        title,
        artist,
        timeline,
        total_duration,
        SessionOptions::from_config(&config.playback),
    );

    let outcome = session.run(&player, stop)?;

    match outcome {
        SessionOutcome::Finished => {
            thread::sleep(Duration::from_secs(1));
            session.print_summary(&player)?;
        }
        SessionOutcome::Stopped => {
            player.stop();
            println!();
            println!("{}", theme.accent_text("Playback stopped."));
        }
    }

    Ok(())
}

fn countdown(theme: &Theme, seconds: u64, stop: &AtomicBool) {
    if seconds == 0 {
        return;
    }
    println!(
        "{}",
        theme.secondary_text(&format!("Starting in {seconds} second(s)..."))
    );
    for _ in 0..seconds {
        if stop.load(Ordering::Relaxed) {
            return;
        }
        thread::sleep(Duration::from_secs(1));
    }
}

fn prompt(theme: &Theme, message: &str) -> Result<String> {
    print!("{}", theme.accent_text(message));
    io::stdout().flush()?;

    let mut line = String::new();
    let bytes = io::stdin()
        .lock()
        .read_line(&mut line)
        .context("Failed to read input")?;
    if bytes == 0 {
        // stdin closed; treat as quit.
        println!();
        return Ok("q".to_string());
    }

    Ok(line.trim().to_string())
}
