//! `kara fetch` - download synced lyrics from LRCLIB.

use std::fs;
use std::path::PathBuf;

use anyhow::{Context, Result};

use kara::config::Config;
use kara::files::sanitize_stem;
use kara::lrc::LrcDocument;
use kara::lyrics::LrclibClient;
use kara::player::screen::format_duration;
use kara::ui::Theme;

use crate::cli::FetchArgs;

pub fn run(config: &Config, args: &FetchArgs) -> Result<()> {
    let theme = Theme::default();

    println!("{}", theme.primary_text("Searching for lyrics..."));
    println!("  Artist: {}", theme.bold_text(&args.artist));
    println!("  Track:  {}", theme.bold_text(&args.track));
    println!();

    let client = LrclibClient::new()?;
    let result = client.fetch_synced(&args.artist, &args.track, args.duration)?;
    let synced = result
        .synced_lyrics
        .as_deref()
        .context("search result unexpectedly lost its synced lyrics")?;

    let line_count = LrcDocument::parse_str(synced).timed_len();

    println!("{}", theme.success_text("Found synchronized lyrics!"));
    println!("  Track:    {}", result.track_name);
    println!("  Artist:   {}", result.artist_name);
    if let Some(album) = &result.album_name {
        println!("  Album:    {album}");
    }
    println!("  Duration: {}", format_duration(result.duration));
    println!("  Lines:    {line_count}");
    println!();

    let output = match &args.output {
        Some(path) => path.clone(),
        None => default_output(config, &result.artist_name, &result.track_name),
    };
    if let Some(parent) = output.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create {}", parent.display()))?;
        }
    }

    let mut content = synced.to_string();
    if !content.ends_with('\n') {
        content.push('\n');
    }
    fs::write(&output, content)
        .with_context(|| format!("Failed to write {}", output.display()))?;

    println!(
        "{}",
        theme.success_text(&format!("Lyrics saved to: {}", output.display()))
    );
    println!();

    println!("{}", theme.bold_text("Preview (first 5 lines):"));
    for line in synced.lines().filter(|l| !l.trim().is_empty()).take(5) {
        println!("  {line}");
    }

    Ok(())
}

/// `<lyrics dir>/<Artist - Track>.lrc`, sanitized for the filesystem.
fn default_output(config: &Config, artist: &str, track: &str) -> PathBuf {
    let stem = sanitize_stem(&format!("{artist} - {track}"));
    config.lyrics_dir().join(format!("{stem}.lrc"))
}
