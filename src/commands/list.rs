//! `kara list` - show the scanned song library.

use anyhow::Result;

use kara::config::Config;
use kara::library::Library;
use kara::ui::Theme;

pub fn run(config: &Config) -> Result<()> {
    let theme = Theme::default();
    let library = scan_library(config, &theme)?;

    if library.is_empty() {
        print_empty_hint(config, &theme);
        return Ok(());
    }

    print_song_list(&theme, &library);
    Ok(())
}

/// Scan the configured folders, printing where we looked.
pub(crate) fn scan_library(config: &Config, theme: &Theme) -> Result<Library> {
    let songs_dir = config.songs_dir();
    let lyrics_dir = config.lyrics_dir();

    println!("{}", theme.primary_text("Scanning folders:"));
    println!("  Music:  {}", theme.bold_text(&songs_dir.display().to_string()));
    println!("  Lyrics: {}", theme.bold_text(&lyrics_dir.display().to_string()));
    println!();

    Ok(Library::scan(&songs_dir, &lyrics_dir)?)
}

pub(crate) fn print_empty_hint(config: &Config, theme: &Theme) {
    println!(
        "{}",
        theme.error_text(&format!(
            "No audio files found in {}",
            config.songs_dir().display()
        ))
    );
    println!(
        "{}",
        theme.secondary_text("Download one with: kara get <video url>")
    );
}

pub(crate) fn print_song_list(theme: &Theme, library: &Library) {
    println!("{}", theme.header_text(&"=".repeat(70)));
    println!("{}", theme.header_text("  AVAILABLE SONGS"));
    println!("{}", theme.header_text(&"=".repeat(70)));
    println!();

    for (idx, song) in library.songs().iter().enumerate() {
        let status = if song.has_lyrics() {
            theme.success_text("lyrics")
        } else {
            theme.error_text("no lyrics")
        };
        println!(
            "{} {}  [{}]",
            theme.bold_text(&format!("{:>3}.", idx + 1)),
            theme.accent_text(&song.title),
            status
        );
        println!("     {}", theme.secondary_text(&format!("by {}", song.artist)));
    }

    println!();
    let with_lyrics = library.songs().iter().filter(|s| s.has_lyrics()).count();
    println!(
        "{}",
        theme.primary_text(&format!(
            "{} song(s), {} with lyrics",
            library.len(),
            with_lyrics
        ))
    );
}
