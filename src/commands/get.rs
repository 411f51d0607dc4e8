//! `kara get` - download audio from a video URL.

use std::fs;

use anyhow::{Context, Result};

use kara::config::Config;
use kara::downloader::{self, DownloadRequest};
use kara::files::sanitize_stem;
use kara::ui::Theme;

use crate::cli::GetArgs;

pub fn run(config: &Config, args: &GetArgs) -> Result<()> {
    let theme = Theme::default();

    let tool = downloader::detect_tool()?;

    let dest_dir = args.dir.clone().unwrap_or_else(|| config.songs_dir());
    fs::create_dir_all(&dest_dir)
        .with_context(|| format!("Failed to create {}", dest_dir.display()))?;

    let request = DownloadRequest {
        url: args.url.clone(),
        dest_dir: dest_dir.clone(),
        file_stem: args.name.as_deref().map(sanitize_stem),
        quality: config.download.audio_quality.clone(),
    };

    println!(
        "{}",
        theme.primary_text(&format!("Downloading audio with {}...", tool.name()))
    );
    println!("  URL:    {}", args.url);
    println!("  Folder: {}", dest_dir.display());
    println!();

    tool.download(&request)?;

    println!();
    println!("{}", theme.success_text("Download complete!"));
    println!(
        "{}",
        theme.secondary_text("Fetch lyrics next: kara fetch <artist> <track>")
    );

    Ok(())
}
