//! Configuration management.
//!
//! Configuration lives in `config.toml` under the platform config
//! directory. Every field has a default, so a missing file or a partially
//! filled one both work. Paths may use `~`, expanded at access time.

use std::fs;
use std::path::PathBuf;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

/// Top-level configuration.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub library: LibraryConfig,
    pub playback: PlaybackConfig,
    pub download: DownloadConfig,
}

/// Where songs and lyrics live.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LibraryConfig {
    /// Folder scanned for audio files.
    pub songs_dir: String,
    /// Folder scanned for `.lrc` files; the songs folder when unset.
    pub lyrics_dir: Option<String>,
}

impl Default for LibraryConfig {
    fn default() -> Self {
        Self {
            songs_dir: "~/Music/kara".to_string(),
            lyrics_dir: None,
        }
    }
}

/// Playback loop tuning.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PlaybackConfig {
    /// How often the loop polls the audio position.
    pub poll_interval_ms: u64,
    /// Screen refresh cadence between lyric changes.
    pub refresh_interval_ms: u64,
    /// Show the next-line preview when it is at most this many seconds away.
    pub preview_window_secs: f64,
    /// Countdown before playback starts.
    pub lead_in_secs: u64,
}

impl Default for PlaybackConfig {
    fn default() -> Self {
        Self {
            poll_interval_ms: 100,
            refresh_interval_ms: 500,
            preview_window_secs: 10.0,
            lead_in_secs: 3,
        }
    }
}

/// Audio download settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DownloadConfig {
    /// Quality passed to the audio extractor.
    pub audio_quality: String,
}

impl Default for DownloadConfig {
    fn default() -> Self {
        Self {
            audio_quality: "192K".to_string(),
        }
    }
}

impl Config {
    /// Path to the config file: `<config dir>/kara/config.toml`.
    pub fn config_path() -> Result<PathBuf> {
        let dir = dirs::config_dir().context("Could not determine config directory")?;
        Ok(dir.join("kara").join("config.toml"))
    }

    /// Load the config file, falling back to defaults when it is missing.
    pub fn load() -> Result<Self> {
        let path = Self::config_path()?;
        if !path.exists() {
            return Ok(Self::default());
        }

        let content = fs::read_to_string(&path)
            .with_context(|| format!("Failed to read config: {}", path.display()))?;
        let config = toml::from_str(&content)
            .with_context(|| format!("Failed to parse config: {}", path.display()))?;

        Ok(config)
    }

    /// Write the config file, creating the directory if needed.
    pub fn save(&self) -> Result<()> {
        let path = Self::config_path()?;
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create {}", parent.display()))?;
        }

        let content = toml::to_string_pretty(self)?;
        fs::write(&path, content)
            .with_context(|| format!("Failed to write config: {}", path.display()))?;

        Ok(())
    }

    /// Songs folder with `~` expanded.
    pub fn songs_dir(&self) -> PathBuf {
        expand(&self.library.songs_dir)
    }

    /// Lyrics folder with `~` expanded; the songs folder when unset.
    pub fn lyrics_dir(&self) -> PathBuf {
        match &self.library.lyrics_dir {
            Some(dir) => expand(dir),
            None => self.songs_dir(),
        }
    }
}

fn expand(path: &str) -> PathBuf {
    PathBuf::from(shellexpand::tilde(path).into_owned())
}
