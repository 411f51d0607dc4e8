//! Song library scanning.
//!
//! Walks the configured songs directory, pairs each audio file with a lyric
//! file from the lyrics directory, and derives artist/title from the
//! `Artist - Title` filename convention.

pub mod matcher;

use std::path::{Path, PathBuf};

use walkdir::WalkDir;

pub use matcher::{normalize_stem, split_artist_title, LyricsIndex};

/// Audio file extensions the player can decode.
const AUDIO_EXTENSIONS: &[&str] = &["mp3", "flac", "ogg", "wav", "m4a"];

/// Fallback artist when the filename carries no `Artist - ` prefix.
pub const UNKNOWN_ARTIST: &str = "Unknown Artist";

#[derive(Debug, thiserror::Error)]
pub enum LibraryError {
    #[error("songs folder does not exist or is not a directory: {}", path.display())]
    NotADirectory { path: PathBuf },
}

/// One playable entry: an audio file and, when found, its lyric file.
#[derive(Debug, Clone)]
pub struct Song {
    pub audio_path: PathBuf,
    pub lyrics_path: Option<PathBuf>,
    pub title: String,
    pub artist: String,
}

impl Song {
    pub fn has_lyrics(&self) -> bool {
        self.lyrics_path.is_some()
    }
}

/// The scanned song library, sorted by title.
#[derive(Debug, Clone, Default)]
pub struct Library {
    songs: Vec<Song>,
}

impl Library {
    /// Scan `songs_dir` recursively for audio files and pair each with a
    /// lyric file from `lyrics_dir`.
    pub fn scan(songs_dir: &Path, lyrics_dir: &Path) -> Result<Self, LibraryError> {
        if !songs_dir.is_dir() {
            return Err(LibraryError::NotADirectory {
                path: songs_dir.to_path_buf(),
            });
        }

        let lyrics = LyricsIndex::scan(lyrics_dir);
        tracing::debug!(
            "scanning {} with {} lyric file(s) in {}",
            songs_dir.display(),
            lyrics.len(),
            lyrics_dir.display()
        );

        let mut songs: Vec<Song> = WalkDir::new(songs_dir)
            .follow_links(true)
            .into_iter()
            .filter_map(Result::ok)
            .filter(|e| e.file_type().is_file())
            .filter(|e| is_audio_file(e.path()))
            .filter_map(|entry| {
                let stem = entry.path().file_stem()?.to_str()?;
                let (artist, title) = split_artist_title(stem);
                Some(Song {
                    audio_path: entry.path().to_path_buf(),
                    lyrics_path: lyrics.best_match(stem).map(Path::to_path_buf),
                    title,
                    artist: artist.unwrap_or_else(|| UNKNOWN_ARTIST.to_string()),
                })
            })
            .collect();

        songs.sort_by(|a, b| a.title.to_lowercase().cmp(&b.title.to_lowercase()));

        Ok(Self { songs })
    }

    pub fn songs(&self) -> &[Song] {
        &self.songs
    }

    pub fn len(&self) -> usize {
        self.songs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.songs.is_empty()
    }

    /// Look up a song by its 1-based menu number.
    pub fn get_numbered(&self, number: usize) -> Option<&Song> {
        number.checked_sub(1).and_then(|i| self.songs.get(i))
    }
}

fn is_audio_file(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| {
            AUDIO_EXTENSIONS
                .iter()
                .any(|known| ext.eq_ignore_ascii_case(known))
        })
}
