//! LRCLIB search response model.

use serde::Deserialize;

/// One entry from `GET /api/search`.
#[derive(Debug, Clone, Deserialize)]
pub struct SearchResult {
    #[serde(rename = "trackName")]
    pub track_name: String,

    #[serde(rename = "artistName")]
    pub artist_name: String,

    #[serde(rename = "albumName", default)]
    pub album_name: Option<String>,

    /// Track length in seconds.
    #[serde(default)]
    pub duration: f64,

    #[serde(default)]
    pub instrumental: bool,

    /// LRC text with timestamps, absent when only plain lyrics exist.
    #[serde(rename = "syncedLyrics", default)]
    pub synced_lyrics: Option<String>,

    #[serde(rename = "plainLyrics", default)]
    pub plain_lyrics: Option<String>,
}
