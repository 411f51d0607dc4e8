//! Blocking HTTP client for the LRCLIB search endpoint.

use std::time::Duration;

use reqwest::blocking::Client;
use reqwest::header::USER_AGENT;
use reqwest::StatusCode;

use super::models::SearchResult;

pub const API_ROOT: &str = "https://lrclib.net/api/";

/// Identify the crate per LRCLIB's API guidelines.
const APP_USER_AGENT: &str = concat!("kara/", env!("CARGO_PKG_VERSION"));

const REQUEST_TIMEOUT: Duration = Duration::from_secs(15);

#[derive(Debug, thiserror::Error)]
pub enum FetchError {
    #[error("lyrics request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("lyrics API returned status {0}")]
    Status(StatusCode),

    #[error("no lyrics found for '{artist} - {track}'")]
    NoMatch { artist: String, track: String },

    #[error("found lyrics for '{artist} - {track}' but no synchronized timestamps{}",
            if *has_plain { " (plain lyrics exist)" } else { "" })]
    NoSyncedLyrics {
        artist: String,
        track: String,
        has_plain: bool,
    },
}

pub struct LrclibClient {
    client: Client,
}

impl LrclibClient {
    pub fn new() -> Result<Self, FetchError> {
        let client = Client::builder().timeout(REQUEST_TIMEOUT).build()?;
        Ok(Self { client })
    }

    /// Search LRCLIB by artist and track name.
    pub fn search(&self, artist: &str, track: &str) -> Result<Vec<SearchResult>, FetchError> {
        tracing::debug!("searching lrclib for '{artist}' / '{track}'");

        let response = self
            .client
            .get(format!("{API_ROOT}search"))
            .query(&[("artist_name", artist), ("track_name", track)])
            .header(USER_AGENT, APP_USER_AGENT)
            .send()?;

        if response.status() != StatusCode::OK {
            return Err(FetchError::Status(response.status()));
        }

        Ok(response.json()?)
    }

    /// Search and select the synced lyrics to save, in one step.
    ///
    /// `known_duration` (seconds) narrows the pick when several versions of
    /// the track exist.
    pub fn fetch_synced(
        &self,
        artist: &str,
        track: &str,
        known_duration: Option<f64>,
    ) -> Result<SearchResult, FetchError> {
        let results = self.search(artist, track)?;

        if results.is_empty() {
            return Err(FetchError::NoMatch {
                artist: artist.to_string(),
                track: track.to_string(),
            });
        }

        match super::best_synced(&results, known_duration) {
            Some(result) => Ok(result.clone()),
            None => Err(FetchError::NoSyncedLyrics {
                artist: artist.to_string(),
                track: track.to_string(),
                has_plain: results.iter().any(|r| r.plain_lyrics.is_some()),
            }),
        }
    }
}
