//! Synced lyrics fetching from the LRCLIB public API.

mod client;
mod models;

pub use client::{FetchError, LrclibClient, API_ROOT};
pub use models::SearchResult;

/// Pick the search result to save: synced lyrics only, and when the track
/// duration is known, the synced result whose duration is closest to it.
pub fn best_synced(
    results: &[SearchResult],
    known_duration: Option<f64>,
) -> Option<&SearchResult> {
    let mut synced = results.iter().filter(|r| r.synced_lyrics.is_some());

    match known_duration {
        None => synced.next(),
        Some(duration) => synced.min_by(|a, b| {
            let da = (a.duration - duration).abs();
            let db = (b.duration - duration).abs();
            da.partial_cmp(&db).unwrap_or(std::cmp::Ordering::Equal)
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn result(track: &str, duration: f64, synced: bool) -> SearchResult {
        SearchResult {
            track_name: track.to_string(),
            artist_name: "Artist".to_string(),
            album_name: None,
            duration,
            instrumental: false,
            synced_lyrics: synced.then(|| "[00:01.00]line".to_string()),
            plain_lyrics: Some("line".to_string()),
        }
    }

    #[test]
    fn best_synced_skips_plain_only_results() {
        let results = vec![result("plain", 200.0, false), result("synced", 210.0, true)];
        assert_eq!(best_synced(&results, None).unwrap().track_name, "synced");
    }

    #[test]
    fn best_synced_prefers_closest_duration() {
        let results = vec![
            result("radio edit", 180.0, true),
            result("album", 225.0, true),
            result("extended", 320.0, true),
        ];
        let best = best_synced(&results, Some(228.0)).unwrap();
        assert_eq!(best.track_name, "album");
    }

    #[test]
    fn best_synced_without_duration_takes_first_synced() {
        let results = vec![result("first", 100.0, true), result("second", 100.0, true)];
        assert_eq!(best_synced(&results, None).unwrap().track_name, "first");
    }

    #[test]
    fn best_synced_empty_results() {
        assert!(best_synced(&[], None).is_none());
        assert!(best_synced(&[result("plain", 1.0, false)], Some(1.0)).is_none());
    }
}
