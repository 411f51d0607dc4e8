//! Pairing of audio files with lyric files.
//!
//! Matching policy, in order:
//! 1. exact stem match (`Song.mp3` -> `Song.lrc`)
//! 2. stem plus a known suffix (`Song_synced.lrc`, `Song_adjusted.lrc`, ...)
//! 3. best fuzzy match over normalized stems, above a score threshold
//!
//! Each stage is tried against the lyrics directory index; the first hit
//! wins, so a hand-placed exact file always beats a fuzzy guess.

use std::path::{Path, PathBuf};
use std::sync::LazyLock;

use fuzzy_matcher::skim::SkimMatcherV2;
use fuzzy_matcher::FuzzyMatcher;
use regex::Regex;

/// Suffixes historically appended to adjusted/downloaded lyric files.
const KNOWN_SUFFIXES: &[&str] = &["_synced", "_early", "_adjusted", "_complete"];

/// Minimum fuzzy score to accept a stage-3 match.
const MIN_FUZZY_SCORE: i64 = 50;

/// Index of `.lrc` files in the lyrics directory, keyed by file stem.
#[derive(Debug, Clone, Default)]
pub struct LyricsIndex {
    entries: Vec<IndexEntry>,
}

#[derive(Debug, Clone)]
struct IndexEntry {
    stem: String,
    normalized: String,
    path: PathBuf,
}

impl LyricsIndex {
    /// Index every `.lrc` file directly inside `dir`. A missing directory
    /// yields an empty index: no lyrics is a degraded mode, not an error.
    pub fn scan(dir: &Path) -> Self {
        let mut entries = Vec::new();

        let read_dir = match std::fs::read_dir(dir) {
            Ok(rd) => rd,
            Err(err) => {
                tracing::debug!("lyrics directory {} not readable: {err}", dir.display());
                return Self { entries };
            }
        };

        for dir_entry in read_dir.filter_map(Result::ok) {
            let path = dir_entry.path();
            let is_lrc = path
                .extension()
                .is_some_and(|ext| ext.eq_ignore_ascii_case("lrc"));
            if !is_lrc {
                continue;
            }
            let Some(stem) = path.file_stem().and_then(|s| s.to_str()) else {
                continue;
            };
            entries.push(IndexEntry {
                stem: stem.to_string(),
                normalized: normalize_stem(stem),
                path,
            });
        }

        Self { entries }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Find the lyrics file for an audio file stem, per the module policy.
    pub fn best_match(&self, audio_stem: &str) -> Option<&Path> {
        if let Some(entry) = self.exact_match(audio_stem) {
            return Some(&entry.path);
        }
        if let Some(entry) = self.suffix_match(audio_stem) {
            return Some(&entry.path);
        }
        self.fuzzy_match(audio_stem).map(|e| e.path.as_path())
    }

    fn exact_match(&self, audio_stem: &str) -> Option<&IndexEntry> {
        self.entries.iter().find(|e| e.stem == audio_stem)
    }

    fn suffix_match(&self, audio_stem: &str) -> Option<&IndexEntry> {
        KNOWN_SUFFIXES.iter().find_map(|suffix| {
            let candidate = format!("{audio_stem}{suffix}");
            self.entries.iter().find(|e| e.stem == candidate)
        })
    }

    fn fuzzy_match(&self, audio_stem: &str) -> Option<&IndexEntry> {
        let matcher = SkimMatcherV2::default();
        let needle = normalize_stem(audio_stem);
        if needle.is_empty() {
            return None;
        }

        self.entries
            .iter()
            .filter_map(|entry| {
                let score = matcher
                    .fuzzy_match(&entry.normalized, &needle)
                    .max(matcher.fuzzy_match(&needle, &entry.normalized))?;
                (score >= MIN_FUZZY_SCORE).then_some((score, entry))
            })
            .max_by_key(|(score, _)| *score)
            .map(|(_, entry)| entry)
    }
}

/// Lowercase a stem and strip decorations that differ between an uploaded
/// video title and a lyrics filename (bracketed qualifiers, punctuation).
pub fn normalize_stem(stem: &str) -> String {
    static RE_BRACKETS: LazyLock<Regex> =
        LazyLock::new(|| Regex::new(r"[\(\[][^\)\]]*[\)\]]").unwrap());
    static RE_PUNCTUATION: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"[,;:'!?._-]").unwrap());
    static RE_SPACES: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\s+").unwrap());

    let s = RE_BRACKETS.replace_all(stem, " ");
    let s = RE_PUNCTUATION.replace_all(&s, " ");
    let s = RE_SPACES.replace_all(&s, " ");
    s.trim().to_lowercase()
}

/// Split an `Artist - Title` stem. Without the separator the whole stem is
/// the title and the artist is unknown.
pub fn split_artist_title(stem: &str) -> (Option<String>, String) {
    match stem.split_once(" - ") {
        Some((artist, title)) => (Some(artist.trim().to_string()), title.trim().to_string()),
        None => (None, stem.trim().to_string()),
    }
}
