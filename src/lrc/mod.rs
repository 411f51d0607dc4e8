//! LRC lyric file parser and writer.
//!
//! Reference: the de-facto LRC format as produced by LRCLIB — one leading
//! `[MM:SS.cc]` tag per line, optional ID tags like `[ar:...]` at the top.
//!
//! The document keeps every input line: timed lyric entries are parsed,
//! everything else (ID tags, comments, blanks, lines with unparseable tags)
//! passes through verbatim. That lets the timing-shift command rewrite a
//! file without destroying its metadata.

use std::fs;
use std::io::{BufRead, BufReader, Write};
use std::path::Path;

use anyhow::{Context, Result};

use crate::timeline::{LyricLine, Timeline};

/// One line of an LRC file.
#[derive(Debug, Clone, PartialEq)]
pub enum Entry {
    /// A line carrying a leading timestamp tag.
    Timed {
        /// Seconds from track start.
        time: f64,
        /// Lyric text after the tag; may be empty for instrumental gaps.
        text: String,
    },
    /// Any other line, preserved verbatim.
    Raw(String),
}

/// A parsed LRC file.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct LrcDocument {
    entries: Vec<Entry>,
}

impl LrcDocument {
    /// Parse an LRC file from a path.
    pub fn parse<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let file = fs::File::open(path)
            .with_context(|| format!("Failed to open lyrics file: {}", path.display()))?;

        Self::parse_reader(BufReader::new(file))
    }

    /// Parse an LRC file from a reader.
    pub fn parse_reader<R: BufRead>(reader: R) -> Result<Self> {
        let mut entries = Vec::new();
        for (line_num, line_result) in reader.lines().enumerate() {
            let line =
                line_result.with_context(|| format!("Failed to read line {}", line_num + 1))?;
            entries.push(parse_line(&line));
        }

        Ok(Self { entries })
    }

    /// Parse from a string.
    pub fn parse_str(content: &str) -> Self {
        let entries = content.lines().map(parse_line).collect();
        Self { entries }
    }

    pub fn entries(&self) -> &[Entry] {
        &self.entries
    }

    /// Number of timed lyric entries.
    pub fn timed_len(&self) -> usize {
        self.entries
            .iter()
            .filter(|e| matches!(e, Entry::Timed { .. }))
            .count()
    }

    /// A copy with every timed entry moved by `offset` seconds, clamped at
    /// zero. Raw lines are untouched.
    pub fn shifted(&self, offset: f64) -> LrcDocument {
        let entries = self
            .entries
            .iter()
            .map(|entry| match entry {
                Entry::Timed { time, text } => Entry::Timed {
                    time: (time + offset).max(0.0),
                    text: text.clone(),
                },
                Entry::Raw(line) => Entry::Raw(line.clone()),
            })
            .collect();

        LrcDocument { entries }
    }

    /// Build the playback timeline: timed entries, stable-sorted by time.
    pub fn timeline(&self) -> Timeline {
        Timeline::from_lines(self.entries.iter().filter_map(|entry| match entry {
            Entry::Timed { time, text } => Some(LyricLine::new(*time, text.clone())),
            Entry::Raw(_) => None,
        }))
    }

    /// Write the document to a path.
    pub fn write<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let path = path.as_ref();
        let mut file = fs::File::create(path)
            .with_context(|| format!("Failed to create file: {}", path.display()))?;

        self.write_to(&mut file)
    }

    /// Write the document to a writer.
    pub fn write_to<W: Write>(&self, writer: &mut W) -> Result<()> {
        for entry in &self.entries {
            match entry {
                Entry::Timed { time, text } => {
                    writeln!(writer, "[{}]{}", format_timestamp(*time), text)?;
                }
                Entry::Raw(line) => writeln!(writer, "{}", line)?,
            }
        }

        Ok(())
    }

    /// Render to a string.
    pub fn render(&self) -> String {
        let mut buffer = Vec::new();
        self.write_to(&mut buffer)
            .expect("writing to a Vec cannot fail");
        String::from_utf8(buffer).expect("rendered LRC is valid UTF-8")
    }
}

/// Classify one input line.
fn parse_line(line: &str) -> Entry {
    let trimmed = line.trim_end_matches(['\r', '\n']);

    let Some(rest) = trimmed.strip_prefix('[') else {
        return Entry::Raw(trimmed.to_string());
    };
    let Some(close) = rest.find(']') else {
        return Entry::Raw(trimmed.to_string());
    };

    match parse_timestamp(&rest[..close]) {
        Some(time) => Entry::Timed {
            time,
            text: rest[close + 1..].trim().to_string(),
        },
        // ID tags ([ar:...], [ti:...]) and malformed tags pass through.
        None => Entry::Raw(trimmed.to_string()),
    }
}

/// Parse a timestamp tag body: `MM:SS`, `MM:SS.cc`, or `MM:SS.mmm`.
pub fn parse_timestamp(tag: &str) -> Option<f64> {
    let (minutes, rest) = tag.split_once(':')?;
    let minutes: u32 = minutes.trim().parse().ok()?;

    let (seconds, fraction) = match rest.split_once('.') {
        Some((s, f)) => (s, Some(f)),
        None => (rest, None),
    };
    let seconds: u32 = seconds.trim().parse().ok()?;

    let fraction = match fraction {
        None => 0.0,
        Some(digits) => {
            if digits.is_empty() || digits.len() > 3 || !digits.bytes().all(|b| b.is_ascii_digit())
            {
                return None;
            }
            let value: u32 = digits.parse().ok()?;
            f64::from(value) / 10f64.powi(digits.len() as i32)
        }
    };

    Some(f64::from(minutes) * 60.0 + f64::from(seconds) + fraction)
}

/// Format seconds as an LRC timestamp, `MM:SS.cc`.
///
/// Negative inputs clamp to zero.
pub fn format_timestamp(seconds: f64) -> String {
    let total_cs = (seconds.max(0.0) * 100.0).round() as u64;
    let minutes = total_cs / 6000;
    let secs = (total_cs % 6000) / 100;
    let centis = total_cs % 100;

    format!("{:02}:{:02}.{:02}", minutes, secs, centis)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_lrc() -> &'static str {
        "[ar:Coldplay]\n\
         [ti:Yellow]\n\
         \n\
         [00:17.08]Look at the stars\n\
         [00:21.30]Look how they shine for you\n\
         [00:27.09]And everything you do\n\
         [00:31.70]\n\
         [00:33.52]Yeah, they were all yellow"
    }

    #[test]
    fn parse_extracts_timed_entries() {
        let doc = LrcDocument::parse_str(sample_lrc());
        assert_eq!(doc.timed_len(), 5);
        assert_eq!(doc.entries().len(), 8);
    }

    #[test]
    fn parse_preserves_id_tags_as_raw() {
        let doc = LrcDocument::parse_str(sample_lrc());
        assert_eq!(doc.entries()[0], Entry::Raw("[ar:Coldplay]".to_string()));
        assert_eq!(doc.entries()[2], Entry::Raw(String::new()));
    }

    #[test]
    fn parse_keeps_empty_timed_lines() {
        let doc = LrcDocument::parse_str(sample_lrc());
        match &doc.entries()[6] {
            Entry::Timed { time, text } => {
                assert!((time - 31.7).abs() < 1e-9);
                assert!(text.is_empty());
            }
            other => panic!("expected timed entry, got {:?}", other),
        }
    }

    #[test]
    fn parse_line_without_brackets_is_raw() {
        let doc = LrcDocument::parse_str("just some text");
        assert_eq!(doc.entries()[0], Entry::Raw("just some text".to_string()));
    }

    #[test]
    fn parse_unclosed_tag_is_raw() {
        let doc = LrcDocument::parse_str("[00:17.08 Look at the stars");
        assert_eq!(doc.timed_len(), 0);
    }

    #[test]
    fn timestamp_forms() {
        assert_eq!(parse_timestamp("00:05"), Some(5.0));
        assert_eq!(parse_timestamp("01:05.5"), Some(65.5));
        assert_eq!(parse_timestamp("02:03.250"), Some(123.25));
        assert!((parse_timestamp("00:17.08").unwrap() - 17.08).abs() < 1e-9);
    }

    #[test]
    fn timestamp_rejects_garbage() {
        assert_eq!(parse_timestamp("ar:Coldplay"), None);
        assert_eq!(parse_timestamp("0017"), None);
        assert_eq!(parse_timestamp("00:1a"), None);
        assert_eq!(parse_timestamp("00:05."), None);
        assert_eq!(parse_timestamp("00:05.1234"), None);
        assert_eq!(parse_timestamp("-1:05"), None);
    }

    #[test]
    fn format_timestamp_pads_fields() {
        assert_eq!(format_timestamp(0.0), "00:00.00");
        assert_eq!(format_timestamp(65.5), "01:05.50");
        assert_eq!(format_timestamp(17.08), "00:17.08");
    }

    #[test]
    fn format_timestamp_clamps_negative() {
        assert_eq!(format_timestamp(-2.0), "00:00.00");
    }

    #[test]
    fn format_timestamp_carries_rounded_centiseconds() {
        assert_eq!(format_timestamp(59.999), "01:00.00");
    }

    #[test]
    fn roundtrip_preserves_document() {
        let doc = LrcDocument::parse_str(sample_lrc());
        let reparsed = LrcDocument::parse_str(&doc.render());
        assert_eq!(doc, reparsed);
    }

    #[test]
    fn shifted_moves_only_timed_entries() {
        let doc = LrcDocument::parse_str(sample_lrc()).shifted(2.0);
        assert_eq!(doc.entries()[0], Entry::Raw("[ar:Coldplay]".to_string()));
        match &doc.entries()[3] {
            Entry::Timed { time, text } => {
                assert!((time - 19.08).abs() < 1e-9);
                assert_eq!(text, "Look at the stars");
            }
            other => panic!("expected timed entry, got {:?}", other),
        }
    }

    #[test]
    fn shifted_clamps_at_zero() {
        let doc = LrcDocument::parse_str("[00:01.00]x").shifted(-3.0);
        assert_eq!(
            doc.entries()[0],
            Entry::Timed {
                time: 0.0,
                text: "x".to_string()
            }
        );
        assert_eq!(doc.render(), "[00:00.00]x\n");
    }

    #[test]
    fn shift_round_trips_without_clamping() {
        let doc = LrcDocument::parse_str(sample_lrc());
        let back = doc.shifted(1.5).shifted(-1.5);
        // Rendered text is identical because no entry hit the zero clamp.
        assert_eq!(doc.render(), back.render());
    }

    #[test]
    fn timeline_sorts_out_of_order_entries() {
        let doc = LrcDocument::parse_str("[00:10.00]second\n[00:05.00]first");
        let timeline = doc.timeline();
        assert_eq!(timeline.get(0).unwrap().text, "first");
        assert_eq!(timeline.get(1).unwrap().text, "second");
    }

    #[test]
    fn timeline_skips_raw_lines() {
        let doc = LrcDocument::parse_str(sample_lrc());
        assert_eq!(doc.timeline().len(), 5);
    }
}
