//! Karaoke screen rendering.
//!
//! Builds each frame as a list of plain lines; the session decides how to
//! put them on the terminal. Keeping this free of terminal I/O makes the
//! layout testable.

use unicode_width::UnicodeWidthStr;

use crate::timeline::{progress_fraction, Timeline};
use crate::ui::{Theme, ANSI_RESET};

/// Columns used when the terminal width is unknown.
const DEFAULT_WIDTH: usize = 70;

/// Previous lyric lines kept on screen above the active one.
const HISTORY_LINES: usize = 3;

/// Everything the screen needs for one frame.
#[derive(Debug)]
pub struct FrameData<'a> {
    pub title: &'a str,
    pub artist: &'a str,
    pub timeline: &'a Timeline,
    /// Elapsed playback seconds.
    pub t: f64,
    /// Total track seconds (estimated when the decoder does not know).
    pub total_duration: f64,
    /// Show the upcoming line when it is at most this many seconds away.
    pub preview_window_secs: f64,
    pub paused: bool,
    pub volume_percent: u32,
}

/// Format seconds as MM:SS.
pub fn format_duration(seconds: f64) -> String {
    let total_secs = seconds.max(0.0) as u64;
    format!("{:02}:{:02}", total_secs / 60, total_secs % 60)
}

/// Build the progress bar characters for the given width.
pub fn build_progress_bar(bar_width: usize, t: f64, total_duration: f64) -> String {
    let progress = progress_fraction(t, total_duration);
    let filled = (bar_width as f64 * progress) as usize;
    let filled = filled.min(bar_width);

    let mut bar = String::with_capacity(bar_width * 3);
    for _ in 0..filled {
        bar.push('█');
    }
    for _ in filled..bar_width {
        bar.push('░');
    }
    bar
}

/// Render one frame as a list of lines (no trailing newlines).
pub fn frame_lines(theme: &Theme, width: usize, data: &FrameData<'_>) -> Vec<String> {
    let width = if width == 0 { DEFAULT_WIDTH } else { width };
    let rule_width = width.saturating_sub(4).max(10);
    let mut lines = Vec::with_capacity(16);

    // Header
    lines.push(String::new());
    lines.push(theme.header_text(&"=".repeat(width)));
    lines.push(theme.header_text(&center(&format!("NOW PLAYING: {}", data.title), width)));
    lines.push(theme.header_text(&"=".repeat(width)));
    lines.push(theme.secondary_text(&format!("  by {}", data.artist)));
    lines.push(String::new());

    let active = data.timeline.active_index(data.t);

    // Previous lines, dimmed
    if let Some(active) = active {
        let start = active.saturating_sub(HISTORY_LINES);
        for line in &data.timeline.lines()[start..active] {
            lines.push(theme.secondary_text(&format!("  {}", line.text)));
        }
        if start < active {
            lines.push(String::new());
        }
    }

    // Active line, highlighted
    match active.and_then(|i| data.timeline.get(i)) {
        Some(line) if !line.text.is_empty() => {
            lines.push(format!(
                "{}{}  {}{}",
                theme.bold, theme.primary,
                "━".repeat(rule_width),
                ANSI_RESET
            ));
            lines.push(format!(
                "{}  ♪  {}{}{}{}  ♪{}",
                theme.primary, theme.accent, line.text, ANSI_RESET, theme.primary, ANSI_RESET
            ));
            lines.push(format!(
                "{}  {}{}",
                theme.primary,
                "━".repeat(rule_width),
                ANSI_RESET
            ));
            lines.push(String::new());
        }
        Some(_) => {
            // Instrumental gap: keep the layout height stable.
            lines.push(String::new());
            lines.push(theme.secondary_text(&center("♪ ♪ ♪", width)));
            lines.push(String::new());
            lines.push(String::new());
        }
        None => {
            lines.push(String::new());
            lines.push(theme.secondary_text(&center("(get ready...)", width)));
            lines.push(String::new());
            lines.push(String::new());
        }
    }

    // Next line preview
    if let Some((next, until)) = data.timeline.upcoming_line(data.t) {
        if until <= data.preview_window_secs && !next.text.is_empty() {
            lines.push(theme.secondary_text(&format!(
                "  Coming up in {:.1}s: {}",
                until, next.text
            )));
            lines.push(String::new());
        }
    }

    // Progress bar and counters
    let bar = build_progress_bar(width.saturating_sub(4).max(10), data.t, data.total_duration);
    lines.push(format!("  {}{}{}", theme.success, bar, ANSI_RESET));
    lines.push(theme.primary_text(&format!(
        "  {} / {}",
        format_duration(data.t),
        format_duration(data.total_duration)
    )));

    let (current, total) = data.timeline.line_index_summary(data.t);
    lines.push(theme.secondary_text(&format!("  Line {}/{}", current, total)));
    lines.push(String::new());

    let state = if data.paused { "paused" } else { "playing" };
    lines.push(theme.secondary_text(&format!(
        "  volume {}%  |  {}  |  space:pause  q:quit",
        data.volume_percent, state
    )));

    lines
}

/// End-of-song summary.
pub fn summary_lines(theme: &Theme, width: usize, data: &FrameData<'_>) -> Vec<String> {
    let width = if width == 0 { DEFAULT_WIDTH } else { width };
    let (_, total) = data.timeline.line_index_summary(data.t);

    let mut lines = Vec::with_capacity(8);
    lines.push(String::new());
    lines.push(theme.success_text(&"=".repeat(width)));
    lines.push(theme.success_text(&center("Song finished! Thanks for singing!", width)));
    lines.push(theme.success_text(&"=".repeat(width)));
    lines.push(String::new());
    lines.push(theme.bold_text("Session summary:"));
    lines.push(format!("  Song: {}", data.title));
    lines.push(format!("  Artist: {}", data.artist));
    if total > 0 {
        lines.push(format!("  Total lines: {}", total));
    }
    lines.push(format!("  Duration: {}", format_duration(data.t)));
    lines.push(String::new());

    lines
}

/// Center `text` within `width` columns, measured by display width.
fn center(text: &str, width: usize) -> String {
    let text_width = UnicodeWidthStr::width(text);
    let pad = width.saturating_sub(text_width) / 2;
    format!("{}{}", " ".repeat(pad), text)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::timeline::LyricLine;

    fn sample_timeline() -> Timeline {
        Timeline::new(vec![
            LyricLine::new(0.0, "Look at the stars"),
            LyricLine::new(5.0, "Look how they shine"),
            LyricLine::new(12.25, "And everything you do"),
        ])
        .unwrap()
    }

    fn frame(t: f64) -> Vec<String> {
        let timeline = sample_timeline();
        let data = FrameData {
            title: "Yellow",
            artist: "Coldplay",
            timeline: &timeline,
            t,
            total_duration: 225.0,
            preview_window_secs: 10.0,
            paused: false,
            volume_percent: 100,
        };
        frame_lines(&Theme::default(), 70, &data)
    }

    fn joined(t: f64) -> String {
        frame(t).join("\n")
    }

    #[test]
    fn format_duration_formats_minutes_and_seconds() {
        assert_eq!(format_duration(0.0), "00:00");
        assert_eq!(format_duration(65.0), "01:05");
        assert_eq!(format_duration(92.0), "01:32");
        assert_eq!(format_duration(-5.0), "00:00");
    }

    #[test]
    fn progress_bar_is_empty_at_start() {
        let bar = build_progress_bar(10, 0.0, 100.0);
        assert_eq!(bar.chars().filter(|&c| c == '█').count(), 0);
        assert_eq!(bar.chars().count(), 10);
    }

    #[test]
    fn progress_bar_fills_halfway() {
        let bar = build_progress_bar(10, 50.0, 100.0);
        assert_eq!(bar.chars().filter(|&c| c == '█').count(), 5);
    }

    #[test]
    fn progress_bar_full_past_the_end() {
        let bar = build_progress_bar(10, 150.0, 100.0);
        assert_eq!(bar.chars().filter(|&c| c == '█').count(), 10);
    }

    #[test]
    fn progress_bar_degenerate_duration_is_empty() {
        let bar = build_progress_bar(10, 5.0, 0.0);
        assert_eq!(bar.chars().filter(|&c| c == '█').count(), 0);
    }

    #[test]
    fn frame_shows_active_line() {
        let out = joined(6.0);
        assert!(out.contains("Look how they shine"));
        assert!(out.contains("Line 2/3"));
    }

    #[test]
    fn frame_before_first_line_shows_placeholder() {
        let timeline = Timeline::new(vec![LyricLine::new(10.0, "late start")]).unwrap();
        let data = FrameData {
            title: "T",
            artist: "A",
            timeline: &timeline,
            t: 1.0,
            total_duration: 60.0,
            preview_window_secs: 10.0,
            paused: false,
            volume_percent: 100,
        };
        let out = frame_lines(&Theme::default(), 70, &data).join("\n");
        assert!(out.contains("get ready"));
        assert!(out.contains("Line 0/1"));
    }

    #[test]
    fn frame_shows_preview_inside_window() {
        let out = joined(9.75);
        assert!(out.contains("Coming up in 2.5s: And everything you do"));
    }

    #[test]
    fn frame_hides_preview_outside_window() {
        let timeline = Timeline::new(vec![
            LyricLine::new(0.0, "intro"),
            LyricLine::new(30.0, "far away"),
        ])
        .unwrap();
        let data = FrameData {
            title: "T",
            artist: "A",
            timeline: &timeline,
            t: 1.0,
            total_duration: 60.0,
            preview_window_secs: 10.0,
            paused: false,
            volume_percent: 100,
        };
        let out = frame_lines(&Theme::default(), 70, &data).join("\n");
        assert!(!out.contains("Coming up"));
    }

    #[test]
    fn frame_dims_previous_lines_after_progress() {
        let out = joined(13.0);
        // All three lines visible: two as history, one active.
        assert!(out.contains("Look at the stars"));
        assert!(out.contains("Look how they shine"));
        assert!(out.contains("And everything you do"));
        assert!(out.contains("Line 3/3"));
    }

    #[test]
    fn frame_includes_header_and_clock() {
        let out = joined(92.0);
        assert!(out.contains("NOW PLAYING: Yellow"));
        assert!(out.contains("by Coldplay"));
        assert!(out.contains("01:32 / 03:45"));
    }

    #[test]
    fn summary_includes_song_facts() {
        let timeline = sample_timeline();
        let data = FrameData {
            title: "Yellow",
            artist: "Coldplay",
            timeline: &timeline,
            t: 225.0,
            total_duration: 225.0,
            preview_window_secs: 10.0,
            paused: false,
            volume_percent: 100,
        };
        let out = summary_lines(&Theme::default(), 70, &data).join("\n");
        assert!(out.contains("Song: Yellow"));
        assert!(out.contains("Total lines: 3"));
        assert!(out.contains("Duration: 03:45"));
    }
}
