//! Time-indexed lyric timeline.
//!
//! A [`Timeline`] is an immutable, sorted sequence of timestamped lyric
//! lines. All queries are pure functions of the timeline and a
//! caller-supplied playback time, so the playback loop can poll them at any
//! rate without locking: nothing here blocks or mutates shared state.

/// One lyric line: seconds from track start plus display text.
///
/// `text` may be empty for instrumental gaps.
#[derive(Debug, Clone, PartialEq)]
pub struct LyricLine {
    /// Seconds from track start, non-negative.
    pub timestamp: f64,
    /// Display text.
    pub text: String,
}

impl LyricLine {
    pub fn new(timestamp: f64, text: impl Into<String>) -> Self {
        Self {
            timestamp,
            text: text.into(),
        }
    }
}

/// Errors rejected at timeline construction.
///
/// Unsorted input is rejected rather than silently re-sorted so that
/// upstream parsing bugs surface immediately. Parsers that legitimately
/// produce unordered lines should go through [`Timeline::from_lines`].
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum TimelineError {
    #[error("timestamp at index {index} is not a finite non-negative number: {value}")]
    InvalidTimestamp { index: usize, value: f64 },

    #[error("timestamps out of order at index {index}: {found} follows {prev}")]
    OutOfOrder { index: usize, prev: f64, found: f64 },
}

/// Sorted sequence of lyric lines for one track.
///
/// Constructed once per playback session and read-only thereafter.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Timeline {
    lines: Vec<LyricLine>,
}

impl Timeline {
    /// Build a timeline from lines that are already sorted.
    ///
    /// Rejects negative or non-finite timestamps and any decrease between
    /// consecutive timestamps. Equal timestamps are allowed.
    pub fn new(lines: Vec<LyricLine>) -> Result<Self, TimelineError> {
        for (index, line) in lines.iter().enumerate() {
            if !line.timestamp.is_finite() || line.timestamp < 0.0 {
                return Err(TimelineError::InvalidTimestamp {
                    index,
                    value: line.timestamp,
                });
            }
            if index > 0 {
                let prev = lines[index - 1].timestamp;
                if line.timestamp < prev {
                    return Err(TimelineError::OutOfOrder {
                        index,
                        prev,
                        found: line.timestamp,
                    });
                }
            }
        }

        Ok(Self { lines })
    }

    /// Build a timeline from parser output, stable-sorting by timestamp.
    ///
    /// Duplicate timestamps keep their original relative order. Lines with
    /// negative or non-finite timestamps are dropped.
    pub fn from_lines(lines: impl IntoIterator<Item = LyricLine>) -> Self {
        let mut lines: Vec<LyricLine> = lines
            .into_iter()
            .filter(|l| l.timestamp.is_finite() && l.timestamp >= 0.0)
            .collect();
        lines.sort_by(|a, b| a.timestamp.total_cmp(&b.timestamp));

        Self { lines }
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    pub fn len(&self) -> usize {
        self.lines.len()
    }

    pub fn lines(&self) -> &[LyricLine] {
        &self.lines
    }

    pub fn get(&self, index: usize) -> Option<&LyricLine> {
        self.lines.get(index)
    }

    pub fn last(&self) -> Option<&LyricLine> {
        self.lines.last()
    }

    /// Index of the line active at time `t`: the greatest `i` with
    /// `lines[i].timestamp <= t`. `None` before the first timestamp or for
    /// an empty timeline.
    ///
    /// Predecessor search via `partition_point`, O(log n).
    pub fn active_index(&self, t: f64) -> Option<usize> {
        let after = self.lines.partition_point(|l| l.timestamp <= t);
        after.checked_sub(1)
    }

    /// The line active at time `t`, if any.
    pub fn active_line(&self, t: f64) -> Option<&LyricLine> {
        self.active_index(t).map(|i| &self.lines[i])
    }

    /// The line strictly after the active index, paired with seconds until
    /// it becomes active. Before the first timestamp the first line is
    /// upcoming. `None` once the last line is active.
    pub fn upcoming_line(&self, t: f64) -> Option<(&LyricLine, f64)> {
        let next = match self.active_index(t) {
            Some(i) => i + 1,
            None => 0,
        };
        let line = self.lines.get(next)?;
        Some((line, (line.timestamp - t).max(0.0)))
    }

    /// 1-based active line number (0 when none is active yet) and total
    /// line count, for "Line 15/39" displays.
    pub fn line_index_summary(&self, t: f64) -> (usize, usize) {
        let current = self.active_index(t).map_or(0, |i| i + 1);
        (current, self.lines.len())
    }

    /// A copy with every timestamp moved by `offset` seconds.
    ///
    /// Results below zero clamp to zero: a negative timestamp has no
    /// meaningful ordering relative to "before playback starts". The shift
    /// is monotone, so the result is still sorted; applying the inverse
    /// offset restores the original timestamps whenever nothing clamped.
    pub fn shifted(&self, offset: f64) -> Timeline {
        let lines = self
            .lines
            .iter()
            .map(|l| LyricLine::new((l.timestamp + offset).max(0.0), l.text.clone()))
            .collect();

        Timeline { lines }
    }
}

/// Fraction of the track played, clamped to `[0, 1]`.
///
/// Returns 0.0 for a non-positive or non-finite `total_duration` instead of
/// failing: zero durations show up routinely at playback start and must not
/// interrupt the render loop.
pub fn progress_fraction(t: f64, total_duration: f64) -> f64 {
    if !total_duration.is_finite() || total_duration <= 0.0 || !t.is_finite() {
        return 0.0;
    }

    (t / total_duration).clamp(0.0, 1.0)
}

/// Source of current elapsed playback seconds.
///
/// The real implementation reads the audio sink position; tests substitute
/// a fixed clock to drive the timeline deterministically.
pub trait Clock {
    fn elapsed_seconds(&self) -> f64;
}
