//! Terminal color theme.
//!
//! Centralizes the ANSI escape codes used by CLI output and the karaoke
//! screen so the palette lives in one place.

/// ANSI reset sequence.
pub const ANSI_RESET: &str = "\x1b[0m";

/// Color/style roles used across the CLI.
#[derive(Debug, Clone)]
pub struct Theme {
    /// Most informational output.
    pub primary: &'static str,
    /// Dimmed hints and past lyric lines.
    pub secondary: &'static str,
    /// Highlights: the active lyric line, prompts.
    pub accent: &'static str,
    /// Headers and banners.
    pub header: &'static str,
    /// Errors.
    pub error: &'static str,
    /// Success messages and the progress bar.
    pub success: &'static str,
    /// Bold modifier.
    pub bold: &'static str,
}

impl Default for Theme {
    fn default() -> Self {
        Self {
            primary: "\x1b[96m",   // cyan
            secondary: "\x1b[2m",  // dim
            accent: "\x1b[93m",    // yellow
            header: "\x1b[95m",    // magenta
            error: "\x1b[91m",     // red
            success: "\x1b[92m",   // green
            bold: "\x1b[1m",
        }
    }
}

impl Theme {
    pub fn primary_text(&self, text: &str) -> String {
        format!("{}{}{}", self.primary, text, ANSI_RESET)
    }

    pub fn secondary_text(&self, text: &str) -> String {
        format!("{}{}{}", self.secondary, text, ANSI_RESET)
    }

    pub fn accent_text(&self, text: &str) -> String {
        format!("{}{}{}", self.accent, text, ANSI_RESET)
    }

    pub fn header_text(&self, text: &str) -> String {
        format!("{}{}{}{}", self.bold, self.header, text, ANSI_RESET)
    }

    pub fn error_text(&self, text: &str) -> String {
        format!("{}{}{}", self.error, text, ANSI_RESET)
    }

    pub fn success_text(&self, text: &str) -> String {
        format!("{}{}{}", self.success, text, ANSI_RESET)
    }

    pub fn bold_text(&self, text: &str) -> String {
        format!("{}{}{}", self.bold, text, ANSI_RESET)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn helpers_wrap_text_with_reset() {
        let theme = Theme::default();
        let out = theme.success_text("done");
        assert!(out.contains("done"));
        assert!(out.ends_with(ANSI_RESET));
        assert!(out.starts_with("\x1b["));
    }
}
