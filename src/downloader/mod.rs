//! Audio download via external tools.
//!
//! Downloading from video platforms is delegated to `yt-dlp` (preferred) or
//! `youtube-dl` (fallback), each wrapped behind the [`DownloadTool`] trait.
//! The wrappers only build arguments and spawn the process; the tool's own
//! progress output goes straight to the terminal.

mod yt_dlp;
mod youtube_dl;

use std::path::PathBuf;
use std::process::Command;

pub use yt_dlp::YtDlp;
pub use youtube_dl::YoutubeDl;

#[derive(Debug, thiserror::Error)]
pub enum DownloadError {
    #[error("no download tool available; install yt-dlp (or youtube-dl)")]
    NoToolAvailable,

    #[error("failed to run {tool}: {source}")]
    Spawn {
        tool: &'static str,
        source: std::io::Error,
    },

    #[error("{tool} exited with {status}")]
    Failed {
        tool: &'static str,
        status: std::process::ExitStatus,
    },
}

/// What to download and where to put it.
#[derive(Debug, Clone)]
pub struct DownloadRequest {
    /// Video page URL.
    pub url: String,
    /// Directory the audio file lands in.
    pub dest_dir: PathBuf,
    /// Output file stem; the video title when `None`.
    pub file_stem: Option<String>,
    /// Audio quality passed to the extractor, e.g. `192K`.
    pub quality: String,
}

/// An external tool that can extract audio from a video URL.
pub trait DownloadTool {
    /// Binary name, for messages.
    fn name(&self) -> &'static str;

    /// Whether the binary is on PATH. Should be fast.
    fn is_available(&self) -> bool;

    /// Run the download, blocking until the tool exits.
    fn download(&self, request: &DownloadRequest) -> Result<(), DownloadError>;
}

/// Pick the first available tool, in preference order.
pub fn detect_tool() -> Result<Box<dyn DownloadTool>, DownloadError> {
    let tools: Vec<Box<dyn DownloadTool>> = vec![Box::new(YtDlp), Box::new(YoutubeDl)];

    tools
        .into_iter()
        .find(|tool| tool.is_available())
        .ok_or(DownloadError::NoToolAvailable)
}

/// Check if a binary exists on PATH.
pub(crate) fn tool_exists(binary: &str) -> bool {
    Command::new("which")
        .arg(binary)
        .output()
        .map(|o| o.status.success())
        .unwrap_or(false)
}

/// Output template shared by both tools: either the video title or an
/// explicit stem, with the extension chosen by the extractor.
pub(crate) fn output_template(request: &DownloadRequest) -> String {
    let stem = match &request.file_stem {
        // The tool replaces %(ext)s after transcoding.
        Some(stem) => format!("{}.%(ext)s", stem.trim_end_matches(".mp3")),
        None => "%(title)s.%(ext)s".to_string(),
    };

    request.dest_dir.join(stem).to_string_lossy().into_owned()
}
