//! youtube-dl download tool.

use std::process::Command;

use super::{output_template, tool_exists, DownloadError, DownloadRequest, DownloadTool};

/// The original youtube-dl, kept as a fallback for systems without yt-dlp.
pub struct YoutubeDl;

impl YoutubeDl {
    pub(crate) fn build_args(request: &DownloadRequest) -> Vec<String> {
        vec![
            "--extract-audio".to_string(),
            "--audio-format".to_string(),
            "mp3".to_string(),
            "--audio-quality".to_string(),
            request.quality.clone(),
            "--output".to_string(),
            output_template(request),
            request.url.clone(),
        ]
    }
}

impl DownloadTool for YoutubeDl {
    fn name(&self) -> &'static str {
        "youtube-dl"
    }

    fn is_available(&self) -> bool {
        tool_exists("youtube-dl")
    }

    fn download(&self, request: &DownloadRequest) -> Result<(), DownloadError> {
        let args = Self::build_args(request);
        tracing::debug!("running youtube-dl {}", args.join(" "));

        let status = Command::new("youtube-dl")
            .args(&args)
            .status()
            .map_err(|source| DownloadError::Spawn {
                tool: self.name(),
                source,
            })?;

        if status.success() {
            Ok(())
        } else {
            Err(DownloadError::Failed {
                tool: self.name(),
                status,
            })
        }
    }
}
