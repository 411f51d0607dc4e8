//! yt-dlp download tool.

use std::process::Command;

use super::{output_template, tool_exists, DownloadError, DownloadRequest, DownloadTool};

/// The actively maintained youtube-dl fork; preferred when installed.
pub struct YtDlp;

impl YtDlp {
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

impl DownloadTool for YtDlp {
    fn name(&self) -> &'static str {
        "yt-dlp"
    }

    fn is_available(&self) -> bool {
        tool_exists("yt-dlp")
    }

    fn download(&self, request: &DownloadRequest) -> Result<(), DownloadError> {
        let args = Self::build_args(request);
        tracing::debug!("running yt-dlp {}", args.join(" "));

        let status = Command::new("yt-dlp")
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
