//! Metadata-only format probing via yt-dlp
//!
//! One `--dump-json` invocation per submitted link, no file transfer. The
//! JSON document is deserialized leniently: yt-dlp omits fields freely and a
//! descriptor missing its identifier or extension is simply not offered to
//! the user (filtered at menu time, not here).

use serde::Deserialize;
use tokio::process::Command as TokioCommand;
use tokio::time::timeout;
use url::Url;

use crate::core::config;
use crate::core::error::AppError;

/// One selectable quality/codec/container combination for a video.
#[derive(Debug, Clone, Deserialize)]
pub struct FormatDescriptor {
    /// Opaque identifier understood by yt-dlp's `-f` flag
    pub format_id: Option<String>,
    /// Container extension ("mp4", "webm", ...)
    pub ext: Option<String>,
    /// Video codec, or the literal "none" for audio-only formats
    pub vcodec: Option<String>,
    /// Human-readable quality note ("720p", "medium", ...)
    pub format_note: Option<String>,
}

impl FormatDescriptor {
    /// Audio-only formats carry `vcodec: "none"`.
    pub fn is_video(&self) -> bool {
        self.vcodec.as_deref().is_some_and(|codec| codec != "none")
    }
}

/// Probed metadata for a single video.
#[derive(Debug, Clone, Deserialize)]
pub struct ProbeInfo {
    #[serde(default)]
    pub title: String,
    pub uploader: Option<String>,
    #[serde(default)]
    pub formats: Vec<FormatDescriptor>,
}

/// Parses one yt-dlp `--dump-json` document.
pub fn parse_probe_output(json: &str) -> Result<ProbeInfo, AppError> {
    let info: ProbeInfo = serde_json::from_str(json)?;
    Ok(info)
}

/// Probes the available formats for a URL without downloading anything.
///
/// Runs `yt-dlp --dump-json --no-playlist` under a timeout. Any failure
/// (spawn, timeout, non-zero exit, malformed JSON) is logged in full here;
/// the caller shows the user a truncated version.
///
/// # Arguments
///
/// * `url` - The validated link to probe
///
/// # Returns
///
/// Title, uploader, and the raw format descriptor list.
pub async fn probe_formats(url: &Url) -> Result<ProbeInfo, AppError> {
    let ytdl_bin = &*config::YTDL_BIN;
    log::debug!("Probing formats for URL: {}", url);

    let output = timeout(
        config::probe::timeout(),
        TokioCommand::new(ytdl_bin)
            .args(["--dump-json", "--no-playlist", url.as_str()])
            .output(),
    )
    .await
    .map_err(|_| {
        log::error!(
            "yt-dlp format probe timed out after {} seconds for {}",
            config::probe::TIMEOUT_SECS,
            url
        );
        AppError::Probe("format query timed out".to_string())
    })?
    .map_err(|e| {
        log::error!("Failed to execute {}: {}", ytdl_bin, e);
        AppError::Probe(format!("failed to execute {}: {}", ytdl_bin, e))
    })?;

    if !output.status.success() {
        let stderr = String::from_utf8_lossy(&output.stderr);
        log::error!("yt-dlp probe failed for {} (exit: {:?})", url, output.status.code());
        log::error!("yt-dlp stderr: {}", stderr);

        // Surface the last ERROR: line when there is one, it names the cause
        let detail = stderr
            .lines()
            .rev()
            .find(|line| line.contains("ERROR"))
            .unwrap_or("yt-dlp could not read this link")
            .trim()
            .to_string();
        return Err(AppError::Probe(detail));
    }

    let stdout = String::from_utf8_lossy(&output.stdout);
    let info = parse_probe_output(&stdout)?;
    log::info!(
        "Probed '{}': {} format(s) available",
        info.title,
        info.formats.len()
    );
    Ok(info)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_full_document() {
        let json = r#"{
            "title": "Test Clip",
            "uploader": "Some Channel",
            "formats": [
                {"format_id": "22", "ext": "mp4", "vcodec": "avc1.64001F", "format_note": "720p"},
                {"format_id": "251", "ext": "webm", "vcodec": "none", "format_note": "medium"}
            ]
        }"#;

        let info = parse_probe_output(json).unwrap();
        assert_eq!(info.title, "Test Clip");
        assert_eq!(info.uploader.as_deref(), Some("Some Channel"));
        assert_eq!(info.formats.len(), 2);
        assert!(info.formats[0].is_video());
        assert!(!info.formats[1].is_video());
    }

    #[test]
    fn test_parse_tolerates_missing_fields() {
        let json = r#"{
            "title": "Sparse",
            "formats": [
                {"format_id": "18"},
                {"ext": "mp4"},
                {}
            ]
        }"#;

        let info = parse_probe_output(json).unwrap();
        assert_eq!(info.uploader, None);
        assert_eq!(info.formats.len(), 3);
        assert_eq!(info.formats[0].ext, None);
        assert_eq!(info.formats[1].format_id, None);
    }

    #[test]
    fn test_parse_tolerates_absent_formats_list() {
        let info = parse_probe_output(r#"{"title": "No Formats"}"#).unwrap();
        assert!(info.formats.is_empty());
    }

    #[test]
    fn test_parse_ignores_unknown_fields() {
        let json = r#"{"title": "T", "duration": 212, "view_count": 9000, "formats": []}"#;
        assert!(parse_probe_output(json).is_ok());
    }

    #[test]
    fn test_parse_rejects_garbage() {
        assert!(parse_probe_output("not json at all").is_err());
    }

    #[test]
    fn test_is_video_on_missing_vcodec() {
        let descriptor = FormatDescriptor {
            format_id: Some("140".to_string()),
            ext: Some("m4a".to_string()),
            vcodec: None,
            format_note: None,
        };
        assert!(!descriptor.is_video());
    }
}
