//! Parsing of yt-dlp `--newline` progress output

/// One parsed progress report from the downloader.
#[derive(Debug, Clone)]
pub struct ProgressInfo {
    /// Download progress in percent (0-100)
    pub percent: u8,
}

/// Parses progress from a yt-dlp output line.
///
/// Example: `[download]  45.2% of 10.00MiB at 500.00KiB/s ETA 00:10`
///
/// Lines without a `[download]` tag or a percentage (destination notices,
/// merge messages) return `None`.
pub fn parse_progress(line: &str) -> Option<ProgressInfo> {
    if !line.contains("[download]") {
        return None;
    }
    if !line.contains('%') {
        log::trace!("Download line without percent: {}", line);
        return None;
    }

    for part in line.split_whitespace() {
        if let Some(stripped) = part.strip_suffix('%') {
            if let Ok(p) = stripped.parse::<f32>() {
                // Clamp so garbage input never reports a phantom 100%
                return Some(ProgressInfo {
                    percent: p.clamp(0.0, 100.0) as u8,
                });
            }
        }
    }

    log::debug!("Could not parse percent from line: {}", line);
    None
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_standard_line() {
        let info = parse_progress("[download]  45.2% of 10.00MiB at 500.00KiB/s ETA 00:10").unwrap();
        assert_eq!(info.percent, 45);
    }

    #[test]
    fn test_parse_hundred_percent() {
        let info = parse_progress("[download] 100% of 10.00MiB in 00:12").unwrap();
        assert_eq!(info.percent, 100);
    }

    #[test]
    fn test_ignores_destination_line() {
        assert!(parse_progress("[download] Destination: /tmp/abc123.mp4").is_none());
    }

    #[test]
    fn test_ignores_unrelated_lines() {
        assert!(parse_progress("[info] Downloading video thumbnail").is_none());
        assert!(parse_progress("Deleting original file").is_none());
        assert!(parse_progress("").is_none());
    }

    #[test]
    fn test_clamps_out_of_range() {
        let info = parse_progress("[download] 250.0% of ~1.00MiB").unwrap();
        assert_eq!(info.percent, 100);
    }
}
