//! Format download with real-time progress tracking
//!
//! Runs yt-dlp for the chosen format identifier into a caller-provided
//! output template (a scoped temporary directory in the bot flow), reading
//! stdout line by line on a blocking thread and forwarding parsed progress
//! through a channel.

use std::collections::VecDeque;
use std::io::{BufRead, BufReader};
use std::path::{Path, PathBuf};
use std::process::{Command, Stdio};
use std::sync::{Arc, Mutex};
use std::thread;

use crate::core::config;
use crate::core::error::AppError;
use crate::download::progress::{parse_progress, ProgressInfo};

/// Downloads the selected format with progress reporting via channel.
///
/// Returns a receiver for progress updates and a join handle for the
/// download task. The download runs in a blocking task so stdout can be
/// read line by line as yt-dlp emits `--newline` progress.
///
/// # Arguments
///
/// * `url` - The video URL from the user's session
/// * `format_id` - Opaque format identifier the user picked
/// * `output_template` - yt-dlp `-o` template, e.g. `<tmpdir>/%(id)s.%(ext)s`
pub fn download_format(
    url: &url::Url,
    format_id: &str,
    output_template: &str,
) -> (
    tokio::sync::mpsc::UnboundedReceiver<ProgressInfo>,
    tokio::task::JoinHandle<Result<(), AppError>>,
) {
    let ytdl_bin = config::YTDL_BIN.clone();
    let url_str = url.to_string();
    let format_id = format_id.to_string();
    let output_template = output_template.to_string();

    let (tx, rx) = tokio::sync::mpsc::unbounded_channel();

    let handle = tokio::task::spawn_blocking(move || {
        let socket_timeout = config::download::SOCKET_TIMEOUT_SECS.to_string();
        let args: Vec<&str> = vec![
            "-o",
            &output_template,
            "--newline",
            "--no-playlist",
            "--format",
            &format_id,
            "--socket-timeout",
            &socket_timeout,
            &url_str,
        ];

        log::debug!("yt-dlp command for download: {} {}", ytdl_bin, args.join(" "));

        let mut child = Command::new(&ytdl_bin)
            .args(&args)
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .spawn()
            .map_err(|e| {
                log::error!("Failed to spawn {}: {}", ytdl_bin, e);
                AppError::Download(format!("failed to spawn {}: {}", ytdl_bin, e))
            })?;

        let stdout = child.stdout.take();
        let stderr = child.stderr.take();

        // Keep a bounded tail of stderr for the error report
        let stderr_lines = Arc::new(Mutex::new(VecDeque::<String>::new()));

        let tx_stderr = tx.clone();
        let stderr_lines_clone = Arc::clone(&stderr_lines);
        if let Some(stderr_stream) = stderr {
            thread::spawn(move || {
                let reader = BufReader::new(stderr_stream);
                for line in reader.lines().map_while(Result::ok) {
                    log::debug!("yt-dlp stderr: {}", line);
                    if let Ok(mut lines) = stderr_lines_clone.lock() {
                        lines.push_back(line.clone());
                        if lines.len() > 50 {
                            lines.pop_front();
                        }
                    }
                    if let Some(progress) = parse_progress(&line) {
                        let _ = tx_stderr.send(progress);
                    }
                }
            });
        }

        if let Some(stdout_stream) = stdout {
            let reader = BufReader::new(stdout_stream);
            for line in reader.lines().map_while(Result::ok) {
                log::debug!("yt-dlp stdout: {}", line);
                if let Some(progress) = parse_progress(&line) {
                    let _ = tx.send(progress);
                }
            }
        }

        let status = child
            .wait()
            .map_err(|e| AppError::Download(format!("downloader process failed: {}", e)))?;

        if status.success() {
            log::info!("✅ Download finished for {}", url_str);
            return Ok(());
        }

        let stderr_text = stderr_lines
            .lock()
            .map(|mut lines| lines.make_contiguous().join("\n"))
            .unwrap_or_default();
        log::error!(
            "yt-dlp download failed for {} (exit: {:?}): {}",
            url_str,
            status.code(),
            stderr_text
        );

        let detail = stderr_text
            .lines()
            .rev()
            .find(|line| line.contains("ERROR"))
            .unwrap_or("yt-dlp exited with an error")
            .trim()
            .to_string();
        Err(AppError::Download(detail))
    });

    (rx, handle)
}

/// Locates the file yt-dlp produced in a download directory.
///
/// The on-disk name is owned by yt-dlp (template expansion), so after a
/// successful run the directory is scanned and the newest regular file wins.
pub fn find_downloaded_file(dir: &Path) -> Result<PathBuf, AppError> {
    let mut newest: Option<(std::time::SystemTime, PathBuf)> = None;

    for entry in std::fs::read_dir(dir)? {
        let entry = entry?;
        let path = entry.path();
        if !path.is_file() {
            continue;
        }
        // yt-dlp leaves .part files behind on interrupted runs
        if path.extension().is_some_and(|ext| ext == "part") {
            continue;
        }
        let modified = entry.metadata()?.modified()?;
        match &newest {
            Some((best, _)) if *best >= modified => {}
            _ => newest = Some((modified, path)),
        }
    }

    newest.map(|(_, path)| path).ok_or_else(|| {
        log::error!("No downloaded file found in {}", dir.display());
        AppError::Download("downloaded file not found".to_string())
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_find_downloaded_file_picks_regular_file() {
        let dir = tempfile::tempdir().unwrap();
        let file_path = dir.path().join("abc123.mp4");
        std::fs::write(&file_path, b"data").unwrap();

        let found = find_downloaded_file(dir.path()).unwrap();
        assert_eq!(found, file_path);
    }

    #[test]
    fn test_find_downloaded_file_skips_part_files() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("abc123.mp4.part"), b"partial").unwrap();
        let complete = dir.path().join("abc123.webm");
        std::fs::write(&complete, b"data").unwrap();

        let found = find_downloaded_file(dir.path()).unwrap();
        assert_eq!(found, complete);
    }

    #[test]
    fn test_find_downloaded_file_empty_dir_errors() {
        let dir = tempfile::tempdir().unwrap();
        let result = find_downloaded_file(dir.path());
        assert!(matches!(result, Err(AppError::Download(_))));
    }
}
