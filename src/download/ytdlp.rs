//! yt-dlp binary diagnostics

use tokio::process::Command as TokioCommand;
use tokio::time::timeout;

use crate::core::config;

/// Logs the yt-dlp version at startup.
///
/// A missing binary is a warning rather than a startup failure: the bot can
/// still serve `/start`, and every probe will report the problem to the
/// user who triggers it.
pub async fn log_ytdlp_version() {
    let ytdl_bin = &*config::YTDL_BIN;

    let version_output = timeout(
        std::time::Duration::from_secs(10),
        TokioCommand::new(ytdl_bin).arg("--version").output(),
    )
    .await;

    match version_output {
        Ok(Ok(output)) if output.status.success() => {
            let version = String::from_utf8_lossy(&output.stdout).trim().to_string();
            log::info!("yt-dlp version: {}", version);
        }
        Ok(Ok(output)) => {
            log::warn!(
                "yt-dlp --version exited with {:?}; downloads may fail",
                output.status.code()
            );
        }
        Ok(Err(e)) => {
            log::warn!(
                "yt-dlp binary '{}' not found ({}). Install it or set YTDL_BIN.",
                ytdl_bin,
                e
            );
        }
        Err(_) => {
            log::warn!("yt-dlp version check timed out");
        }
    }
}
