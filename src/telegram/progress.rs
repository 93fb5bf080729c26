//! Download status messages and edit throttling
//!
//! The status of a download is reported by editing one message in place.
//! Telegram rate-limits edits, so parsed progress chunks pass through a
//! throttle: at most one edit per configured interval, unless the
//! percentage jumped far enough to warrant an immediate one.

use teloxide::prelude::*;
use teloxide::types::MessageId;
use tokio::time::{Duration, Instant};

use crate::core::config;
use crate::core::utils::escape_markdown;
use crate::telegram::Bot;

/// Download state for displaying progress to the user.
#[derive(Debug, Clone)]
pub enum DownloadStatus {
    /// Download is starting
    Starting {
        /// File/track title
        title: String,
    },
    /// Download in progress with a progress bar
    Downloading {
        /// File/track title
        title: String,
        /// Download progress in percent (0-100)
        progress: u8,
    },
    /// Sending the file to the Telegram server
    Uploading {
        /// File/track title
        title: String,
    },
    /// Terminal success state
    Completed,
    /// Download error
    Error {
        /// Error description, already truncated for the user
        error: String,
    },
}

impl DownloadStatus {
    /// Generates the formatted MarkdownV2 message text for the current state.
    pub fn to_message(&self) -> String {
        match self {
            DownloadStatus::Starting { title } => {
                format!(
                    "🎬 *{}*\n\n⏳ Downloading your file\\.\\.\\.",
                    escape_markdown(title)
                )
            }
            DownloadStatus::Downloading { title, progress } => {
                format!(
                    "🎬 *{}*\n\n📥 Downloading: {}%\n{}",
                    escape_markdown(title),
                    progress,
                    create_progress_bar(*progress)
                )
            }
            DownloadStatus::Uploading { title } => {
                format!("🎬 *{}*\n\n📤 Sending file\\.\\.\\.", escape_markdown(title))
            }
            DownloadStatus::Completed => {
                "✅ Download complete\\! \\(You can send another link\\)".to_string()
            }
            DownloadStatus::Error { error } => {
                format!("❌ Failed: {}", escape_markdown(error))
            }
        }
    }
}

/// Creates a visual progress bar
fn create_progress_bar(progress: u8) -> String {
    let progress = progress.min(100);
    let filled = (progress / 10) as usize;
    let empty = 10 - filled;

    format!("[{}{}]", "█".repeat(filled), "░".repeat(empty))
}

/// Tracks the in-place status message for one download.
pub struct ProgressMessage {
    /// Chat the status message lives in
    pub chat_id: ChatId,
    /// Message being edited (None until first update sends one)
    pub message_id: Option<MessageId>,
}

impl ProgressMessage {
    /// Attaches to an existing message (the pressed menu message).
    pub fn attached(chat_id: ChatId, message_id: MessageId) -> Self {
        Self {
            chat_id,
            message_id: Some(message_id),
        }
    }

    /// Edits the status message in place, sending a fresh one when editing
    /// fails (the original may have been deleted by the user).
    pub async fn update(&mut self, bot: &Bot, status: DownloadStatus) -> ResponseResult<()> {
        let text = status.to_message();

        if let Some(msg_id) = self.message_id {
            match bot
                .edit_message_text(self.chat_id, msg_id, text.clone())
                .parse_mode(teloxide::types::ParseMode::MarkdownV2)
                .await
            {
                Ok(_) => Ok(()),
                Err(e) => {
                    log::warn!("Failed to edit message: {}. Trying to send new one.", e);
                    let msg = bot
                        .send_message(self.chat_id, text)
                        .parse_mode(teloxide::types::ParseMode::MarkdownV2)
                        .await?;
                    self.message_id = Some(msg.id);
                    Ok(())
                }
            }
        } else {
            let msg = bot
                .send_message(self.chat_id, text)
                .parse_mode(teloxide::types::ParseMode::MarkdownV2)
                .await?;
            self.message_id = Some(msg.id);
            Ok(())
        }
    }
}

/// Rate gate between progress reports and message edits.
///
/// Allows an edit when the interval elapsed since the last one, when the
/// percentage moved by the configured delta, or on 100%.
pub struct EditThrottle {
    interval: Duration,
    percent_delta: u8,
    last_edit: Option<(Instant, u8)>,
}

impl EditThrottle {
    pub fn new() -> Self {
        Self {
            interval: config::progress::edit_interval(),
            percent_delta: config::progress::MIN_PERCENT_DELTA,
            last_edit: None,
        }
    }

    /// Returns `true` when an edit should go out for this report.
    pub fn should_edit(&mut self, percent: u8) -> bool {
        self.should_edit_at(percent, Instant::now())
    }

    fn should_edit_at(&mut self, percent: u8, now: Instant) -> bool {
        let allowed = match self.last_edit {
            None => true,
            Some((at, last_percent)) => {
                percent == 100
                    || now.duration_since(at) >= self.interval
                    || percent.saturating_sub(last_percent) >= self.percent_delta
            }
        };
        if allowed {
            self.last_edit = Some((now, percent));
        }
        allowed
    }
}

impl Default for EditThrottle {
    fn default() -> Self {
        Self::new()
    }
}
