//! Format selection menu rendering
//!
//! A deterministic transform from probed format descriptors to an inline
//! button grid. Presentation order is whatever yt-dlp returned; no sorting
//! by quality or bitrate.

use teloxide::types::{InlineKeyboardButton, InlineKeyboardMarkup};

use crate::core::config;
use crate::core::utils::escape_markdown;
use crate::download::probe::ProbeInfo;

/// One selectable menu entry: a display label and the callback payload.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FormatOption {
    pub label: String,
    pub format_id: String,
}

/// Builds the selectable format list from probed metadata.
///
/// Descriptors missing a format identifier or extension are skipped. Video
/// formats are prefixed 🎬, audio-only formats 🔊. Only the first
/// `MAX_FORMAT_BUTTONS` survivors are kept, in encounter order.
pub fn format_options(info: &ProbeInfo) -> Vec<FormatOption> {
    info.formats
        .iter()
        .filter_map(|descriptor| {
            let format_id = descriptor.format_id.as_deref()?;
            let ext = descriptor.ext.as_deref()?;

            let label = if descriptor.is_video() {
                let note = descriptor.format_note.as_deref().unwrap_or("Unknown");
                format!("🎬 {} ({})", note, ext)
            } else {
                let note = descriptor.format_note.as_deref().unwrap_or("Audio");
                format!("🔊 {} ({})", note, ext)
            };

            Some(FormatOption {
                label,
                format_id: format_id.to_string(),
            })
        })
        .take(config::menu::MAX_FORMAT_BUTTONS)
        .collect()
}

/// Renders the options as an inline keyboard, one button per row.
pub fn format_keyboard(options: &[FormatOption]) -> InlineKeyboardMarkup {
    InlineKeyboardMarkup::new(
        options
            .iter()
            .map(|option| {
                vec![InlineKeyboardButton::callback(
                    option.label.clone(),
                    option.format_id.clone(),
                )]
            })
            .collect::<Vec<_>>(),
    )
}

/// The MarkdownV2 header shown above the format keyboard.
pub fn menu_header(info: &ProbeInfo) -> String {
    format!(
        "✅ *{}*\n\n🎯 *Select your format:*",
        escape_markdown(&info.title)
    )
}
