//! Command handlers

use teloxide::prelude::*;
use teloxide::types::{InlineKeyboardButton, InlineKeyboardMarkup};

use crate::telegram::Bot;

/// Welcome text shown on /start, MarkdownV2-formatted.
const WELCOME_TEXT: &str = "👋 Welcome to the media fetch bot\\!\n\n\
👉 *Send any YouTube link* to start\n\n\
⚡ *Works with all formats*: Video, Audio \\(MP3\\), 1080p, 4K & more";

/// Short usage hint re-sent when the welcome button is pressed.
pub const USAGE_HINT: &str = "👉 Send any YouTube link to start";

/// Handles the /start command: static welcome content with a single
/// "Get Started" button.
pub async fn handle_start_command(bot: &Bot, msg: &Message) -> ResponseResult<()> {
    let keyboard = InlineKeyboardMarkup::new(vec![vec![InlineKeyboardButton::callback(
        "🚀 Get Started".to_string(),
        "start",
    )]]);

    bot.send_message(msg.chat.id, WELCOME_TEXT)
        .parse_mode(teloxide::types::ParseMode::MarkdownV2)
        .reply_markup(keyboard)
        .await?;
    Ok(())
}
