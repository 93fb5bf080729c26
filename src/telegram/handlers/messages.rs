//! Inbound text handling: link validation, probing, menu rendering

use teloxide::prelude::*;

use crate::core::config;
use crate::core::error::AppResult;
use crate::core::utils::truncate_user_error;
use crate::core::validation;
use crate::download::probe::probe_formats;
use crate::telegram::handlers::types::HandlerDeps;
use crate::telegram::menu;
use crate::telegram::Bot;

/// Handles a text message: validate the link, probe its formats, store the
/// session and show the format menu.
///
/// Precondition failures (no recognized domain, no URL token) are expected
/// user-facing warnings. Probe failures are logged in full and surfaced
/// truncated; no session is created in either case.
pub async fn handle_link_message(bot: &Bot, msg: &Message, deps: &HandlerDeps) -> AppResult<()> {
    let Some(text) = msg.text() else {
        return Ok(());
    };
    let text = text.trim();
    let chat_id = msg.chat.id;

    if !validation::contains_supported_link(text) {
        bot.send_message(
            chat_id,
            "⚠️ Please send a valid YouTube link (youtube.com or youtu.be)",
        )
        .await?;
        return Ok(());
    }

    let Some(url) = validation::extract_link(text) else {
        // Domain mentioned but no URL token to hand to the prober
        bot.send_message(
            chat_id,
            "⚠️ I couldn't find a link in that message. Send the full URL.",
        )
        .await?;
        return Ok(());
    };

    bot.send_message(chat_id, "🔍 Analyzing video formats... (10-30 seconds)")
        .await?;

    match probe_formats(&url).await {
        Ok(info) => {
            let options = menu::format_options(&info);
            if options.is_empty() {
                log::warn!("Probe for {} returned no usable formats", url);
                bot.send_message(chat_id, "⚠️ No downloadable formats found for that link.")
                    .await?;
                return Ok(());
            }

            deps.sessions.put(chat_id, url, info.clone()).await;

            bot.send_message(chat_id, menu::menu_header(&info))
                .parse_mode(teloxide::types::ParseMode::MarkdownV2)
                .reply_markup(menu::format_keyboard(&options))
                .await?;
        }
        Err(e) => {
            log::error!("Format probe failed for {}: {}", url, e);
            bot.send_message(
                chat_id,
                format!(
                    "❌ Failed to get formats: {}",
                    truncate_user_error(&e.to_string(), config::errors::USER_MESSAGE_MAX_CHARS)
                ),
            )
            .await?;
        }
    }

    Ok(())
}
