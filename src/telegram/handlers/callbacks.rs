//! Callback-query handling: format selection and download delivery

use teloxide::prelude::*;

use crate::core::config;
use crate::core::error::{AppError, AppResult};
use crate::core::session::Session;
use crate::core::utils::truncate_user_error;
use crate::download::downloader::{download_format, find_downloaded_file};
use crate::download::send::send_media;
use crate::telegram::handlers::commands::USAGE_HINT;
use crate::telegram::handlers::types::HandlerDeps;
use crate::telegram::progress::{DownloadStatus, EditThrottle, ProgressMessage};
use crate::telegram::Bot;

/// Handles a button press carrying a format identifier.
///
/// A press with no active session gets the "send a link first" warning and
/// triggers no download call. The session is removed on every terminal
/// outcome, success or failure, so stale menus cannot act on a dead link.
pub async fn handle_format_callback(bot: &Bot, q: CallbackQuery, deps: &HandlerDeps) -> AppResult<()> {
    let Some(format_id) = q.data.clone() else {
        let _ = bot.answer_callback_query(q.id).await;
        return Ok(());
    };

    let (chat_id, message_id) = match q.message.as_ref().map(|m| (m.chat().id, m.id())) {
        Some(ids) => ids,
        None => {
            // Message too old for Telegram to reference; nothing to edit
            let _ = bot.answer_callback_query(q.id).await;
            return Ok(());
        }
    };

    // The welcome button is not a format id
    if format_id == "start" {
        bot.answer_callback_query(q.id).await?;
        bot.send_message(chat_id, USAGE_HINT).await?;
        return Ok(());
    }

    let Some(session) = deps.sessions.get(chat_id).await else {
        log::info!("Format press without session from chat {}", chat_id);
        bot.answer_callback_query(q.id)
            .text("⚠️ Please send a YouTube link first!")
            .await?;
        return Ok(());
    };

    bot.answer_callback_query(q.id).await?;

    log::info!(
        "Starting download for chat {}: format {} of {}",
        chat_id,
        format_id,
        session.link
    );

    let mut progress = ProgressMessage::attached(chat_id, message_id);
    let result = run_download(bot, &mut progress, chat_id, &session, &format_id).await;

    // Terminal outcome either way: the menu must not act on this link again
    deps.sessions.remove(chat_id).await;

    if let Err(e) = result {
        log::error!("Download failed for chat {}: {}", chat_id, e);
        let user_error = truncate_user_error(&e.to_string(), config::errors::USER_MESSAGE_MAX_CHARS);
        let _ = progress
            .update(bot, DownloadStatus::Error { error: user_error })
            .await;
    }

    Ok(())
}

/// Runs one download end to end: fetch into a scoped temp directory, stream
/// throttled progress edits, send the file, report completion.
///
/// The temp directory is released on all exit paths when it drops.
async fn run_download(
    bot: &Bot,
    progress: &mut ProgressMessage,
    chat_id: ChatId,
    session: &Session,
    format_id: &str,
) -> AppResult<()> {
    let title = session.info.title.clone();

    progress
        .update(bot, DownloadStatus::Starting { title: title.clone() })
        .await?;

    let tmpdir = tempfile::tempdir()?;
    let output_template = tmpdir
        .path()
        .join("%(id)s.%(ext)s")
        .to_string_lossy()
        .into_owned();

    let (mut rx, handle) = download_format(&session.link, format_id, &output_template);

    let mut throttle = EditThrottle::new();
    while let Some(report) = rx.recv().await {
        if throttle.should_edit(report.percent) {
            // A dropped edit must not abort the download
            let _ = progress
                .update(
                    bot,
                    DownloadStatus::Downloading {
                        title: title.clone(),
                        progress: report.percent,
                    },
                )
                .await;
        }
    }

    handle
        .await
        .map_err(|e| AppError::Download(format!("download task failed: {}", e)))??;

    let file_path = find_downloaded_file(tmpdir.path())?;

    let _ = progress
        .update(bot, DownloadStatus::Uploading { title: title.clone() })
        .await;

    send_media(bot, chat_id, &file_path, &session.info).await?;

    progress.update(bot, DownloadStatus::Completed).await?;
    log::info!("✅ Delivered {} to chat {}", file_path.display(), chat_id);

    Ok(())
}
