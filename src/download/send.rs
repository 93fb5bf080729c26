//! Dispatch of finished files back through Telegram
//!
//! The produced file is classified by extension: a fixed set of audio
//! containers goes out via `send_audio` with title and performer, everything
//! else via `send_video` with a caption and streaming enabled.

use std::path::Path;

use teloxide::prelude::*;
use teloxide::types::InputFile;

use crate::core::error::AppError;
use crate::download::probe::ProbeInfo;
use crate::telegram::Bot;

/// Extensions dispatched as audio; anything else is sent as video.
pub const AUDIO_EXTENSIONS: [&str; 4] = ["mp3", "m4a", "opus", "webm"];

/// Returns `true` when the file should be dispatched as audio.
pub fn is_audio_file(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| ext.to_ascii_lowercase())
        .is_some_and(|ext| AUDIO_EXTENSIONS.contains(&ext.as_str()))
}

/// Sends a downloaded file to the chat as audio or video.
///
/// # Arguments
///
/// * `bot` - Telegram bot instance
/// * `chat_id` - Destination chat
/// * `path` - The file yt-dlp produced
/// * `info` - Probed metadata for title/performer/caption
pub async fn send_media(bot: &Bot, chat_id: ChatId, path: &Path, info: &ProbeInfo) -> Result<(), AppError> {
    if is_audio_file(path) {
        log::info!("Sending {} as audio to chat {}", path.display(), chat_id);
        let mut request = bot
            .send_audio(chat_id, InputFile::file(path))
            .title(info.title.clone());
        if let Some(uploader) = info.uploader.as_deref().filter(|u| !u.is_empty()) {
            request = request.performer(uploader.to_string());
        }
        request
            .await
            .map_err(|e| AppError::SendFailed(format!("audio send failed: {}", e)))?;
    } else {
        log::info!("Sending {} as video to chat {}", path.display(), chat_id);
        bot.send_video(chat_id, InputFile::file(path))
            .caption(format!("✅ {}", info.title))
            .supports_streaming(true)
            .await
            .map_err(|e| AppError::SendFailed(format!("video send failed: {}", e)))?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    #[test]
    fn test_audio_extensions_classify_as_audio() {
        for ext in ["mp3", "m4a", "opus", "webm"] {
            let path = PathBuf::from(format!("/tmp/track.{}", ext));
            assert!(is_audio_file(&path), "expected audio for .{}", ext);
        }
    }

    #[test]
    fn test_other_extensions_classify_as_video() {
        for ext in ["mp4", "mkv", "avi", "mov", "flv"] {
            let path = PathBuf::from(format!("/tmp/clip.{}", ext));
            assert!(!is_audio_file(&path), "expected video for .{}", ext);
        }
    }

    #[test]
    fn test_classification_is_case_insensitive() {
        assert!(is_audio_file(&PathBuf::from("/tmp/TRACK.MP3")));
        assert!(!is_audio_file(&PathBuf::from("/tmp/CLIP.MP4")));
    }

    #[test]
    fn test_no_extension_classifies_as_video() {
        assert!(!is_audio_file(&PathBuf::from("/tmp/mystery")));
    }
}
