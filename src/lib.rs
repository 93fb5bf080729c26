//! Vidra - Telegram bot that fetches media from video links
//!
//! A user pastes a video link, picks one of the probed formats from an
//! inline keyboard, and gets the file back in the chat. Probing and
//! downloading are delegated to the external `yt-dlp` binary; message
//! delivery goes through the Telegram Bot API.
//!
//! # Module Structure
//!
//! - `core`: configuration, errors, logging, session tracking, validation
//! - `download`: yt-dlp probing, downloading, progress-line parsing
//! - `telegram`: bot setup, menus, dispatcher and handlers

pub mod core;
pub mod download;
pub mod telegram;

// Re-export commonly used types for convenience
pub use crate::core::{config, error::AppError, session::SessionStore};
pub use crate::download::probe::{probe_formats, ProbeInfo};
pub use crate::telegram::{create_bot, schema, Bot, HandlerDeps};
