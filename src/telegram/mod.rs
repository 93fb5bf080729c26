//! Telegram bot integration: setup, menus, dispatcher and handlers

pub mod bot;
pub mod handlers;
pub mod menu;
pub mod progress;

/// The bot type used throughout the crate
pub type Bot = teloxide::Bot;

pub use bot::{create_bot, setup_bot_commands, Command};
pub use handlers::{schema, HandlerDeps, HandlerError};
