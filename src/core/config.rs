use once_cell::sync::Lazy;
use std::env;
use std::time::Duration;

/// Bot token
/// Read from BOT_TOKEN or TELOXIDE_TOKEN environment variable.
/// The process refuses to start when neither is set (checked in `main`).
pub static BOT_TOKEN: Lazy<String> = Lazy::new(|| {
    env::var("BOT_TOKEN")
        .or_else(|_| env::var("TELOXIDE_TOKEN"))
        .unwrap_or_else(|_| String::new())
});

/// Cached yt-dlp binary path
/// Read once at startup from YTDL_BIN environment variable or defaults to "yt-dlp"
pub static YTDL_BIN: Lazy<String> = Lazy::new(|| env::var("YTDL_BIN").unwrap_or_else(|_| "yt-dlp".to_string()));

/// Log file path
/// Read from LOG_FILE_PATH environment variable
/// Default: vidra.log
pub static LOG_FILE_PATH: Lazy<String> =
    Lazy::new(|| env::var("LOG_FILE_PATH").unwrap_or_else(|_| "vidra.log".to_string()));

/// Custom Bot API server URL (optional)
/// Read from BOT_API_URL environment variable
pub static BOT_API_URL: Lazy<Option<String>> = Lazy::new(|| env::var("BOT_API_URL").ok());

/// Network configuration for the Telegram client
pub mod network {
    use super::Duration;

    /// HTTP request timeout (in seconds). Generous because file uploads
    /// ride on the same client.
    pub const REQUEST_TIMEOUT_SECS: u64 = 300;

    /// Request timeout duration
    pub fn timeout() -> Duration {
        Duration::from_secs(REQUEST_TIMEOUT_SECS)
    }
}

/// Format probing configuration
pub mod probe {
    use super::Duration;

    /// Timeout for the metadata-only yt-dlp call (in seconds)
    pub const TIMEOUT_SECS: u64 = 60;

    /// Probe timeout duration
    pub fn timeout() -> Duration {
        Duration::from_secs(TIMEOUT_SECS)
    }
}

/// Download configuration
pub mod download {
    /// Socket timeout passed to yt-dlp (in seconds)
    pub const SOCKET_TIMEOUT_SECS: u64 = 30;
}

/// Format menu configuration
pub mod menu {
    /// Maximum number of format buttons shown to the user.
    /// Formats past this count are dropped in encounter order.
    pub const MAX_FORMAT_BUTTONS: usize = 15;
}

/// User-facing error reporting configuration
pub mod errors {
    /// Maximum length (in characters) of an error string shown in chat.
    /// Full detail always goes to the server log.
    pub const USER_MESSAGE_MAX_CHARS: usize = 100;
}

/// Progress message editing configuration
pub mod progress {
    use super::Duration;

    /// Minimum interval between message edits (in seconds).
    /// Telegram rate-limits edits; every parsed chunk must not become one.
    pub const EDIT_INTERVAL_SECS: u64 = 2;

    /// A jump of this many percentage points forces an edit even inside
    /// the interval.
    pub const MIN_PERCENT_DELTA: u8 = 10;

    /// Edit interval duration
    pub fn edit_interval() -> Duration {
        Duration::from_secs(EDIT_INTERVAL_SECS)
    }
}

/// Session store configuration
pub mod session {
    use super::Duration;

    /// Sessions idle longer than this are evicted by the sweeper (in seconds)
    pub const TTL_SECS: u64 = 1800;

    /// Interval between sweeper runs (in seconds)
    pub const SWEEP_INTERVAL_SECS: u64 = 300;

    /// Session time-to-live duration
    pub fn ttl() -> Duration {
        Duration::from_secs(TTL_SECS)
    }

    /// Sweep interval duration
    pub fn sweep_interval() -> Duration {
        Duration::from_secs(SWEEP_INTERVAL_SECS)
    }
}
