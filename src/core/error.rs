use thiserror::Error;

/// Centralized error types for the application
///
/// A closed taxonomy so callers can apply distinct policies per kind:
/// precondition failures (`Validation`) become user-facing warnings,
/// upstream failures (`Probe`, `Download`) are logged in full and surfaced
/// truncated, transport failures bubble up through the dispatcher.
#[derive(Error, Debug)]
pub enum AppError {
    /// Invalid user input (unrecognized link, missing URL in message)
    #[error("Validation error: {0}")]
    Validation(String),

    /// Metadata probe failures (yt-dlp exit code, timeout, bad JSON shape)
    #[error("Probe error: {0}")]
    Probe(String),

    /// Download failures (yt-dlp exit code, spawn failure, missing output)
    #[error("Download error: {0}")]
    Download(String),

    /// Failed to deliver the finished file through Telegram
    #[error("Failed to send file: {0}")]
    SendFailed(String),

    /// Telegram API errors
    #[error("Telegram error: {0}")]
    Telegram(#[from] teloxide::RequestError),

    /// IO errors
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// URL parsing errors
    #[error("URL parsing error: {0}")]
    Url(#[from] url::ParseError),

    /// JSON deserialization errors (probe output)
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Type alias for Result with AppError
pub type AppResult<T> = Result<T, AppError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_includes_detail() {
        let err = AppError::Probe("yt-dlp exited with status 1".to_string());
        assert_eq!(err.to_string(), "Probe error: yt-dlp exited with status 1");
    }

    #[test]
    fn test_from_io_error() {
        let io = std::io::Error::new(std::io::ErrorKind::NotFound, "no such file");
        let err: AppError = io.into();
        assert!(matches!(err, AppError::Io(_)));
    }

    #[test]
    fn test_from_url_error() {
        let err: AppError = url::Url::parse("not a url").unwrap_err().into();
        assert!(matches!(err, AppError::Url(_)));
    }
}
