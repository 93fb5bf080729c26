//! Download management: probing, fetching, and progress parsing

pub mod downloader;
pub mod probe;
pub mod progress;
pub mod send;
pub mod ytdlp;

// Re-exports for convenience
pub use downloader::{download_format, find_downloaded_file};
pub use probe::{probe_formats, FormatDescriptor, ProbeInfo};
pub use progress::{parse_progress, ProgressInfo};
pub use send::send_media;
