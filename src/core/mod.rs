//! Core utilities: configuration, errors, logging, sessions, validation

pub mod config;
pub mod error;
pub mod logging;
pub mod session;
pub mod utils;
pub mod validation;

pub use error::{AppError, AppResult};
pub use logging::init_logger;
pub use session::SessionStore;
