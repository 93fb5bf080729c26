//! Handler types and dependencies

use crate::core::session::SessionStore;

/// Error type for handlers
pub type HandlerError = Box<dyn std::error::Error + Send + Sync + 'static>;

/// Dependencies shared by all handlers
#[derive(Clone)]
pub struct HandlerDeps {
    pub sessions: SessionStore,
}

impl HandlerDeps {
    pub fn new(sessions: SessionStore) -> Self {
        Self { sessions }
    }
}
