//! Per-user download sessions
//!
//! A session links the URL a user submitted to its probed metadata while the
//! format menu is on screen. The store is a single mutex-guarded map, so
//! concurrent events for the same user (duplicate button press, new link
//! mid-download) serialize instead of racing. Sessions are removed on every
//! terminal download outcome; a periodic sweeper evicts the ones users
//! abandoned without picking a format.

use std::collections::HashMap;
use std::sync::Arc;
use teloxide::types::ChatId;
use tokio::sync::Mutex;
use tokio::time::{Duration, Instant};
use url::Url;

use crate::core::config;
use crate::download::probe::ProbeInfo;

/// One user's in-flight download flow: the submitted link and what the
/// probe found for it.
#[derive(Debug, Clone)]
pub struct Session {
    /// The URL the user submitted
    pub link: Url,
    /// Probed metadata (title, uploader, available formats)
    pub info: ProbeInfo,
    /// Last time this session was touched, for TTL eviction
    last_activity: Instant,
}

/// Process-wide store of active sessions, at most one per chat.
#[derive(Clone, Default)]
pub struct SessionStore {
    sessions: Arc<Mutex<HashMap<ChatId, Session>>>,
}

impl SessionStore {
    pub fn new() -> Self {
        Self {
            sessions: Arc::new(Mutex::new(HashMap::new())),
        }
    }

    /// Creates or replaces the session for a chat.
    ///
    /// A new link always overwrites the previous session: the old menu's
    /// buttons then act on the new link's formats, which is the price of
    /// one-session-per-user.
    pub async fn put(&self, chat_id: ChatId, link: Url, info: ProbeInfo) {
        let mut sessions = self.sessions.lock().await;
        let replaced = sessions
            .insert(
                chat_id,
                Session {
                    link,
                    info,
                    last_activity: Instant::now(),
                },
            )
            .is_some();
        if replaced {
            log::info!("Replaced existing session for chat {}", chat_id);
        }
    }

    /// Returns a copy of the chat's session, refreshing its activity
    /// timestamp so the sweeper does not evict a flow mid-download.
    pub async fn get(&self, chat_id: ChatId) -> Option<Session> {
        let mut sessions = self.sessions.lock().await;
        let session = sessions.get_mut(&chat_id)?;
        session.last_activity = Instant::now();
        Some(session.clone())
    }

    /// Removes and returns the chat's session, if any.
    pub async fn remove(&self, chat_id: ChatId) -> Option<Session> {
        self.sessions.lock().await.remove(&chat_id)
    }

    /// Evicts sessions idle longer than `ttl`.
    ///
    /// # Returns
    ///
    /// The number of sessions removed.
    pub async fn sweep_expired(&self, ttl: Duration) -> usize {
        let mut sessions = self.sessions.lock().await;
        let before = sessions.len();
        sessions.retain(|_, session| session.last_activity.elapsed() < ttl);
        before - sessions.len()
    }

    /// Number of active sessions.
    pub async fn len(&self) -> usize {
        self.sessions.lock().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.sessions.lock().await.is_empty()
    }
}

/// Spawns the background sweeper that evicts abandoned sessions.
///
/// Runs forever on the configured interval; the returned handle is only
/// useful for tests.
pub fn spawn_sweeper(store: SessionStore) -> tokio::task::JoinHandle<()> {
    tokio::spawn(async move {
        let mut ticker = tokio::time::interval(config::session::sweep_interval());
        // First tick fires immediately; skip it so startup stays quiet.
        ticker.tick().await;
        loop {
            ticker.tick().await;
            let evicted = store.sweep_expired(config::session::ttl()).await;
            if evicted > 0 {
                log::info!("🧹 Evicted {} abandoned session(s)", evicted);
            }
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::download::probe::ProbeInfo;

    fn probe_stub(title: &str) -> ProbeInfo {
        ProbeInfo {
            title: title.to_string(),
            uploader: Some("Channel".to_string()),
            formats: vec![],
        }
    }

    fn link(s: &str) -> Url {
        Url::parse(s).unwrap()
    }

    #[tokio::test]
    async fn test_put_get_remove_lifecycle() {
        let store = SessionStore::new();
        let chat = ChatId(1);

        assert!(store.get(chat).await.is_none());

        store.put(chat, link("https://youtu.be/abc123"), probe_stub("Clip")).await;
        let session = store.get(chat).await.unwrap();
        assert_eq!(session.info.title, "Clip");
        assert_eq!(session.link.as_str(), "https://youtu.be/abc123");

        let removed = store.remove(chat).await;
        assert!(removed.is_some());
        assert!(store.get(chat).await.is_none());
    }

    #[tokio::test]
    async fn test_at_most_one_session_per_chat() {
        let store = SessionStore::new();
        let chat = ChatId(2);

        store.put(chat, link("https://youtu.be/first"), probe_stub("First")).await;
        store.put(chat, link("https://youtu.be/second"), probe_stub("Second")).await;

        assert_eq!(store.len().await, 1);
        let session = store.get(chat).await.unwrap();
        assert_eq!(session.info.title, "Second");
    }

    #[tokio::test]
    async fn test_remove_absent_is_none() {
        let store = SessionStore::new();
        assert!(store.remove(ChatId(3)).await.is_none());
    }

    #[tokio::test]
    async fn test_sweep_evicts_idle_sessions() {
        let store = SessionStore::new();
        store
            .put(ChatId(4), link("https://youtu.be/a"), probe_stub("A"))
            .await;
        store
            .put(ChatId(5), link("https://youtu.be/b"), probe_stub("B"))
            .await;

        // Zero TTL marks everything as expired
        let evicted = store.sweep_expired(Duration::ZERO).await;
        assert_eq!(evicted, 2);
        assert!(store.is_empty().await);
    }

    #[tokio::test]
    async fn test_sweep_keeps_fresh_sessions() {
        let store = SessionStore::new();
        store
            .put(ChatId(6), link("https://youtu.be/c"), probe_stub("C"))
            .await;

        let evicted = store.sweep_expired(Duration::from_secs(3600)).await;
        assert_eq!(evicted, 0);
        assert_eq!(store.len().await, 1);
    }

    #[tokio::test]
    async fn test_sessions_are_per_chat() {
        let store = SessionStore::new();
        store
            .put(ChatId(7), link("https://youtu.be/x"), probe_stub("X"))
            .await;

        assert!(store.get(ChatId(8)).await.is_none());
        assert!(store.get(ChatId(7)).await.is_some());
    }
}
