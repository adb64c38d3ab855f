use crate::core::{create_url_params, playlist, Host, VideoEntry};
use crate::error::{Error, Result};
use crate::gateway::GatewayClient;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use tokio::sync::RwLock;
use tracing::{debug, info};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AddOutcome {
    Added(VideoEntry),
    /// Another lookup was still in flight; the submission was dropped.
    Ignored,
}

#[derive(Default)]
struct State {
    videos: Arc<Vec<VideoEntry>>,
    active_chat: Option<(Host, String)>,
    show_chat: bool,
}

/// Headless watch-page state. The list is swapped wholesale on every change,
/// so readers always hold a consistent snapshot.
pub struct Session {
    gateway: GatewayClient,
    fetching: AtomicBool,
    state: RwLock<State>,
}

/// Clears the busy flag however the lookup ends.
struct FetchGuard<'a>(&'a AtomicBool);

impl Drop for FetchGuard<'_> {
    fn drop(&mut self) {
        self.0.store(false, Ordering::Release);
    }
}

impl Session {
    pub fn new(gateway: GatewayClient) -> Self {
        Self {
            gateway,
            fetching: AtomicBool::new(false),
            state: RwLock::new(State::default()),
        }
    }

    pub async fn videos(&self) -> Arc<Vec<VideoEntry>> {
        self.state.read().await.videos.clone()
    }

    pub fn is_fetching(&self) -> bool {
        self.fetching.load(Ordering::Acquire)
    }

    /// `host` is the raw form value; empty means nothing was selected.
    pub async fn add_video(&self, host: &str, input: &str) -> Result<AddOutcome> {
        if self
            .fetching
            .compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .is_err()
        {
            debug!("Lookup in flight, ignoring submission");
            return Ok(AddOutcome::Ignored);
        }
        let _guard = FetchGuard(&self.fetching);

        let host = Host::parse_optional(host)?.ok_or_else(|| Error::validation("Select video host"))?;
        if input.is_empty() {
            return Err(Error::validation("Provide video link or ID"));
        }
        let id = host.extract_id(input);

        if playlist::contains(&self.videos().await, host, &id) {
            return Err(Error::validation("Video already on the list"));
        }

        let entry = self.gateway.resolve(host, &id).await?;

        let mut state = self.state.write().await;
        // Guards against a shared list loaded while the lookup was running
        if playlist::contains(&state.videos, entry.host, &entry.id) {
            return Err(Error::validation("Video already on the list"));
        }
        state.videos = Arc::new(playlist::append(&state.videos, entry.clone()));
        info!("Added {} {}", entry.host, entry.id);
        Ok(AddOutcome::Added(entry))
    }

    pub async fn remove_video(&self, host: Host, id: &str) {
        let mut state = self.state.write().await;
        state.videos = Arc::new(playlist::remove(&state.videos, host, id));

        let was_active = matches!(&state.active_chat, Some((h, i)) if *h == host && i == id);
        if was_active {
            state.active_chat = None;
            state.show_chat = false;
        }
    }

    pub async fn reorder_video(&self, host: Host, id: &str, target: isize) {
        let mut state = self.state.write().await;
        state.videos = Arc::new(playlist::reorder(&state.videos, host, id, target));
    }

    /// Opens or closes the chat panel, picking the first chat-capable entry
    /// when none is active. Returns whether the panel is now shown.
    pub async fn toggle_chat(&self) -> bool {
        let mut state = self.state.write().await;
        if !state.show_chat && state.active_chat.is_none() {
            let first = playlist::first_chat(&state.videos).map(|entry| (entry.host, entry.id.clone()));
            if first.is_none() {
                return false;
            }
            state.active_chat = first;
        }
        state.show_chat = !state.show_chat;
        state.show_chat
    }

    pub async fn change_chat(&self, host: Host, id: &str) -> Result<()> {
        let mut state = self.state.write().await;
        let entry = state
            .videos
            .iter()
            .find(|entry| entry.is(host, id))
            .ok_or_else(|| Error::validation("Provide Id"))?;
        if !entry.livestream_chat {
            return Err(Error::UnsupportedOperation {
                host,
                operation: "chat",
            });
        }
        state.active_chat = Some((host, id.to_string()));
        Ok(())
    }

    pub async fn active_chat(&self) -> Option<VideoEntry> {
        let state = self.state.read().await;
        let (host, id) = state.active_chat.as_ref()?;
        state.videos.iter().find(|entry| entry.is(*host, id)).cloned()
    }

    pub async fn share_params(&self) -> String {
        create_url_params(&self.videos().await)
    }

    /// Replaces the list with whatever a shared `list` value hydrates to.
    pub async fn load_shared(&self, raw_list: &str) -> usize {
        let videos = self.gateway.hydrate(raw_list).await;
        let count = videos.len();
        let mut state = self.state.write().await;
        state.videos = Arc::new(videos);
        state.active_chat = None;
        state.show_chat = false;
        count
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Config;

    fn session() -> Session {
        Session::new(GatewayClient::new(&Config::default()).unwrap())
    }

    #[tokio::test]
    async fn test_add_requires_host_and_input() {
        let session = session();
        let err = session.add_video("", "https://www.twitch.tv/fl0m").await.unwrap_err();
        assert_eq!(err.to_string(), "Select video host");

        let err = session.add_video("twitch", "").await.unwrap_err();
        assert_eq!(err.to_string(), "Provide video link or ID");

        assert!(!session.is_fetching());
        assert!(session.videos().await.is_empty());
    }

    #[tokio::test]
    async fn test_add_stream_without_gateway() {
        let session = session();
        let url = "https://example.com/live/index.m3u8";
        let outcome = session.add_video("m3u8", url).await.unwrap();
        assert!(matches!(outcome, AddOutcome::Added(ref e) if e.id == url));

        let err = session.add_video("m3u8", url).await.unwrap_err();
        assert_eq!(err.to_string(), "Video already on the list");
        assert_eq!(session.videos().await.len(), 1);
    }

    #[tokio::test]
    async fn test_busy_flag_ignores_submission() {
        let session = session();
        session.fetching.store(true, Ordering::Release);
        let outcome = session.add_video("m3u8", "https://example.com/a.m3u8").await.unwrap();
        assert_eq!(outcome, AddOutcome::Ignored);
        assert!(session.videos().await.is_empty());
    }

    #[tokio::test]
    async fn test_toggle_chat_without_chat_entries() {
        let session = session();
        session.add_video("m3u8", "https://example.com/a.m3u8").await.unwrap();
        assert!(!session.toggle_chat().await);
        assert!(session.active_chat().await.is_none());
    }
}
