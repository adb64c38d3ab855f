pub mod dailymotion;
pub mod m3u8;
pub mod twitch;
pub mod vimeo;
pub mod youtube;

use crate::config::Config;
use crate::core::{Host, VideoEntry};
use crate::error::{Error, Result};
use async_trait::async_trait;
use serde::de::DeserializeOwned;
use serde_json::Value;
use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, warn};

pub use dailymotion::{DailymotionPlaylistProvider, DailymotionProvider};
pub use m3u8::DirectStreamProvider;
pub use twitch::{TwitchProvider, TwitchVodProvider};
pub use vimeo::VimeoProvider;
pub use youtube::{YouTubePlaylistProvider, YouTubeProvider};

/// Looks up metadata for one host and reshapes it into a `VideoEntry`.
#[async_trait]
pub trait MetadataProvider: Send + Sync {
    fn host(&self) -> Host;
    async fn lookup(&self, id: &str) -> Result<VideoEntry>;
}

#[derive(Clone, Default)]
pub struct ProviderRegistry {
    providers: HashMap<Host, Arc<dyn MetadataProvider>>,
    deadline: Option<Duration>,
}

impl ProviderRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a provider for every host that has an upstream API.
    /// Credentials are checked per request, so a missing key only breaks the
    /// hosts that need it.
    pub fn from_config(config: &Config) -> Result<Self> {
        let deadline = config.upstream_deadline();
        let client = crate::utils::http_client(deadline)?;
        let twitch = twitch::TwitchAuth::new(
            client.clone(),
            config.twitch_client_id.clone(),
            config.twitch_client_secret.clone(),
        );

        let mut registry = Self::new().with_deadline(deadline);
        registry.register(Arc::new(YouTubeProvider::new(client.clone(), config.youtube_api_key.clone())));
        registry.register(Arc::new(YouTubePlaylistProvider::new(client.clone(), config.youtube_api_key.clone())));
        registry.register(Arc::new(TwitchProvider::new(twitch.clone())));
        registry.register(Arc::new(TwitchVodProvider::new(twitch)));
        registry.register(Arc::new(DailymotionProvider::new(client.clone())));
        registry.register(Arc::new(DailymotionPlaylistProvider::new(client.clone())));
        registry.register(Arc::new(VimeoProvider::new(client)));
        Ok(registry)
    }

    /// Caps each lookup, however many upstream calls it makes.
    pub fn with_deadline(mut self, deadline: Duration) -> Self {
        self.deadline = Some(deadline);
        self
    }

    pub fn register(&mut self, provider: Arc<dyn MetadataProvider>) {
        self.providers.insert(provider.host(), provider);
    }

    pub fn get(&self, host: Host) -> Option<&Arc<dyn MetadataProvider>> {
        self.providers.get(&host)
    }

    pub async fn lookup(&self, host: &str, id: &str) -> Result<VideoEntry> {
        let host: Host = host.parse()?;
        let provider = self
            .get(host)
            .ok_or_else(|| Error::UnsupportedHost(host.to_string()))?;
        if id.is_empty() {
            return Err(Error::validation("Provide video link or Id"));
        }
        debug!("Looking up {} {}", host, id);

        let Some(deadline) = self.deadline else {
            return provider.lookup(id).await;
        };
        match tokio::time::timeout(deadline, provider.lookup(id)).await {
            Ok(result) => result,
            Err(_) => {
                warn!("Lookup of {} {} exceeded {:?}", host, id, deadline);
                Err(Error::upstream(504, None))
            }
        }
    }
}

/// Fails with `Configuration` when a credential is missing. The detail goes
/// to the log only.
pub(crate) fn require_credential<'a>(value: &'a Option<String>, name: &str) -> Result<&'a str> {
    match value.as_deref() {
        Some(v) if !v.is_empty() => Ok(v),
        _ => {
            tracing::error!("Provide {} env variable", name);
            Err(Error::Configuration(format!("{} is not set", name)))
        }
    }
}

/// Sends a request and decodes a JSON body, turning non-2xx answers into
/// `UpstreamFetch` with whatever message the provider put in the body.
pub(crate) async fn send_json<T: DeserializeOwned>(request: reqwest::RequestBuilder) -> Result<T> {
    let response = request.send().await?;
    let status = response.status();

    if !status.is_success() {
        let body = response.text().await.unwrap_or_default();
        let message = serde_json::from_str::<Value>(&body)
            .ok()
            .and_then(|value| upstream_message(&value));
        warn!("Upstream returned HTTP {}: {}", status, body);
        return Err(Error::upstream(status.as_u16(), message));
    }

    Ok(response.json::<T>().await?)
}

/// Digs the human-readable message out of a provider error body.
///
/// Google: `{"error": {"message": ..}}`, Twitch: `{"message": ..}`,
/// Dailymotion: `{"error": {"message": ..}}` or `{"error": ".."}`.
pub fn upstream_message(body: &Value) -> Option<String> {
    let message = body
        .pointer("/error/message")
        .or_else(|| body.get("message"))
        .or_else(|| body.get("error").filter(|e| e.is_string()))?;
    message.as_str().map(str::to_string)
}
