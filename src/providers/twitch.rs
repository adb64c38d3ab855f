use crate::core::{Host, VideoEntry};
use crate::error::{Error, Result};
use crate::providers::{require_credential, send_json, MetadataProvider};
use async_trait::async_trait;
use serde::Deserialize;
use std::sync::Arc;
use std::time::{Duration, Instant};
use tokio::sync::Mutex;
use tracing::{debug, warn};
use url::Url;

pub const TOKEN_URL: &str = "https://id.twitch.tv/oauth2/token";
pub const HELIX_BASE: &str = "https://api.twitch.tv/helix";
const THUMBNAIL_SIZE: (&str, &str) = ("320", "180");
/// Refresh the app token this long before Twitch says it expires.
const TOKEN_MARGIN: Duration = Duration::from_secs(60);

#[derive(Debug, Deserialize)]
struct TokenResponse {
    access_token: String,
    expires_in: u64,
}

#[derive(Debug, Deserialize)]
pub struct HelixResponse<T> {
    #[serde(default = "Vec::new")]
    pub data: Vec<T>,
}

#[derive(Debug, Deserialize)]
pub struct TwitchUser {
    pub id: String,
    pub login: String,
    pub display_name: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub profile_image_url: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct TwitchVideo {
    pub id: String,
    pub user_login: String,
    pub user_name: String,
    pub title: String,
    #[serde(default)]
    pub thumbnail_url: Option<String>,
}

impl HelixResponse<TwitchUser> {
    pub fn into_entry(self) -> Result<VideoEntry> {
        let user = self.data.into_iter().next().ok_or(Error::NotFound)?;
        Ok(VideoEntry {
            host: Host::Twitch,
            // The player and chat are keyed by login, not by numeric id
            id: user.login,
            title: Some(user.description).filter(|d| !d.is_empty()),
            channel_id: Some(user.id),
            channel_name: user.display_name,
            livestream_chat: true,
            thumbnail_url: user.profile_image_url.filter(|u| !u.is_empty()),
        })
    }
}

impl HelixResponse<TwitchVideo> {
    pub fn into_entry(self) -> Result<VideoEntry> {
        let video = self.data.into_iter().next().ok_or(Error::NotFound)?;
        let thumbnail_url = video.thumbnail_url.filter(|u| !u.is_empty()).map(|u| {
            u.replace("%{width}", THUMBNAIL_SIZE.0)
                .replace("%{height}", THUMBNAIL_SIZE.1)
        });

        Ok(VideoEntry {
            host: Host::TwitchVod,
            id: video.id,
            title: Some(video.title),
            channel_id: Some(video.user_login),
            channel_name: video.user_name,
            livestream_chat: true,
            thumbnail_url,
        })
    }
}

/// Client-credentials app token shared by the Twitch providers.
#[derive(Clone)]
pub struct TwitchAuth {
    client: reqwest::Client,
    client_id: Option<String>,
    client_secret: Option<String>,
    token_url: String,
    helix_base: String,
    token: Arc<Mutex<Option<(String, Instant)>>>,
}

impl TwitchAuth {
    pub fn new(client: reqwest::Client, client_id: Option<String>, client_secret: Option<String>) -> Self {
        Self::with_endpoints(client, client_id, client_secret, TOKEN_URL, HELIX_BASE)
    }

    pub fn with_endpoints(
        client: reqwest::Client,
        client_id: Option<String>,
        client_secret: Option<String>,
        token_url: &str,
        helix_base: &str,
    ) -> Self {
        Self {
            client,
            client_id,
            client_secret,
            token_url: token_url.to_string(),
            helix_base: helix_base.trim_end_matches('/').to_string(),
            token: Arc::new(Mutex::new(None)),
        }
    }

    /// Drops the cached token so the next call requests a new one.
    async fn invalidate(&self) {
        *self.token.lock().await = None;
    }

    async fn access_token(&self) -> Result<(String, String)> {
        let client_id = require_credential(&self.client_id, "TWITCH_CLIENT_ID")?;
        let client_secret = require_credential(&self.client_secret, "TWITCH_CLIENT_SECRET")?;

        let mut cached = self.token.lock().await;
        if let Some((token, expires_at)) = cached.as_ref() {
            if Instant::now() < *expires_at {
                return Ok((client_id.to_string(), token.clone()));
            }
        }

        debug!("Requesting Twitch app access token");
        let url = Url::parse_with_params(
            &self.token_url,
            &[
                ("client_id", client_id),
                ("client_secret", client_secret),
                ("grant_type", "client_credentials"),
            ],
        )
        .map_err(|e| Error::upstream(500, Some(e.to_string())))?;
        let response: TokenResponse = send_json(self.client.post(url)).await?;

        let lifetime = Duration::from_secs(response.expires_in).saturating_sub(TOKEN_MARGIN);
        *cached = Some((response.access_token.clone(), Instant::now() + lifetime));
        Ok((client_id.to_string(), response.access_token))
    }

    async fn helix<T: serde::de::DeserializeOwned>(&self, resource: &str, query: (&str, &str)) -> Result<HelixResponse<T>> {
        let url = Url::parse_with_params(&format!("{}/{}", self.helix_base, resource), &[query])
            .map_err(|e| Error::upstream(500, Some(e.to_string())))?;

        match self.helix_get(url.clone()).await {
            // Revoked or rotated token: fetch a new one and try once more
            Err(Error::UpstreamFetch { status: 401, .. }) => {
                warn!("Twitch rejected the cached app token, refreshing");
                self.invalidate().await;
                self.helix_get(url).await
            }
            other => other,
        }
    }

    async fn helix_get<T: serde::de::DeserializeOwned>(&self, url: Url) -> Result<HelixResponse<T>> {
        let (client_id, token) = self.access_token().await?;
        send_json(
            self.client
                .get(url)
                .bearer_auth(token)
                .header("Client-Id", client_id),
        )
        .await
    }
}

pub struct TwitchProvider {
    auth: TwitchAuth,
}

impl TwitchProvider {
    pub fn new(auth: TwitchAuth) -> Self {
        Self { auth }
    }
}

#[async_trait]
impl MetadataProvider for TwitchProvider {
    fn host(&self) -> Host {
        Host::Twitch
    }

    async fn lookup(&self, id: &str) -> Result<VideoEntry> {
        self.auth
            .helix::<TwitchUser>("users", ("login", id))
            .await?
            .into_entry()
    }
}

pub struct TwitchVodProvider {
    auth: TwitchAuth,
}

impl TwitchVodProvider {
    pub fn new(auth: TwitchAuth) -> Self {
        Self { auth }
    }
}

#[async_trait]
impl MetadataProvider for TwitchVodProvider {
    fn host(&self) -> Host {
        Host::TwitchVod
    }

    async fn lookup(&self, id: &str) -> Result<VideoEntry> {
        self.auth
            .helix::<TwitchVideo>("videos", ("id", id))
            .await?
            .into_entry()
    }
}
