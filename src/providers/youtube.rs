use crate::core::{Host, VideoEntry};
use crate::error::{Error, Result};
use crate::providers::{require_credential, send_json, MetadataProvider};
use async_trait::async_trait;
use serde::Deserialize;
use std::collections::HashMap;
use url::Url;

pub const API_BASE: &str = "https://youtube.googleapis.com/youtube/v3";

#[derive(Debug, Deserialize)]
pub struct YouTubeResponse {
    #[serde(default)]
    pub items: Vec<YouTubeItem>,
}

#[derive(Debug, Deserialize)]
pub struct YouTubeItem {
    pub id: String,
    pub snippet: Snippet,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Snippet {
    pub title: String,
    pub channel_id: String,
    pub channel_title: String,
    #[serde(default)]
    pub live_broadcast_content: Option<String>,
    #[serde(default)]
    pub thumbnails: HashMap<String, Thumbnail>,
}

#[derive(Debug, Deserialize)]
pub struct Thumbnail {
    pub url: String,
}

impl YouTubeResponse {
    pub fn into_entry(self, host: Host) -> Result<VideoEntry> {
        let item = self.items.into_iter().next().ok_or(Error::NotFound)?;
        let snippet = item.snippet;
        let thumbnail_url = snippet.thumbnails.get("default").map(|t| t.url.clone());

        Ok(VideoEntry {
            host,
            id: item.id,
            title: Some(snippet.title),
            channel_id: Some(snippet.channel_id),
            channel_name: snippet.channel_title,
            livestream_chat: host == Host::Youtube
                && snippet.live_broadcast_content.as_deref() == Some("live"),
            thumbnail_url,
        })
    }
}

async fn fetch(
    client: &reqwest::Client,
    base_url: &str,
    api_key: &Option<String>,
    resource: &str,
    id: &str,
) -> Result<YouTubeResponse> {
    let key = require_credential(api_key, "YOUTUBE_API_KEY")?;
    let url = Url::parse_with_params(
        &format!("{}/{}", base_url, resource),
        &[("id", id), ("key", key), ("part", "snippet,id")],
    )
    .map_err(|e| Error::upstream(500, Some(e.to_string())))?;

    send_json(client.get(url)).await
}

pub struct YouTubeProvider {
    client: reqwest::Client,
    base_url: String,
    api_key: Option<String>,
}

impl YouTubeProvider {
    pub fn new(client: reqwest::Client, api_key: Option<String>) -> Self {
        Self::with_base_url(client, API_BASE, api_key)
    }

    pub fn with_base_url(client: reqwest::Client, base_url: &str, api_key: Option<String>) -> Self {
        Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
            api_key,
        }
    }
}

#[async_trait]
impl MetadataProvider for YouTubeProvider {
    fn host(&self) -> Host {
        Host::Youtube
    }

    async fn lookup(&self, id: &str) -> Result<VideoEntry> {
        fetch(&self.client, &self.base_url, &self.api_key, "videos", id)
            .await?
            .into_entry(Host::Youtube)
    }
}

pub struct YouTubePlaylistProvider {
    client: reqwest::Client,
    base_url: String,
    api_key: Option<String>,
}

impl YouTubePlaylistProvider {
    pub fn new(client: reqwest::Client, api_key: Option<String>) -> Self {
        Self::with_base_url(client, API_BASE, api_key)
    }

    pub fn with_base_url(client: reqwest::Client, base_url: &str, api_key: Option<String>) -> Self {
        Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
            api_key,
        }
    }
}

#[async_trait]
impl MetadataProvider for YouTubePlaylistProvider {
    fn host(&self) -> Host {
        Host::YoutubePlaylist
    }

    async fn lookup(&self, id: &str) -> Result<VideoEntry> {
        fetch(&self.client, &self.base_url, &self.api_key, "playlists", id)
            .await?
            .into_entry(Host::YoutubePlaylist)
    }
}
