use crate::core::{Host, VideoEntry};
use crate::error::Result;
use crate::providers::{send_json, MetadataProvider};
use async_trait::async_trait;
use serde::Deserialize;

pub const API_BASE: &str = "https://api.dailymotion.com";
const VIDEO_FIELDS: &str = "id,title,owner.id,owner.username,thumbnail_120_url";
const PLAYLIST_FIELDS: &str = "id,name,owner.id,owner.username,thumbnail_120_url";

/// Dailymotion answers `fields=owner.id` with a flat `"owner.id"` key.
#[derive(Debug, Deserialize)]
pub struct DailymotionItem {
    pub id: String,
    #[serde(alias = "name")]
    pub title: Option<String>,
    #[serde(rename = "owner.id")]
    pub owner_id: Option<String>,
    #[serde(rename = "owner.username", default)]
    pub owner_username: Option<String>,
    #[serde(default)]
    pub thumbnail_120_url: Option<String>,
}

impl DailymotionItem {
    pub fn into_entry(self, host: Host) -> VideoEntry {
        VideoEntry {
            host,
            id: self.id,
            title: self.title,
            channel_id: self.owner_id,
            channel_name: self.owner_username.unwrap_or_default(),
            livestream_chat: false,
            thumbnail_url: self.thumbnail_120_url,
        }
    }
}

async fn fetch(client: &reqwest::Client, base_url: &str, resource: &str, id: &str, fields: &str) -> Result<DailymotionItem> {
    let url = format!("{}/{}/{}", base_url, resource, urlencoding::encode(id));
    send_json(client.get(url).query(&[("fields", fields)])).await
}

pub struct DailymotionProvider {
    client: reqwest::Client,
    base_url: String,
}

impl DailymotionProvider {
    pub fn new(client: reqwest::Client) -> Self {
        Self::with_base_url(client, API_BASE)
    }

    pub fn with_base_url(client: reqwest::Client, base_url: &str) -> Self {
        Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }
}

#[async_trait]
impl MetadataProvider for DailymotionProvider {
    fn host(&self) -> Host {
        Host::Dailymotion
    }

    async fn lookup(&self, id: &str) -> Result<VideoEntry> {
        let item = fetch(&self.client, &self.base_url, "video", id, VIDEO_FIELDS).await?;
        Ok(item.into_entry(Host::Dailymotion))
    }
}

pub struct DailymotionPlaylistProvider {
    client: reqwest::Client,
    base_url: String,
}

impl DailymotionPlaylistProvider {
    pub fn new(client: reqwest::Client) -> Self {
        Self::with_base_url(client, API_BASE)
    }

    pub fn with_base_url(client: reqwest::Client, base_url: &str) -> Self {
        Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }
}

#[async_trait]
impl MetadataProvider for DailymotionPlaylistProvider {
    fn host(&self) -> Host {
        Host::DailymotionPlaylist
    }

    async fn lookup(&self, id: &str) -> Result<VideoEntry> {
        let item = fetch(&self.client, &self.base_url, "playlist", id, PLAYLIST_FIELDS).await?;
        Ok(item.into_entry(Host::DailymotionPlaylist))
    }
}
