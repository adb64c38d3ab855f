use crate::core::{Host, VideoEntry};
use crate::error::Result;
use crate::providers::{send_json, MetadataProvider};
use async_trait::async_trait;
use serde::Deserialize;

// oEmbed needs no credentials, unlike the full Vimeo API.
pub const OEMBED_URL: &str = "https://vimeo.com/api/oembed.json";

#[derive(Debug, Deserialize)]
pub struct VimeoOEmbed {
    pub video_id: Option<u64>,
    pub title: Option<String>,
    #[serde(default)]
    pub author_name: String,
    pub author_url: Option<String>,
    pub thumbnail_url: Option<String>,
}

impl VimeoOEmbed {
    /// `id` is what was asked for; oEmbed omits `video_id` for some
    /// unlisted videos.
    pub fn into_entry(self, id: &str) -> VideoEntry {
        let channel_id = self
            .author_url
            .as_deref()
            .map(|url| url.trim_end_matches('/'))
            .and_then(|url| url.rsplit('/').next())
            .filter(|segment| !segment.is_empty())
            .map(str::to_string);

        VideoEntry {
            host: Host::Vimeo,
            id: self.video_id.map(|v| v.to_string()).unwrap_or_else(|| id.to_string()),
            title: self.title,
            channel_id,
            channel_name: self.author_name,
            livestream_chat: false,
            thumbnail_url: self.thumbnail_url,
        }
    }
}

pub struct VimeoProvider {
    client: reqwest::Client,
    oembed_url: String,
}

impl VimeoProvider {
    pub fn new(client: reqwest::Client) -> Self {
        Self::with_oembed_url(client, OEMBED_URL)
    }

    pub fn with_oembed_url(client: reqwest::Client, oembed_url: &str) -> Self {
        Self {
            client,
            oembed_url: oembed_url.to_string(),
        }
    }
}

#[async_trait]
impl MetadataProvider for VimeoProvider {
    fn host(&self) -> Host {
        Host::Vimeo
    }

    async fn lookup(&self, id: &str) -> Result<VideoEntry> {
        let video_url = format!("https://vimeo.com/{}", id);
        let oembed: VimeoOEmbed =
            send_json(self.client.get(&self.oembed_url).query(&[("url", video_url.as_str())])).await?;
        Ok(oembed.into_entry(id))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_oembed_entry() {
        let oembed: VimeoOEmbed = serde_json::from_value(json!({
            "type": "video",
            "version": "1.0",
            "provider_name": "Vimeo",
            "title": "Short film",
            "author_name": "Some Studio",
            "author_url": "https://vimeo.com/somestudio",
            "thumbnail_url": "https://i.vimeocdn.com/video/123-d_295x166",
            "video_id": 684758411u64
        }))
        .unwrap();

        let entry = oembed.into_entry("684758411");
        assert_eq!(entry.id, "684758411");
        assert_eq!(entry.channel_id.as_deref(), Some("somestudio"));
        assert_eq!(entry.channel_name, "Some Studio");
        assert!(!entry.livestream_chat);
    }

    #[test]
    fn test_missing_video_id_keeps_requested_id() {
        let oembed: VimeoOEmbed = serde_json::from_value(json!({"title": "Unlisted"})).unwrap();
        let entry = oembed.into_entry("684758411");
        assert_eq!(entry.id, "684758411");
        assert!(entry.channel_id.is_none());
    }
}
