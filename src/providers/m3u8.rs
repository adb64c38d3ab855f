use crate::core::{Host, VideoEntry};
use crate::error::{Error, Result};
use crate::providers::MetadataProvider;
use async_trait::async_trait;
use url::Url;

/// Raw HLS manifests have no metadata API. The entry is built from the URL
/// alone, so this provider is only used in-process and never served.
#[derive(Default)]
pub struct DirectStreamProvider;

impl DirectStreamProvider {
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl MetadataProvider for DirectStreamProvider {
    fn host(&self) -> Host {
        Host::M3u8
    }

    async fn lookup(&self, id: &str) -> Result<VideoEntry> {
        let url = Url::parse(id).map_err(|_| Error::validation("Provide a valid stream URL"))?;
        let title = url
            .path_segments()
            .and_then(|mut segments| segments.next_back())
            .filter(|name| !name.is_empty())
            .map(str::to_string);

        Ok(VideoEntry {
            host: Host::M3u8,
            id: id.to_string(),
            title,
            channel_id: None,
            channel_name: url.host_str().unwrap_or_default().to_string(),
            livestream_chat: false,
            thumbnail_url: None,
        })
    }
}
