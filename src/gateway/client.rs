use crate::config::Config;
use crate::core::{decode_list, Host, VideoEntry};
use crate::error::{Error, Result, UNKNOWN_SERVER_ERROR};
use crate::providers::{DirectStreamProvider, MetadataProvider};
use futures::future::join_all;
use serde::Deserialize;
use tracing::{debug, warn};

#[derive(Debug, Deserialize)]
struct ErrorBody {
    error: Option<String>,
}

/// Talks to the per-host lookup endpoints.
#[derive(Clone)]
pub struct GatewayClient {
    client: reqwest::Client,
    base_url: String,
}

impl GatewayClient {
    pub fn new(config: &Config) -> Result<Self> {
        Ok(Self {
            client: crate::utils::http_client(config.timeout())?,
            base_url: config.gateway_url.trim_end_matches('/').to_string(),
        })
    }

    pub async fn fetch_video_metadata(&self, host: Option<Host>, id: &str) -> Result<VideoEntry> {
        let host = host.ok_or_else(|| Error::validation("Select video host"))?;
        if id.is_empty() {
            return Err(Error::validation("Provide video link or ID"));
        }

        let url = format!("{}/api/{}", self.base_url, host);
        debug!("GET {}?id={}", url, id);

        let response = self
            .client
            .get(&url)
            .query(&[("id", id)])
            .send()
            .await
            .map_err(normalize_transport_error)?;

        let status = response.status();
        if !status.is_success() {
            let message = response
                .json::<ErrorBody>()
                .await
                .ok()
                .and_then(|body| body.error);
            return Err(Error::upstream(status.as_u16(), message));
        }

        response.json::<VideoEntry>().await.map_err(normalize_transport_error)
    }

    /// Same as `fetch_video_metadata`, except that hosts without a lookup
    /// endpoint are resolved in-process.
    pub async fn resolve(&self, host: Host, id: &str) -> Result<VideoEntry> {
        match host {
            Host::M3u8 => DirectStreamProvider::new().lookup(id).await,
            _ => self.fetch_video_metadata(Some(host), id).await,
        }
    }

    /// Resolves a shared `list` value. Pairs are fetched concurrently, failed
    /// ones are dropped and the order of the rest is kept.
    pub async fn hydrate(&self, raw_list: &str) -> Vec<VideoEntry> {
        let pairs = decode_list(raw_list);

        let lookups = pairs.iter().map(|pair| async move {
            let host = pair.host.parse::<Host>()?;
            self.resolve(host, &pair.id).await
        });

        join_all(lookups)
            .await
            .into_iter()
            .zip(&pairs)
            .filter_map(|(result, pair)| match result {
                Ok(entry) => Some(entry),
                Err(err) => {
                    warn!("Dropping {}+{} from shared list: {}", pair.host, pair.id, err);
                    None
                }
            })
            .collect()
    }
}

/// Network failures, timeouts and unreadable bodies all surface as the same
/// generic error; the cause is only logged.
fn normalize_transport_error(err: reqwest::Error) -> Error {
    warn!("Gateway request failed: {}", err);
    let status = err.status().map(|s| s.as_u16()).unwrap_or(500);
    Error::UpstreamFetch {
        status,
        message: UNKNOWN_SERVER_ERROR.to_string(),
    }
}
