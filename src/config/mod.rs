use figment::providers::{Env, Format, Serialized, Toml};
use figment::Figment;
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;

pub static CONFIG_FILE: &str = "multiviewer.toml";
pub static ENV_PREFIX: &str = "MULTIVIEWER_";

/// Provider credentials are also read under their conventional unprefixed
/// names.
const CREDENTIAL_VARS: [&str; 3] = ["youtube_api_key", "twitch_client_id", "twitch_client_secret"];

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Domain the player page is served from. Twitch refuses to embed
    /// without it.
    pub embed_domain: Option<String>,
    pub bind: String,
    /// Base URL the client uses to reach the lookup endpoints.
    pub gateway_url: String,
    /// Per-request timeout in seconds.
    pub timeout: u64,
    pub youtube_api_key: Option<String>,
    pub twitch_client_id: Option<String>,
    pub twitch_client_secret: Option<String>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            embed_domain: None,
            bind: "127.0.0.1:3000".to_string(),
            gateway_url: "http://127.0.0.1:3000".to_string(),
            timeout: 10,
            youtube_api_key: None,
            twitch_client_id: None,
            twitch_client_secret: None,
        }
    }
}

impl Config {
    pub fn load(path: Option<&Path>) -> anyhow::Result<Self> {
        let file = path.unwrap_or_else(|| Path::new(CONFIG_FILE));
        Ok(Figment::from(Serialized::defaults(Config::default()))
            .merge(Toml::file(file))
            .merge(Env::prefixed(ENV_PREFIX))
            .merge(Env::raw().only(&CREDENTIAL_VARS))
            .extract()?)
    }

    pub fn embed_domain(&self) -> Option<&str> {
        self.embed_domain.as_deref().filter(|d| !d.is_empty())
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout)
    }

    /// Budget for one server-side lookup, all upstream calls included. Kept
    /// under the client timeout so the caller sees the upstream answer
    /// instead of its own timeout.
    pub fn upstream_deadline(&self) -> Duration {
        self.timeout() * 4 / 5
    }

    /// Effective configuration as TOML, with secrets masked.
    pub fn to_toml(&self) -> anyhow::Result<String> {
        let mut redacted = self.clone();
        for secret in [
            &mut redacted.youtube_api_key,
            &mut redacted.twitch_client_id,
            &mut redacted.twitch_client_secret,
        ] {
            if secret.is_some() {
                *secret = Some("********".to_string());
            }
        }
        Ok(toml::to_string_pretty(&redacted)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_defaults() {
        let config = Config::default();
        assert_eq!(config.timeout(), Duration::from_secs(10));
        assert_eq!(config.upstream_deadline(), Duration::from_secs(8));
        assert!(config.embed_domain().is_none());
    }

    #[test]
    fn test_load_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "embed_domain = \"watch.example.com\"").unwrap();
        writeln!(file, "timeout = 5").unwrap();

        let config = Config::load(Some(file.path())).unwrap();
        assert_eq!(config.embed_domain(), Some("watch.example.com"));
        assert_eq!(config.timeout, 5);
        assert_eq!(config.bind, "127.0.0.1:3000");
    }

    #[test]
    fn test_empty_embed_domain_is_absent() {
        let config = Config {
            embed_domain: Some(String::new()),
            ..Config::default()
        };
        assert!(config.embed_domain().is_none());
    }

    #[test]
    fn test_to_toml_masks_secrets() {
        let config = Config {
            youtube_api_key: Some("AIza-secret".into()),
            ..Config::default()
        };
        let rendered = config.to_toml().unwrap();
        assert!(!rendered.contains("AIza-secret"));
        assert!(rendered.contains("********"));
        assert!(rendered.contains("bind = \"127.0.0.1:3000\""));
    }
}
