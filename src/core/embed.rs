use crate::core::Host;
use crate::error::{Error, Result};
use serde::Serialize;

/// Where a player gets its media from.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", content = "url", rename_all = "kebab-case")]
pub enum EmbedSource {
    /// Provider player loaded in an iframe.
    IFrame(String),
    /// Stream manifest handed straight to a native player.
    DirectMedia(String),
}

impl EmbedSource {
    pub fn url(&self) -> &str {
        match self {
            EmbedSource::IFrame(url) | EmbedSource::DirectMedia(url) => url,
        }
    }
}

fn require_domain(embed_domain: Option<&str>) -> Result<&str> {
    match embed_domain {
        Some(domain) if !domain.is_empty() => Ok(domain),
        _ => Err(Error::Configuration("embed domain is not set".into())),
    }
}

pub fn create_embed_video_url(host: Host, id: &str, embed_domain: Option<&str>) -> Result<EmbedSource> {
    let domain = require_domain(embed_domain)?;

    let url = match host {
        Host::Youtube => format!("https://www.youtube-nocookie.com/embed/{}", id),
        Host::YoutubePlaylist => format!("https://www.youtube.com/embed/videoseries?list={}", id),
        Host::Twitch => format!("https://player.twitch.tv/?channel={}&parent={}", id, domain),
        Host::TwitchVod => format!("https://player.twitch.tv/?video={}&parent={}", id, domain),
        Host::Dailymotion => format!("https://www.dailymotion.com/embed/video/{}", id),
        Host::DailymotionPlaylist => format!("https://www.dailymotion.com/embed/playlist/{}", id),
        Host::Vimeo => format!("https://player.vimeo.com/video/{}", id),
        Host::M3u8 => return Ok(EmbedSource::DirectMedia(id.to_string())),
    };

    Ok(EmbedSource::IFrame(url))
}

pub fn create_embed_chat_url(host: Host, id: &str, embed_domain: Option<&str>) -> Result<String> {
    let domain = require_domain(embed_domain)?;

    match host {
        Host::Youtube => Ok(format!(
            "https://www.youtube.com/live_chat?v={}&embed_domain={}",
            id, domain
        )),
        Host::Twitch | Host::TwitchVod => Ok(format!(
            "https://www.twitch.tv/embed/{}/chat?parent={}",
            id, domain
        )),
        _ => Err(Error::UnsupportedOperation {
            host,
            operation: "chat",
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const DOMAIN: Option<&str> = Some("localhost");

    fn video(host: Host, id: &str) -> String {
        create_embed_video_url(host, id, DOMAIN).unwrap().url().to_string()
    }

    #[test]
    fn test_video_urls() {
        assert_eq!(video(Host::Youtube, "T2sv8jXoP4s"), "https://www.youtube-nocookie.com/embed/T2sv8jXoP4s");
        assert_eq!(
            video(Host::YoutubePlaylist, "PLbpi6ZahtOH4avZrVEm5N1XchyanEhzfz"),
            "https://www.youtube.com/embed/videoseries?list=PLbpi6ZahtOH4avZrVEm5N1XchyanEhzfz"
        );
        assert_eq!(video(Host::Twitch, "fl0m"), "https://player.twitch.tv/?channel=fl0m&parent=localhost");
        assert_eq!(
            video(Host::TwitchVod, "2310091843"),
            "https://player.twitch.tv/?video=2310091843&parent=localhost"
        );
        assert_eq!(video(Host::Dailymotion, "x6vxybk"), "https://www.dailymotion.com/embed/video/x6vxybk");
        assert_eq!(video(Host::DailymotionPlaylist, "x5r9sh"), "https://www.dailymotion.com/embed/playlist/x5r9sh");
        assert_eq!(video(Host::Vimeo, "684758411"), "https://player.vimeo.com/video/684758411");
    }

    #[test]
    fn test_m3u8_is_direct_media() {
        let url = "https://example.com/live/index.m3u8";
        assert_eq!(
            create_embed_video_url(Host::M3u8, url, DOMAIN).unwrap(),
            EmbedSource::DirectMedia(url.to_string())
        );
    }

    #[test]
    fn test_chat_urls() {
        assert_eq!(
            create_embed_chat_url(Host::Youtube, "T2sv8jXoP4s", DOMAIN).unwrap(),
            "https://www.youtube.com/live_chat?v=T2sv8jXoP4s&embed_domain=localhost"
        );
        assert_eq!(
            create_embed_chat_url(Host::Twitch, "fl0m", DOMAIN).unwrap(),
            "https://www.twitch.tv/embed/fl0m/chat?parent=localhost"
        );
        assert!(create_embed_chat_url(Host::TwitchVod, "2310091843", DOMAIN).is_ok());
    }

    #[test]
    fn test_chat_unsupported() {
        for host in [Host::Vimeo, Host::Dailymotion, Host::DailymotionPlaylist, Host::YoutubePlaylist, Host::M3u8] {
            assert!(matches!(
                create_embed_chat_url(host, "684758411", DOMAIN),
                Err(Error::UnsupportedOperation { .. })
            ));
        }
    }

    #[test]
    fn test_missing_domain_is_configuration_error() {
        for host in Host::ALL {
            assert!(matches!(create_embed_video_url(host, "abc", None), Err(Error::Configuration(_))));
            assert!(matches!(create_embed_video_url(host, "abc", Some("")), Err(Error::Configuration(_))));
            assert!(matches!(create_embed_chat_url(host, "abc", None), Err(Error::Configuration(_))));
        }
    }
}
