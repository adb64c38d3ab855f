use crate::error::Error;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Host {
    Youtube,
    YoutubePlaylist,
    Twitch,
    TwitchVod,
    Dailymotion,
    DailymotionPlaylist,
    Vimeo,
    M3u8,
}

impl Host {
    pub const ALL: [Host; 8] = [
        Host::Youtube,
        Host::YoutubePlaylist,
        Host::Twitch,
        Host::TwitchVod,
        Host::Dailymotion,
        Host::DailymotionPlaylist,
        Host::Vimeo,
        Host::M3u8,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Host::Youtube => "youtube",
            Host::YoutubePlaylist => "youtube-playlist",
            Host::Twitch => "twitch",
            Host::TwitchVod => "twitch-vod",
            Host::Dailymotion => "dailymotion",
            Host::DailymotionPlaylist => "dailymotion-playlist",
            Host::Vimeo => "vimeo",
            Host::M3u8 => "m3u8",
        }
    }

    /// Hosts whose chat can be embedded next to the player.
    pub fn supports_chat(&self) -> bool {
        matches!(self, Host::Youtube | Host::Twitch | Host::TwitchVod)
    }

    /// Parses the tag coming from a form field, where an empty string means
    /// the user has not picked a host yet.
    pub fn parse_optional(tag: &str) -> Result<Option<Host>, Error> {
        if tag.is_empty() {
            Ok(None)
        } else {
            tag.parse().map(Some)
        }
    }
}

impl fmt::Display for Host {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Host {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Host::ALL
            .into_iter()
            .find(|host| host.as_str() == s)
            .ok_or_else(|| Error::UnsupportedHost(s.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_known_tags() {
        for host in Host::ALL {
            assert_eq!(host.as_str().parse::<Host>().unwrap(), host);
        }
    }

    #[test]
    fn test_parse_rejects_unknown_and_empty() {
        assert!(matches!("".parse::<Host>(), Err(Error::UnsupportedHost(_))));
        assert!(matches!("null".parse::<Host>(), Err(Error::UnsupportedHost(_))));
        assert!(matches!("YouTube".parse::<Host>(), Err(Error::UnsupportedHost(_))));
    }

    #[test]
    fn test_parse_optional() {
        assert_eq!(Host::parse_optional("").unwrap(), None);
        assert_eq!(Host::parse_optional("twitch-vod").unwrap(), Some(Host::TwitchVod));
        assert!(Host::parse_optional("rumble").is_err());
    }

    #[test]
    fn test_serde_uses_tags() {
        let json = serde_json::to_string(&Host::DailymotionPlaylist).unwrap();
        assert_eq!(json, "\"dailymotion-playlist\"");
        let host: Host = serde_json::from_str("\"m3u8\"").unwrap();
        assert_eq!(host, Host::M3u8);
    }
}
