use crate::core::Host;
use crate::error::{Error, Result};

const YOUTUBE_PREFIXES: [&str; 3] = ["youtu.be/", "youtube.com/watch?v=", "youtube.com/live/"];
const YOUTUBE_TRACKING: [&str; 2] = ["&list=", "?si="];

/// Turns whatever the user pasted (full link or bare id) into the canonical
/// id for `host`.
///
/// The rules are plain string surgery rather than URL parsing: share links
/// differ per context (mobile share sheet, live pages, playlists) and the
/// providers accept the resulting ids as-is.
pub fn extract_video_id(host: &str, raw: &str) -> Result<String> {
    let host: Host = host.parse()?;
    if raw.is_empty() {
        return Err(Error::validation("Provide video link or ID"));
    }
    Ok(host.extract_id(raw))
}

impl Host {
    pub fn extract_id(&self, raw: &str) -> String {
        let input = raw.strip_suffix('/').unwrap_or(raw);

        match self {
            Host::Youtube => youtube_video_id(input),
            Host::YoutubePlaylist => youtube_playlist_id(input),
            Host::Twitch
            | Host::TwitchVod
            | Host::Dailymotion
            | Host::DailymotionPlaylist
            | Host::Vimeo => last_path_segment(input),
            // The manifest URL is the id
            Host::M3u8 => input.to_string(),
        }
    }
}

fn youtube_video_id(input: &str) -> String {
    let mut id = input;
    for prefix in YOUTUBE_PREFIXES {
        if let Some(pos) = id.find(prefix) {
            id = &id[pos + prefix.len()..];
        }
    }

    let cut = YOUTUBE_TRACKING
        .iter()
        .filter_map(|marker| id.find(marker))
        .min();
    match cut {
        Some(pos) => id[..pos].to_string(),
        None => id.to_string(),
    }
}

fn youtube_playlist_id(input: &str) -> String {
    let Some(pos) = input.find("list=") else {
        return input.to_string();
    };
    let mut id = &input[pos + "list=".len()..];
    if let Some(end) = id.find('&') {
        id = &id[..end];
    }
    if let Some(end) = id.find("?si=") {
        id = &id[..end];
    }
    id.to_string()
}

fn last_path_segment(input: &str) -> String {
    let segment = match input.rfind('/') {
        Some(pos) => &input[pos + 1..],
        None => input,
    };
    match segment.find('?') {
        Some(end) => segment[..end].to_string(),
        None => segment.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn extract(host: &str, raw: &str) -> String {
        extract_video_id(host, raw).unwrap()
    }

    #[test]
    fn test_youtube_links() {
        assert_eq!(extract("youtube", "https://www.youtube.com/watch?v=T2sv8jXoP4s"), "T2sv8jXoP4s");
        assert_eq!(extract("youtube", "https://youtu.be/T2sv8jXoP4s?si=XdetdHDQVD_EqpgJ"), "T2sv8jXoP4s");
        assert_eq!(
            extract("youtube", "https://www.youtube.com/live/J2i0cZWCdq4?si=KYR1sH6iY8xLltrq"),
            "J2i0cZWCdq4"
        );
        assert_eq!(
            extract("youtube", "https://www.youtube.com/watch?v=T2sv8jXoP4s&list=PLC3y8-rFHvwirqe1KHFCHJ0RqNuN61SJd"),
            "T2sv8jXoP4s"
        );
        assert_eq!(extract("youtube", "T2sv8jXoP4s"), "T2sv8jXoP4s");
    }

    #[test]
    fn test_youtube_playlist_links() {
        assert_eq!(
            extract(
                "youtube-playlist",
                "https://www.youtube.com/watch?v=T2sv8jXoP4s&list=PLC3y8-rFHvwirqe1KHFCHJ0RqNuN61SJd?si=slTXxioCzcPtS0Og"
            ),
            "PLC3y8-rFHvwirqe1KHFCHJ0RqNuN61SJd"
        );
        assert_eq!(
            extract(
                "youtube-playlist",
                "https://youtube.com/playlist?list=PLbpi6ZahtOH4avZrVEm5N1XchyanEhzfz&si=slTXxioCzcPtS0Og"
            ),
            "PLbpi6ZahtOH4avZrVEm5N1XchyanEhzfz"
        );
        assert_eq!(extract("youtube-playlist", "PLbpi6ZahtOH4avZrVEm5N1XchyanEhzfz"), "PLbpi6ZahtOH4avZrVEm5N1XchyanEhzfz");
    }

    #[test]
    fn test_path_segment_hosts() {
        assert_eq!(extract("twitch", "https://www.twitch.tv/fl0m"), "fl0m");
        assert_eq!(extract("twitch", "https://www.twitch.tv/fl0m/"), "fl0m");
        assert_eq!(
            extract("twitch-vod", "https://www.twitch.tv/videos/2310091843?filter=archives&sort=time"),
            "2310091843"
        );
        assert_eq!(extract("vimeo", "https://vimeo.com/684758411"), "684758411");
        assert_eq!(extract("dailymotion", "https://www.dailymotion.com/video/x6vxybk"), "x6vxybk");
        assert_eq!(extract("dailymotion-playlist", "https://www.dailymotion.com/playlist/x5r9sh"), "x5r9sh");
        assert_eq!(extract("twitch", "fl0m"), "fl0m");
    }

    #[test]
    fn test_m3u8_passes_through() {
        let url = "https://video-weaver.ams03.hls.ttvnw.net/v1/playlist/CoMGFFg6TXAcJjhP.m3u8";
        assert_eq!(extract("m3u8", url), url);
    }

    #[test]
    fn test_mismatched_host_falls_back() {
        // Segment hosts guess from the last segment, they never find the real id.
        assert_ne!(
            extract("dailymotion-playlist", "https://www.youtube.com/watch?v=T2sv8jXoP4s"),
            "T2sv8jXoP4s"
        );
        // Prefix hosts pass the input through.
        assert_eq!(extract("youtube", "https://vimeo.com/684758411"), "https://vimeo.com/684758411");
    }

    #[test]
    fn test_unsupported_host() {
        assert!(matches!(
            extract_video_id("", "https://www.twitch.tv/fl0m"),
            Err(Error::UnsupportedHost(_))
        ));
        assert!(matches!(
            extract_video_id("null", "https://www.twitch.tv/fl0m"),
            Err(Error::UnsupportedHost(_))
        ));
    }

    #[test]
    fn test_empty_input() {
        assert!(matches!(extract_video_id("twitch", ""), Err(Error::Validation(_))));
    }
}
