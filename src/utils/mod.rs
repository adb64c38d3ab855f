use crate::error::Result;
use std::time::Duration;

pub fn http_client(timeout: Duration) -> Result<reqwest::Client> {
    Ok(reqwest::Client::builder()
        .user_agent(format!("multiviewer/{}", env!("CARGO_PKG_VERSION")))
        .timeout(timeout)
        .redirect(reqwest::redirect::Policy::limited(10))
        .build()?)
}

/// Upper-cases the first letter of every space-separated word.
pub fn capitalize_words(text: &str) -> String {
    text.split(' ')
        .map(|word| {
            let mut chars = word.chars();
            match chars.next() {
                Some(first) => first.to_uppercase().chain(chars).collect(),
                None => String::new(),
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}

/// Human label for a host tag, e.g. `twitch-vod` -> `Twitch Vod`.
pub fn host_label(tag: &str) -> String {
    capitalize_words(&tag.replace('-', " "))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_capitalize_words() {
        let text = capitalize_words("capitalization function works properly");
        assert_eq!(text, "Capitalization Function Works Properly");
        assert_eq!(capitalize_words(""), "");
        assert_eq!(capitalize_words("a  b"), "A  B");
    }

    #[test]
    fn test_host_label() {
        assert_eq!(host_label("dailymotion-playlist"), "Dailymotion Playlist");
        assert_eq!(host_label("m3u8"), "M3u8");
    }
}
