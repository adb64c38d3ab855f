use crate::core::VideoEntry;
use tracing::debug;

const PAIR_SEPARATOR: char = '+';
const ENTRY_SEPARATOR: &str = "--";

/// A `(host, id)` pair read back from a shared link. The host stays a raw tag
/// so that entries for hosts we cannot look up still reach hydration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SharedPair {
    pub host: String,
    pub id: String,
}

/// Encodes the list identity (no metadata) as the `list` query value.
pub fn encode_list(entries: &[VideoEntry]) -> String {
    let joined = entries
        .iter()
        .map(|entry| format!("{}{}{}", entry.host, PAIR_SEPARATOR, entry.id))
        .collect::<Vec<_>>()
        .join(ENTRY_SEPARATOR);
    urlencoding::encode(&joined).into_owned()
}

/// Full query string for the list, or nothing when the list is empty.
pub fn create_url_params(entries: &[VideoEntry]) -> String {
    if entries.is_empty() {
        return String::new();
    }
    format!("?list={}", encode_list(entries))
}

pub fn decode_list(raw: &str) -> Vec<SharedPair> {
    let decoded = match urlencoding::decode(raw) {
        Ok(decoded) => decoded.into_owned(),
        Err(err) => {
            debug!("list parameter is not valid UTF-8 after decoding: {}", err);
            return Vec::new();
        }
    };

    decoded
        .split(ENTRY_SEPARATOR)
        .filter_map(|segment| {
            let (host, id) = segment.split_once(PAIR_SEPARATOR)?;
            Some(SharedPair {
                host: host.to_string(),
                id: id.to_string(),
            })
        })
        .collect()
}
