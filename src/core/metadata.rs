use crate::core::Host;
use serde::{Deserialize, Serialize};

/// One resolved item of the watch list. `id` is always canonical.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VideoEntry {
    pub host: Host,
    pub id: String,
    pub title: Option<String>,
    pub channel_id: Option<String>,
    pub channel_name: String,
    pub livestream_chat: bool,
    pub thumbnail_url: Option<String>,
}

impl VideoEntry {
    pub fn is(&self, host: Host, id: &str) -> bool {
        self.host == host && self.id == id
    }
}
