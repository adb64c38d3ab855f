pub mod embed;
pub mod extractor;
pub mod host;
pub mod metadata;
pub mod playlist;
pub mod share;

pub use embed::{create_embed_chat_url, create_embed_video_url, EmbedSource};
pub use extractor::extract_video_id;
pub use host::Host;
pub use metadata::VideoEntry;
pub use share::{create_url_params, decode_list, encode_list, SharedPair};
