pub mod cli;
pub mod config;
pub mod core;
pub mod error;
pub mod gateway;
pub mod providers;
pub mod session;
pub mod utils;

pub use crate::core::{
    create_embed_chat_url, create_embed_video_url, create_url_params, decode_list, encode_list,
    extract_video_id, EmbedSource, Host, VideoEntry,
};
pub use error::{Error, Result};
pub use gateway::GatewayClient;
pub use providers::{MetadataProvider, ProviderRegistry};
pub use session::Session;
