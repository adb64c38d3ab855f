pub mod client;
pub mod server;

pub use client::GatewayClient;
pub use server::{router, serve, ApiError};
