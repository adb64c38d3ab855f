use crate::core::Host;
use thiserror::Error;

pub const UNKNOWN_SERVER_ERROR: &str = "Unknown server error";

#[derive(Debug, Error)]
pub enum Error {
    /// Missing or malformed user input. Shown inline, never fatal.
    #[error("{0}")]
    Validation(String),

    #[error("Unsupported host: {0}")]
    UnsupportedHost(String),

    #[error("{operation} is not supported for {host}")]
    UnsupportedOperation { host: Host, operation: &'static str },

    /// Required environment configuration is absent.
    #[error("Environment setup error: {0}")]
    Configuration(String),

    #[error("{message}")]
    UpstreamFetch { status: u16, message: String },

    #[error("Video not found")]
    NotFound,

    #[error(transparent)]
    Http(#[from] reqwest::Error),
}

impl Error {
    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation(message.into())
    }

    pub fn upstream(status: u16, message: Option<String>) -> Self {
        Self::UpstreamFetch {
            status,
            message: message
                .filter(|m| !m.is_empty())
                .unwrap_or_else(|| UNKNOWN_SERVER_ERROR.to_string()),
        }
    }

    /// HTTP-like status code for this error.
    pub fn status(&self) -> u16 {
        match self {
            Self::Validation(_) | Self::UnsupportedOperation { .. } => 400,
            Self::UnsupportedHost(_) | Self::NotFound => 404,
            Self::Configuration(_) => 500,
            Self::UpstreamFetch { status, .. } => *status,
            Self::Http(err) => err.status().map(|s| s.as_u16()).unwrap_or(500),
        }
    }

    /// Message safe to hand to a caller. Configuration problems and transport
    /// failures never leak their details.
    pub fn public_message(&self) -> String {
        match self {
            Self::Configuration(_) | Self::Http(_) => UNKNOWN_SERVER_ERROR.to_string(),
            other => other.to_string(),
        }
    }
}

pub type Result<T> = std::result::Result<T, Error>;
