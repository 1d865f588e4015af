//! Error types for A2A messaging

use thiserror::Error;

pub type Result<T> = std::result::Result<T, A2AError>;

#[derive(Error, Debug)]
pub enum A2AError {
    #[error("Invalid endpoint URL: {0}")]
    InvalidUrl(#[from] url::ParseError),

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// Peer answered with a non-success status
    #[error("A2A peer returned HTTP {status}: {body}")]
    Status { status: u16, body: String },

    #[error("Invalid A2A response: {0}")]
    InvalidResponse(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl From<A2AError> for agent_core::Error {
    fn from(err: A2AError) -> Self {
        agent_core::Error::ProcessingFailed(err.to_string())
    }
}
