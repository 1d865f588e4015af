//! Error types for agent-core

use thiserror::Error;

/// Result type alias for agent-core
pub type Result<T> = std::result::Result<T, Error>;

/// Error type for agent operations
#[derive(Error, Debug)]
pub enum Error {
    /// Generic error message
    #[error("{0}")]
    Generic(String),

    /// Agent initialization failed
    #[error("Agent initialization failed: {0}")]
    InitializationFailed(String),

    /// Agent processing failed
    #[error("Agent processing failed: {0}")]
    ProcessingFailed(String),

    /// Tool input did not match the tool's schema
    #[error("Invalid tool input: {0}")]
    InvalidInput(String),

    /// No tool registered under the requested name
    #[error("Tool not found: {0}")]
    ToolNotFound(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = Error::ToolNotFound("get_weather".to_string());
        assert_eq!(err.to_string(), "Tool not found: get_weather");

        let err = Error::InvalidInput("missing field `ticker`".to_string());
        assert_eq!(err.to_string(), "Invalid tool input: missing field `ticker`");
    }
}
