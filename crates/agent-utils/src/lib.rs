//! Shared utilities
//!
//! Tracing initialization and environment-driven configuration helpers used
//! by every binary in the workspace.

pub mod config;
pub mod logging;

pub use config::{ConfigError, env_parse, env_var, env_var_or, load_dotenv};
pub use logging::{LogConfig, init_tracing, init_tracing_with};
