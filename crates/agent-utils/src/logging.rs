//! Logging and tracing utilities

use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

/// Tracing subscriber settings
#[derive(Debug, Clone)]
pub struct LogConfig {
    /// Filter used when `RUST_LOG` is unset
    pub default_filter: String,
    /// Emit JSON lines instead of human-readable output
    pub json: bool,
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            default_filter: "info".to_string(),
            json: false,
        }
    }
}

impl LogConfig {
    /// Defaults, with `LOG_FORMAT=json` switching to JSON output
    pub fn from_env() -> Self {
        let json = std::env::var("LOG_FORMAT")
            .map(|v| v.eq_ignore_ascii_case("json"))
            .unwrap_or(false);
        Self {
            json,
            ..Self::default()
        }
    }

    pub fn with_default_filter(mut self, filter: impl Into<String>) -> Self {
        self.default_filter = filter.into();
        self
    }

    fn env_filter(&self) -> EnvFilter {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&self.default_filter))
    }
}

/// Initialize tracing from the environment (`RUST_LOG`, `LOG_FORMAT`)
pub fn init_tracing() {
    init_tracing_with(&LogConfig::from_env());
}

/// Initialize tracing with explicit settings
///
/// Calling it twice is harmless; the second subscriber is discarded.
pub fn init_tracing_with(config: &LogConfig) {
    let registry = tracing_subscriber::registry().with(config.env_filter());

    let result = if config.json {
        registry
            .with(tracing_subscriber::fmt::layer().json())
            .try_init()
    } else {
        registry.with(tracing_subscriber::fmt::layer()).try_init()
    };

    if let Err(e) = result {
        tracing::debug!(error = %e, "Tracing subscriber already initialized");
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = LogConfig::default().with_default_filter("stock_advisor=debug");
        assert_eq!(config.default_filter, "stock_advisor=debug");
        assert!(!config.json);
    }

    #[test]
    fn test_double_init_does_not_panic() {
        init_tracing_with(&LogConfig::default());
        init_tracing_with(&LogConfig::default());
    }
}
