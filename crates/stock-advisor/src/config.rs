//! Configuration for the stock agents

use crate::error::{Result, StockError};
use agent_utils::{env_parse, env_var, env_var_or};
use serde::{Deserialize, Serialize};
use std::str::FromStr;
use std::time::Duration;

pub const DEFAULT_ADVISOR_A2A_URL: &str = "http://localhost:5001/a2a";
pub const DEFAULT_ADVISOR_BIND_ADDR: &str = "0.0.0.0:5001";
pub const DEFAULT_ADVISOR_MODEL: &str = "gemini-2.0-flash";
pub const DEFAULT_REVIEWER_MODEL: &str = "gpt-3.5-turbo";

/// Data provider for stock information
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DataProvider {
    /// Yahoo Finance (default, no API key required)
    #[default]
    Yahoo,
    /// Alpha Vantage (requires API key)
    AlphaVantage,
}

impl FromStr for DataProvider {
    type Err = StockError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "yahoo" => Ok(Self::Yahoo),
            "alpha_vantage" | "alphavantage" => Ok(Self::AlphaVantage),
            other => Err(StockError::ConfigError(format!(
                "Unknown data provider '{other}' (expected 'yahoo' or 'alpha_vantage')"
            ))),
        }
    }
}

/// Settings shared by the advisor server, the reviewer REPL and the client
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StockConfig {
    /// Market data source
    pub data_provider: DataProvider,

    /// Alpha Vantage API key (required for `AlphaVantage`)
    pub alpha_vantage_api_key: Option<String>,

    /// HTTP timeout for data provider requests; `None` keeps the client default
    pub request_timeout: Option<Duration>,

    /// Where the reviewer reaches the advisor
    pub advisor_a2a_url: String,

    /// Listen address of the advisor server
    pub advisor_bind_addr: String,

    pub advisor_model: String,

    pub reviewer_model: String,
}

impl Default for StockConfig {
    fn default() -> Self {
        Self {
            data_provider: DataProvider::Yahoo,
            alpha_vantage_api_key: None,
            request_timeout: None,
            advisor_a2a_url: DEFAULT_ADVISOR_A2A_URL.to_string(),
            advisor_bind_addr: DEFAULT_ADVISOR_BIND_ADDR.to_string(),
            advisor_model: DEFAULT_ADVISOR_MODEL.to_string(),
            reviewer_model: DEFAULT_REVIEWER_MODEL.to_string(),
        }
    }
}

impl StockConfig {
    pub fn builder() -> StockConfigBuilder {
        StockConfigBuilder::default()
    }

    /// Read every setting from the environment, falling back to defaults
    ///
    /// | variable | setting |
    /// |---|---|
    /// | `STOCK_DATA_PROVIDER` | `yahoo` or `alpha_vantage` |
    /// | `ALPHA_VANTAGE_API_KEY` | Alpha Vantage key |
    /// | `STOCK_REQUEST_TIMEOUT_SECS` | provider HTTP timeout |
    /// | `ADVISOR_A2A_URL` | advisor endpoint |
    /// | `ADVISOR_BIND_ADDR` | advisor listen address |
    /// | `ADVISOR_MODEL`, `REVIEWER_MODEL` | model names |
    pub fn from_env() -> Result<Self> {
        let mut builder = Self::builder()
            .advisor_a2a_url(env_var_or("ADVISOR_A2A_URL", DEFAULT_ADVISOR_A2A_URL))
            .advisor_bind_addr(env_var_or("ADVISOR_BIND_ADDR", DEFAULT_ADVISOR_BIND_ADDR))
            .advisor_model(env_var_or("ADVISOR_MODEL", DEFAULT_ADVISOR_MODEL))
            .reviewer_model(env_var_or("REVIEWER_MODEL", DEFAULT_REVIEWER_MODEL))
            .with_env_api_key();

        if let Ok(provider) = env_var("STOCK_DATA_PROVIDER") {
            builder = builder.data_provider(provider.parse()?);
        }
        if let Some(secs) = env_parse::<u64>("STOCK_REQUEST_TIMEOUT_SECS")? {
            builder = builder.request_timeout(Duration::from_secs(secs));
        }

        builder.build()
    }

    pub fn validate(&self) -> Result<()> {
        if self.data_provider == DataProvider::AlphaVantage
            && self.alpha_vantage_api_key.is_none()
        {
            return Err(StockError::ConfigError(
                "Alpha Vantage API key required when using AlphaVantage provider".to_string(),
            ));
        }

        if self.request_timeout == Some(Duration::ZERO) {
            return Err(StockError::ConfigError(
                "request_timeout must be greater than 0".to_string(),
            ));
        }

        if self.advisor_a2a_url.trim().is_empty() {
            return Err(StockError::ConfigError(
                "advisor_a2a_url must not be empty".to_string(),
            ));
        }

        Ok(())
    }
}

/// Builder for StockConfig
#[derive(Debug, Default)]
pub struct StockConfigBuilder {
    data_provider: Option<DataProvider>,
    alpha_vantage_api_key: Option<String>,
    request_timeout: Option<Duration>,
    advisor_a2a_url: Option<String>,
    advisor_bind_addr: Option<String>,
    advisor_model: Option<String>,
    reviewer_model: Option<String>,
}

impl StockConfigBuilder {
    pub fn data_provider(mut self, provider: DataProvider) -> Self {
        self.data_provider = Some(provider);
        self
    }

    pub fn alpha_vantage_api_key(mut self, key: impl Into<String>) -> Self {
        self.alpha_vantage_api_key = Some(key.into());
        self
    }

    /// Load Alpha Vantage API key from environment
    pub fn with_env_api_key(mut self) -> Self {
        if let Ok(key) = env_var("ALPHA_VANTAGE_API_KEY") {
            self.alpha_vantage_api_key = Some(key);
        }
        self
    }

    pub fn request_timeout(mut self, timeout: Duration) -> Self {
        self.request_timeout = Some(timeout);
        self
    }

    pub fn advisor_a2a_url(mut self, url: impl Into<String>) -> Self {
        self.advisor_a2a_url = Some(url.into());
        self
    }

    pub fn advisor_bind_addr(mut self, addr: impl Into<String>) -> Self {
        self.advisor_bind_addr = Some(addr.into());
        self
    }

    pub fn advisor_model(mut self, model: impl Into<String>) -> Self {
        self.advisor_model = Some(model.into());
        self
    }

    pub fn reviewer_model(mut self, model: impl Into<String>) -> Self {
        self.reviewer_model = Some(model.into());
        self
    }

    pub fn build(self) -> Result<StockConfig> {
        let defaults = StockConfig::default();

        let config = StockConfig {
            data_provider: self.data_provider.unwrap_or(defaults.data_provider),
            alpha_vantage_api_key: self.alpha_vantage_api_key,
            request_timeout: self.request_timeout,
            advisor_a2a_url: self.advisor_a2a_url.unwrap_or(defaults.advisor_a2a_url),
            advisor_bind_addr: self
                .advisor_bind_addr
                .unwrap_or(defaults.advisor_bind_addr),
            advisor_model: self.advisor_model.unwrap_or(defaults.advisor_model),
            reviewer_model: self.reviewer_model.unwrap_or(defaults.reviewer_model),
        };

        config.validate()?;
        Ok(config)
    }
}
