//! API clients for stock data providers
//!
//! Both clients implement the two collaborator traits the agents depend on:
//! [`FinancialsProvider`] for annual statements and [`MarketSnapshotProvider`]
//! for the current trading picture.

pub mod alpha_vantage;
pub mod yahoo;

pub use alpha_vantage::AlphaVantageClient;
pub use yahoo::YahooFinanceClient;

use crate::config::{DataProvider, StockConfig};
use crate::error::{Result, StockError};
use crate::table::Table;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::sync::Arc;

/// Source of annual financial statements
#[async_trait]
pub trait FinancialsProvider: Send + Sync {
    /// Annual income statement
    async fn fetch_financials(&self, ticker: &str) -> Result<Table>;

    async fn fetch_balance_sheet(&self, ticker: &str) -> Result<Table>;

    async fn fetch_cashflow(&self, ticker: &str) -> Result<Table>;

    fn name(&self) -> &str;
}

/// Current market figures for one ticker; any field may be unavailable
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MarketSnapshot {
    pub symbol: String,
    pub name: Option<String>,
    pub price: Option<f64>,
    /// Percent change versus the previous close
    pub change_percent: Option<f64>,
    pub market_cap: Option<u64>,
    pub high_52w: Option<f64>,
    pub low_52w: Option<f64>,
}

/// Source of market snapshots
#[async_trait]
pub trait MarketSnapshotProvider: Send + Sync {
    async fn snapshot(&self, ticker: &str) -> Result<MarketSnapshot>;
}

/// The configured data source behind both collaborator traits
#[derive(Clone)]
pub struct Providers {
    pub financials: Arc<dyn FinancialsProvider>,
    pub market: Arc<dyn MarketSnapshotProvider>,
}

impl Providers {
    pub fn from_config(config: &StockConfig) -> Result<Self> {
        match config.data_provider {
            DataProvider::Yahoo => {
                let client = Arc::new(YahooFinanceClient::new(config.request_timeout)?);
                Ok(Self {
                    financials: client.clone(),
                    market: client,
                })
            }
            DataProvider::AlphaVantage => {
                let key = config.alpha_vantage_api_key.clone().ok_or_else(|| {
                    StockError::ConfigError("ALPHA_VANTAGE_API_KEY not set".to_string())
                })?;
                let client = Arc::new(AlphaVantageClient::new(key, config.request_timeout)?);
                Ok(Self {
                    financials: client.clone(),
                    market: client,
                })
            }
        }
    }
}

/// Split a camel-case field name into title-cased words
///
/// `totalRevenue` becomes `Total Revenue`; acronyms stay together, so
/// `NetPPE` becomes `Net PPE`.
pub(crate) fn humanize_field(name: &str) -> String {
    let chars: Vec<char> = name.chars().collect();
    let mut out = String::with_capacity(name.len() + 8);

    for (i, &ch) in chars.iter().enumerate() {
        if i == 0 {
            out.extend(ch.to_uppercase());
            continue;
        }
        let prev = chars[i - 1];
        let next_is_lower = chars.get(i + 1).is_some_and(|c| c.is_lowercase());
        let boundary = ch.is_uppercase()
            && (prev.is_lowercase() || prev.is_ascii_digit() || (prev.is_uppercase() && next_is_lower));
        if boundary {
            out.push(' ');
        }
        out.push(ch);
    }

    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_humanize_field() {
        assert_eq!(humanize_field("TotalRevenue"), "Total Revenue");
        assert_eq!(humanize_field("totalRevenue"), "Total Revenue");
        assert_eq!(humanize_field("NetPPE"), "Net PPE");
        assert_eq!(humanize_field("EBITDA"), "EBITDA");
        assert_eq!(humanize_field("DilutedEPS"), "Diluted EPS");
        assert_eq!(
            humanize_field("CashCashEquivalentsAndShortTermInvestments"),
            "Cash Cash Equivalents And Short Term Investments"
        );
    }

    #[test]
    fn test_providers_require_alpha_vantage_key() {
        let config = StockConfig {
            data_provider: DataProvider::AlphaVantage,
            ..StockConfig::default()
        };
        assert!(matches!(
            Providers::from_config(&config),
            Err(StockError::ConfigError(_))
        ));
    }
}
