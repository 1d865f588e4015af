//! Tool for summarizing current stock performance

use super::{parse_ticker, ticker_schema};
use crate::api::{MarketSnapshot, MarketSnapshotProvider};
use crate::statements::normalize_ticker;
use agent_core::Result as AgentResult;
use agent_tools::Tool;
use async_trait::async_trait;
use serde_json::Value;
use std::sync::Arc;
use tracing::warn;

/// `get_stock_summary(ticker)`: one paragraph on today's trading
pub struct StockSummaryTool {
    market: Arc<dyn MarketSnapshotProvider>,
}

impl StockSummaryTool {
    pub fn new(market: Arc<dyn MarketSnapshotProvider>) -> Self {
        Self { market }
    }

    /// Provider failures are reported in the text, not as tool errors
    pub async fn summarize(&self, ticker: &str) -> String {
        let ticker = normalize_ticker(ticker);
        match self.market.snapshot(&ticker).await {
            Ok(snapshot) => format_summary(&ticker, &snapshot),
            Err(e) => {
                warn!(%ticker, error = %e, "Market snapshot failed");
                format!("Could not retrieve stock data for {ticker}: {e}")
            }
        }
    }
}

fn format_summary(ticker: &str, snapshot: &MarketSnapshot) -> String {
    let (Some(price), Some(change), Some(market_cap), Some(high), Some(low)) = (
        snapshot.price,
        snapshot.change_percent,
        snapshot.market_cap,
        snapshot.high_52w,
        snapshot.low_52w,
    ) else {
        return format!("Sorry, not enough data available for {ticker}.");
    };

    let name = snapshot.name.as_deref().unwrap_or(ticker);
    let trend = if change > 0.0 {
        "up"
    } else if change < 0.0 {
        "down"
    } else {
        "flat"
    };

    format!(
        "{name} is currently trading at ${price:.2}, which is {change:.2}% today. \
         The 52-week range is ${low:.2} - ${high:.2}. \
         Market capitalization is approximately ${}. \
         Overall, the stock is trending {trend} today.",
        with_thousands_separators(market_cap)
    )
}

fn with_thousands_separators(value: u64) -> String {
    let digits = value.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    out
}

#[async_trait]
impl Tool for StockSummaryTool {
    async fn execute(&self, params: Value) -> AgentResult<Value> {
        let ticker = parse_ticker(params)?;
        Ok(Value::String(self.summarize(&ticker).await))
    }

    fn name(&self) -> &str {
        "get_stock_summary"
    }

    fn description(&self) -> &str {
        "Returns a summary of the current stock performance for the given ticker symbol: \
         price, daily change, 52-week range and market capitalization."
    }

    fn input_schema(&self) -> Value {
        ticker_schema()
    }
}
