//! Stock advisor and reviewer agents
//!
//! Two cooperating agents built on the workspace runtime:
//!
//! - [`StockAdvisorAgent`] reads a company's annual income statement,
//!   balance sheet and cash-flow statement through
//!   `get_financial_statements` and answers BUY, HOLD or SELL
//! - [`StockReviewerAgent`] summarizes the current market picture with
//!   `get_stock_summary` and asks the advisor for a recommendation over A2A
//!   with `get_advice_from_adk`
//!
//! The piece with a precise contract is [`StatementNormalizer`]: it fetches
//! three [`Table`]s from a [`FinancialsProvider`] and turns them into
//! JSON-safe nested maps, reporting failures as a tagged
//! [`RetrievalResult`] instead of an error.
//!
//! ```rust,ignore
//! use stock_advisor::{StatementNormalizer, api::YahooFinanceClient};
//! use std::sync::Arc;
//!
//! let normalizer = StatementNormalizer::new(Arc::new(YahooFinanceClient::new(None)?));
//! let result = normalizer.get_financial_statements(" aapl ").await;
//! println!("{}", serde_json::to_string_pretty(&result)?);
//! ```

pub mod agents;
pub mod api;
pub mod config;
pub mod error;
pub mod statements;
pub mod table;
pub mod tools;

#[cfg(test)]
pub(crate) mod testing;

pub use agents::{StockAdvisorAgent, StockReviewerAgent};
pub use api::{FinancialsProvider, MarketSnapshot, MarketSnapshotProvider, Providers};
pub use config::{DataProvider, StockConfig};
pub use error::{Result, StockError};
pub use statements::{RetrievalResult, StatementError, StatementMap, StatementNormalizer};
pub use table::{Label, Table, TableError};
pub use tools::{AdviceTool, FinancialStatementsTool, StockSummaryTool};
