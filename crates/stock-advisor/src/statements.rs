//! Financial statement retrieval and normalization
//!
//! [`StatementNormalizer::get_financial_statements`] never fails: every
//! outcome is a [`RetrievalResult`] serialized as
//!
//! ```json
//! {"status": "success", "financials": {...}, "balance_sheet": {...}, "cashflow": {...}}
//! {"status": "error", "error_message": "..."}
//! ```

use crate::api::FinancialsProvider;
use crate::error::StockError;
use crate::table::TableError;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use thiserror::Error;
use tracing::{info, instrument, warn};

pub use crate::table::StatementMap;

/// Why statements could not be produced
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StatementError {
    /// All three tables came back empty
    #[error("No financial statements found for ticker '{ticker}'.")]
    NotFound { ticker: String },

    #[error("{0}")]
    RetrievalFailure(String),
}

impl From<StockError> for StatementError {
    fn from(err: StockError) -> Self {
        Self::RetrievalFailure(err.to_string())
    }
}

impl From<TableError> for StatementError {
    fn from(err: TableError) -> Self {
        Self::RetrievalFailure(err.to_string())
    }
}

/// Outcome of one retrieval
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "lowercase")]
pub enum RetrievalResult {
    Success {
        /// Income statement
        financials: StatementMap,
        balance_sheet: StatementMap,
        cashflow: StatementMap,
    },
    Error {
        error_message: String,
    },
}

impl RetrievalResult {
    pub fn is_success(&self) -> bool {
        matches!(self, Self::Success { .. })
    }

    pub fn error_message(&self) -> Option<&str> {
        match self {
            Self::Error { error_message } => Some(error_message),
            Self::Success { .. } => None,
        }
    }
}

impl From<StatementError> for RetrievalResult {
    fn from(err: StatementError) -> Self {
        Self::Error {
            error_message: err.to_string(),
        }
    }
}

/// Trim and upper-case a ticker symbol
pub fn normalize_ticker(ticker: &str) -> String {
    ticker.trim().to_uppercase()
}

/// Fetches the three annual statements and makes them JSON-safe
#[derive(Clone)]
pub struct StatementNormalizer {
    provider: Arc<dyn FinancialsProvider>,
}

impl StatementNormalizer {
    pub fn new(provider: Arc<dyn FinancialsProvider>) -> Self {
        Self { provider }
    }

    pub fn provider_name(&self) -> &str {
        self.provider.name()
    }

    #[instrument(skip(self), fields(provider = %self.provider.name()))]
    pub async fn get_financial_statements(&self, ticker: &str) -> RetrievalResult {
        match self.retrieve(ticker).await {
            Ok(result) => result,
            Err(e) => {
                warn!(error = %e, "Financial statement retrieval failed");
                e.into()
            }
        }
    }

    async fn retrieve(&self, ticker: &str) -> Result<RetrievalResult, StatementError> {
        let ticker = normalize_ticker(ticker);

        let income = self.provider.fetch_financials(&ticker).await?;
        let balance_sheet = self.provider.fetch_balance_sheet(&ticker).await?;
        let cashflow = self.provider.fetch_cashflow(&ticker).await?;

        if income.is_empty() && balance_sheet.is_empty() && cashflow.is_empty() {
            return Err(StatementError::NotFound { ticker });
        }

        let result = RetrievalResult::Success {
            financials: income.normalize()?,
            balance_sheet: balance_sheet.normalize()?,
            cashflow: cashflow.normalize()?,
        };
        info!(%ticker, "Financial statements retrieved");
        Ok(result)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::table::{Label, Table};
    use crate::testing::StaticFinancials;
    use chrono::{NaiveDate, TimeZone, Utc};
    use serde_json::json;

    fn revenue_table() -> Table {
        Table::new(
            vec!["2024".into(), "2023".into()],
            vec!["Total Revenue".into(), "Net Income".into()],
            vec![vec![Some(391.0), Some(383.0)], vec![Some(94.0), Some(97.0)]],
        )
        .unwrap()
    }

    fn normalizer(provider: &Arc<StaticFinancials>) -> StatementNormalizer {
        StatementNormalizer::new(provider.clone())
    }

    #[tokio::test]
    async fn test_success_mirrors_provider() {
        let provider = Arc::new(StaticFinancials::new(
            revenue_table(),
            Table::from_records([("Total Assets", "2024", Some(365.0))]),
            Table::from_records([("Free Cash Flow", "2024", Some(108.0))]),
        ));

        let result = normalizer(&provider).get_financial_statements("AAPL").await;
        let value = serde_json::to_value(&result).unwrap();

        assert_eq!(
            value,
            json!({
                "status": "success",
                "financials": {
                    "2024": {"Total Revenue": 391.0, "Net Income": 94.0},
                    "2023": {"Total Revenue": 383.0, "Net Income": 97.0}
                },
                "balance_sheet": {"2024": {"Total Assets": 365.0}},
                "cashflow": {"2024": {"Free Cash Flow": 108.0}}
            })
        );
    }

    #[tokio::test]
    async fn test_all_empty_is_not_found() {
        let provider = Arc::new(StaticFinancials::new(Table::empty(), Table::empty(), Table::empty()));
        let result = normalizer(&provider).get_financial_statements("tick").await;

        assert_eq!(
            result,
            RetrievalResult::Error {
                error_message: "No financial statements found for ticker 'TICK'.".to_string()
            }
        );
    }

    #[tokio::test]
    async fn test_one_non_empty_table_is_success() {
        let provider = Arc::new(StaticFinancials::new(Table::empty(), Table::empty(), revenue_table()));
        let result = normalizer(&provider).get_financial_statements("MSFT").await;

        match result {
            RetrievalResult::Success {
                financials,
                balance_sheet,
                cashflow,
            } => {
                assert!(financials.is_empty());
                assert!(balance_sheet.is_empty());
                assert_eq!(cashflow["2023"]["Net Income"], 97.0);
            }
            RetrievalResult::Error { error_message } => panic!("unexpected error: {error_message}"),
        }
    }

    #[tokio::test]
    async fn test_ticker_is_normalized_for_every_fetch() {
        let provider = Arc::new(StaticFinancials::new(revenue_table(), Table::empty(), Table::empty()));
        normalizer(&provider).get_financial_statements(" aapl ").await;

        assert_eq!(
            provider.calls(),
            vec![
                "financials:AAPL".to_string(),
                "balance_sheet:AAPL".to_string(),
                "cashflow:AAPL".to_string()
            ]
        );
    }

    #[tokio::test]
    async fn test_absent_cells_become_zero() {
        let table = Table::new(
            vec!["2024".into()],
            vec!["Goodwill".into(), "Inventory".into()],
            vec![vec![None], vec![Some(f64::INFINITY)]],
        )
        .unwrap();
        let provider = Arc::new(StaticFinancials::new(Table::empty(), table, Table::empty()));

        let value = serde_json::to_value(normalizer(&provider).get_financial_statements("X").await).unwrap();
        assert_eq!(value["balance_sheet"]["2024"], json!({"Goodwill": 0.0, "Inventory": 0.0}));
    }

    #[tokio::test]
    async fn test_dated_columns_stay_distinct() {
        let table = Table::new(
            vec![
                Label::Timestamp(Utc.with_ymd_and_hms(2024, 9, 28, 0, 0, 0).unwrap()),
                Label::Timestamp(Utc.with_ymd_and_hms(2023, 9, 30, 0, 0, 0).unwrap()),
                Label::Date(NaiveDate::from_ymd_opt(2022, 9, 24).unwrap()),
            ],
            vec!["Total Revenue".into()],
            vec![vec![Some(3.0), Some(2.0), Some(1.0)]],
        )
        .unwrap();
        let provider = Arc::new(StaticFinancials::new(table, Table::empty(), Table::empty()));

        let result = normalizer(&provider).get_financial_statements("AAPL").await;
        let RetrievalResult::Success { financials, .. } = result else {
            panic!("expected success");
        };
        let keys: Vec<&str> = financials.keys().map(String::as_str).collect();
        assert_eq!(keys, vec!["2022-09-24", "2023-09-30 00:00:00", "2024-09-28 00:00:00"]);
    }

    #[tokio::test]
    async fn test_colliding_labels_are_reported() {
        let table = Table::new(
            vec!["2024".into()],
            vec!["Cash".into(), "Cash".into()],
            vec![vec![Some(1.0)], vec![Some(2.0)]],
        )
        .unwrap();
        let provider = Arc::new(StaticFinancials::new(table, Table::empty(), Table::empty()));

        let result = normalizer(&provider).get_financial_statements("AAPL").await;
        assert_eq!(result.error_message(), Some("duplicate row label 'Cash'"));
    }

    #[tokio::test]
    async fn test_provider_failure_becomes_error_result() {
        let provider = Arc::new(StaticFinancials::failing("connection refused"));
        let result = normalizer(&provider).get_financial_statements("AAPL").await;

        let value = serde_json::to_value(&result).unwrap();
        assert_eq!(value["status"], "error");
        assert_eq!(value["error_message"], "API error: connection refused");
        assert!(value.get("financials").is_none());
    }

    #[tokio::test]
    async fn test_idempotent() {
        let provider = Arc::new(StaticFinancials::new(revenue_table(), Table::empty(), Table::empty()));
        let normalizer = normalizer(&provider);

        let first = normalizer.get_financial_statements("AAPL").await;
        let second = normalizer.get_financial_statements("AAPL").await;
        assert_eq!(first, second);
        assert!(first.is_success());
    }

    #[test]
    fn test_result_round_trips_through_json() {
        let json = r#"{"status":"error","error_message":"boom"}"#;
        let result: RetrievalResult = serde_json::from_str(json).unwrap();
        assert_eq!(result.error_message(), Some("boom"));
    }
}
