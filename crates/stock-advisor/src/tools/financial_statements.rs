//! Tool for retrieving annual financial statements

use super::{parse_ticker, ticker_schema};
use crate::statements::StatementNormalizer;
use agent_core::Result as AgentResult;
use agent_tools::Tool;
use async_trait::async_trait;
use serde_json::Value;

/// `get_financial_statements(ticker)`: the normalized statements as JSON
pub struct FinancialStatementsTool {
    normalizer: StatementNormalizer,
}

impl FinancialStatementsTool {
    pub fn new(normalizer: StatementNormalizer) -> Self {
        Self { normalizer }
    }
}

#[async_trait]
impl Tool for FinancialStatementsTool {
    async fn execute(&self, params: Value) -> AgentResult<Value> {
        let ticker = parse_ticker(params)?;
        let result = self.normalizer.get_financial_statements(&ticker).await;

        serde_json::to_value(result).map_err(|e| agent_core::Error::ProcessingFailed(e.to_string()))
    }

    fn name(&self) -> &str {
        "get_financial_statements"
    }

    fn description(&self) -> &str {
        "Retrieves the annual financial statements (income statement, balance sheet, cash flow) \
         for a given company ticker symbol. Returns {\"status\": \"success\", \"financials\", \
         \"balance_sheet\", \"cashflow\"} with each statement keyed by period then line item, \
         or {\"status\": \"error\", \"error_message\"}."
    }

    fn input_schema(&self) -> Value {
        ticker_schema()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::table::Table;
    use crate::testing::StaticFinancials;
    use serde_json::json;
    use std::sync::Arc;

    fn tool(provider: StaticFinancials) -> FinancialStatementsTool {
        FinancialStatementsTool::new(StatementNormalizer::new(Arc::new(provider)))
    }

    #[test]
    fn test_tool_metadata() {
        let tool = tool(StaticFinancials::failing("unused"));
        assert_eq!(tool.name(), "get_financial_statements");
        assert!(tool.description().contains("balance sheet"));
        assert_eq!(tool.input_schema()["required"][0], "ticker");
    }

    #[tokio::test]
    async fn test_execute_returns_tagged_json() {
        let tool = tool(StaticFinancials::new(
            Table::from_records([("Total Revenue", "2024", Some(1.0))]),
            Table::empty(),
            Table::empty(),
        ));

        let value = tool.execute(json!({"ticker": "aapl"})).await.unwrap();
        assert_eq!(value["status"], "success");
        assert_eq!(value["financials"]["2024"]["Total Revenue"], 1.0);
    }

    #[tokio::test]
    async fn test_provider_failure_is_not_a_tool_error() {
        let tool = tool(StaticFinancials::failing("timed out"));

        let value = tool.execute(json!({"ticker": "AAPL"})).await.unwrap();
        assert_eq!(value, json!({"status": "error", "error_message": "API error: timed out"}));
    }

    #[tokio::test]
    async fn test_missing_ticker_is_invalid_input() {
        let tool = tool(StaticFinancials::failing("unused"));
        let err = tool.execute(json!({})).await.unwrap_err();
        assert!(matches!(err, agent_core::Error::InvalidInput(_)));
    }
}
