//! Tools exposed to the stock agents
//!
//! Every tool takes a single `ticker` argument.

pub mod advice;
pub mod financial_statements;
pub mod stock_summary;

pub use advice::AdviceTool;
pub use financial_statements::FinancialStatementsTool;
pub use stock_summary::StockSummaryTool;

use agent_llm::tools::schema;
use serde::Deserialize;
use serde_json::{Value, json};

#[derive(Debug, Deserialize)]
struct TickerParams {
    ticker: String,
}

/// Extract the `ticker` argument
fn parse_ticker(params: Value) -> agent_core::Result<String> {
    let params: TickerParams = serde_json::from_value(params)
        .map_err(|e| agent_core::Error::InvalidInput(e.to_string()))?;
    Ok(params.ticker)
}

fn ticker_schema() -> Value {
    schema::object(
        json!({
            "ticker": schema::string("The ticker symbol of the company (e.g., \"AAPL\", \"MSFT\")")
        }),
        &["ticker"],
    )
}
