//! Alpha Vantage API client

use super::{FinancialsProvider, MarketSnapshot, MarketSnapshotProvider, humanize_field};
use crate::error::{Result, StockError};
use crate::table::{Label, Table};
use async_trait::async_trait;
use chrono::NaiveDate;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::HashMap;
use std::time::Duration;
use tracing::{debug, instrument};

const BASE_URL: &str = "https://www.alphavantage.co/query";

/// Report fields that are metadata, not line items
const NON_NUMERIC_FIELDS: &[&str] = &["fiscalDateEnding", "reportedCurrency"];

/// Alpha Vantage API client
#[derive(Debug, Clone)]
pub struct AlphaVantageClient {
    client: Client,
    api_key: String,
}

/// Company overview data
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct CompanyOverview {
    #[serde(default)]
    pub symbol: String,
    pub name: Option<String>,
    #[serde(rename = "MarketCapitalization")]
    pub market_cap: Option<String>,
    #[serde(rename = "52WeekHigh")]
    pub high_52w: Option<String>,
    #[serde(rename = "52WeekLow")]
    pub low_52w: Option<String>,
}

/// Latest trading figures from `GLOBAL_QUOTE`
#[derive(Debug, Clone, Default, PartialEq)]
pub struct GlobalQuote {
    pub price: Option<f64>,
    pub change_percent: Option<f64>,
}

impl AlphaVantageClient {
    /// Create a client; `timeout` of `None` keeps reqwest's default
    pub fn new(api_key: impl Into<String>, timeout: Option<Duration>) -> Result<Self> {
        let mut builder = Client::builder();
        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }

        Ok(Self {
            client: builder.build()?,
            api_key: api_key.into(),
        })
    }

    /// Create from environment variable ALPHA_VANTAGE_API_KEY
    pub fn from_env() -> Result<Self> {
        let api_key = agent_utils::env_var("ALPHA_VANTAGE_API_KEY")?;
        Self::new(api_key, None)
    }

    /// Run one `function` query and check the payload for API errors
    #[instrument(skip(self))]
    async fn query(&self, function: &str, symbol: &str) -> Result<Value> {
        let mut params = HashMap::new();
        params.insert("function", function);
        params.insert("symbol", symbol);
        params.insert("apikey", &self.api_key);

        let response = self.client.get(BASE_URL).query(&params).send().await?;

        if !response.status().is_success() {
            return Err(StockError::AlphaVantageError(format!(
                "HTTP error: {}",
                response.status()
            )));
        }

        let data: Value = response.json().await?;
        check_api_error(&data)?;
        Ok(data)
    }

    async fn annual_reports(&self, function: &str, symbol: &str) -> Result<Table> {
        let data = self.query(function, symbol).await?;
        Ok(parse_annual_reports(&data))
    }

    pub async fn get_company_overview(&self, symbol: &str) -> Result<CompanyOverview> {
        let data = self.query("OVERVIEW", symbol).await?;
        if data.as_object().is_none_or(serde_json::Map::is_empty) {
            return Err(StockError::DataUnavailable {
                symbol: symbol.to_string(),
                reason: "No company overview returned".to_string(),
            });
        }
        Ok(serde_json::from_value(data)?)
    }

    pub async fn get_global_quote(&self, symbol: &str) -> Result<GlobalQuote> {
        let data = self.query("GLOBAL_QUOTE", symbol).await?;
        Ok(parse_global_quote(&data))
    }
}

#[async_trait]
impl FinancialsProvider for AlphaVantageClient {
    async fn fetch_financials(&self, ticker: &str) -> Result<Table> {
        self.annual_reports("INCOME_STATEMENT", ticker).await
    }

    async fn fetch_balance_sheet(&self, ticker: &str) -> Result<Table> {
        self.annual_reports("BALANCE_SHEET", ticker).await
    }

    async fn fetch_cashflow(&self, ticker: &str) -> Result<Table> {
        self.annual_reports("CASH_FLOW", ticker).await
    }

    fn name(&self) -> &str {
        "Alpha Vantage"
    }
}

#[async_trait]
impl MarketSnapshotProvider for AlphaVantageClient {
    async fn snapshot(&self, ticker: &str) -> Result<MarketSnapshot> {
        let overview = self.get_company_overview(ticker).await?;
        let quote = self.get_global_quote(ticker).await?;

        Ok(MarketSnapshot {
            symbol: ticker.to_string(),
            name: overview.name,
            price: quote.price,
            change_percent: quote.change_percent,
            market_cap: overview
                .market_cap
                .as_deref()
                .and_then(parse_number)
                .map(|cap| cap.round() as u64),
            high_52w: overview.high_52w.as_deref().and_then(parse_number),
            low_52w: overview.low_52w.as_deref().and_then(parse_number),
        })
    }
}

fn check_api_error(data: &Value) -> Result<()> {
    if let Some(error) = data.get("Error Message") {
        return Err(StockError::AlphaVantageError(
            error.as_str().unwrap_or_default().to_string(),
        ));
    }

    // Free-tier throttling is reported as "Note" or "Information"
    if data.get("Note").is_some() || data.get("Information").is_some() {
        return Err(StockError::RateLimitExceeded {
            provider: "Alpha Vantage".to_string(),
        });
    }

    Ok(())
}

/// Numeric field; Alpha Vantage writes missing values as `"None"` or `"-"`
fn parse_number(raw: &str) -> Option<f64> {
    raw.trim().trim_end_matches('%').parse().ok()
}

/// `annualReports` as a table: one column per fiscal year, newest first
fn parse_annual_reports(data: &Value) -> Table {
    let reports = data
        .get("annualReports")
        .and_then(Value::as_array)
        .map(Vec::as_slice)
        .unwrap_or_default();

    let records = reports.iter().filter_map(Value::as_object).flat_map(|report| {
        let period = report
            .get("fiscalDateEnding")
            .and_then(Value::as_str)
            .map(|raw| match NaiveDate::parse_from_str(raw, "%Y-%m-%d") {
                Ok(date) => Label::Date(date),
                Err(_) => Label::text(raw),
            });

        report
            .iter()
            .filter(|(field, _)| !NON_NUMERIC_FIELDS.contains(&field.as_str()))
            .filter_map(move |(field, value)| {
                let period = period.clone()?;
                let value = value.as_str().and_then(parse_number);
                Some((Label::Text(humanize_field(field)), period, value))
            })
    });

    let table = Table::from_records(records);
    debug!(
        rows = table.rows().len(),
        columns = table.columns().len(),
        "Parsed annual reports"
    );
    table
}

fn parse_global_quote(data: &Value) -> GlobalQuote {
    let quote = &data["Global Quote"];
    let field = |name: &str| quote.get(name).and_then(Value::as_str).and_then(parse_number);

    GlobalQuote {
        price: field("05. price"),
        change_percent: field("10. change percent"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_parse_annual_reports() {
        let data = json!({
            "symbol": "IBM",
            "annualReports": [
                {
                    "fiscalDateEnding": "2024-12-31",
                    "reportedCurrency": "USD",
                    "totalRevenue": "62753000000",
                    "netIncome": "6023000000",
                    "researchAndDevelopment": "None"
                },
                {
                    "fiscalDateEnding": "2023-12-31",
                    "reportedCurrency": "USD",
                    "totalRevenue": "61860000000",
                    "netIncome": "7502000000",
                    "researchAndDevelopment": "6775000000"
                }
            ]
        });

        let table = parse_annual_reports(&data);
        assert_eq!(table.columns().len(), 2);
        assert_eq!(table.rows().len(), 3);
        assert!(!table.rows().contains(&Label::text("Reported Currency")));

        let map = table.normalize().unwrap();
        assert_eq!(map["2024-12-31"]["Total Revenue"], 62_753_000_000.0);
        assert_eq!(map["2024-12-31"]["Research And Development"], 0.0);
        assert_eq!(map["2023-12-31"]["Net Income"], 7_502_000_000.0);
    }

    #[test]
    fn test_unknown_symbol_gives_empty_table() {
        assert!(parse_annual_reports(&json!({})).is_empty());
    }

    #[test]
    fn test_api_errors() {
        let err = check_api_error(&json!({"Error Message": "Invalid API call."})).unwrap_err();
        assert_eq!(err.to_string(), "Alpha Vantage error: Invalid API call.");

        let err = check_api_error(&json!({"Note": "Thank you for using Alpha Vantage!"})).unwrap_err();
        assert!(matches!(err, StockError::RateLimitExceeded { .. }));

        assert!(check_api_error(&json!({"annualReports": []})).is_ok());
    }

    #[test]
    fn test_parse_global_quote() {
        let data = json!({
            "Global Quote": {
                "01. symbol": "IBM",
                "05. price": "245.1200",
                "10. change percent": "-1.2345%"
            }
        });

        let quote = parse_global_quote(&data);
        assert_eq!(quote.price, Some(245.12));
        assert_eq!(quote.change_percent, Some(-1.2345));
        assert_eq!(parse_global_quote(&json!({})), GlobalQuote::default());
    }

    #[test]
    fn test_overview_deserialization() {
        let overview: CompanyOverview = serde_json::from_value(json!({
            "Symbol": "IBM",
            "Name": "International Business Machines",
            "MarketCapitalization": "227000000000",
            "52WeekHigh": "266.45",
            "52WeekLow": "162.62"
        }))
        .unwrap();

        assert_eq!(overview.name.as_deref(), Some("International Business Machines"));
        assert_eq!(overview.high_52w.as_deref().and_then(parse_number), Some(266.45));
    }

    #[tokio::test]
    #[ignore = "requires ALPHA_VANTAGE_API_KEY and network access"]
    async fn test_fetch_ibm_cashflow() {
        let client = AlphaVantageClient::from_env().unwrap();
        let table = client.fetch_cashflow("IBM").await.unwrap();
        assert!(!table.is_empty());
    }
}
