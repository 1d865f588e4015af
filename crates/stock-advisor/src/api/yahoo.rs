//! Yahoo Finance API client
//!
//! Statements come from the fundamentals-timeseries endpoint, one series per
//! line item (`annualTotalRevenue`, `annualNetIncome`, ...), each a list of
//! `{asOfDate, reportedValue: {raw}}` points. Snapshots come from the chart
//! endpoint metadata plus the latest `trailingMarketCap` point.

use super::{FinancialsProvider, MarketSnapshot, MarketSnapshotProvider, humanize_field};
use crate::error::{Result, StockError};
use crate::table::{Label, Table, TableError};
use async_trait::async_trait;
use chrono::{Duration as ChronoDuration, NaiveDate, Utc};
use reqwest::{Client, StatusCode};
use serde::Deserialize;
use serde_json::Value;
use std::collections::{BTreeSet, HashMap};
use std::time::Duration;
use tracing::{debug, instrument, warn};
use url::Url;

const TIMESERIES_URL: &str =
    "https://query2.finance.yahoo.com/ws/fundamentals-timeseries/v1/finance/timeseries";
const CHART_URL: &str = "https://query1.finance.yahoo.com/v8/finance/chart";
const USER_AGENT: &str = "Mozilla/5.0 (X11; Linux x86_64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/124.0 Safari/537.36";

/// Years of annual history requested
const HISTORY_YEARS: i64 = 10;

const INCOME_STATEMENT_FIELDS: &[&str] = &[
    "TotalRevenue",
    "CostOfRevenue",
    "GrossProfit",
    "ResearchAndDevelopment",
    "SellingGeneralAndAdministration",
    "OperatingExpense",
    "OperatingIncome",
    "InterestExpense",
    "PretaxIncome",
    "TaxProvision",
    "NetIncome",
    "NetIncomeCommonStockholders",
    "EBIT",
    "EBITDA",
    "BasicEPS",
    "DilutedEPS",
    "BasicAverageShares",
    "DilutedAverageShares",
];

const BALANCE_SHEET_FIELDS: &[&str] = &[
    "TotalAssets",
    "CurrentAssets",
    "CashAndCashEquivalents",
    "CashCashEquivalentsAndShortTermInvestments",
    "AccountsReceivable",
    "Inventory",
    "NetPPE",
    "Goodwill",
    "TotalLiabilitiesNetMinorityInterest",
    "CurrentLiabilities",
    "AccountsPayable",
    "LongTermDebt",
    "TotalDebt",
    "NetDebt",
    "StockholdersEquity",
    "RetainedEarnings",
    "WorkingCapital",
    "OrdinarySharesNumber",
];

const CASHFLOW_FIELDS: &[&str] = &[
    "OperatingCashFlow",
    "InvestingCashFlow",
    "FinancingCashFlow",
    "FreeCashFlow",
    "CapitalExpenditure",
    "DepreciationAndAmortization",
    "StockBasedCompensation",
    "ChangeInWorkingCapital",
    "RepurchaseOfCapitalStock",
    "CashDividendsPaid",
    "IssuanceOfDebt",
    "RepaymentOfDebt",
    "EndCashPosition",
];

/// Yahoo Finance API client (no API key required)
#[derive(Debug, Clone)]
pub struct YahooFinanceClient {
    client: Client,
}

/// Dated points of one series, keyed by series name without prefix
type SeriesMap = HashMap<String, Vec<(NaiveDate, f64)>>;

#[derive(Debug, Deserialize)]
struct ChartEnvelope {
    chart: ChartBody,
}

#[derive(Debug, Deserialize)]
struct ChartBody {
    #[serde(default)]
    result: Option<Vec<ChartResult>>,
    #[serde(default)]
    error: Option<YahooError>,
}

#[derive(Debug, Deserialize)]
struct ChartResult {
    meta: ChartMeta,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ChartMeta {
    short_name: Option<String>,
    long_name: Option<String>,
    regular_market_price: Option<f64>,
    chart_previous_close: Option<f64>,
    previous_close: Option<f64>,
    fifty_two_week_high: Option<f64>,
    fifty_two_week_low: Option<f64>,
}

#[derive(Debug, Deserialize)]
struct YahooError {
    #[serde(default)]
    code: Option<String>,
    #[serde(default)]
    description: Option<String>,
}

impl YahooError {
    fn message(&self) -> String {
        self.description
            .clone()
            .or_else(|| self.code.clone())
            .unwrap_or_else(|| "unknown error".to_string())
    }
}

impl YahooFinanceClient {
    /// Create a client; `timeout` of `None` keeps reqwest's default
    pub fn new(timeout: Option<Duration>) -> Result<Self> {
        let mut builder = Client::builder().user_agent(USER_AGENT);
        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }
        Ok(Self {
            client: builder.build()?,
        })
    }

    async fn get_json(&self, url: Url, query: &[(&str, String)]) -> Result<Value> {
        let response = self.client.get(url).query(query).send().await?;
        let status = response.status();

        // Unknown symbols come back as 404 with a JSON error body
        if !status.is_success() && status != StatusCode::NOT_FOUND {
            return Err(StockError::YahooFinanceError(format!("HTTP error: {status}")));
        }
        Ok(response.json().await?)
    }

    /// Fetch `prefix`-ed fundamentals series between `start` and now
    #[instrument(skip(self, fields), fields(field_count = fields.len()))]
    async fn fetch_timeseries(
        &self,
        symbol: &str,
        prefix: &str,
        fields: &[&str],
        start: chrono::DateTime<Utc>,
    ) -> Result<SeriesMap> {
        let types = fields
            .iter()
            .map(|f| format!("{prefix}{f}"))
            .collect::<Vec<_>>()
            .join(",");
        let query = [
            ("symbol", symbol.to_string()),
            ("type", types),
            ("period1", start.timestamp().to_string()),
            ("period2", Utc::now().timestamp().to_string()),
        ];

        let body = self
            .get_json(symbol_url(TIMESERIES_URL, symbol)?, &query)
            .await?;
        parse_timeseries(&body, prefix)
    }

    async fn statement(&self, symbol: &str, fields: &[&str]) -> Result<Table> {
        let start = Utc::now() - ChronoDuration::days(365 * HISTORY_YEARS);
        let series = self.fetch_timeseries(symbol, "annual", fields, start).await?;
        Ok(build_statement(fields, &series)?)
    }

    async fn chart_meta(&self, symbol: &str) -> Result<ChartMeta> {
        let query = [("range", "1d".to_string()), ("interval", "1d".to_string())];
        let body = self
            .get_json(symbol_url(CHART_URL, symbol)?, &query)
            .await?;
        parse_chart_meta(body, symbol)
    }

    async fn market_cap(&self, symbol: &str) -> Result<Option<u64>> {
        let start = Utc::now() - ChronoDuration::days(30);
        let series = self
            .fetch_timeseries(symbol, "trailing", &["MarketCap"], start)
            .await?;

        Ok(series
            .get("MarketCap")
            .and_then(|points| points.iter().max_by_key(|(date, _)| *date))
            .map(|(_, value)| value.round() as u64))
    }
}

#[async_trait]
impl FinancialsProvider for YahooFinanceClient {
    async fn fetch_financials(&self, ticker: &str) -> Result<Table> {
        self.statement(ticker, INCOME_STATEMENT_FIELDS).await
    }

    async fn fetch_balance_sheet(&self, ticker: &str) -> Result<Table> {
        self.statement(ticker, BALANCE_SHEET_FIELDS).await
    }

    async fn fetch_cashflow(&self, ticker: &str) -> Result<Table> {
        self.statement(ticker, CASHFLOW_FIELDS).await
    }

    fn name(&self) -> &str {
        "Yahoo Finance"
    }
}

#[async_trait]
impl MarketSnapshotProvider for YahooFinanceClient {
    #[instrument(skip(self))]
    async fn snapshot(&self, ticker: &str) -> Result<MarketSnapshot> {
        let meta = self.chart_meta(ticker).await?;
        let market_cap = self.market_cap(ticker).await;
        Ok(build_snapshot(ticker, meta, market_cap))
    }
}

/// A failed market cap lookup only blanks that field
fn build_snapshot(ticker: &str, meta: ChartMeta, market_cap: Result<Option<u64>>) -> MarketSnapshot {
    let market_cap = market_cap.unwrap_or_else(|e| {
        warn!(%ticker, error = %e, "Market cap lookup failed");
        None
    });

    let previous = meta.chart_previous_close.or(meta.previous_close);
    let change_percent = match (meta.regular_market_price, previous) {
        (Some(price), Some(prev)) if prev != 0.0 => Some((price - prev) / prev * 100.0),
        _ => None,
    };

    MarketSnapshot {
        symbol: ticker.to_string(),
        name: meta.short_name.or(meta.long_name),
        price: meta.regular_market_price,
        change_percent,
        market_cap,
        high_52w: meta.fifty_two_week_high,
        low_52w: meta.fifty_two_week_low,
    }
}

/// `base/<symbol>` with the symbol as one percent-encoded path segment
fn symbol_url(base: &str, symbol: &str) -> Result<Url> {
    // `.` and `..` would be dropped as segments and address the base itself
    if symbol.is_empty() || symbol == "." || symbol == ".." {
        return Err(StockError::YahooFinanceError(format!(
            "Invalid symbol '{symbol}'"
        )));
    }

    let invalid = |e: String| StockError::YahooFinanceError(format!("Invalid URL {base}: {e}"));
    let mut url = Url::parse(base).map_err(|e| invalid(e.to_string()))?;
    url.path_segments_mut()
        .map_err(|()| invalid("cannot be a base".to_string()))?
        .push(symbol);
    Ok(url)
}

fn parse_timeseries(body: &Value, prefix: &str) -> Result<SeriesMap> {
    let timeseries = body
        .get("timeseries")
        .ok_or_else(|| StockError::YahooFinanceError("Missing timeseries payload".to_string()))?;

    if let Some(error) = timeseries.get("error").filter(|e| !e.is_null()) {
        let error: YahooError = serde_json::from_value(error.clone())?;
        return Err(StockError::YahooFinanceError(error.message()));
    }

    let mut series = SeriesMap::new();
    let results = timeseries
        .get("result")
        .and_then(Value::as_array)
        .map(Vec::as_slice)
        .unwrap_or_default();

    for result in results {
        let Some(type_name) = result["meta"]["type"][0].as_str() else {
            continue;
        };
        let Some(points) = result.get(type_name).and_then(Value::as_array) else {
            continue;
        };

        let parsed: Vec<(NaiveDate, f64)> = points
            .iter()
            .filter_map(|point| {
                let date = NaiveDate::parse_from_str(point["asOfDate"].as_str()?, "%Y-%m-%d").ok()?;
                let value = point["reportedValue"]["raw"].as_f64()?;
                Some((date, value))
            })
            .collect();

        let field = type_name.strip_prefix(prefix).unwrap_or(type_name);
        debug!(field, points = parsed.len(), "Parsed series");
        series.insert(field.to_string(), parsed);
    }

    Ok(series)
}

/// Rows in `fields` order, columns newest period first
fn build_statement(fields: &[&str], series: &SeriesMap) -> std::result::Result<Table, TableError> {
    let dates: BTreeSet<NaiveDate> = series
        .values()
        .flat_map(|points| points.iter().map(|(date, _)| *date))
        .collect();
    let columns: Vec<NaiveDate> = dates.into_iter().rev().collect();

    let mut rows = Vec::new();
    let mut cells = Vec::new();
    for field in fields {
        let Some(points) = series.get(*field).filter(|p| !p.is_empty()) else {
            continue;
        };
        let by_date: HashMap<NaiveDate, f64> = points.iter().copied().collect();
        rows.push(Label::Text(humanize_field(field)));
        cells.push(columns.iter().map(|d| by_date.get(d).copied()).collect());
    }

    Table::new(columns.into_iter().map(Label::Date).collect(), rows, cells)
}

fn parse_chart_meta(body: Value, symbol: &str) -> Result<ChartMeta> {
    let envelope: ChartEnvelope = serde_json::from_value(body)?;

    if let Some(error) = envelope.chart.error {
        return Err(StockError::YahooFinanceError(error.message()));
    }

    envelope
        .chart
        .result
        .and_then(|results| results.into_iter().next())
        .map(|r| r.meta)
        .ok_or_else(|| StockError::DataUnavailable {
            symbol: symbol.to_string(),
            reason: "No chart data returned".to_string(),
        })
}
