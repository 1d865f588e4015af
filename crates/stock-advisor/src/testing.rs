//! In-memory collaborators for unit tests

use crate::api::{FinancialsProvider, MarketSnapshot, MarketSnapshotProvider};
use crate::error::{Result, StockError};
use crate::table::Table;
use agent_llm::{
    CompletionRequest, CompletionResponse, ContentBlock, LLMError, LLMProvider, Message,
    StopReason, TokenUsage,
};
use async_trait::async_trait;
use serde_json::Value;
use std::collections::VecDeque;
use std::sync::Mutex;

/// Serves fixed tables and records `"<statement>:<ticker>"` per fetch
pub(crate) struct StaticFinancials {
    tables: Option<[Table; 3]>,
    error: String,
    calls: Mutex<Vec<String>>,
}

impl StaticFinancials {
    pub(crate) fn new(financials: Table, balance_sheet: Table, cashflow: Table) -> Self {
        Self {
            tables: Some([financials, balance_sheet, cashflow]),
            error: String::new(),
            calls: Mutex::new(Vec::new()),
        }
    }

    /// Every fetch fails with `StockError::ApiError(message)`
    pub(crate) fn failing(message: &str) -> Self {
        Self {
            tables: None,
            error: message.to_string(),
            calls: Mutex::new(Vec::new()),
        }
    }

    pub(crate) fn calls(&self) -> Vec<String> {
        self.calls.lock().unwrap().clone()
    }

    fn serve(&self, index: usize, statement: &str, ticker: &str) -> Result<Table> {
        self.calls.lock().unwrap().push(format!("{statement}:{ticker}"));
        match &self.tables {
            Some(tables) => Ok(tables[index].clone()),
            None => Err(StockError::ApiError(self.error.clone())),
        }
    }
}

#[async_trait]
impl FinancialsProvider for StaticFinancials {
    async fn fetch_financials(&self, ticker: &str) -> Result<Table> {
        self.serve(0, "financials", ticker)
    }

    async fn fetch_balance_sheet(&self, ticker: &str) -> Result<Table> {
        self.serve(1, "balance_sheet", ticker)
    }

    async fn fetch_cashflow(&self, ticker: &str) -> Result<Table> {
        self.serve(2, "cashflow", ticker)
    }

    fn name(&self) -> &str {
        "static"
    }
}

/// Serves one snapshot, or fails when none is set
pub(crate) struct StaticMarket {
    snapshot: Option<MarketSnapshot>,
}

impl StaticMarket {
    pub(crate) fn new(snapshot: MarketSnapshot) -> Self {
        Self {
            snapshot: Some(snapshot),
        }
    }

    pub(crate) fn unavailable() -> Self {
        Self { snapshot: None }
    }
}

#[async_trait]
impl MarketSnapshotProvider for StaticMarket {
    async fn snapshot(&self, ticker: &str) -> Result<MarketSnapshot> {
        self.snapshot
            .clone()
            .ok_or_else(|| StockError::YahooFinanceError(format!("No data found for {ticker}")))
    }
}

/// Replays canned LLM responses and keeps the requests it saw
pub(crate) struct ScriptedLlm {
    responses: Mutex<VecDeque<CompletionResponse>>,
    requests: Mutex<Vec<CompletionRequest>>,
}

impl ScriptedLlm {
    pub(crate) fn new(responses: Vec<CompletionResponse>) -> Self {
        Self {
            responses: Mutex::new(responses.into()),
            requests: Mutex::new(Vec::new()),
        }
    }

    pub(crate) fn requests(&self) -> Vec<CompletionRequest> {
        self.requests.lock().unwrap().clone()
    }
}

#[async_trait]
impl LLMProvider for ScriptedLlm {
    async fn complete(&self, request: CompletionRequest) -> agent_llm::Result<CompletionResponse> {
        self.requests.lock().unwrap().push(request);
        self.responses
            .lock()
            .unwrap()
            .pop_front()
            .ok_or_else(|| LLMError::RequestFailed("script exhausted".to_string()))
    }

    fn name(&self) -> &str {
        "scripted"
    }
}

pub(crate) fn text_reply(text: &str) -> CompletionResponse {
    CompletionResponse {
        message: Message::assistant(text),
        stop_reason: StopReason::EndTurn,
        usage: TokenUsage::default(),
    }
}

pub(crate) fn tool_call(id: &str, name: &str, input: Value) -> CompletionResponse {
    CompletionResponse {
        message: Message::assistant_blocks(vec![ContentBlock::ToolUse {
            id: id.to_string(),
            name: name.to_string(),
            input,
        }]),
        stop_reason: StopReason::ToolUse,
        usage: TokenUsage::default(),
    }
}

/// Content of the tool result answering `tool_use_id` in a request
pub(crate) fn tool_result_content(request: &CompletionRequest, tool_use_id: &str) -> Option<String> {
    request.messages.iter().find_map(|message| match &message.content {
        Some(agent_llm::MessageContent::Blocks(blocks)) => blocks.iter().find_map(|block| match block {
            ContentBlock::ToolResult {
                tool_use_id: id,
                content,
                ..
            } if id == tool_use_id => Some(content.clone()),
            _ => None,
        }),
        _ => None,
    })
}
