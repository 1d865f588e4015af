//! Tool for consulting the stock advisor agent over A2A

use super::{parse_ticker, ticker_schema};
use crate::statements::normalize_ticker;
use agent_a2a::{A2AMessage, MessageTransport};
use agent_core::Result as AgentResult;
use agent_tools::Tool;
use async_trait::async_trait;
use serde_json::Value;
use std::sync::Arc;
use tracing::info;

/// `get_advice_from_adk(ticker)`: asks the advisor for BUY/HOLD/SELL
pub struct AdviceTool {
    transport: Arc<dyn MessageTransport>,
}

impl AdviceTool {
    pub fn new(transport: Arc<dyn MessageTransport>) -> Self {
        Self { transport }
    }
}

#[async_trait]
impl Tool for AdviceTool {
    async fn execute(&self, params: Value) -> AgentResult<Value> {
        let ticker = normalize_ticker(&parse_ticker(params)?);
        info!(%ticker, "Requesting advice from advisor agent");

        let reply = self
            .transport
            .send_message(A2AMessage::user_text(format!("Analyze {ticker}")))
            .await?;

        Ok(Value::String(reply.content.to_string()))
    }

    fn name(&self) -> &str {
        "get_advice_from_adk"
    }

    fn description(&self) -> &str {
        "Gets a BUY/HOLD/SELL recommendation from the stock advisor agent."
    }

    fn input_schema(&self) -> Value {
        ticker_schema()
    }
}
