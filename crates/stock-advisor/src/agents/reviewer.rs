//! Stock reviewer agent

use agent_a2a::MessageTransport;
use agent_core::{Agent, Context, Result};
use agent_llm::LLMProvider;
use agent_runtime::{AgentExecutor, ExecutorConfig, ToolAgent};
use agent_tools::ToolRegistry;
use async_trait::async_trait;
use std::sync::Arc;

use crate::api::MarketSnapshotProvider;
use crate::tools::{AdviceTool, StockSummaryTool};

pub const REVIEWER_GREETING: &str =
    "Welcome to Stock Reviewer Agent. Ask me about any stock (e.g., AAPL, TSLA, MSFT):";

const SYSTEM_MESSAGE: &str = "You are a stock reviewer agent. You only provide general summaries \
of companies, not financial advice.";

/// Summarizes companies and relays the advisor's recommendation
pub struct StockReviewerAgent {
    agent: ToolAgent,
}

impl StockReviewerAgent {
    pub fn new(
        llm: Arc<dyn LLMProvider>,
        market: Arc<dyn MarketSnapshotProvider>,
        advisor: Arc<dyn MessageTransport>,
        model: impl Into<String>,
    ) -> Self {
        let tools = Arc::new(
            ToolRegistry::new()
                .with_tool(Arc::new(StockSummaryTool::new(market)))
                .with_tool(Arc::new(AdviceTool::new(advisor))),
        );

        let executor_config = ExecutorConfig {
            model: model.into(),
            system_prompt: Some(SYSTEM_MESSAGE.to_string()),
            max_tokens: 1024,
            temperature: Some(0.0),
            max_iterations: 6,
        };

        let executor = AgentExecutor::new(llm, tools, executor_config);
        Self {
            agent: ToolAgent::new(executor, "stock_reviewer_agent")
                .with_description("General company summaries with advisor recommendations."),
        }
    }
}

#[async_trait]
impl Agent for StockReviewerAgent {
    async fn process(&self, input: String, context: &mut Context) -> Result<String> {
        self.agent.process(input, context).await
    }

    fn name(&self) -> &str {
        self.agent.name()
    }

    fn description(&self) -> &str {
        self.agent.description()
    }
}
