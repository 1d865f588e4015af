//! Stock advisor agent

use agent_core::{Agent, Context, Result};
use agent_llm::LLMProvider;
use agent_runtime::{AgentExecutor, ExecutorConfig, ToolAgent};
use agent_tools::ToolRegistry;
use async_trait::async_trait;
use std::sync::Arc;

use crate::statements::StatementNormalizer;
use crate::tools::FinancialStatementsTool;

pub const ADVISOR_NAME: &str = "stock_advisor_agent";

pub const ADVISOR_DESCRIPTION: &str = "Stock-advisor agent that analyzes a company's financial \
     statements and recommends buy, hold, or sell.";

const SYSTEM_PROMPT: &str = "You are a stock-advisor agent. \
When the user asks about a ticker, call the provided tool \
`get_financial_statements(ticker)` to retrieve the latest annual financials. \
Based on revenue trends, profit margins, debt levels, and cash flow, \
formulate a concise recommendation: BUY, HOLD, or SELL. \
Explain your reasoning (e.g., recent revenue growth, debt ratios, profitability trend).";

/// Reads annual statements and answers BUY, HOLD or SELL
pub struct StockAdvisorAgent {
    agent: ToolAgent,
}

impl StockAdvisorAgent {
    pub fn new(
        llm: Arc<dyn LLMProvider>,
        normalizer: StatementNormalizer,
        model: impl Into<String>,
    ) -> Self {
        let tools = Arc::new(
            ToolRegistry::new().with_tool(Arc::new(FinancialStatementsTool::new(normalizer))),
        );

        let executor_config = ExecutorConfig {
            model: model.into(),
            system_prompt: Some(SYSTEM_PROMPT.to_string()),
            max_tokens: 2048,
            temperature: None,
            max_iterations: 5,
        };

        let executor = AgentExecutor::new(llm, tools, executor_config);
        Self {
            agent: ToolAgent::new(executor, ADVISOR_NAME).with_description(ADVISOR_DESCRIPTION),
        }
    }
}

#[async_trait]
impl Agent for StockAdvisorAgent {
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
