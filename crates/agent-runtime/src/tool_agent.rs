//! Tool agent implementation (wraps AgentExecutor)

use crate::executor::AgentExecutor;
use agent_core::{Agent, Context, Result};
use async_trait::async_trait;
use tracing::info;

/// An agent that answers through the LLM loop with tool execution
pub struct ToolAgent {
    executor: AgentExecutor,
    name: String,
    description: String,
}

impl ToolAgent {
    pub fn new(executor: AgentExecutor, name: impl Into<String>) -> Self {
        Self {
            executor,
            name: name.into(),
            description: String::new(),
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    pub fn executor(&self) -> &AgentExecutor {
        &self.executor
    }
}

#[async_trait]
impl Agent for ToolAgent {
    async fn process(&self, input: String, context: &mut Context) -> Result<String> {
        info!(
            agent = %self.name,
            source = context.source().unwrap_or("unknown"),
            session_id = context.session_id().unwrap_or("-"),
            conversation_id = context.conversation_id().unwrap_or("-"),
            "Processing request"
        );
        self.executor.run(input).await
    }

    fn name(&self) -> &str {
        &self.name
    }

    fn description(&self) -> &str {
        &self.description
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::executor::tests::{ScriptedProvider, text_response};
    use std::sync::Arc;

    #[tokio::test]
    async fn test_tool_agent_delegates_to_executor() {
        let provider = Arc::new(ScriptedProvider::new(vec![text_response("BUY")]));
        let executor = AgentExecutor::builder().provider(provider).build().unwrap();
        let agent = ToolAgent::new(executor, "advisor").with_description("Gives advice");

        assert_eq!(agent.name(), "advisor");
        assert_eq!(agent.description(), "Gives advice");

        let mut context = Context::new().with_source("test");
        let reply = agent
            .process("Analyze AAPL".to_string(), &mut context)
            .await
            .unwrap();
        assert_eq!(reply, "BUY");
    }
}
