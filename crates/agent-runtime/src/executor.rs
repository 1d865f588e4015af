//! Agent executor for running agent loops
//!
//! The AgentExecutor implements the core agent loop pattern:
//! 1. Call LLM with conversation history and available tools
//! 2. Check stop reason
//! 3. If tool use requested, execute tools and loop back
//! 4. If completed, return final response

use agent_core::{Error, Result};
use agent_llm::{CompletionRequest, LLMProvider, Message, StopReason, ToolCall, ToolDefinition};
use agent_tools::ToolRegistry;
use std::sync::Arc;
use std::time::Instant;
use tracing::{debug, info, warn};

const PREVIEW_CHARS: usize = 300;

/// Configuration for agent execution
#[derive(Debug, Clone)]
pub struct ExecutorConfig {
    /// Maximum number of LLM round trips per request
    pub max_iterations: usize,

    /// Model to use
    pub model: String,

    /// System prompt
    pub system_prompt: Option<String>,

    /// Max tokens per completion
    pub max_tokens: usize,

    /// Temperature; `None` leaves the provider default
    pub temperature: Option<f32>,
}

impl Default for ExecutorConfig {
    fn default() -> Self {
        Self {
            max_iterations: 10,
            model: "gpt-3.5-turbo".to_string(),
            system_prompt: None,
            max_tokens: 4096,
            temperature: None,
        }
    }
}

/// Executes an agent loop: LLM → tool calls → execution → loop back
pub struct AgentExecutor {
    provider: Arc<dyn LLMProvider>,
    tool_registry: Arc<ToolRegistry>,
    config: ExecutorConfig,
}

impl AgentExecutor {
    pub fn new(
        provider: Arc<dyn LLMProvider>,
        tool_registry: Arc<ToolRegistry>,
        config: ExecutorConfig,
    ) -> Self {
        Self {
            provider,
            tool_registry,
            config,
        }
    }

    pub fn builder() -> AgentExecutorBuilder {
        AgentExecutorBuilder::new()
    }

    pub fn config(&self) -> &ExecutorConfig {
        &self.config
    }

    pub fn tool_registry(&self) -> &Arc<ToolRegistry> {
        &self.tool_registry
    }

    /// Execute the agent loop with a single user query
    pub async fn run(&self, user_message: String) -> Result<String> {
        self.run_with_history(user_message, Vec::new()).await
    }

    /// Execute the agent loop after previous conversation messages
    pub async fn run_with_history(
        &self,
        user_message: String,
        history: Vec<Message>,
    ) -> Result<String> {
        let mut conversation = history;
        conversation.push(Message::user(user_message));
        self.run_conversation(conversation).await
    }

    async fn run_conversation(&self, mut conversation: Vec<Message>) -> Result<String> {
        let tools = self.build_tool_definitions();
        debug!(tool_count = tools.len(), "Available tools");

        for iteration in 1..=self.config.max_iterations {
            info!(
                iteration,
                max_iterations = self.config.max_iterations,
                model = %self.config.model,
                "Sending request to LLM"
            );

            let mut builder = CompletionRequest::builder(&self.config.model)
                .messages(conversation.clone())
                .max_tokens(self.config.max_tokens)
                .temperature(self.config.temperature)
                .tools(tools.clone());
            if let Some(system) = &self.config.system_prompt {
                builder = builder.system(system.clone());
            }

            let response = self
                .provider
                .complete(builder.build())
                .await
                .map_err(|e| Error::ProcessingFailed(e.to_string()))?;

            info!(
                stop_reason = ?response.stop_reason,
                input_tokens = response.usage.input_tokens,
                output_tokens = response.usage.output_tokens,
                "LLM response received"
            );
            debug!(
                response_preview = %preview(response.message.text().unwrap_or("")),
                "LLM response content preview"
            );

            match response.stop_reason {
                StopReason::ToolUse if response.message.has_tool_calls() => {
                    let results = self.execute_tools(&response.message.tool_calls()).await;
                    conversation.push(response.message);
                    conversation.extend(results);
                }
                StopReason::MaxTokens => {
                    warn!("Hit max tokens in LLM response");
                    return Ok(response
                        .message
                        .text()
                        .unwrap_or("Response truncated due to token limit")
                        .to_string());
                }
                _ => {
                    let text = response.message.text().unwrap_or_default().to_string();
                    info!(iteration, response_length = text.len(), "Agent completed");
                    return Ok(text);
                }
            }
        }

        warn!(
            max_iterations = self.config.max_iterations,
            "Max iterations reached, stopping"
        );
        Err(Error::ProcessingFailed(format!(
            "Max iterations ({}) reached without completion",
            self.config.max_iterations
        )))
    }

    fn build_tool_definitions(&self) -> Vec<ToolDefinition> {
        self.tool_registry
            .list_tools()
            .iter()
            .map(|tool| ToolDefinition::new(tool.name(), tool.description(), tool.input_schema()))
            .collect()
    }

    /// Run every requested tool; failures become error results for the model
    async fn execute_tools(&self, calls: &[ToolCall<'_>]) -> Vec<Message> {
        let mut results = Vec::with_capacity(calls.len());

        for call in calls {
            info!(
                tool_name = %call.name,
                tool_id = %call.id,
                input_preview = %preview(&call.input.to_string()),
                "Executing tool"
            );

            let start = Instant::now();
            let outcome = self
                .tool_registry
                .execute(call.name, call.input.clone())
                .await;
            let duration_ms = start.elapsed().as_millis() as u64;

            match outcome {
                Ok(value) => {
                    let content = match value {
                        serde_json::Value::String(s) => s,
                        other => other.to_string(),
                    };
                    info!(
                        tool_name = %call.name,
                        duration_ms,
                        result_length = content.len(),
                        "Tool execution succeeded"
                    );
                    debug!(result_preview = %preview(&content), "Tool result preview");
                    results.push(Message::tool_result(call.id, content));
                }
                Err(e) => {
                    warn!(tool_name = %call.name, duration_ms, error = %e, "Tool execution failed");
                    results.push(Message::tool_error(call.id, format!("Error: {e}")));
                }
            }
        }

        results
    }
}

fn preview(text: &str) -> String {
    text.chars().take(PREVIEW_CHARS).collect()
}

/// Builder for AgentExecutor
pub struct AgentExecutorBuilder {
    provider: Option<Arc<dyn LLMProvider>>,
    tool_registry: Arc<ToolRegistry>,
    config: ExecutorConfig,
}

impl AgentExecutorBuilder {
    pub fn new() -> Self {
        Self {
            provider: None,
            tool_registry: Arc::new(ToolRegistry::new()),
            config: ExecutorConfig::default(),
        }
    }

    pub fn provider(mut self, provider: Arc<dyn LLMProvider>) -> Self {
        self.provider = Some(provider);
        self
    }

    pub fn tool_registry(mut self, registry: Arc<ToolRegistry>) -> Self {
        self.tool_registry = registry;
        self
    }

    pub fn config(mut self, config: ExecutorConfig) -> Self {
        self.config = config;
        self
    }

    pub fn max_iterations(mut self, max: usize) -> Self {
        self.config.max_iterations = max;
        self
    }

    pub fn model(mut self, model: impl Into<String>) -> Self {
        self.config.model = model.into();
        self
    }

    pub fn system_prompt(mut self, prompt: impl Into<String>) -> Self {
        self.config.system_prompt = Some(prompt.into());
        self
    }

    pub fn max_tokens(mut self, max_tokens: usize) -> Self {
        self.config.max_tokens = max_tokens;
        self
    }

    pub fn temperature(mut self, temperature: f32) -> Self {
        self.config.temperature = Some(temperature);
        self
    }

    pub fn build(self) -> Result<AgentExecutor> {
        let provider = self
            .provider
            .ok_or_else(|| Error::InitializationFailed("Provider not set".to_string()))?;

        Ok(AgentExecutor::new(provider, self.tool_registry, self.config))
    }
}

impl Default for AgentExecutorBuilder {
    fn default() -> Self {
        Self::new()
    }
}
