//! Tool trait definition

use agent_core::Result;
use async_trait::async_trait;
use serde_json::Value;

/// Trait for tools that agents can execute
///
/// Each tool provides a name, a description and a JSON schema for its
/// input; the LLM uses all three to decide when and how to call it.
#[async_trait]
pub trait Tool: Send + Sync {
    /// Execute the tool with parameters matching `input_schema`
    async fn execute(&self, params: Value) -> Result<Value>;

    /// Unique name within a `ToolRegistry`
    fn name(&self) -> &str;

    /// Tells the LLM when to use this tool
    fn description(&self) -> &str;

    /// Input schema (JSON Schema object)
    ///
    /// # Example
    ///
    /// ```
    /// use serde_json::json;
    ///
    /// let schema = json!({
    ///     "type": "object",
    ///     "properties": {
    ///         "ticker": { "type": "string" }
    ///     },
    ///     "required": ["ticker"]
    /// });
    /// ```
    fn input_schema(&self) -> Value;
}
