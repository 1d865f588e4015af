//! Tool registry for managing available tools

use crate::Tool;
use agent_core::{Error, Result};
use serde_json::Value;
use std::collections::BTreeMap;
use std::sync::{Arc, PoisonError, RwLock};
use tracing::debug;

/// Registry for managing tools
///
/// Tools are kept ordered by name so the tool list sent to the LLM is
/// identical from one request to the next.
#[derive(Default)]
pub struct ToolRegistry {
    tools: RwLock<BTreeMap<String, Arc<dyn Tool>>>,
}

impl ToolRegistry {
    /// Create a new tool registry
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a tool, returning the tool it replaced (if any)
    pub fn register(&self, tool: Arc<dyn Tool>) -> Option<Arc<dyn Tool>> {
        let name = tool.name().to_string();
        debug!(tool_name = %name, "Registering tool");
        self.tools
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .insert(name, tool)
    }

    /// Builder-style registration
    pub fn with_tool(self, tool: Arc<dyn Tool>) -> Self {
        self.register(tool);
        self
    }

    /// Get a tool by name
    pub fn get(&self, name: &str) -> Option<Arc<dyn Tool>> {
        self.tools
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .get(name)
            .cloned()
    }

    /// List all registered tools, sorted by name
    pub fn list_tools(&self) -> Vec<Arc<dyn Tool>> {
        self.tools
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .values()
            .cloned()
            .collect()
    }

    /// Names of all registered tools, sorted
    pub fn names(&self) -> Vec<String> {
        self.tools
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .keys()
            .cloned()
            .collect()
    }

    /// Look up a tool and run it
    pub async fn execute(&self, name: &str, params: Value) -> Result<Value> {
        let tool = self
            .get(name)
            .ok_or_else(|| Error::ToolNotFound(name.to_string()))?;
        tool.execute(params).await
    }

    pub fn len(&self) -> usize {
        self.tools.read().unwrap_or_else(PoisonError::into_inner).len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use serde_json::json;

    struct EchoTool {
        name: &'static str,
    }

    #[async_trait]
    impl Tool for EchoTool {
        async fn execute(&self, params: Value) -> Result<Value> {
            Ok(json!({ "tool": self.name, "echo": params }))
        }

        fn name(&self) -> &str {
            self.name
        }

        fn description(&self) -> &str {
            "Echo the input back"
        }

        fn input_schema(&self) -> Value {
            json!({ "type": "object" })
        }
    }

    #[test]
    fn test_register_and_list_sorted() {
        let registry = ToolRegistry::new()
            .with_tool(Arc::new(EchoTool { name: "zeta" }))
            .with_tool(Arc::new(EchoTool { name: "alpha" }));

        assert_eq!(registry.len(), 2);
        assert_eq!(registry.names(), vec!["alpha", "zeta"]);
        let listed: Vec<String> = registry
            .list_tools()
            .iter()
            .map(|t| t.name().to_string())
            .collect();
        assert_eq!(listed, vec!["alpha", "zeta"]);
    }

    #[test]
    fn test_register_replaces_same_name() {
        let registry = ToolRegistry::new();
        assert!(registry.register(Arc::new(EchoTool { name: "echo" })).is_none());
        assert!(registry.register(Arc::new(EchoTool { name: "echo" })).is_some());
        assert_eq!(registry.len(), 1);
    }

    #[tokio::test]
    async fn test_execute_by_name() {
        let registry = ToolRegistry::new().with_tool(Arc::new(EchoTool { name: "echo" }));

        let out = registry.execute("echo", json!({"ticker": "AAPL"})).await.unwrap();
        assert_eq!(out["echo"]["ticker"], "AAPL");
    }

    #[tokio::test]
    async fn test_execute_unknown_tool() {
        let registry = ToolRegistry::new();
        assert!(registry.is_empty());

        let err = registry.execute("missing", json!({})).await.unwrap_err();
        assert!(matches!(err, Error::ToolNotFound(name) if name == "missing"));
    }
}
