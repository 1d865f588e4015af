//! Execution context for agents
//!
//! The `Context` struct carries per-request metadata (who is calling, which
//! conversation the request belongs to) alongside an agent invocation.

use std::collections::HashMap;

/// Well-known context keys
pub mod keys {
    /// Session ID for tracking (one REPL run, one server connection)
    pub const SESSION_ID: &str = "session_id";
    /// Conversation ID propagated by agent-to-agent messages
    pub const CONVERSATION_ID: &str = "conversation_id";
    /// Origin of the request (e.g., "repl", "a2a")
    pub const SOURCE: &str = "source";
}

/// Context passed to agents during execution
///
/// # Example
///
/// ```
/// use agent_core::Context;
///
/// let ctx = Context::new()
///     .with_source("a2a")
///     .with_conversation_id("conv-1");
///
/// assert_eq!(ctx.source(), Some("a2a"));
/// assert_eq!(ctx.conversation_id(), Some("conv-1"));
/// ```
#[derive(Debug, Clone, Default)]
pub struct Context {
    data: HashMap<String, serde_json::Value>,
}

impl Context {
    /// Create a new empty context
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the session ID
    pub fn with_session_id(mut self, session_id: impl Into<String>) -> Self {
        self.insert(keys::SESSION_ID, serde_json::json!(session_id.into()));
        self
    }

    /// Set the conversation ID
    pub fn with_conversation_id(mut self, conversation_id: impl Into<String>) -> Self {
        self.insert(
            keys::CONVERSATION_ID,
            serde_json::json!(conversation_id.into()),
        );
        self
    }

    /// Set the request origin
    pub fn with_source(mut self, source: impl Into<String>) -> Self {
        self.insert(keys::SOURCE, serde_json::json!(source.into()));
        self
    }

    pub fn session_id(&self) -> Option<&str> {
        self.get(keys::SESSION_ID).and_then(|v| v.as_str())
    }

    pub fn conversation_id(&self) -> Option<&str> {
        self.get(keys::CONVERSATION_ID).and_then(|v| v.as_str())
    }

    pub fn source(&self) -> Option<&str> {
        self.get(keys::SOURCE).and_then(|v| v.as_str())
    }

    /// Insert a value into the context
    pub fn insert(&mut self, key: impl Into<String>, value: serde_json::Value) {
        self.data.insert(key.into(), value);
    }

    /// Get a value from the context
    pub fn get(&self, key: &str) -> Option<&serde_json::Value> {
        self.data.get(key)
    }

    pub fn len(&self) -> usize {
        self.data.len()
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builder_chain() {
        let ctx = Context::new()
            .with_session_id("sess-1")
            .with_conversation_id("conv-9")
            .with_source("repl");

        assert_eq!(ctx.session_id(), Some("sess-1"));
        assert_eq!(ctx.conversation_id(), Some("conv-9"));
        assert_eq!(ctx.source(), Some("repl"));
        assert_eq!(ctx.len(), 3);
    }

    #[test]
    fn test_raw_values() {
        let mut ctx = Context::new();
        assert!(ctx.is_empty());
        assert_eq!(ctx.session_id(), None);

        ctx.insert(keys::SESSION_ID, serde_json::json!(42));
        assert_eq!(ctx.get(keys::SESSION_ID), Some(&serde_json::json!(42)));
        // Non-string values are not surfaced by the typed accessors
        assert_eq!(ctx.session_id(), None);
    }
}
