//! A2A message model
//!
//! ```json
//! {
//!   "content": {"type": "text", "text": "Analyze AAPL"},
//!   "role": "user",
//!   "message_id": "4f0c...",
//!   "conversation_id": "c81e..."
//! }
//! ```

use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fmt;
use uuid::Uuid;

/// Who authored a message
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MessageRole {
    User,
    Agent,
    System,
}

/// Named argument of a function call
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FunctionParameter {
    pub name: String,
    pub value: Value,
}

/// Message payload
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Content {
    Text {
        text: String,
    },
    Error {
        message: String,
    },
    FunctionCall {
        name: String,
        #[serde(default)]
        parameters: Vec<FunctionParameter>,
    },
    FunctionResponse {
        name: String,
        response: Value,
    },
}

impl Content {
    pub fn text(text: impl Into<String>) -> Self {
        Self::Text { text: text.into() }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self::Error {
            message: message.into(),
        }
    }
}

/// Text passes through as is; other payloads render as their JSON form
impl fmt::Display for Content {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Text { text } => f.write_str(text),
            Self::Error { message } => write!(f, "Error: {message}"),
            other => {
                let json = serde_json::to_string(other).map_err(|_| fmt::Error)?;
                f.write_str(&json)
            }
        }
    }
}

/// A single agent-to-agent message
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct A2AMessage {
    pub content: Content,
    pub role: MessageRole,
    #[serde(default = "new_id")]
    pub message_id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub parent_message_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub conversation_id: Option<String>,
}

fn new_id() -> String {
    Uuid::new_v4().to_string()
}

impl A2AMessage {
    pub fn new(content: Content, role: MessageRole) -> Self {
        Self {
            content,
            role,
            message_id: new_id(),
            parent_message_id: None,
            conversation_id: None,
        }
    }

    pub fn user_text(text: impl Into<String>) -> Self {
        Self::new(Content::text(text), MessageRole::User)
    }

    pub fn agent_text(text: impl Into<String>) -> Self {
        Self::new(Content::text(text), MessageRole::Agent)
    }

    pub fn agent_error(message: impl Into<String>) -> Self {
        Self::new(Content::error(message), MessageRole::Agent)
    }

    pub fn with_conversation_id(mut self, conversation_id: impl Into<String>) -> Self {
        self.conversation_id = Some(conversation_id.into());
        self
    }

    /// Thread this message as the answer to `request`
    pub fn in_reply_to(mut self, request: &A2AMessage) -> Self {
        self.parent_message_id = Some(request.message_id.clone());
        self.conversation_id.clone_from(&request.conversation_id);
        self
    }

    /// Text payload, if the content is text
    pub fn text(&self) -> Option<&str> {
        match &self.content {
            Content::Text { text } => Some(text),
            _ => None,
        }
    }

    pub fn is_error(&self) -> bool {
        matches!(self.content, Content::Error { .. })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_text_message_wire_shape() {
        let msg = A2AMessage::user_text("Analyze AAPL").with_conversation_id("conv-1");
        let value = serde_json::to_value(&msg).unwrap();

        assert_eq!(value["content"], json!({"type": "text", "text": "Analyze AAPL"}));
        assert_eq!(value["role"], "user");
        assert_eq!(value["conversation_id"], "conv-1");
        assert!(value.get("parent_message_id").is_none());
        assert!(!msg.message_id.is_empty());
    }

    #[test]
    fn test_parse_python_a2a_message() {
        let msg: A2AMessage = serde_json::from_value(json!({
            "content": {"type": "text", "text": "HOLD"},
            "role": "agent",
            "message_id": "m-2",
            "parent_message_id": "m-1"
        }))
        .unwrap();

        assert_eq!(msg.role, MessageRole::Agent);
        assert_eq!(msg.text(), Some("HOLD"));
        assert_eq!(msg.parent_message_id.as_deref(), Some("m-1"));
        assert!(msg.conversation_id.is_none());
    }

    #[test]
    fn test_missing_message_id_is_generated() {
        let msg: A2AMessage = serde_json::from_value(json!({
            "content": {"type": "text", "text": "hi"},
            "role": "user"
        }))
        .unwrap();
        assert!(Uuid::parse_str(&msg.message_id).is_ok());
    }

    #[test]
    fn test_reply_threading() {
        let request = A2AMessage::user_text("Analyze MSFT").with_conversation_id("c");
        let reply = A2AMessage::agent_text("BUY").in_reply_to(&request);

        assert_eq!(reply.parent_message_id.as_deref(), Some(request.message_id.as_str()));
        assert_eq!(reply.conversation_id.as_deref(), Some("c"));
        assert_ne!(reply.message_id, request.message_id);
    }

    #[test]
    fn test_content_display() {
        assert_eq!(Content::text("BUY").to_string(), "BUY");
        assert_eq!(Content::error("boom").to_string(), "Error: boom");

        let call = Content::FunctionCall {
            name: "get_financial_statements".to_string(),
            parameters: vec![FunctionParameter {
                name: "ticker".to_string(),
                value: json!("AAPL"),
            }],
        };
        let rendered: Value = serde_json::from_str(&call.to_string()).unwrap();
        assert_eq!(rendered["type"], "function_call");
        assert_eq!(rendered["parameters"][0]["value"], "AAPL");
    }
}
