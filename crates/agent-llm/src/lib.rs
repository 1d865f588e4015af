//! LLM provider abstraction layer
//!
//! Provider-agnostic types for talking to a hosted language model:
//!
//! - Message types, including tool use and tool results
//! - Completion request/response types
//! - Tool definitions for function calling
//! - The [`LLMProvider`] trait
//! - An OpenAI-compatible provider (feature `openai`), which also serves
//!   Gemini through its OpenAI-compatible endpoint

pub mod completion;
pub mod error;
pub mod messages;
pub mod provider;
pub mod tools;

pub use completion::{CompletionRequest, CompletionResponse, StopReason, TokenUsage};
pub use error::{LLMError, Result};
pub use messages::{ContentBlock, Message, MessageContent, Role, ToolCall};
pub use provider::LLMProvider;
pub use tools::ToolDefinition;

#[cfg(feature = "openai")]
pub mod providers;
