//! Agent runtime
//!
//! [`AgentExecutor`] drives the LLM tool-calling loop; [`ToolAgent`] exposes
//! an executor through the [`agent_core::Agent`] trait.

pub mod executor;
pub mod tool_agent;

pub use executor::{AgentExecutor, AgentExecutorBuilder, ExecutorConfig};
pub use tool_agent::ToolAgent;
