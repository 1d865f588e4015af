//! Tool management and execution framework
//!
//! Tools are the functions an LLM agent may call: fetching financial
//! statements, summarizing a stock, or consulting another agent.

pub mod registry;
pub mod tool;

pub use registry::ToolRegistry;
pub use tool::Tool;
