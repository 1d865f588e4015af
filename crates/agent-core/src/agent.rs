//! Core Agent trait definition

use crate::{Context, Result};
use async_trait::async_trait;

/// Core trait that all agents must implement
///
/// Input and output are plain text: the reviewer REPL, the A2A server and
/// the tool loop all exchange natural language with an agent.
#[async_trait]
pub trait Agent: Send + Sync {
    /// Process input and return output
    async fn process(&self, input: String, context: &mut Context) -> Result<String>;

    /// Get the agent's name
    fn name(&self) -> &str;

    /// Human-readable description, published in agent cards
    fn description(&self) -> &str {
        ""
    }
}
