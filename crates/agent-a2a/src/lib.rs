//! Agent-to-agent (A2A) messaging
//!
//! Agents talk to each other by exchanging single [`A2AMessage`]s over HTTP.
//! The JSON shape matches the python-a2a library, so agents hosted here can
//! talk to Python peers and vice versa.
//!
//! - [`MessageTransport`] / [`A2AClient`]: send a message, await the reply
//! - [`A2AServer`]: host any [`agent_core::Agent`] behind `POST /a2a`
//! - [`AgentCard`]: discovery document served at `/a2a/agent.json`

pub mod card;
pub mod client;
pub mod error;
pub mod message;
pub mod server;

pub use card::{AgentCard, AgentSkill};
pub use client::{A2AClient, MessageTransport};
pub use error::{A2AError, Result};
pub use message::{A2AMessage, Content, FunctionParameter, MessageRole};
pub use server::A2AServer;
