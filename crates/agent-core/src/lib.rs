//! Core abstractions shared by the stock advisor agents
//!
//! Every agent in the workspace (the advisor, the reviewer, and the A2A
//! server wrapper) is driven through the [`Agent`] trait defined here.

pub mod agent;
pub mod context;
pub mod error;

pub use agent::Agent;
pub use context::Context;
pub use error::{Error, Result};
