//! A2A server hosting an agent over HTTP
//!
//! Routes:
//!
//! | method | path              | purpose          |
//! |--------|-------------------|------------------|
//! | POST   | `/a2a`, `/`       | send a message   |
//! | GET    | `/a2a/agent.json` | agent card       |
//! | GET    | `/agent.json`     | agent card       |

use crate::{A2AMessage, AgentCard, Content, Result};
use agent_core::{Agent, Context};
use axum::{
    Json, Router,
    extract::State,
    routing::{get, post},
};
use std::sync::Arc;
use tokio::net::TcpListener;
use tower_http::trace::TraceLayer;
use tracing::{info, warn};

struct ServerState {
    agent: Arc<dyn Agent>,
    card: AgentCard,
}

/// Serves one agent to A2A peers
pub struct A2AServer {
    state: Arc<ServerState>,
}

impl A2AServer {
    pub fn new(agent: Arc<dyn Agent>, card: AgentCard) -> Self {
        Self {
            state: Arc::new(ServerState { agent, card }),
        }
    }

    pub fn router(&self) -> Router {
        Router::new()
            .route("/", post(handle_message))
            .route("/a2a", post(handle_message))
            .route("/agent.json", get(agent_card))
            .route("/a2a/agent.json", get(agent_card))
            .layer(TraceLayer::new_for_http())
            .with_state(self.state.clone())
    }

    /// Serve until the listener fails
    pub async fn serve(self, listener: TcpListener) -> Result<()> {
        let addr = listener.local_addr()?;
        info!(
            %addr,
            agent = %self.state.card.name,
            "A2A server listening"
        );
        axum::serve(listener, self.router()).await?;
        Ok(())
    }
}

async fn agent_card(State(state): State<Arc<ServerState>>) -> Json<AgentCard> {
    Json(state.card.clone())
}

/// Agent failures are answered with an `error` message, never an HTTP error
async fn handle_message(
    State(state): State<Arc<ServerState>>,
    Json(message): Json<A2AMessage>,
) -> Json<A2AMessage> {
    info!(
        agent = %state.agent.name(),
        message_id = %message.message_id,
        "A2A message received"
    );

    let Content::Text { text } = &message.content else {
        warn!("Unsupported A2A content type");
        return Json(
            A2AMessage::agent_error("Only text content is supported").in_reply_to(&message),
        );
    };

    let mut context = Context::new().with_source("a2a");
    if let Some(conversation_id) = &message.conversation_id {
        context = context.with_conversation_id(conversation_id.clone());
    }

    let reply = match state.agent.process(text.clone(), &mut context).await {
        Ok(answer) => A2AMessage::agent_text(answer),
        Err(e) => {
            warn!(error = %e, "Agent failed to process A2A message");
            A2AMessage::agent_error(e.to_string())
        }
    };

    Json(reply.in_reply_to(&message))
}
