//! A2A client transport

use crate::{A2AError, A2AMessage, AgentCard, Result};
use async_trait::async_trait;
use reqwest::Client;
use std::time::Duration;
use tracing::{debug, info, instrument};
use url::Url;

/// Sends one message to a peer agent and returns its reply
///
/// Implementations perform no retries.
#[async_trait]
pub trait MessageTransport: Send + Sync {
    async fn send_message(&self, message: A2AMessage) -> Result<A2AMessage>;
}

/// HTTP transport for a peer hosted at `endpoint` (e.g. `http://localhost:5001/a2a`)
#[derive(Debug, Clone)]
pub struct A2AClient {
    client: Client,
    endpoint: Url,
}

impl A2AClient {
    pub fn new(endpoint: &str) -> Result<Self> {
        Self::build(endpoint, Client::builder())
    }

    pub fn with_timeout(endpoint: &str, timeout: Duration) -> Result<Self> {
        Self::build(endpoint, Client::builder().timeout(timeout))
    }

    fn build(endpoint: &str, builder: reqwest::ClientBuilder) -> Result<Self> {
        let endpoint = Url::parse(endpoint)?;
        Ok(Self {
            client: builder.build()?,
            endpoint,
        })
    }

    pub fn endpoint(&self) -> &Url {
        &self.endpoint
    }

    /// Send `text` as a user message; returns the reply rendered as text
    pub async fn send_text(&self, text: impl Into<String>) -> Result<String> {
        let reply = self.send_message(A2AMessage::user_text(text)).await?;
        Ok(reply.content.to_string())
    }

    /// Fetch the peer's agent card
    pub async fn agent_card(&self) -> Result<AgentCard> {
        let card_url = Url::parse(&format!(
            "{}/agent.json",
            self.endpoint.as_str().trim_end_matches('/')
        ))?;

        let response = self.client.get(card_url).send().await?;
        let response = check_status(response).await?;
        response
            .json()
            .await
            .map_err(|e| A2AError::InvalidResponse(e.to_string()))
    }
}

#[async_trait]
impl MessageTransport for A2AClient {
    #[instrument(skip(self, message), fields(endpoint = %self.endpoint, message_id = %message.message_id))]
    async fn send_message(&self, message: A2AMessage) -> Result<A2AMessage> {
        info!("Sending A2A message");
        let response = self
            .client
            .post(self.endpoint.clone())
            .json(&message)
            .send()
            .await?;
        let response = check_status(response).await?;

        let reply: A2AMessage = response
            .json()
            .await
            .map_err(|e| A2AError::InvalidResponse(e.to_string()))?;
        debug!(reply_id = %reply.message_id, is_error = reply.is_error(), "A2A reply received");
        Ok(reply)
    }
}

async fn check_status(response: reqwest::Response) -> Result<reqwest::Response> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }
    let body = response.text().await.unwrap_or_default();
    Err(A2AError::Status {
        status: status.as_u16(),
        body,
    })
}
