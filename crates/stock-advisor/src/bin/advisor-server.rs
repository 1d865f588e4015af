//! Stock advisor A2A server
//!
//! Hosts the advisor agent for other agents at `POST /a2a`.
//!
//! ```bash
//! export GEMINI_API_KEY="..."
//! cargo run --bin advisor-server -p stock-advisor
//! ```

use agent_a2a::{A2AServer, AgentCard};
use agent_llm::providers::{GEMINI_OPENAI_API_BASE, OpenAIConfig, OpenAIProvider};
use agent_utils::{init_tracing, load_dotenv};
use std::sync::Arc;
use stock_advisor::agents::advisor::{ADVISOR_DESCRIPTION, ADVISOR_NAME};
use stock_advisor::{Providers, StatementNormalizer, StockAdvisorAgent, StockConfig};
use tokio::net::TcpListener;
use tracing::info;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    load_dotenv();
    init_tracing();

    let config = StockConfig::from_env()?;
    let providers = Providers::from_config(&config)?;

    let llm_config =
        OpenAIConfig::from_env_vars("GEMINI_API_KEY", "ADVISOR_API_BASE", GEMINI_OPENAI_API_BASE)?
            .with_provider_name("gemini");
    let llm = Arc::new(OpenAIProvider::with_config(llm_config)?);

    let normalizer = StatementNormalizer::new(providers.financials);
    info!(
        model = %config.advisor_model,
        data_provider = %normalizer.provider_name(),
        "Starting stock advisor"
    );
    let agent = Arc::new(StockAdvisorAgent::new(llm, normalizer, &config.advisor_model));

    let card = AgentCard::new(ADVISOR_NAME, ADVISOR_DESCRIPTION, &config.advisor_a2a_url)
        .with_skill(
            "get_financial_statements",
            "Annual income statement, balance sheet and cash flow for a ticker",
        );

    let listener = TcpListener::bind(&config.advisor_bind_addr).await?;
    A2AServer::new(agent, card).serve(listener).await?;

    Ok(())
}
