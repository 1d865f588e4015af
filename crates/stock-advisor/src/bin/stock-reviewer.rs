//! Stock reviewer REPL
//!
//! Answers questions about a stock with a market summary and the advisor's
//! recommendation. The advisor server must be reachable at
//! `ADVISOR_A2A_URL`.
//!
//! ```bash
//! export OPENAI_API_KEY="..."
//! cargo run --bin stock-reviewer -p stock-advisor
//! ```

use agent_a2a::A2AClient;
use agent_core::{Agent, Context};
use agent_llm::providers::{OpenAIConfig, OpenAIProvider};
use agent_utils::{LogConfig, init_tracing_with, load_dotenv};
use std::io::{self, BufRead, Write};
use std::sync::Arc;
use stock_advisor::agents::reviewer::REVIEWER_GREETING;
use stock_advisor::{Providers, StockConfig, StockReviewerAgent};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    load_dotenv();
    // Keep the prompt readable unless RUST_LOG asks for more
    init_tracing_with(&LogConfig::from_env().with_default_filter("warn"));

    let config = StockConfig::from_env()?;
    let providers = Providers::from_config(&config)?;
    let llm = Arc::new(OpenAIProvider::with_config(OpenAIConfig::from_env()?)?);
    let advisor = Arc::new(A2AClient::new(&config.advisor_a2a_url)?);

    let agent = StockReviewerAgent::new(llm, providers.market, advisor, &config.reviewer_model);
    let mut context = Context::new()
        .with_source("repl")
        .with_session_id(format!("repl-{}", std::process::id()));

    println!("{REVIEWER_GREETING}");

    let stdin = io::stdin();
    let mut stdout = io::stdout();

    loop {
        print!("> ");
        stdout.flush()?;

        let mut input = String::new();
        match stdin.lock().read_line(&mut input) {
            Ok(0) => break,
            Ok(_) => {}
            Err(e) => {
                eprintln!("Error reading input: {e}");
                continue;
            }
        }

        let query = input.trim();
        if query.eq_ignore_ascii_case("exit") || query.eq_ignore_ascii_case("quit") {
            break;
        }
        if query.is_empty() {
            continue;
        }

        match agent.process(query.to_string(), &mut context).await {
            Ok(response) => println!("{response}"),
            Err(e) => eprintln!("Error: {e}"),
        }
    }

    Ok(())
}
