//! Minimal A2A client
//!
//! Sends one text message to an agent and prints the reply.
//!
//! ```bash
//! cargo run --bin a2a-client -p stock-advisor -- "Analyze MSFT"
//! ```

use agent_a2a::A2AClient;
use agent_utils::{env_var_or, init_tracing, load_dotenv};
use clap::Parser;
use stock_advisor::config::DEFAULT_ADVISOR_A2A_URL;

#[derive(Debug, Parser)]
#[command(name = "a2a-client", about = "Send one message to an A2A agent")]
struct Args {
    /// Message text
    #[arg(default_value = "Analyze AAPL")]
    message: String,

    /// Agent endpoint (defaults to ADVISOR_A2A_URL)
    #[arg(long)]
    url: Option<String>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    load_dotenv();
    init_tracing();

    let args = Args::parse();
    let url = args
        .url
        .unwrap_or_else(|| env_var_or("ADVISOR_A2A_URL", DEFAULT_ADVISOR_A2A_URL));

    let client = A2AClient::new(&url)?;
    let reply = client.send_text(args.message).await?;
    println!("{reply}");

    Ok(())
}
