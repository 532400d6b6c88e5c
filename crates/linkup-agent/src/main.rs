use anyhow::{Context, Result};
use rig::client::{CompletionClient, ProviderClient};
use rig::completion::Prompt;
use rig::providers::openai;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

mod config;

const PREAMBLE: &str = "You are a research assistant. Use the web_search tool whenever the question \
    needs current or factual information, then answer concisely and mention your sources.";

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    // Initialize logging
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(
            std::env::var("RUST_LOG")
                .unwrap_or_else(|_| "linkup_agent=debug,linkup_tools=debug,info".into()),
        ))
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = config::Config::from_env()?;

    info!("Configuration loaded");
    info!("  Model: {}", config.openai_model);
    info!("  Linkup depth: {:?}", config.linkup_depth);

    let prompt = std::env::args().skip(1).collect::<Vec<_>>().join(" ");
    let prompt = if prompt.trim().is_empty() {
        config::DEFAULT_PROMPT.to_string()
    } else {
        prompt
    };

    let client = openai::Client::from_env();
    let agent = client
        .agent(config.openai_model.as_str())
        .preamble(PREAMBLE)
        .tool(linkup_tools::web_search(config.search_config()))
        .build();

    info!("Prompting: {}", prompt);
    let answer = agent
        .prompt(prompt.as_str())
        .multi_turn(config.max_turns)
        .await
        .context("agent prompt failed")?;

    println!("{}", answer);
    Ok(())
}
