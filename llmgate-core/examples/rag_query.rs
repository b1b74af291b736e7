//! Retrieval-augmented query driven by a configuration file
//!
//! Run with:
//!   cargo run --example rag_query -- llmgate.yaml "How do refunds work?"
//!
//! The configuration needs a `rag` section. A fixed context string stands in
//! for a knowledge base.

use anyhow::{Context, Result};
use llmgate_core::config::load_from_yaml;
use llmgate_core::{LlmGate, StaticRetriever};
use std::sync::Arc;
use tracing_subscriber::EnvFilter;

const KNOWLEDGE: &str = "Refunds are issued to the original payment method within 5 business days.";

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let mut args = std::env::args().skip(1);
    let config_path = args.next().context("usage: rag_query <config.yaml> <prompt>")?;
    let prompt = args.next().context("usage: rag_query <config.yaml> <prompt>")?;

    let config = load_from_yaml(&config_path)
        .with_context(|| format!("failed to load {}", config_path))?;

    let gate = LlmGate::from_config(&config, Arc::new(StaticRetriever::new(KNOWLEDGE)))?;
    let answer = gate.submit_configured_rag_query(&prompt).await?;

    println!("{}", answer.answer_text);
    println!(
        "\nmodel: {}  rag: {}  context found: {}",
        answer.model_used, answer.rag_used, answer.context_found
    );
    Ok(())
}
