//! Ask one provider one question
//!
//! Run with:
//!   OPENAI_API_KEY=sk-... cargo run --example ask -- openai gpt-4o "What is Rust?"
//!
//! The credential is read from `<PROVIDER>_API_KEY`. Set `RUST_LOG=debug` to
//! see the gateway's request logs.

use anyhow::{bail, Context, Result};
use llmgate_core::{Gateway, ProviderRegistry};
use std::sync::Arc;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let args: Vec<String> = std::env::args().skip(1).collect();
    let [provider_id, model, prompt] = args.as_slice() else {
        bail!("usage: ask <provider> <model> <prompt>");
    };

    let key_var = format!("{}_API_KEY", provider_id.to_uppercase());
    let credential = std::env::var(&key_var).with_context(|| format!("{} is not set", key_var))?;

    let gateway = Gateway::with_http_client(Arc::new(ProviderRegistry::with_defaults()))?;
    if !gateway.registry().contains(provider_id) {
        bail!(
            "unknown provider '{}', expected one of {:?}",
            provider_id,
            gateway.registry().provider_ids()
        );
    }

    let response = gateway
        .execute_default(&llmgate_core::LlmRequest::new(
            provider_id.as_str(),
            model.as_str(),
            prompt.as_str(),
            credential,
        ))
        .await?;

    println!("{}", response.answer_text);
    Ok(())
}
