//! `putter-service check`: one probe call to confirm the key and network path.

use anthropic_client::{AnthropicClient, ClientConfig, ClientError, CompletionClient};
use anyhow::{bail, Context};

pub const PROBE_MESSAGE: &str =
    "Please respond with 'API connection successful!' if you can read this message.";
const PROBE_MAX_TOKENS: u32 = 100;
const PROBE_TEMPERATURE: f32 = 0.0;

pub async fn run(config: ClientConfig) -> anyhow::Result<()> {
    println!("Testing Anthropic API connection...");

    match &config.api_key {
        Some(key) => println!("✓ API key found ({} characters)", key.expose().len()),
        None => bail!("No Anthropic API key found. Set ANTHROPIC_API_KEY or pass --api-key."),
    }

    let client = AnthropicClient::new(
        config
            .with_max_tokens(PROBE_MAX_TOKENS)
            .with_temperature(PROBE_TEMPERATURE),
    )
    .context("Failed to initialize Anthropic client")?;
    println!("✓ Client initialized (model: {})", client.model());

    println!("\nSending test message to {}...", client.messages_url());
    match client.complete("", PROBE_MESSAGE).await {
        Ok(reply) => {
            println!("\nAPI Response:\n{}", reply);
            println!("\n✅ Anthropic API test completed successfully!");
            Ok(())
        }
        Err(e) => {
            eprintln!("\nERROR during API call: {}", e);
            for hint in hints(&e) {
                eprintln!("  - {}", hint);
            }
            eprintln!("\n❌ API call failed");
            Err(e.into())
        }
    }
}

fn hints(error: &ClientError) -> Vec<&'static str> {
    match error.status() {
        Some(401) | Some(403) => vec!["Check that the API key is valid and has not expired"],
        Some(429) => vec!["Ensure the API key has sufficient credits and quota"],
        Some(400) | Some(404) => vec!["Check that the configured model name is available to this key"],
        Some(status) if status >= 500 => vec!["The Anthropic API is having trouble; try again later"],
        _ => vec![
            "Check that this machine can reach the Anthropic API",
            "If egress requires a proxy, set UPSTREAM_PROXY; HTTP(S)_PROXY are ignored",
        ],
    }
}
