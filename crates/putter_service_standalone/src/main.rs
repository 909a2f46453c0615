use std::time::Duration;

use anthropic_client::{build_completion_client, config, ClientConfig, ProxyConfig};
use clap::{Args, Parser, Subcommand};
use putter_service::ServerConfig;

mod check;
mod logging;

use logging::init_logging;

#[derive(Parser, Debug)]
#[command(name = "putter-service")]
#[command(about = "Scotty Cameron putter report service")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Option<Command>,

    /// Enable debug logging
    #[arg(long, env = "DEBUG", default_value = "false", global = true)]
    debug: bool,

    #[command(flatten)]
    server: ServerArgs,

    #[command(flatten)]
    upstream: UpstreamArgs,
}

#[derive(Subcommand, Debug, Clone, Copy)]
enum Command {
    /// Run the HTTP server (default)
    Serve,
    /// Send one probe message to the Anthropic API and report the outcome
    Check,
}

#[derive(Args, Debug)]
struct ServerArgs {
    /// Address to bind
    #[arg(long, env = "HOST", default_value = "0.0.0.0")]
    host: String,

    /// Server port
    #[arg(long, env = "PORT", default_value = "8081")]
    port: u16,

    /// Worker threads (defaults to the number of physical cores)
    #[arg(long, env = "WORKERS")]
    workers: Option<usize>,
}

#[derive(Args, Debug)]
struct UpstreamArgs {
    /// Anthropic API key
    #[arg(long, env = "ANTHROPIC_API_KEY", hide_env_values = true)]
    api_key: Option<String>,

    /// Anthropic API base URL
    #[arg(long, env = "ANTHROPIC_BASE_URL", default_value = config::DEFAULT_BASE_URL)]
    base_url: String,

    /// Model used for reports
    #[arg(long, env = "ANTHROPIC_MODEL", default_value = config::DEFAULT_MODEL)]
    model: String,

    /// Upper bound on generated tokens
    #[arg(long, env = "ANTHROPIC_MAX_TOKENS", default_value_t = config::DEFAULT_MAX_TOKENS)]
    max_tokens: u32,

    /// Sampling temperature
    #[arg(long, env = "ANTHROPIC_TEMPERATURE", default_value_t = config::DEFAULT_TEMPERATURE)]
    temperature: f32,

    /// Explicit proxy for Anthropic traffic; HTTP(S)_PROXY are ignored
    #[arg(long, env = "UPSTREAM_PROXY")]
    upstream_proxy: Option<String>,

    #[arg(long, env = "UPSTREAM_PROXY_USER")]
    upstream_proxy_user: Option<String>,

    #[arg(long, env = "UPSTREAM_PROXY_PASSWORD", hide_env_values = true)]
    upstream_proxy_password: Option<String>,

    /// Timeout for one Anthropic call, in seconds
    #[arg(long, env = "UPSTREAM_TIMEOUT_SECS")]
    timeout_secs: Option<u64>,
}

impl UpstreamArgs {
    fn client_config(&self) -> ClientConfig {
        let mut config = ClientConfig::new(self.api_key.clone())
            .with_base_url(&self.base_url)
            .with_model(&self.model)
            .with_max_tokens(self.max_tokens)
            .with_temperature(self.temperature);

        if let Some(url) = self.upstream_proxy.as_deref().filter(|url| !url.trim().is_empty()) {
            let mut proxy = ProxyConfig::new(url.trim());
            if let Some(user) = &self.upstream_proxy_user {
                proxy = proxy.with_auth(
                    user,
                    self.upstream_proxy_password.clone().unwrap_or_default(),
                );
            }
            config = config.with_proxy(proxy);
        }
        if let Some(secs) = self.timeout_secs.filter(|secs| *secs > 0) {
            config = config.with_timeout(Duration::from_secs(secs));
        }
        config
    }
}

#[actix_web::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    let cli = Cli::parse();

    init_logging(cli.debug);

    let client_config = cli.upstream.client_config();
    log::debug!("Upstream configuration: {:?}", client_config);

    match cli.command.unwrap_or(Command::Serve) {
        Command::Serve => {
            tracing::info!("Starting putter service...");
            let server_config = ServerConfig {
                host: cli.server.host,
                port: cli.server.port,
                workers: cli.server.workers,
            };
            let client = build_completion_client(client_config);
            putter_service::run(server_config, client).await?;
            Ok(())
        }
        Command::Check => check::run(client_config).await,
    }
}
