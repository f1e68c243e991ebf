//! Assistant relay server binary.
//!
//! Serves the relay endpoint on every path of the bound address.

use std::sync::Arc;
use std::time::Duration;

use clap::Parser;
use relay_api::config::ApiConfig;
use relay_core::Orchestrator;
use relay_core::client::OpenAiClient;
use relay_core::config::{DEFAULT_OPENAI_BASE_URL, OpenAiConfig, OrchestratorConfig};
use tracing::info;

/// CLI arguments for the relay server.
#[derive(Parser, Debug)]
#[command(name = "relay_server", about = "Assistant relay server", version)]
struct Args {
    /// Interface to listen on [env: HOST, default: 127.0.0.1].
    #[arg(long)]
    host: Option<String>,

    /// Port to listen on, 0 = ephemeral [env: PORT, default: 8787].
    #[arg(long)]
    port: Option<u16>,

    /// Credential for the remote assistant API.
    #[arg(long, env = "OPENAI_API_KEY", hide_env_values = true)]
    openai_api_key: String,

    /// Root URL of the remote assistant API.
    #[arg(long, env = "OPENAI_BASE_URL", default_value = DEFAULT_OPENAI_BASE_URL)]
    openai_base_url: String,

    /// Give up on a run after this many seconds.
    #[arg(long, default_value_t = 60)]
    run_timeout_secs: u64,

    /// Delay between run status polls, in milliseconds.
    #[arg(long, default_value_t = 1000)]
    poll_interval_ms: u64,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info,relay_api=debug,relay_core=debug".into()),
        )
        .init();

    let args = Args::parse();

    let openai = OpenAiConfig::new(args.openai_api_key, &args.openai_base_url)?;
    let orchestrator_config = OrchestratorConfig {
        run_timeout: Duration::from_secs(args.run_timeout_secs),
        poll_interval: Duration::from_millis(args.poll_interval_ms),
        ..OrchestratorConfig::default()
    };

    info!(
        base_url = %openai.base_url,
        run_timeout_secs = args.run_timeout_secs,
        poll_interval_ms = args.poll_interval_ms,
        "starting relay_server"
    );

    let client = Arc::new(OpenAiClient::new(openai));
    let state = relay_api::AppState {
        orchestrator: Arc::new(Orchestrator::new(client, orchestrator_config)),
        config: ApiConfig::from_env().with_overrides(args.host, args.port),
    };

    let listener = tokio::net::TcpListener::bind(state.config.bind_addr()).await?;
    let local_addr = listener.local_addr()?;
    info!(addr = %local_addr, "relay listening");

    axum::serve(listener, relay_api::router(state)).await?;

    Ok(())
}
