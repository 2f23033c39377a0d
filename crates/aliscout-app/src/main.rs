use std::sync::Arc;

use aliscout_config::Config;
use anyhow::Context;
use clap::Parser;
use tokio::net::TcpListener;
use tokio::signal;
use tracing_subscriber::EnvFilter;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

pub mod controller;
pub mod error;
pub mod handlers;
pub mod state;

#[cfg(test)]
mod tests;

use self::controller::AppController;
use self::state::AppState;

/// Translate shopping queries and search the AliExpress affiliate catalog
#[derive(Parser, Debug)]
#[command(version)]
struct Args {
    /// Address to bind, overrides HOST
    #[arg(long)]
    host: Option<String>,
    /// Port to bind, overrides PORT
    #[arg(long)]
    port: Option<u16>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load .env if present, before the filter reads RUST_LOG
    let _ = dotenvy::dotenv();
    init_tracing();

    let args = Args::parse();
    let mut config = Config::new();
    if let Some(host) = args.host {
        config.network.host = host;
    }
    if let Some(port) = args.port {
        config.network.port = port;
    }
    config.warn_missing();
    tracing::debug!("Configuration: {config:?}");

    let state = Arc::new(AppState::from_config(&config)?);
    let controller = AppController::new(state);

    let address = config.network.bind_address();
    let listener = TcpListener::bind(&address)
        .await
        .with_context(|| format!("Failed to bind to {address}"))?;
    tracing::info!("Proxy server listening at http://{}", listener.local_addr()?);

    // Shutdown on Ctrl+C
    let shutdown = controller.shutdown_token();
    tokio::spawn(async move {
        if let Err(e) = signal::ctrl_c().await {
            tracing::error!("Failed to listen for ctrl+c: {e}");
            return;
        }
        tracing::info!("Shutdown requested");
        shutdown.cancel();
    });

    controller.serve(listener).await
}

/// `RUST_LOG` filtering; `LOG_FORMAT=json` switches to JSON lines
fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let json = std::env::var("LOG_FORMAT").is_ok_and(|v| v.eq_ignore_ascii_case("json"));

    let registry = tracing_subscriber::registry().with(filter);
    if json {
        registry.with(tracing_subscriber::fmt::layer().json()).init();
    } else {
        registry
            .with(tracing_subscriber::fmt::layer().with_ansi(atty::is(atty::Stream::Stdout)))
            .init();
    }
}
