use std::path::PathBuf;
use std::sync::Arc;

use anyhow::Context;
use backend_lib::{config::Settings, router, storage::SqliteStore, AppState};
use clap::Parser;
use tokio::net::TcpListener;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Estate Assist API server
#[derive(Parser, Debug)]
#[command(version, about)]
struct Cli {
    /// Path to a TOML config file (defaults to ./config.toml if present)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Override the bind host
    #[arg(long)]
    host: Option<String>,

    /// Override the bind port
    #[arg(short, long)]
    port: Option<u16>,

    /// Emit logs as JSON lines
    #[arg(long)]
    json_logs: bool,
}

fn init_tracing(log_level: &str, json: bool) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(log_level));
    let registry = tracing_subscriber::registry().with(filter);

    if json {
        registry.with(tracing_subscriber::fmt::layer().json()).init();
    } else {
        registry.with(tracing_subscriber::fmt::layer()).init();
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let mut settings = match &cli.config {
        Some(path) => Settings::load_from(path)?,
        None => Settings::load()?,
    };
    if let Some(host) = cli.host {
        settings.server.host = host;
    }
    if let Some(port) = cli.port {
        settings.server.port = port;
    }

    init_tracing(&settings.log_level, cli.json_logs);

    let storage = SqliteStore::connect(&settings.database.url, settings.database.max_connections)
        .await
        .with_context(|| format!("failed to open database {}", settings.database.url))?;

    let addr = settings.bind_addr()?;
    let state = Arc::new(AppState::new(storage, settings));
    let app = router::create_router(state);

    let listener = TcpListener::bind(addr).await?;
    info!(%addr, "listening");

    axum::serve(listener, app).await?;

    Ok(())
}
