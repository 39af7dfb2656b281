//! glimpse-cd (Campus Dashboard) - Live facility status service
//!
//! Serves the campus facility registry, crowd report feeds, beacon
//! queues, contribution score, and vision inference endpoint over HTTP,
//! with an SSE stream for live dashboard updates. All state is in-memory
//! and reseeded at startup.

use anyhow::Result;
use clap::Parser;
use glimpse_cd::inference::VisionClient;
use glimpse_cd::state::SharedState;
use glimpse_cd::{build_router, seed, AppState};
use glimpse_common::config::GlimpseConfig;
use std::path::PathBuf;
use tracing::{info, warn};

#[derive(Parser, Debug)]
#[command(name = "glimpse-cd", about = "Glimpse Campus dashboard service")]
struct Args {
    /// Path to TOML config file (overrides GLIMPSE_CONFIG and defaults)
    #[arg(long)]
    config: Option<PathBuf>,

    /// Bind host (overrides config file)
    #[arg(long)]
    host: Option<String>,

    /// Bind port (overrides config file)
    #[arg(long)]
    port: Option<u16>,
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::INFO.into()),
        )
        .init();

    info!(
        "Starting Glimpse Campus Dashboard (glimpse-cd) v{}",
        env!("CARGO_PKG_VERSION")
    );

    let args = Args::parse();

    let mut config = GlimpseConfig::load(args.config.as_deref())?;
    if let Some(host) = args.host {
        config.host = host;
    }
    if let Some(port) = args.port {
        config.port = port;
    }

    if config.inference.api_key.is_empty() {
        warn!("No vision API key configured; photo analysis will return 502 (set GEMINI_API_KEY)");
    }

    // Ephemeral state: reinitialized from the fixed seed set every start
    let campus = SharedState::new(seed::seed_facilities());
    info!("✓ Seeded {} facilities", campus.list_facilities().await.len());

    let vision = VisionClient::new(&config.inference)
        .map_err(|e| anyhow::anyhow!("Failed to create vision client: {}", e))?;

    let state = AppState::new(campus, vision, &config.admin_secret);
    let app = build_router(state);

    let addr = format!("{}:{}", config.host, config.port);
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    info!("glimpse-cd listening on http://{}", addr);
    info!("Health check: http://{}/health", addr);

    axum::serve(listener, app).await?;

    Ok(())
}
