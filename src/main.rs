//! Crisis Compass — Binary Entrypoint
//! Boots the Axum HTTP server, wiring the incident registry, the remote
//! analyzer client, shared state, and middleware.

use std::sync::Arc;

use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use crisis_compass::api::{self, AppState};
use crisis_compass::ingest::remote::RemoteAnalyzer;
use crisis_compass::lexicon::Lexicon;
use crisis_compass::listing;
use crisis_compass::metrics::Metrics;
use crisis_compass::registry::IncidentRegistry;

const DEFAULT_BIND_ADDR: &str = "0.0.0.0:5000";

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().compact())
        .init();
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load .env in local/dev; no-op in prod environments. This enables
    // LEXICON_CONFIG_PATH / INCIDENTS_SNAPSHOT_PATH / BIND_ADDR from .env.
    let _ = dotenvy::dotenv();

    init_tracing();

    // --- Rule table + session seed ---
    let lexicon = Lexicon::load_or_seed();
    let metrics = Metrics::init(lexicon.keywords.urgency.len(), lexicon.keywords.risk.len());

    let seed = listing::load_snapshot_default();
    let registry = Arc::new(IncidentRegistry::with_seed(lexicon, seed));

    let state = AppState::new(registry, Arc::new(RemoteAnalyzer::new()));
    let app = api::router(state).merge(metrics.router());

    let addr = std::env::var("BIND_ADDR").unwrap_or_else(|_| DEFAULT_BIND_ADDR.to_string());
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    tracing::info!(%addr, "crisis-compass listening");
    axum::serve(listener, app).await?;

    Ok(())
}
