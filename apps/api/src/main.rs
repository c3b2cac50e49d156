use anyhow::Result;
use std::net::SocketAddr;
use std::sync::Arc;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use jobmatch_api::config::Config;
use jobmatch_api::db::create_pool;
use jobmatch_api::matching::recommend::WeightedJobScorer;
use jobmatch_api::notify::dispatcher::dispatcher_from_config;
use jobmatch_api::routes::build_router;
use jobmatch_api::state::AppState;

#[tokio::main]
async fn main() -> Result<()> {
    // Load configuration first (fails on missing required env vars)
    let config = Config::from_env()?;

    // Initialize structured logging
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new(format!("jobmatch_api={}", &config.rust_log))
        }))
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting JobMatch API v{}", env!("CARGO_PKG_VERSION"));

    // Initialize PostgreSQL (runs migrations)
    let db = create_pool(&config.database_url).await?;

    // Alert delivery: webhook if NOTIFY_WEBHOOK_URL is set, tracing log otherwise
    let dispatcher = dispatcher_from_config(config.notify_webhook_url.as_deref())?;
    info!("Notification dispatcher: {}", dispatcher.name());

    let job_scorer = Arc::new(WeightedJobScorer::default());
    info!("Match threshold: {}%", config.match_threshold);

    let state = AppState::new(db, config.clone(), dispatcher, job_scorer);

    let app = build_router(state)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive()); // TODO: restrict origins once the board frontend domain is fixed

    let addr: SocketAddr = format!("0.0.0.0:{}", config.port).parse()?;
    info!("Listening on {addr}");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
