//! Northstar - a minimal real-time text game
//!
//! Serves the browser client and relays typed commands over WebSockets,
//! answering with canned scenes or a language-model narrator.

mod api;
mod config;
mod db;
mod game;
mod llm;

use api::{create_router, AppState};
use config::ServerConfig;
use db::Database;
use game::Game;
use llm::{LlmConfig, ModelRegistry};
use std::net::SocketAddr;
use std::sync::Arc;
use tower_http::{
    compression::CompressionLayer,
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Initialize logging
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "northstar=info,tower_http=debug".into()),
        )
        .with(
            tracing_subscriber::fmt::layer()
                .json()
                .with_current_span(false)
                .with_span_list(false),
        )
        .init();

    let config = ServerConfig::from_env();

    // Ensure database directory exists
    if let Some(parent) = config.db_path.parent() {
        std::fs::create_dir_all(parent)?;
    }

    // A store that cannot be opened stops startup
    tracing::info!(path = %config.db_path.display(), "Opening player store");
    let db = Database::open(&config.db_path)
        .inspect_err(|e| tracing::error!(error = %e, "Player store unavailable"))?;

    match db.first_player()? {
        Some(player) => tracing::info!(id = player.id, name = %player.name, "Primary player"),
        None => tracing::info!("No players found in the store"),
    }

    // Initialize LLM registry
    let llm_registry = Arc::new(ModelRegistry::new(&LlmConfig::from_env()));

    if llm_registry.default().is_some() {
        tracing::info!(
            models = ?llm_registry.available_models(),
            default = %llm_registry.default_model_id(),
            "LLM registry initialized"
        );
    }

    let state = AppState::new(db, Game::new(config.game, llm_registry));

    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    let compression = CompressionLayer::new().gzip(true).br(true);

    let app = create_router(state)
        .layer(cors)
        .layer(compression)
        .layer(TraceLayer::new_for_http());

    let addr = SocketAddr::from(([0, 0, 0, 0], config.port));
    tracing::info!("Northstar listening on http://{}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
