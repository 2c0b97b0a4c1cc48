use std::sync::Arc;

use anyhow::Result;
use axum::{routing::get, Router};
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};
use word_search_backend::{
    config::Config,
    db,
    progress::{InMemoryProgressStore, PgProgressStore, ProgressStore},
    routes, websocket, AppState,
};

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "word_search_backend=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!("Starting word search backend server...");

    let config = Config::from_env()?;
    tracing::info!("Configuration loaded");

    let progress: Arc<dyn ProgressStore> = match &config.database {
        Some(database) => {
            let pool = db::create_pool(&database.url, database.max_connections).await?;
            tracing::info!("Connected to database");

            sqlx::migrate!("./migrations").run(&pool).await?;
            tracing::info!("Database migrations completed");

            Arc::new(PgProgressStore::new(pool))
        }
        None => {
            tracing::warn!("DATABASE_URL not set; level progress is kept in memory only");
            Arc::new(InMemoryProgressStore::new())
        }
    };

    tracing::info!(
        "Puzzles use {} placement trials with {:?} fill",
        config.game.placement_trials,
        config.game.fill_mode
    );

    let state = Arc::new(AppState::new(config.clone(), progress));

    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    let app = Router::new()
        .route("/ws", get(websocket::handle_websocket))
        .merge(routes::create_routes())
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state);

    let addr = config.server_addr();
    let listener = tokio::net::TcpListener::bind(&addr).await?;

    tracing::info!("Server listening on {}", addr);
    tracing::info!("WebSocket endpoint: ws://{}/ws", addr);
    tracing::info!("Health check: http://{}/health", addr);

    axum::serve(listener, app).await?;

    Ok(())
}
