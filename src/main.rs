use petshop_portal::{
    AppState,
    config::{AppConfig, Env},
    create_router,
    repository::{MemoryRepository, RepositoryState},
    seed,
};
use std::sync::Arc;
use tokio::net::TcpListener;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// main
///
/// The asynchronous entry point for the application, responsible for
/// initializing all core components: Configuration, Logging, the entity
/// store, seed data, and the HTTP server.
#[tokio::main]
async fn main() {
    // 1. Configuration & Environment Loading (Fail-Fast)
    // Loads .env file settings before configuration can be read.
    dotenv::dotenv().ok();
    let config = AppConfig::load();

    // 2. Logging Filter Setup
    // Prioritizes the RUST_LOG environment variable, falling back to sensible
    // defaults for local development.
    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| "petshop_portal=debug,tower_http=info,axum=trace".into());

    // 3. Initialize Logging based on Environment
    // Pretty output for humans locally; JSON in production for ingestion by
    // centralized log aggregators.
    match config.env {
        Env::Local => {
            tracing_subscriber::registry()
                .with(env_filter)
                .with(tracing_subscriber::fmt::layer().pretty())
                .init();
        }
        Env::Production => {
            tracing_subscriber::registry()
                .with(env_filter)
                .with(tracing_subscriber::fmt::layer().json())
                .init();
        }
    }

    tracing::info!("Application starting in {:?} mode", config.env);

    // 4. Entity Store Initialization
    // The in-memory store behind the Repository trait, wrapped in an Arc for
    // thread-safe sharing across request handlers.
    let repo = Arc::new(MemoryRepository::new()) as RepositoryState;

    // 5. Seed Bootstrap
    // Provisions the admin account and the demo catalog on first start.
    seed::seed_database(&repo).await;

    // 6. Unified State Assembly & Router
    let addr = format!("0.0.0.0:{}", config.port);
    let app_state = AppState { repo, config };
    let app = create_router(app_state);

    // 7. Server Startup
    let listener = TcpListener::bind(&addr)
        .await
        .expect("FATAL: failed to bind HTTP listener");

    tracing::info!("HTTP server bound successfully.");
    tracing::info!("Listening on {}", addr);
    tracing::info!("API Documentation (Swagger UI) available at: /swagger-ui");

    // The long-running Axum server process.
    axum::serve(listener, app)
        .await
        .expect("FATAL: HTTP server terminated unexpectedly");
}
