// Main entry point for the engagement API server

use anyhow::{Context, Result};
use engagement_core::domains::engagement::activities::{ensure_storage, ingest_all};
use engagement_core::domains::engagement::load_records;
use engagement_core::kernel::ServerDeps;
use engagement_core::{server::build_app, Config};
use sqlx::postgres::PgPoolOptions;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize logging
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info,engagement_core=debug,sqlx=warn".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!("Application started");

    if let Err(e) = run().await {
        tracing::error!(error = ?e, "Fatal startup error");
        return Err(e);
    }

    Ok(())
}

async fn run() -> Result<()> {
    // Load configuration
    let config = Config::from_env().context("Failed to load configuration")?;
    tracing::info!("Configuration loaded");

    // Connect to database
    tracing::info!("Connecting to database...");
    let pool = PgPoolOptions::new()
        .max_connections(config.max_connections)
        .connect(&config.database_url)
        .await
        .context("Failed to connect to database")?;
    tracing::info!("Database connected");

    let mut deps = ServerDeps::from_pool(pool.clone(), &config);
    if deps.similarity_enabled() {
        tracing::info!("Vector search enabled ({})", config.embedding_model);
    } else {
        tracing::info!("OPENAI_API_KEY not set, vector search disabled");
    }

    ensure_storage(&mut deps).await?;

    // Ingest before serving so the first request sees the dataset
    if let Some(path) = &config.csv_path {
        let records = load_records(path)
            .with_context(|| format!("Error loading CSV file {}", path.display()))?;
        ingest_all(&deps, records).await;
    }

    let app = build_app(deps);

    let addr = format!("0.0.0.0:{}", config.port);
    tracing::info!("Starting server on {}", addr);

    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .context("Failed to bind to address")?;

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("Server error")?;

    pool.close().await;
    tracing::info!("Shut down");

    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::warn!(error = %e, "Failed to listen for shutdown signal");
    }
}
