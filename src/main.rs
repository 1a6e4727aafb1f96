use scoreboard::{
    table::{InMemoryTableRepository, PostgresTableRepository, TableRepository},
    AppConfig, AppState,
};
use sqlx::postgres::PgPoolOptions;
use std::sync::Arc;
use tracing::{error, info};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main(flavor = "current_thread")]
async fn main() {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "scoreboard=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    if let Err(err) = run().await {
        error!(error = %err, "Scoreboard server stopped");
        std::process::exit(1);
    }
}

async fn run() -> Result<(), Box<dyn std::error::Error>> {
    let config = AppConfig::from_env()?;
    info!(bind_addr = %config.bind_addr, "Starting scoreboard server");

    let table_repository: Arc<dyn TableRepository> = match &config.database_url {
        Some(url) => {
            let pool = PgPoolOptions::new()
                .max_connections(config.database_max_connections)
                .connect(url)
                .await?;
            info!("Using PostgreSQL table repository");
            Arc::new(PostgresTableRepository::new(pool))
        }
        None => {
            info!("DATABASE_URL not set, using in-memory table repository");
            Arc::new(InMemoryTableRepository::new())
        }
    };

    let app = scoreboard::router(AppState::new(table_repository));

    let listener = tokio::net::TcpListener::bind(config.bind_addr).await?;
    info!("Server running on http://{}", config.bind_addr);
    axum::serve(listener, app).await?;

    Ok(())
}
