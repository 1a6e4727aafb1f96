// Library crate for the card game scoreboard
// This file exposes the public API for the binary and integration tests

pub mod config;
pub mod shared;
pub mod stats;
pub mod table;

use axum::{
    routing::{get, put},
    Router,
};
use tower_http::{cors::CorsLayer, trace::TraceLayer};

// Re-export commonly used types for easier access in tests
pub use config::AppConfig;
pub use shared::{AppError, AppState};
pub use stats::{compute_leaderboard, LeaderboardEngine, LeaderboardSnapshot};
pub use table::{Cell, GameKind, ScoreTable, TableDraft};

/// Builds the HTTP router with every route the scoreboard serves
pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(|| async { "ok" }))
        .route("/tables", get(table::list_tables).post(table::create_table))
        .route(
            "/tables/:id",
            get(table::get_table).delete(table::delete_table),
        )
        .route("/tables/:id/scores", put(table::update_scores))
        .route("/leaderboard", get(stats::get_leaderboard))
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state)
}
