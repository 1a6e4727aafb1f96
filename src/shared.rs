use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use std::sync::Arc;
use thiserror::Error;

use crate::stats::{LeaderboardEngine, StatsError};
use crate::table::{TableError, TableRepository};

/// Shared application state containing all dependencies
#[derive(Clone)]
pub struct AppState {
    pub table_repository: Arc<dyn TableRepository>,
    pub leaderboard_engine: Arc<LeaderboardEngine>,
}

impl AppState {
    pub fn new(table_repository: Arc<dyn TableRepository>) -> Self {
        Self {
            table_repository,
            leaderboard_engine: Arc::new(LeaderboardEngine::default()),
        }
    }
}

#[derive(Error, Debug)]
pub enum AppError {
    #[error("Bad request: {0}")]
    BadRequest(String),

    #[error("Conflict: {0}")]
    Conflict(String),

    #[error("Database error: {0}")]
    DatabaseError(String),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Internal server error")]
    Internal,
}

impl From<TableError> for AppError {
    fn from(err: TableError) -> Self {
        match err {
            TableError::NotFound(_) => AppError::NotFound(err.to_string()),
            TableError::Locked => AppError::Conflict(err.to_string()),
            TableError::Repository(msg) => AppError::DatabaseError(msg),
            TableError::MissingName
            | TableError::BlankPlayerName
            | TableError::DuplicatePlayer(_)
            | TableError::LastPlayer
            | TableError::OutOfBounds { .. }
            | TableError::DimensionMismatch { .. }
            | TableError::TooManyRounds { .. }
            | TableError::ScoreOverflow { .. } => AppError::BadRequest(err.to_string()),
        }
    }
}

impl From<StatsError> for AppError {
    fn from(err: StatsError) -> Self {
        match err {
            StatsError::Repository(msg) => AppError::DatabaseError(msg),
            // Per-table problems are reported inside the snapshot, never raised
            StatsError::MalformedTable { .. } | StatsError::GameMismatch { .. } => {
                AppError::Internal
            }
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, error_message) = match self {
            AppError::BadRequest(msg) => (StatusCode::BAD_REQUEST, msg),
            AppError::Conflict(msg) => (StatusCode::CONFLICT, msg),
            AppError::DatabaseError(msg) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                format!("Database error: {}", msg),
            ),
            AppError::NotFound(msg) => (StatusCode::NOT_FOUND, msg),
            AppError::Internal => (
                StatusCode::INTERNAL_SERVER_ERROR,
                "Internal server error".to_string(),
            ),
        };

        let body = Json(json!({
            "error": error_message
        }));

        (status, body).into_response()
    }
}

#[cfg(test)]
pub mod test_utils {
    use super::*;
    use crate::table::{compute_totals, Cell, GameKind, InMemoryTableRepository, ScoreTable};
    use chrono::Utc;
    use uuid::Uuid;

    /// Stored table whose totals are given directly, with a single matching score row
    pub fn table_with_totals(game: GameKind, standings: &[(&str, i64)]) -> ScoreTable {
        ScoreTable {
            id: Uuid::new_v4(),
            name: format!("{} table", game),
            game,
            players: standings.iter().map(|(p, _)| p.to_string()).collect(),
            rounds: game.default_rounds(),
            scores: vec![standings.iter().map(|(_, t)| Cell::Numeric(*t)).collect()],
            totals: standings.iter().map(|(_, t)| *t).collect(),
            created_at: Utc::now(),
        }
    }

    /// Stored table built from raw cell text, totals computed from the grid
    pub fn table_with_scores(game: GameKind, players: &[&str], rows: &[&[&str]]) -> ScoreTable {
        let scores: Vec<Vec<Cell>> = rows
            .iter()
            .map(|row| row.iter().map(|raw| Cell::parse(raw)).collect())
            .collect();

        ScoreTable {
            id: Uuid::new_v4(),
            name: format!("{} table", game),
            game,
            players: players.iter().map(|p| p.to_string()).collect(),
            rounds: game.default_rounds(),
            totals: compute_totals(players.len(), &scores),
            scores,
            created_at: Utc::now(),
        }
    }

    /// Builder for creating AppState with overrides for testing
    pub struct AppStateBuilder {
        table_repository: Option<Arc<dyn TableRepository>>,
        leaderboard_engine: Option<Arc<LeaderboardEngine>>,
    }

    impl AppStateBuilder {
        pub fn new() -> Self {
            Self {
                table_repository: None,
                leaderboard_engine: None,
            }
        }

        pub fn with_table_repository(mut self, repo: Arc<dyn TableRepository>) -> Self {
            self.table_repository = Some(repo);
            self
        }

        pub fn with_leaderboard_engine(mut self, engine: Arc<LeaderboardEngine>) -> Self {
            self.leaderboard_engine = Some(engine);
            self
        }

        pub fn build(self) -> AppState {
            AppState {
                table_repository: self
                    .table_repository
                    .unwrap_or_else(|| Arc::new(InMemoryTableRepository::new())),
                leaderboard_engine: self
                    .leaderboard_engine
                    .unwrap_or_else(|| Arc::new(LeaderboardEngine::default())),
            }
        }
    }

    impl Default for AppStateBuilder {
        fn default() -> Self {
            Self::new()
        }
    }

    #[test]
    fn table_errors_map_to_statuses() {
        let cases = [
            (TableError::MissingName, StatusCode::BAD_REQUEST),
            (TableError::Locked, StatusCode::CONFLICT),
            (TableError::NotFound(Uuid::nil()), StatusCode::NOT_FOUND),
            (
                TableError::Repository("down".into()),
                StatusCode::INTERNAL_SERVER_ERROR,
            ),
        ];

        for (err, status) in cases {
            let response = AppError::from(err).into_response();
            assert_eq!(response.status(), status);
        }
    }
}
