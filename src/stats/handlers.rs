use axum::{extract::State, Json};
use tracing::{info, instrument};

use super::{LeaderboardService, LeaderboardSnapshot};
use crate::shared::{AppError, AppState};

/// HTTP handler for the leaderboard page
///
/// GET /leaderboard
/// Returns statistics for both games computed from every stored table
#[instrument(name = "get_leaderboard", skip(state))]
pub async fn get_leaderboard(
    State(state): State<AppState>,
) -> Result<Json<LeaderboardSnapshot>, AppError> {
    let service = LeaderboardService::new(
        state.table_repository.clone(),
        state.leaderboard_engine.clone(),
    );
    let snapshot = service.snapshot().await?;

    info!(
        players = snapshot.total_distinct_players,
        "Leaderboard served"
    );

    Ok(Json(snapshot))
}
