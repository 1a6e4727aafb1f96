pub mod calculators;
pub mod collectors;
pub mod handlers;
pub mod service;

mod errors;
pub mod models;

pub use errors::{DiagnosticKind, StatsError};
pub use handlers::get_leaderboard;
pub use models::*;
pub use service::{compute_leaderboard, LeaderboardEngine, LeaderboardService};

use crate::table::{GameKind, ScoreTable};

pub type CollectedDataBatch = Vec<CollectedData>;

/// Extracts per-player facts from one validated table.
///
/// Collectors only see tables whose dimensions already match their player list.
pub trait StatCollector: Send + Sync {
    fn collect(&self, table: &ScoreTable) -> CollectedDataBatch;

    fn applies_to(&self, _game: GameKind) -> bool {
        true
    }
}

/// Turns a player's aggregated counters into the scalar used for the
/// "most consistent player" ranking of one game.
pub trait ConsistencyCalculator: Send + Sync {
    fn calculate(&self, stat: &PlayerStat) -> i64;

    fn game(&self) -> GameKind;
}
