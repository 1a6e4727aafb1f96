use thiserror::Error;
use uuid::Uuid;

#[derive(Debug, Error, PartialEq)]
pub enum TableError {
    #[error("Table is locked once scores have been entered")]
    Locked,

    #[error("Table name must not be empty")]
    MissingName,

    #[error("Player name must not be empty")]
    BlankPlayerName,

    #[error("Player {0} is already at the table")]
    DuplicatePlayer(String),

    #[error("A table needs at least one player")]
    LastPlayer,

    #[error("No cell at round {round}, player {player}")]
    OutOfBounds { round: usize, player: usize },

    #[error("Expected {expected} columns per row, found {found}")]
    DimensionMismatch { expected: usize, found: usize },

    #[error("Table has {rounds} rounds, got scores for {found}")]
    TooManyRounds { rounds: usize, found: usize },

    #[error("Scores for player {player} add up past the supported range")]
    ScoreOverflow { player: usize },

    #[error("Table {0} not found")]
    NotFound(Uuid),

    #[error("Repository error: {0}")]
    Repository(String),
}
