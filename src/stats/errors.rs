use serde::{Deserialize, Serialize};
use thiserror::Error;
use uuid::Uuid;

use crate::table::GameKind;

#[derive(Debug, Clone, Error, PartialEq)]
pub enum StatsError {
    #[error("Table {table_id} is malformed: {reason}")]
    MalformedTable { table_id: Uuid, reason: String },

    #[error("Table {table_id} is a {found} table but was passed as {expected}")]
    GameMismatch {
        table_id: Uuid,
        expected: GameKind,
        found: GameKind,
    },

    #[error("Repository error: {0}")]
    Repository(String),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum DiagnosticKind {
    MalformedTable,
    GameMismatch,
}

impl StatsError {
    /// Kind of per-table diagnostic, or `None` for errors that are not about one table
    pub fn diagnostic_kind(&self) -> Option<DiagnosticKind> {
        match self {
            StatsError::MalformedTable { .. } => Some(DiagnosticKind::MalformedTable),
            StatsError::GameMismatch { .. } => Some(DiagnosticKind::GameMismatch),
            StatsError::Repository(_) => None,
        }
    }
}

impl From<crate::table::TableError> for StatsError {
    fn from(err: crate::table::TableError) -> Self {
        StatsError::Repository(err.to_string())
    }
}
