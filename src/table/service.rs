use std::sync::Arc;

use tracing::{info, instrument};
use uuid::Uuid;

use super::{
    checked_totals, Cell, GameKind, ScoreGrid, ScoreTable, TableDraft, TableError,
    TableRepository, TableUpdate,
};

/// Score table use-cases shared by the HTTP handlers
pub struct TableService {
    repository: Arc<dyn TableRepository>,
}

impl TableService {
    pub fn new(repository: Arc<dyn TableRepository>) -> Self {
        Self { repository }
    }

    /// Inserts the draft the first time it is saved, updates the stored copy afterwards
    #[instrument(skip(self, draft), fields(game = %draft.game()))]
    pub async fn save_draft(
        &self,
        draft: &TableDraft,
        existing_id: Option<Uuid>,
    ) -> Result<Uuid, TableError> {
        let table = draft.to_new_table()?;

        match existing_id {
            Some(id) => {
                self.repository
                    .update_table(
                        id,
                        TableUpdate {
                            players: Some(table.players),
                            scores: Some(table.scores),
                            totals: Some(table.totals),
                        },
                    )
                    .await?;
                Ok(id)
            }
            None => {
                let stored = self.repository.insert_table(table).await?;
                info!(table_id = %stored.id, name = %stored.name, "Score table created");
                Ok(stored.id)
            }
        }
    }

    /// Replaces the score grid and recomputes totals so they always match it.
    /// Rounds missing from the end of `scores` are stored as empty rows.
    #[instrument(skip(self, scores))]
    pub async fn update_scores(
        &self,
        id: Uuid,
        mut scores: ScoreGrid,
    ) -> Result<ScoreTable, TableError> {
        let mut table = self
            .repository
            .get_table(id)
            .await?
            .ok_or(TableError::NotFound(id))?;

        let expected = table.player_count();
        if let Some(row) = scores.iter().find(|row| row.len() != expected) {
            return Err(TableError::DimensionMismatch {
                expected,
                found: row.len(),
            });
        }

        let rounds = table.rounds.len();
        if scores.len() > rounds {
            return Err(TableError::TooManyRounds {
                rounds,
                found: scores.len(),
            });
        }
        scores.resize(rounds, vec![Cell::Empty; expected]);

        let update = TableUpdate {
            players: None,
            totals: Some(checked_totals(expected, &scores)?),
            scores: Some(scores),
        };
        self.repository.update_table(id, update.clone()).await?;
        table.apply(update);

        Ok(table)
    }

    pub async fn list_tables(&self, game: GameKind) -> Result<Vec<ScoreTable>, TableError> {
        self.repository.fetch_tables(game).await
    }

    pub async fn get_table(&self, id: Uuid) -> Result<ScoreTable, TableError> {
        self.repository
            .get_table(id)
            .await?
            .ok_or(TableError::NotFound(id))
    }

    #[instrument(skip(self))]
    pub async fn delete_table(&self, id: Uuid) -> Result<(), TableError> {
        self.repository.delete_table(id).await?;
        info!(table_id = %id, "Score table deleted");
        Ok(())
    }
}
