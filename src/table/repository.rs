use async_trait::async_trait;
use chrono::Utc;
use sqlx::{postgres::PgRow, types::Json, PgPool, Row};
use std::collections::HashMap;
use std::str::FromStr;
use std::sync::Arc;
use tokio::sync::RwLock;
use tracing::{debug, instrument, warn};
use uuid::Uuid;

use super::errors::TableError;
use super::models::{GameKind, NewScoreTable, Round, ScoreGrid, ScoreTable, TableUpdate};

/// Storage for score tables
#[async_trait]
pub trait TableRepository: Send + Sync {
    /// All tables of one game, newest first
    async fn fetch_tables(&self, game: GameKind) -> Result<Vec<ScoreTable>, TableError>;
    async fn get_table(&self, id: Uuid) -> Result<Option<ScoreTable>, TableError>;
    async fn insert_table(&self, table: NewScoreTable) -> Result<ScoreTable, TableError>;
    async fn update_table(&self, id: Uuid, update: TableUpdate) -> Result<(), TableError>;
    async fn delete_table(&self, id: Uuid) -> Result<(), TableError>;
}

/// In-memory implementation of TableRepository for development and testing
///
/// Data is lost when the process exits.
#[derive(Debug, Default)]
pub struct InMemoryTableRepository {
    tables: Arc<RwLock<HashMap<Uuid, ScoreTable>>>,
}

impl InMemoryTableRepository {
    pub fn new() -> Self {
        Self {
            tables: Arc::new(RwLock::new(HashMap::new())),
        }
    }

    /// Creates a repository pre-populated with stored tables
    pub fn with_tables(tables: Vec<ScoreTable>) -> Self {
        let map = tables.into_iter().map(|t| (t.id, t)).collect();
        Self {
            tables: Arc::new(RwLock::new(map)),
        }
    }

    pub async fn table_count(&self) -> usize {
        self.tables.read().await.len()
    }
}

#[async_trait]
impl TableRepository for InMemoryTableRepository {
    #[instrument(skip(self))]
    async fn fetch_tables(&self, game: GameKind) -> Result<Vec<ScoreTable>, TableError> {
        let tables = self.tables.read().await;
        let mut found: Vec<ScoreTable> = tables
            .values()
            .filter(|t| t.game == game)
            .cloned()
            .collect();
        found.sort_by(|a, b| b.created_at.cmp(&a.created_at).then(a.id.cmp(&b.id)));

        debug!(count = found.len(), "Fetched tables from memory");
        Ok(found)
    }

    #[instrument(skip(self))]
    async fn get_table(&self, id: Uuid) -> Result<Option<ScoreTable>, TableError> {
        let tables = self.tables.read().await;
        Ok(tables.get(&id).cloned())
    }

    #[instrument(skip(self, table), fields(name = %table.name, game = %table.game))]
    async fn insert_table(&self, table: NewScoreTable) -> Result<ScoreTable, TableError> {
        let stored = ScoreTable::from_new(Uuid::new_v4(), Utc::now(), table);

        let mut tables = self.tables.write().await;
        tables.insert(stored.id, stored.clone());

        debug!(table_id = %stored.id, "Table inserted in memory");
        Ok(stored)
    }

    #[instrument(skip(self, update))]
    async fn update_table(&self, id: Uuid, update: TableUpdate) -> Result<(), TableError> {
        let mut tables = self.tables.write().await;
        let Some(table) = tables.get_mut(&id) else {
            warn!(table_id = %id, "Table not found for update in memory");
            return Err(TableError::NotFound(id));
        };
        table.apply(update);

        debug!(table_id = %id, "Table updated in memory");
        Ok(())
    }

    #[instrument(skip(self))]
    async fn delete_table(&self, id: Uuid) -> Result<(), TableError> {
        let mut tables = self.tables.write().await;
        if tables.remove(&id).is_none() {
            warn!(table_id = %id, "Table not found for deletion in memory");
            return Err(TableError::NotFound(id));
        }

        debug!(table_id = %id, "Table deleted from memory");
        Ok(())
    }
}

/// PostgreSQL implementation of table repository; see `schema.sql`
pub struct PostgresTableRepository {
    pool: PgPool,
}

impl PostgresTableRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

const SELECT_COLUMNS: &str =
    "SELECT id, name, game, players, rounds, scores, totals, created_at FROM score_tables";

fn database_error(e: sqlx::Error) -> TableError {
    warn!(error = %e, "Score table query failed");
    TableError::Repository(e.to_string())
}

fn table_from_row(row: &PgRow) -> Result<ScoreTable, TableError> {
    let game: String = row.try_get("game").map_err(database_error)?;
    let game = GameKind::from_str(&game)
        .map_err(|_| TableError::Repository(format!("Unknown game tag: {}", game)))?;

    let players: Json<Vec<String>> = row.try_get("players").map_err(database_error)?;
    let rounds: Json<Vec<Round>> = row.try_get("rounds").map_err(database_error)?;
    let scores: Json<ScoreGrid> = row.try_get("scores").map_err(database_error)?;
    let totals: Json<Vec<i64>> = row.try_get("totals").map_err(database_error)?;

    Ok(ScoreTable {
        id: row.try_get("id").map_err(database_error)?,
        name: row.try_get("name").map_err(database_error)?,
        game,
        players: players.0,
        rounds: rounds.0,
        scores: scores.0,
        totals: totals.0,
        created_at: row.try_get("created_at").map_err(database_error)?,
    })
}

#[async_trait]
impl TableRepository for PostgresTableRepository {
    #[instrument(skip(self))]
    async fn fetch_tables(&self, game: GameKind) -> Result<Vec<ScoreTable>, TableError> {
        let rows = sqlx::query(&format!(
            "{} WHERE game = $1 ORDER BY created_at DESC",
            SELECT_COLUMNS
        ))
        .bind(game.as_ref())
        .fetch_all(&self.pool)
        .await
        .map_err(database_error)?;

        debug!(count = rows.len(), "Fetched tables from database");
        rows.iter().map(table_from_row).collect()
    }

    #[instrument(skip(self))]
    async fn get_table(&self, id: Uuid) -> Result<Option<ScoreTable>, TableError> {
        let row = sqlx::query(&format!("{} WHERE id = $1", SELECT_COLUMNS))
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(database_error)?;

        row.as_ref().map(table_from_row).transpose()
    }

    #[instrument(skip(self, table), fields(name = %table.name, game = %table.game))]
    async fn insert_table(&self, table: NewScoreTable) -> Result<ScoreTable, TableError> {
        let stored = ScoreTable::from_new(Uuid::new_v4(), Utc::now(), table);

        sqlx::query(
            "INSERT INTO score_tables (id, name, game, players, rounds, scores, totals, created_at) VALUES ($1, $2, $3, $4, $5, $6, $7, $8)",
        )
        .bind(stored.id)
        .bind(&stored.name)
        .bind(stored.game.as_ref())
        .bind(Json(&stored.players))
        .bind(Json(&stored.rounds))
        .bind(Json(&stored.scores))
        .bind(Json(&stored.totals))
        .bind(stored.created_at)
        .execute(&self.pool)
        .await
        .map_err(database_error)?;

        debug!(table_id = %stored.id, "Table inserted in database");
        Ok(stored)
    }

    #[instrument(skip(self, update))]
    async fn update_table(&self, id: Uuid, update: TableUpdate) -> Result<(), TableError> {
        let result = sqlx::query(
            "UPDATE score_tables SET players = COALESCE($2, players), scores = COALESCE($3, scores), totals = COALESCE($4, totals) WHERE id = $1",
        )
        .bind(id)
        .bind(update.players.map(Json))
        .bind(update.scores.map(Json))
        .bind(update.totals.map(Json))
        .execute(&self.pool)
        .await
        .map_err(database_error)?;

        if result.rows_affected() == 0 {
            warn!(table_id = %id, "Table not found for update in database");
            return Err(TableError::NotFound(id));
        }
        Ok(())
    }

    #[instrument(skip(self))]
    async fn delete_table(&self, id: Uuid) -> Result<(), TableError> {
        let result = sqlx::query("DELETE FROM score_tables WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(database_error)?;

        if result.rows_affected() == 0 {
            warn!(table_id = %id, "Table not found for deletion in database");
            return Err(TableError::NotFound(id));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::table::models::Cell;

    fn new_table(name: &str, game: GameKind) -> NewScoreTable {
        NewScoreTable {
            name: name.to_string(),
            game,
            players: vec!["A".into(), "B".into()],
            rounds: game.default_rounds(),
            scores: vec![vec![Cell::Numeric(3), Cell::Empty]],
            totals: vec![3, 0],
        }
    }

    #[tokio::test]
    async fn inserts_and_fetches_by_game() {
        let repo = InMemoryTableRepository::new();
        let seven = repo
            .insert_table(new_table("seven", GameKind::SevenCards))
            .await
            .unwrap();
        repo.insert_table(new_table("judgement", GameKind::Judgement))
            .await
            .unwrap();

        let tables = repo.fetch_tables(GameKind::SevenCards).await.unwrap();
        assert_eq!(tables.len(), 1);
        assert_eq!(tables[0].id, seven.id);
        assert_eq!(repo.table_count().await, 2);
    }

    #[tokio::test]
    async fn fetch_lists_newest_first() {
        let older = ScoreTable::from_new(
            Uuid::new_v4(),
            Utc::now() - chrono::Duration::hours(1),
            new_table("older", GameKind::Judgement),
        );
        let newer = ScoreTable::from_new(
            Uuid::new_v4(),
            Utc::now(),
            new_table("newer", GameKind::Judgement),
        );
        let repo = InMemoryTableRepository::with_tables(vec![older, newer]);

        let names: Vec<String> = repo
            .fetch_tables(GameKind::Judgement)
            .await
            .unwrap()
            .into_iter()
            .map(|t| t.name)
            .collect();
        assert_eq!(names, vec!["newer".to_string(), "older".to_string()]);
    }

    #[tokio::test]
    async fn update_applies_only_given_fields() {
        let repo = InMemoryTableRepository::new();
        let stored = repo
            .insert_table(new_table("t", GameKind::SevenCards))
            .await
            .unwrap();

        repo.update_table(
            stored.id,
            TableUpdate {
                totals: Some(vec![9, 9]),
                ..TableUpdate::default()
            },
        )
        .await
        .unwrap();

        let updated = repo.get_table(stored.id).await.unwrap().unwrap();
        assert_eq!(updated.totals, vec![9, 9]);
        assert_eq!(updated.players, stored.players);
        assert_eq!(updated.scores, stored.scores);
    }

    #[tokio::test]
    async fn update_and_delete_unknown_table_fail() {
        let repo = InMemoryTableRepository::new();
        let id = Uuid::new_v4();

        assert_eq!(
            repo.update_table(id, TableUpdate::default()).await,
            Err(TableError::NotFound(id))
        );
        assert_eq!(repo.delete_table(id).await, Err(TableError::NotFound(id)));
    }

    #[tokio::test]
    async fn delete_removes_table() {
        let repo = InMemoryTableRepository::new();
        let stored = repo
            .insert_table(new_table("t", GameKind::SevenCards))
            .await
            .unwrap();

        repo.delete_table(stored.id).await.unwrap();
        assert!(repo.get_table(stored.id).await.unwrap().is_none());
    }
}
