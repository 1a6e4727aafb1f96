use chrono::{Duration, Utc};
use scoreboard::table::compute_totals;
use scoreboard::{Cell, GameKind, ScoreTable};
use uuid::Uuid;

// ============================================================================
// Score Table Builder
// ============================================================================

pub struct TableBuilder {
    game: GameKind,
    name: String,
    players: Vec<String>,
    rows: Vec<Vec<Cell>>,
    totals: Option<Vec<i64>>,
    age_minutes: i64,
}

#[allow(dead_code)]
impl TableBuilder {
    pub fn new(game: GameKind) -> Self {
        Self {
            game,
            name: format!("{} night", game),
            players: vec![],
            rows: vec![],
            totals: None,
            age_minutes: 0,
        }
    }

    pub fn seven_cards() -> Self {
        Self::new(GameKind::SevenCards)
    }

    pub fn judgement() -> Self {
        Self::new(GameKind::Judgement)
    }

    pub fn named(mut self, name: &str) -> Self {
        self.name = name.to_string();
        self
    }

    pub fn with_players(mut self, players: &[&str]) -> Self {
        self.players = players.iter().map(|p| p.to_string()).collect();
        self
    }

    pub fn with_row(mut self, row: &[&str]) -> Self {
        self.rows.push(row.iter().map(|raw| Cell::parse(raw)).collect());
        self
    }

    /// Single round whose values become the totals
    pub fn with_totals(mut self, totals: &[i64]) -> Self {
        self.rows = vec![totals.iter().map(|t| Cell::Numeric(*t)).collect()];
        self
    }

    /// Overrides computed totals, allowing inconsistent tables
    pub fn with_raw_totals(mut self, totals: &[i64]) -> Self {
        self.totals = Some(totals.to_vec());
        self
    }

    pub fn created_minutes_ago(mut self, minutes: i64) -> Self {
        self.age_minutes = minutes;
        self
    }

    pub fn build(self) -> ScoreTable {
        let totals = self
            .totals
            .unwrap_or_else(|| compute_totals(self.players.len(), &self.rows));

        ScoreTable {
            id: Uuid::new_v4(),
            name: self.name,
            game: self.game,
            rounds: self.game.default_rounds(),
            players: self.players,
            scores: self.rows,
            totals,
            created_at: Utc::now() - Duration::minutes(self.age_minutes),
        }
    }
}
