use super::errors::TableError;
use super::layout::default_players;
use super::models::{
    checked_totals, compute_totals, Cell, GameKind, NewScoreTable, Round, ScoreGrid,
};

/// In-progress table being filled in by the score entry screen.
///
/// The player list and name can only change while every cell is still empty.
#[derive(Debug, Clone, PartialEq)]
pub struct TableDraft {
    name: String,
    game: GameKind,
    players: Vec<String>,
    rounds: Vec<Round>,
    scores: ScoreGrid,
}

impl TableDraft {
    pub fn new(game: GameKind) -> Self {
        Self::with_players(game, default_players())
    }

    pub fn with_players(game: GameKind, players: Vec<String>) -> Self {
        let rounds = game.default_rounds();
        let scores = vec![vec![Cell::Empty; players.len()]; rounds.len()];
        Self {
            name: String::new(),
            game,
            players,
            rounds,
            scores,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn game(&self) -> GameKind {
        self.game
    }

    pub fn players(&self) -> &[String] {
        &self.players
    }

    pub fn rounds(&self) -> &[Round] {
        &self.rounds
    }

    pub fn scores(&self) -> &ScoreGrid {
        &self.scores
    }

    pub fn is_locked(&self) -> bool {
        self.scores.iter().flatten().any(|cell| !cell.is_empty())
    }

    pub fn set_name(&mut self, name: impl Into<String>) -> Result<(), TableError> {
        self.ensure_unlocked()?;
        self.name = name.into();
        Ok(())
    }

    pub fn add_player(&mut self, name: &str) -> Result<(), TableError> {
        self.ensure_unlocked()?;

        let name = name.trim();
        if name.is_empty() {
            return Err(TableError::BlankPlayerName);
        }
        if self.players.iter().any(|p| p == name) {
            return Err(TableError::DuplicatePlayer(name.to_string()));
        }

        self.players.push(name.to_string());
        for row in &mut self.scores {
            row.push(Cell::Empty);
        }
        Ok(())
    }

    pub fn remove_player(&mut self, index: usize) -> Result<String, TableError> {
        self.ensure_unlocked()?;

        if index >= self.players.len() {
            return Err(TableError::OutOfBounds {
                round: 0,
                player: index,
            });
        }
        if self.players.len() == 1 {
            return Err(TableError::LastPlayer);
        }

        for row in &mut self.scores {
            row.remove(index);
        }
        Ok(self.players.remove(index))
    }

    /// Stores the parsed value of `raw`; unparseable input clears the cell
    pub fn set_score(&mut self, round: usize, player: usize, raw: &str) -> Result<Cell, TableError> {
        let cell = self
            .scores
            .get_mut(round)
            .and_then(|row| row.get_mut(player))
            .ok_or(TableError::OutOfBounds { round, player })?;

        *cell = Cell::parse(raw);
        Ok(*cell)
    }

    pub fn totals(&self) -> Vec<i64> {
        compute_totals(self.players.len(), &self.scores)
    }

    pub fn to_new_table(&self) -> Result<NewScoreTable, TableError> {
        let name = self.name.trim();
        if name.is_empty() {
            return Err(TableError::MissingName);
        }
        let totals = checked_totals(self.players.len(), &self.scores)?;

        Ok(NewScoreTable {
            name: name.to_string(),
            game: self.game,
            players: self.players.clone(),
            rounds: self.rounds.clone(),
            scores: self.scores.clone(),
            totals,
        })
    }

    fn ensure_unlocked(&self) -> Result<(), TableError> {
        if self.is_locked() {
            Err(TableError::Locked)
        } else {
            Ok(())
        }
    }
}
