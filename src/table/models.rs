use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use strum_macros::{AsRefStr, Display, EnumString};
use uuid::Uuid;

use super::errors::TableError;

/// The two games tracked by the scoreboard
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    PartialOrd,
    Ord,
    Serialize,
    Deserialize,
    Display,
    EnumString,
    AsRefStr,
)]
pub enum GameKind {
    SevenCards,
    Judgement,
}

/// Direction in which table totals are ranked
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RankOrder {
    LowestWins,
    HighestWins,
}

impl GameKind {
    pub fn rank_order(self) -> RankOrder {
        match self {
            GameKind::SevenCards => RankOrder::LowestWins,
            GameKind::Judgement => RankOrder::HighestWins,
        }
    }
}

/// Trump suit of a Judgement round. `Numbers` is the no-trump deal.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    Display,
    EnumString,
)]
pub enum Suit {
    Spades,
    Diamonds,
    Clubs,
    Hearts,
    Numbers,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Round {
    pub label: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cards: Option<u8>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub suit: Option<Suit>,
}

impl Round {
    pub fn labelled(label: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            cards: None,
            suit: None,
        }
    }

    pub fn deal(suit: Suit, cards: u8) -> Self {
        Self {
            label: format!("{} {}", suit, cards),
            cards: Some(cards),
            suit: Some(suit),
        }
    }
}

/// A single score entry. Stored as text so that unfinished rows round-trip as `""`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Cell {
    #[default]
    Empty,
    Numeric(i64),
}

impl Cell {
    /// Reads an optional sign and the leading digits, ignoring whatever follows.
    /// Input without leading digits, or too large for an `i64`, is an empty cell.
    pub fn parse(raw: &str) -> Self {
        let raw = raw.trim_start();
        let sign = usize::from(raw.starts_with(['+', '-']));
        let end = raw[sign..]
            .find(|c: char| !c.is_ascii_digit())
            .map_or(raw.len(), |at| at + sign);
        if end == sign {
            return Cell::Empty;
        }

        raw[..end]
            .parse::<i64>()
            .map(Cell::Numeric)
            .unwrap_or(Cell::Empty)
    }

    pub fn value(&self) -> Option<i64> {
        match self {
            Cell::Empty => None,
            Cell::Numeric(v) => Some(*v),
        }
    }

    pub fn is_empty(&self) -> bool {
        matches!(self, Cell::Empty)
    }
}

impl Serialize for Cell {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Cell::Empty => serializer.serialize_str(""),
            Cell::Numeric(v) => serializer.serialize_str(&v.to_string()),
        }
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum RawCell {
    Integer(i64),
    Float(f64),
    Text(String),
    Null(()),
}

impl<'de> Deserialize<'de> for Cell {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let cell = match RawCell::deserialize(deserializer)? {
            RawCell::Integer(v) => Cell::Numeric(v),
            RawCell::Float(v) if v.is_finite() => Cell::Numeric(v.trunc() as i64),
            RawCell::Float(_) => Cell::Empty,
            RawCell::Text(raw) => Cell::parse(&raw),
            RawCell::Null(()) => Cell::Empty,
        };
        Ok(cell)
    }
}

pub type ScoreGrid = Vec<Vec<Cell>>;

/// Sums every column of the grid, treating empty cells as zero.
/// Sums that leave the `i64` range stick at the bound.
pub fn compute_totals(player_count: usize, scores: &[Vec<Cell>]) -> Vec<i64> {
    let mut totals = vec![0i64; player_count];
    for row in scores {
        for (total, cell) in totals.iter_mut().zip(row) {
            *total = total.saturating_add(cell.value().unwrap_or_default());
        }
    }
    totals
}

/// Like [`compute_totals`], but rejects a grid whose column sums overflow
pub fn checked_totals(
    player_count: usize,
    scores: &[Vec<Cell>],
) -> Result<Vec<i64>, TableError> {
    let mut totals = vec![0i64; player_count];
    for row in scores {
        for (player, (total, cell)) in totals.iter_mut().zip(row).enumerate() {
            *total = total
                .checked_add(cell.value().unwrap_or_default())
                .ok_or(TableError::ScoreOverflow { player })?;
        }
    }
    Ok(totals)
}

/// A persisted score table for one sitting of a game
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoreTable {
    pub id: Uuid,
    pub name: String,
    pub game: GameKind,
    pub players: Vec<String>,
    pub rounds: Vec<Round>,
    pub scores: ScoreGrid,
    pub totals: Vec<i64>,
    pub created_at: DateTime<Utc>,
}

impl ScoreTable {
    pub fn from_new(id: Uuid, created_at: DateTime<Utc>, table: NewScoreTable) -> Self {
        Self {
            id,
            name: table.name,
            game: table.game,
            players: table.players,
            rounds: table.rounds,
            scores: table.scores,
            totals: table.totals,
            created_at,
        }
    }

    pub fn player_count(&self) -> usize {
        self.players.len()
    }

    pub fn apply(&mut self, update: TableUpdate) {
        if let Some(players) = update.players {
            self.players = players;
        }
        if let Some(scores) = update.scores {
            self.scores = scores;
        }
        if let Some(totals) = update.totals {
            self.totals = totals;
        }
    }
}

/// A table ready to be inserted; id and timestamp are assigned by the repository
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewScoreTable {
    pub name: String,
    pub game: GameKind,
    pub players: Vec<String>,
    pub rounds: Vec<Round>,
    pub scores: ScoreGrid,
    pub totals: Vec<i64>,
}

/// Partial update of a stored table
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TableUpdate {
    pub players: Option<Vec<String>>,
    pub scores: Option<ScoreGrid>,
    pub totals: Option<Vec<i64>>,
}
