use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};
use uuid::Uuid;

use super::errors::{DiagnosticKind, StatsError};
use crate::table::{GameKind, ScoreTable};

/// Aggregated counters for one player in one game
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlayerStat {
    pub name: String,
    pub tables_played: u32,
    pub first_wins: u32,
    pub second_wins: u32,
    /// Defeats in Seven Cards, last places in Judgement
    pub last_places: u32,
    pub zeros: u32,
    pub max_score_65_or_130: u32,
    pub total_score: i64,
    pub positive_total_sum: i64,
    pub non_round_totals: u32,
}

impl PlayerStat {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }

    pub fn record(&mut self, data: &CollectedData) {
        match data {
            CollectedData::Placement { placement, .. } => match placement {
                Placement::First => self.first_wins += 1,
                Placement::Second => self.second_wins += 1,
                Placement::Last => self.last_places += 1,
            },
            CollectedData::SpecialScore { kind, .. } => match kind {
                SpecialScore::Zero => self.zeros += 1,
                SpecialScore::MaxScore => self.max_score_65_or_130 += 1,
            },
            CollectedData::TableTotal { total, .. } => {
                self.total_score = self.total_score.saturating_add(*total);
                if *total > 0 {
                    self.positive_total_sum = self.positive_total_sum.saturating_add(*total);
                }
                if total % 10 != 0 {
                    self.non_round_totals += 1;
                }
            }
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Placement {
    First,
    Second,
    Last,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SpecialScore {
    /// A round scored exactly 0
    Zero,
    /// A round scored 65 or 130
    MaxScore,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CollectedData {
    Placement { player: String, placement: Placement },
    SpecialScore { player: String, kind: SpecialScore },
    TableTotal { player: String, total: i64 },
}

impl CollectedData {
    pub fn player(&self) -> &str {
        match self {
            CollectedData::Placement { player, .. } => player,
            CollectedData::SpecialScore { player, .. } => player,
            CollectedData::TableTotal { player, .. } => player,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LeaderCategory {
    FirstWins,
    SecondWins,
    LastPlaces,
    Zeros,
    MaxScore65Or130,
}

impl LeaderCategory {
    pub fn for_game(game: GameKind) -> &'static [LeaderCategory] {
        match game {
            GameKind::SevenCards => &[
                LeaderCategory::FirstWins,
                LeaderCategory::SecondWins,
                LeaderCategory::LastPlaces,
                LeaderCategory::Zeros,
                LeaderCategory::MaxScore65Or130,
            ],
            GameKind::Judgement => &[
                LeaderCategory::FirstWins,
                LeaderCategory::SecondWins,
                LeaderCategory::LastPlaces,
            ],
        }
    }

    pub fn count(self, stat: &PlayerStat) -> u32 {
        match self {
            LeaderCategory::FirstWins => stat.first_wins,
            LeaderCategory::SecondWins => stat.second_wins,
            LeaderCategory::LastPlaces => stat.last_places,
            LeaderCategory::Zeros => stat.zeros,
            LeaderCategory::MaxScore65Or130 => stat.max_score_65_or_130,
        }
    }
}

/// Everyone sharing the highest count in one category
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CategoryLeader {
    pub category: LeaderCategory,
    pub players: Vec<String>,
    pub count: u32,
}

/// A table that was left out of aggregation
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TableDiagnostic {
    pub table_id: Uuid,
    pub table_name: String,
    pub game: GameKind,
    pub kind: DiagnosticKind,
    pub message: String,
}

impl TableDiagnostic {
    pub fn new(table: &ScoreTable, game: GameKind, kind: DiagnosticKind, err: &StatsError) -> Self {
        Self {
            table_id: table.id,
            table_name: table.name.clone(),
            game,
            kind,
            message: err.to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameLeaderboard {
    pub game: GameKind,
    pub tables_aggregated: usize,
    pub player_stats: BTreeMap<String, PlayerStat>,
    pub consistency: BTreeMap<String, i64>,
    pub most_consistent: BTreeSet<String>,
    pub leaders: Vec<CategoryLeader>,
}

impl GameLeaderboard {
    pub fn empty(game: GameKind) -> Self {
        Self {
            game,
            tables_aggregated: 0,
            player_stats: BTreeMap::new(),
            consistency: BTreeMap::new(),
            most_consistent: BTreeSet::new(),
            leaders: Vec::new(),
        }
    }

    pub fn stat(&self, player: &str) -> Option<&PlayerStat> {
        self.player_stats.get(player)
    }

    pub fn leader(&self, category: LeaderCategory) -> Option<&CategoryLeader> {
        self.leaders.iter().find(|l| l.category == category)
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TableCounts {
    pub seven_cards: usize,
    pub judgement: usize,
}

/// One row of the combined cross-game player table
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CombinedRow {
    pub player: String,
    pub seven_cards: PlayerStat,
    pub judgement: PlayerStat,
}

/// Complete output of one leaderboard computation
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LeaderboardSnapshot {
    pub seven_cards: GameLeaderboard,
    pub judgement: GameLeaderboard,
    pub total_tables: TableCounts,
    pub total_distinct_players: usize,
    pub diagnostics: Vec<TableDiagnostic>,
}

impl LeaderboardSnapshot {
    pub fn game(&self, game: GameKind) -> &GameLeaderboard {
        match game {
            GameKind::SevenCards => &self.seven_cards,
            GameKind::Judgement => &self.judgement,
        }
    }

    /// Sorted union of player names across both games
    pub fn players(&self) -> Vec<String> {
        self.seven_cards
            .player_stats
            .keys()
            .chain(self.judgement.player_stats.keys())
            .cloned()
            .collect::<BTreeSet<_>>()
            .into_iter()
            .collect()
    }

    pub fn combined_rows(&self) -> Vec<CombinedRow> {
        self.players()
            .into_iter()
            .map(|player| CombinedRow {
                seven_cards: self
                    .seven_cards
                    .stat(&player)
                    .cloned()
                    .unwrap_or_else(|| PlayerStat::new(player.clone())),
                judgement: self
                    .judgement
                    .stat(&player)
                    .cloned()
                    .unwrap_or_else(|| PlayerStat::new(player.clone())),
                player,
            })
            .collect()
    }
}
