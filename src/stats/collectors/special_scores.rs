use crate::table::{GameKind, ScoreTable};

use super::super::{CollectedData, CollectedDataBatch, SpecialScore, StatCollector};

/// Round scores that earn a mention on the Seven Cards leaderboard
const MAX_SCORES: [i64; 2] = [65, 130];

pub struct SpecialScoreCollector;

impl Default for SpecialScoreCollector {
    fn default() -> Self {
        Self::new()
    }
}

impl SpecialScoreCollector {
    pub fn new() -> Self {
        Self
    }
}

impl StatCollector for SpecialScoreCollector {
    fn collect(&self, table: &ScoreTable) -> CollectedDataBatch {
        let mut data = Vec::new();

        for row in &table.scores {
            for (player, cell) in table.players.iter().zip(row) {
                let kind = match cell.value() {
                    Some(0) => SpecialScore::Zero,
                    Some(v) if MAX_SCORES.contains(&v) => SpecialScore::MaxScore,
                    _ => continue,
                };
                data.push(CollectedData::SpecialScore {
                    player: player.clone(),
                    kind,
                });
            }
        }

        data
    }

    fn applies_to(&self, game: GameKind) -> bool {
        game == GameKind::SevenCards
    }
}
