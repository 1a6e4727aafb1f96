use crate::table::{RankOrder, ScoreTable};

use super::super::{CollectedData, CollectedDataBatch, Placement, StatCollector};

/// Credits first, second and last place from a table's totals.
///
/// Seven Cards ranks the lowest total first, Judgement the highest. The sort is
/// stable, so equal totals keep the table's player order.
pub struct PlacementCollector;

impl Default for PlacementCollector {
    fn default() -> Self {
        Self::new()
    }
}

impl PlacementCollector {
    pub fn new() -> Self {
        Self
    }
}

impl StatCollector for PlacementCollector {
    fn collect(&self, table: &ScoreTable) -> CollectedDataBatch {
        let mut standings: Vec<(&str, i64)> = table
            .players
            .iter()
            .map(String::as_str)
            .zip(table.totals.iter().copied())
            .collect();

        match table.game.rank_order() {
            RankOrder::LowestWins => standings.sort_by(|a, b| a.1.cmp(&b.1)),
            RankOrder::HighestWins => standings.sort_by(|a, b| b.1.cmp(&a.1)),
        }

        let placed = |index: usize, placement: Placement| CollectedData::Placement {
            player: standings[index].0.to_string(),
            placement,
        };

        let mut data = Vec::with_capacity(3);
        if standings.is_empty() {
            return data;
        }

        data.push(placed(0, Placement::First));
        if standings.len() >= 2 {
            data.push(placed(1, Placement::Second));
            data.push(placed(standings.len() - 1, Placement::Last));
        }
        data
    }
}
