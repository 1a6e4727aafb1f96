use crate::table::ScoreTable;

use super::super::{CollectedData, CollectedDataBatch, StatCollector};

pub struct TableTotalsCollector;

impl Default for TableTotalsCollector {
    fn default() -> Self {
        Self::new()
    }
}

impl TableTotalsCollector {
    pub fn new() -> Self {
        Self
    }
}

impl StatCollector for TableTotalsCollector {
    fn collect(&self, table: &ScoreTable) -> CollectedDataBatch {
        table
            .players
            .iter()
            .zip(&table.totals)
            .map(|(player, total)| CollectedData::TableTotal {
                player: player.clone(),
                total: *total,
            })
            .collect()
    }
}
