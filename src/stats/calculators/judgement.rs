use crate::table::GameKind;

use super::super::{ConsistencyCalculator, PlayerStat};

/// Sum of positive table totals plus one point per total that is not a multiple of 10
pub struct JudgementConsistencyCalculator;

impl Default for JudgementConsistencyCalculator {
    fn default() -> Self {
        Self::new()
    }
}

impl JudgementConsistencyCalculator {
    pub fn new() -> Self {
        Self
    }
}

impl ConsistencyCalculator for JudgementConsistencyCalculator {
    fn calculate(&self, stat: &PlayerStat) -> i64 {
        stat.positive_total_sum.saturating_add(i64::from(stat.non_round_totals))
    }

    fn game(&self) -> GameKind {
        GameKind::Judgement
    }
}
