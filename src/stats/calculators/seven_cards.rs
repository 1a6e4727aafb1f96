use crate::table::GameKind;

use super::super::{ConsistencyCalculator, PlayerStat};

const ZERO_WEIGHT: i64 = 4;
const MAX_SCORE_WEIGHT: i64 = 2;

/// Rewards rounds that ended on exactly 0 or on 65/130
pub struct SevenCardsConsistencyCalculator;

impl Default for SevenCardsConsistencyCalculator {
    fn default() -> Self {
        Self::new()
    }
}

impl SevenCardsConsistencyCalculator {
    pub fn new() -> Self {
        Self
    }
}

impl ConsistencyCalculator for SevenCardsConsistencyCalculator {
    fn calculate(&self, stat: &PlayerStat) -> i64 {
        i64::from(stat.zeros) * ZERO_WEIGHT + i64::from(stat.max_score_65_or_130) * MAX_SCORE_WEIGHT
    }

    fn game(&self) -> GameKind {
        GameKind::SevenCards
    }
}
