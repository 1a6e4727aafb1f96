mod judgement;
mod seven_cards;

pub use judgement::JudgementConsistencyCalculator;
pub use seven_cards::SevenCardsConsistencyCalculator;
