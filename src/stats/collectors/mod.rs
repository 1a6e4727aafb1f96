mod placement;
mod special_scores;
mod table_totals;

pub use placement::PlacementCollector;
pub use special_scores::SpecialScoreCollector;
pub use table_totals::TableTotalsCollector;
