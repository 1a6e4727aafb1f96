use std::collections::{BTreeMap, BTreeSet, HashSet};
use std::sync::Arc;

use tracing::{debug, info, instrument, warn};

use crate::table::{checked_totals, GameKind, ScoreTable, TableRepository};

use super::{
    calculators::{JudgementConsistencyCalculator, SevenCardsConsistencyCalculator},
    collectors::{PlacementCollector, SpecialScoreCollector, TableTotalsCollector},
    CategoryLeader, ConsistencyCalculator, GameLeaderboard, LeaderCategory, LeaderboardSnapshot,
    PlayerStat, StatCollector, StatsError, TableCounts, TableDiagnostic,
};

/// Computes a leaderboard snapshot using the default collectors and formulas
pub fn compute_leaderboard(
    seven_cards: &[ScoreTable],
    judgement: &[ScoreTable],
) -> LeaderboardSnapshot {
    LeaderboardEngine::builder()
        .build()
        .compute(seven_cards, judgement)
}

enum TableCheck {
    Aggregate,
    SkipEmpty,
}

fn check_table(table: &ScoreTable, game: GameKind) -> Result<TableCheck, StatsError> {
    if table.game != game {
        return Err(StatsError::GameMismatch {
            table_id: table.id,
            expected: game,
            found: table.game,
        });
    }

    let players = table.players.len();
    if players == 0 {
        return Ok(TableCheck::SkipEmpty);
    }

    let malformed = |reason: String| StatsError::MalformedTable {
        table_id: table.id,
        reason,
    };

    if table.totals.len() != players {
        return Err(malformed(format!(
            "{} players but {} totals",
            players,
            table.totals.len()
        )));
    }

    if let Some((round, row)) = table
        .scores
        .iter()
        .enumerate()
        .find(|(_, row)| row.len() != players)
    {
        return Err(malformed(format!(
            "round {} has {} scores for {} players",
            round + 1,
            row.len(),
            players
        )));
    }

    if let Err(err) = checked_totals(players, &table.scores) {
        return Err(malformed(err.to_string()));
    }

    // Stats are keyed by name, so a repeated name would be counted twice
    let mut seen: HashSet<&str> = HashSet::with_capacity(players);
    for player in &table.players {
        if !seen.insert(player.as_str()) {
            return Err(malformed(format!("player {} appears more than once", player)));
        }
    }

    Ok(TableCheck::Aggregate)
}

/// Pure aggregation over already-fetched score tables.
///
/// Every call builds a fresh snapshot; inputs are never modified.
pub struct LeaderboardEngine {
    collectors: Vec<Arc<dyn StatCollector>>,
    calculators: Vec<Arc<dyn ConsistencyCalculator>>,
}

impl Default for LeaderboardEngine {
    fn default() -> Self {
        Self::builder().build()
    }
}

impl LeaderboardEngine {
    pub fn builder() -> LeaderboardEngineBuilder {
        LeaderboardEngineBuilder::new()
    }

    #[instrument(skip_all, fields(seven_cards = seven_cards.len(), judgement = judgement.len()))]
    pub fn compute(
        &self,
        seven_cards: &[ScoreTable],
        judgement: &[ScoreTable],
    ) -> LeaderboardSnapshot {
        let mut diagnostics = Vec::new();

        let seven_cards_board = self.aggregate(GameKind::SevenCards, seven_cards, &mut diagnostics);
        let judgement_board = self.aggregate(GameKind::Judgement, judgement, &mut diagnostics);

        let total_distinct_players = seven_cards_board
            .player_stats
            .keys()
            .chain(judgement_board.player_stats.keys())
            .collect::<BTreeSet<_>>()
            .len();

        debug!(
            total_distinct_players,
            skipped = diagnostics.len(),
            "Leaderboard computed"
        );

        LeaderboardSnapshot {
            seven_cards: seven_cards_board,
            judgement: judgement_board,
            total_tables: TableCounts {
                seven_cards: seven_cards.len(),
                judgement: judgement.len(),
            },
            total_distinct_players,
            diagnostics,
        }
    }

    fn aggregate(
        &self,
        game: GameKind,
        tables: &[ScoreTable],
        diagnostics: &mut Vec<TableDiagnostic>,
    ) -> GameLeaderboard {
        let collectors: Vec<&Arc<dyn StatCollector>> = self
            .collectors
            .iter()
            .filter(|c| c.applies_to(game))
            .collect();

        let mut player_stats: BTreeMap<String, PlayerStat> = BTreeMap::new();
        let mut tables_aggregated = 0;

        for table in tables {
            match check_table(table, game) {
                Ok(TableCheck::Aggregate) => {}
                Ok(TableCheck::SkipEmpty) => {
                    debug!(table_id = %table.id, %game, "Skipping table without players");
                    continue;
                }
                Err(err) => {
                    warn!(table_id = %table.id, %game, error = %err, "Skipping table");
                    if let Some(kind) = err.diagnostic_kind() {
                        diagnostics.push(TableDiagnostic::new(table, game, kind, &err));
                    }
                    continue;
                }
            }

            for player in &table.players {
                player_stats
                    .entry(player.clone())
                    .or_insert_with(|| PlayerStat::new(player.clone()))
                    .tables_played += 1;
            }

            for collector in &collectors {
                for data in collector.collect(table) {
                    if let Some(stat) = player_stats.get_mut(data.player()) {
                        stat.record(&data);
                    }
                }
            }

            tables_aggregated += 1;
        }

        let consistency: BTreeMap<String, i64> = match self.calculator_for(game) {
            Some(calculator) => player_stats
                .iter()
                .map(|(name, stat)| (name.clone(), calculator.calculate(stat)))
                .collect(),
            None => BTreeMap::new(),
        };

        let most_consistent: BTreeSet<String> = consistency
            .values()
            .max()
            .map(|best| {
                consistency
                    .iter()
                    .filter(|(_, score)| *score == best)
                    .map(|(name, _)| name.clone())
                    .collect()
            })
            .unwrap_or_default();

        let leaders = category_leaders(game, &player_stats);

        GameLeaderboard {
            game,
            tables_aggregated,
            player_stats,
            consistency,
            most_consistent,
            leaders,
        }
    }

    fn calculator_for(&self, game: GameKind) -> Option<&Arc<dyn ConsistencyCalculator>> {
        self.calculators.iter().find(|c| c.game() == game)
    }
}

/// Players sharing the top count in each category shown for `game`
fn category_leaders(game: GameKind, stats: &BTreeMap<String, PlayerStat>) -> Vec<CategoryLeader> {
    LeaderCategory::for_game(game)
        .iter()
        .filter_map(|&category| {
            let count = stats.values().map(|s| category.count(s)).max()?;
            let players = stats
                .values()
                .filter(|s| category.count(s) == count)
                .map(|s| s.name.clone())
                .collect();
            Some(CategoryLeader {
                category,
                players,
                count,
            })
        })
        .collect()
}

pub struct LeaderboardEngineBuilder {
    collectors: Vec<Arc<dyn StatCollector>>,
    calculators: Vec<Arc<dyn ConsistencyCalculator>>,
}

impl LeaderboardEngineBuilder {
    fn new() -> Self {
        Self {
            collectors: vec![
                Arc::new(PlacementCollector::new()),
                Arc::new(SpecialScoreCollector::new()),
                Arc::new(TableTotalsCollector::new()),
            ],
            calculators: vec![
                Arc::new(SevenCardsConsistencyCalculator::new()),
                Arc::new(JudgementConsistencyCalculator::new()),
            ],
        }
    }

    pub fn with_collector(mut self, collector: Arc<dyn StatCollector>) -> Self {
        self.collectors.push(collector);
        self
    }

    /// Replaces the consistency formula for the calculator's game
    pub fn with_calculator(mut self, calculator: Arc<dyn ConsistencyCalculator>) -> Self {
        self.calculators.retain(|c| c.game() != calculator.game());
        self.calculators.push(calculator);
        self
    }

    pub fn build(self) -> LeaderboardEngine {
        LeaderboardEngine {
            collectors: self.collectors,
            calculators: self.calculators,
        }
    }
}

/// Fetches both games from the store and runs the engine over them
pub struct LeaderboardService {
    repository: Arc<dyn TableRepository>,
    engine: Arc<LeaderboardEngine>,
}

impl LeaderboardService {
    pub fn new(repository: Arc<dyn TableRepository>, engine: Arc<LeaderboardEngine>) -> Self {
        Self { repository, engine }
    }

    #[instrument(skip(self))]
    pub async fn snapshot(&self) -> Result<LeaderboardSnapshot, StatsError> {
        let (seven_cards, judgement) = tokio::join!(
            self.repository.fetch_tables(GameKind::SevenCards),
            self.repository.fetch_tables(GameKind::Judgement),
        );
        let seven_cards = seven_cards?;
        let judgement = judgement?;

        let snapshot = self.engine.compute(&seven_cards, &judgement);
        info!(
            seven_cards_tables = snapshot.total_tables.seven_cards,
            judgement_tables = snapshot.total_tables.judgement,
            players = snapshot.total_distinct_players,
            skipped = snapshot.diagnostics.len(),
            "Leaderboard snapshot ready"
        );

        Ok(snapshot)
    }
}
