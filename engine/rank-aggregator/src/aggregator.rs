use anyhow::{Context, Result};
use async_trait::async_trait;
use chrono::Local;
use futures::future::join_all;
use rank_sources::{RankProvider, SourceRanks};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use std::time::Instant;
use tracing::{debug, info};

use crate::grouping::group_by_position;
use crate::player::{Player, RosterEntry};
use crate::report::{rank_players, MergedRanking, RankingReport};
use crate::week::SeasonCalendar;

/// Where the roster comes from
///
/// Entries are returned in roster order; that order decides ties.
#[async_trait]
pub trait RosterSource: Send + Sync {
    async fn load_roster(&self) -> Result<Vec<RosterEntry>>;
}

/// Fixed roster held in memory
#[derive(Debug, Clone, Default)]
pub struct InMemoryRoster {
    entries: Vec<RosterEntry>,
}

impl InMemoryRoster {
    pub fn new(entries: Vec<RosterEntry>) -> Self {
        Self { entries }
    }
}

#[async_trait]
impl RosterSource for InMemoryRoster {
    async fn load_roster(&self) -> Result<Vec<RosterEntry>> {
        Ok(self.entries.clone())
    }
}

/// Aggregation settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct AggregatorConfig {
    /// Query the sources of a position concurrently
    pub concurrent_sources: bool,

    /// Rank the positions concurrently
    pub concurrent_positions: bool,
}

impl Default for AggregatorConfig {
    fn default() -> Self {
        Self { concurrent_sources: true, concurrent_positions: true }
    }
}

/// Merges every source's ranks into one ranking per position
pub struct RankingAggregator {
    providers: Vec<Arc<dyn RankProvider>>,
    roster: Arc<dyn RosterSource>,
    calendar: SeasonCalendar,
    config: AggregatorConfig,
}

impl RankingAggregator {
    pub fn new(
        providers: Vec<Arc<dyn RankProvider>>,
        roster: Arc<dyn RosterSource>,
        calendar: SeasonCalendar,
        config: AggregatorConfig,
    ) -> Self {
        Self { providers, roster, calendar, config }
    }

    pub fn calendar(&self) -> &SeasonCalendar {
        &self.calendar
    }

    /// Rankings for a week of the current roster.
    ///
    /// A missing or out-of-range week falls back to the week in progress.
    /// Only a roster load failure is an error; unreachable sources just
    /// leave players unranked.
    pub async fn compute_rankings(&self, week: Option<u32>) -> Result<RankingReport> {
        let week = self.calendar.resolve_week(week, Local::now().date_naive());
        let roster = self.roster.load_roster().await.context("Failed to load roster")?;
        Ok(self.aggregate(week, &roster).await)
    }

    /// Rank a roster snapshot for a week
    pub async fn aggregate(&self, week: u32, roster: &[RosterEntry]) -> RankingReport {
        let started = Instant::now();
        info!("Ranking {} roster players for week {}", roster.len(), week);

        let groups = group_by_position(roster.iter().map(Player::from));

        let report: RankingReport = if self.config.concurrent_positions {
            let ranked = join_all(
                groups.into_iter().map(|(position, players)| self.rank_group(position, players, week)),
            )
            .await;
            ranked.into_iter().collect()
        } else {
            let mut ranked = Vec::new();
            for (position, players) in groups {
                ranked.push(self.rank_group(position, players, week).await);
            }
            ranked.into_iter().collect()
        };

        info!(
            "Ranked {} players across {} positions in {:?}",
            report.item_count(),
            report.len(),
            started.elapsed()
        );
        report
    }

    async fn rank_group(
        &self,
        position: String,
        players: Vec<Player>,
        week: u32,
    ) -> (String, Vec<MergedRanking>) {
        let ranked = self.rank_position(&position, players, week).await;
        (position, ranked)
    }

    /// Query every source for one position and merge the results
    pub async fn rank_position(
        &self,
        position: &str,
        mut players: Vec<Player>,
        week: u32,
    ) -> Vec<MergedRanking> {
        if players.is_empty() {
            debug!("No roster players at {}, skipping sources", position);
            return Vec::new();
        }

        let names: Vec<String> = players.iter().map(|p| p.name.clone()).collect();
        let results = self.collect_ranks(position, week, &names).await;

        for player in &mut players {
            for ranks in &results {
                player.apply(ranks);
            }
        }

        rank_players(players)
    }

    /// Ranks from every provider; waits for all of them before returning
    async fn collect_ranks(&self, position: &str, week: u32, names: &[String]) -> Vec<SourceRanks> {
        if self.config.concurrent_sources {
            join_all(self.providers.iter().map(|provider| provider.ranks(position, week, names)))
                .await
        } else {
            let mut results = Vec::with_capacity(self.providers.len());
            for provider in &self.providers {
                results.push(provider.ranks(position, week, names).await);
            }
            results
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rank_sources::RankSource;
    use std::collections::HashMap;

    /// Provider answering from a fixed table
    struct TableProvider {
        source: RankSource,
        table: HashMap<String, u32>,
    }

    impl TableProvider {
        fn new(source: RankSource, table: &[(&str, u32)]) -> Arc<dyn RankProvider> {
            let table = table.iter().map(|(name, rank)| (name.to_string(), *rank)).collect();
            Arc::new(Self { source, table })
        }
    }

    #[async_trait]
    impl RankProvider for TableProvider {
        fn source(&self) -> RankSource {
            self.source
        }

        async fn ranks(&self, _position: &str, _week: u32, names: &[String]) -> SourceRanks {
            let mut ranks = SourceRanks::unranked(self.source, names);
            for name in names {
                if let Some(rank) = self.table.get(name) {
                    ranks.set(name, *rank);
                }
            }
            ranks
        }
    }

    fn aggregator(providers: Vec<Arc<dyn RankProvider>>, config: AggregatorConfig) -> RankingAggregator {
        RankingAggregator::new(
            providers,
            Arc::new(InMemoryRoster::default()),
            SeasonCalendar::default(),
            config,
        )
    }

    #[tokio::test]
    async fn test_merges_sources_per_player() {
        let agg = aggregator(
            vec![
                TableProvider::new(RankSource::Nfl, &[("Chris Olave", 5), ("Terry McLaurin", 2)]),
                TableProvider::new(RankSource::Roto, &[("Terry McLaurin", 4)]),
                TableProvider::new(RankSource::Ecr, &[("Chris Olave", 7)]),
            ],
            AggregatorConfig::default(),
        );

        let roster = vec![RosterEntry::new("Chris Olave", "WR"), RosterEntry::new("Terry McLaurin", "WR")];
        let report = agg.aggregate(3, &roster).await;
        let wr = report.get("WR").unwrap();

        assert_eq!(wr[0].name, "Terry McLaurin");
        assert_eq!(wr[0].average_rank, Some(3.0));
        assert_eq!(wr[0].ecr_rank, None);
        assert_eq!(wr[1].name, "Chris Olave");
        assert_eq!(wr[1].average_rank, Some(6.0));
        assert_eq!(wr[1].roto_rank, None);
    }

    #[tokio::test]
    async fn test_sequential_matches_concurrent() {
        let providers = || {
            vec![
                TableProvider::new(RankSource::Nfl, &[("A", 3), ("B", 1)]),
                TableProvider::new(RankSource::Roto, &[("A", 2), ("C", 9)]),
                TableProvider::new(RankSource::Ecr, &[("B", 4)]),
            ]
        };
        let roster = vec![
            RosterEntry::new("A", "QB"),
            RosterEntry::new("B", "QB"),
            RosterEntry::new("C", "TE"),
            RosterEntry::new("D", "LB"),
        ];

        let concurrent = aggregator(providers(), AggregatorConfig::default()).aggregate(1, &roster).await;
        let sequential = aggregator(
            providers(),
            AggregatorConfig { concurrent_sources: false, concurrent_positions: false },
        )
        .aggregate(1, &roster)
        .await;

        assert_eq!(concurrent, sequential);
    }

    #[tokio::test]
    async fn test_report_positions_in_canonical_order() {
        let agg = aggregator(Vec::new(), AggregatorConfig::default());
        let roster = vec![RosterEntry::new("X", "FLEX"), RosterEntry::new("Y", "K")];
        let report = agg.aggregate(1, &roster).await;

        let positions: Vec<&str> = report.positions().collect();
        assert_eq!(positions, vec!["QB", "WR", "RB", "TE", "K", "DEF", "FLEX"]);
        assert!(report.get("QB").unwrap().is_empty());
        assert_eq!(report.get("K").unwrap()[0].average_rank, None);
    }
}
