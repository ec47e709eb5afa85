//! Rank Aggregator - merged weekly rankings per position
//!
//! Loads the roster, groups it by position, asks every ranking source for
//! the players of each position and merges the answers into one record per
//! player with an averaged rank. Positions are reported in canonical order
//! and players are sorted best-first, unranked players last.

pub mod aggregator;
pub mod grouping;
pub mod player;
pub mod report;
pub mod week;

pub use aggregator::{AggregatorConfig, InMemoryRoster, RankingAggregator, RosterSource};
pub use grouping::{group_by_position, PositionGroups, POSITION_ORDER};
pub use player::{Player, RosterEntry};
pub use report::{MergedRanking, RankingReport, UNRANKED_SORT_KEY};
pub use week::{parse_week_param, SeasonCalendar, MAX_WEEK};
