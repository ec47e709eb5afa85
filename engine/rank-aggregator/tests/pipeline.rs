//! End-to-end aggregation tests with in-process providers

use anyhow::anyhow;
use async_trait::async_trait;
use rank_aggregator::{
    AggregatorConfig, InMemoryRoster, RankingAggregator, RosterEntry, RosterSource, SeasonCalendar,
};
use rank_sources::{RankProvider, RankSource, SourceRanks};
use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::{Duration, Instant};

/// Provider with a fixed table, an optional delay and a call log
struct ScriptedProvider {
    source: RankSource,
    table: HashMap<String, u32>,
    delay: Duration,
    calls: Mutex<Vec<(String, u32)>>,
}

impl ScriptedProvider {
    fn new(source: RankSource, table: &[(&str, u32)]) -> Self {
        Self {
            source,
            table: table.iter().map(|(name, rank)| (name.to_string(), *rank)).collect(),
            delay: Duration::ZERO,
            calls: Mutex::new(Vec::new()),
        }
    }

    fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = delay;
        self
    }

    fn calls(&self) -> Vec<(String, u32)> {
        self.calls.lock().unwrap().clone()
    }
}

#[async_trait]
impl RankProvider for ScriptedProvider {
    fn source(&self) -> RankSource {
        self.source
    }

    async fn ranks(&self, position: &str, week: u32, names: &[String]) -> SourceRanks {
        self.calls.lock().unwrap().push((position.to_string(), week));
        if !self.delay.is_zero() {
            tokio::time::sleep(self.delay).await;
        }
        let mut ranks = SourceRanks::unranked(self.source, names);
        for name in names {
            if let Some(rank) = self.table.get(name) {
                ranks.set(name, *rank);
            }
        }
        ranks
    }
}

struct BrokenRoster;

#[async_trait]
impl RosterSource for BrokenRoster {
    async fn load_roster(&self) -> anyhow::Result<Vec<RosterEntry>> {
        Err(anyhow!("roster file is corrupt"))
    }
}

/// Counts how often the roster is read
struct CountingRoster {
    inner: InMemoryRoster,
    loads: AtomicUsize,
}

#[async_trait]
impl RosterSource for CountingRoster {
    async fn load_roster(&self) -> anyhow::Result<Vec<RosterEntry>> {
        self.loads.fetch_add(1, Ordering::SeqCst);
        self.inner.load_roster().await
    }
}

fn build(
    providers: Vec<Arc<dyn RankProvider>>,
    roster: Arc<dyn RosterSource>,
) -> RankingAggregator {
    RankingAggregator::new(providers, roster, SeasonCalendar::default(), AggregatorConfig::default())
}

#[tokio::test]
async fn test_all_sources_unranked_gives_nulls() {
    let providers: Vec<Arc<dyn RankProvider>> = RankSource::ALL
        .iter()
        .map(|source| Arc::new(ScriptedProvider::new(*source, &[])) as Arc<dyn RankProvider>)
        .collect();
    let roster = Arc::new(InMemoryRoster::new(vec![RosterEntry::new("Test Player A", "QB")]));

    let report = build(providers, roster).compute_rankings(Some(1)).await.unwrap();
    let json = serde_json::to_value(&report).unwrap();

    assert_eq!(
        json["QB"],
        serde_json::json!([{
            "name": "Test Player A",
            "nfl_rank": null,
            "rotopat_rank": null,
            "fantasypros_rank": null,
            "average_rank": null
        }])
    );
    assert_eq!(json["WR"], serde_json::json!([]));
}

#[tokio::test]
async fn test_two_of_three_sources_average() {
    let providers: Vec<Arc<dyn RankProvider>> = vec![
        Arc::new(ScriptedProvider::new(RankSource::Nfl, &[("Test Player B", 2)])),
        Arc::new(ScriptedProvider::new(RankSource::Roto, &[("Test Player B", 4)])),
        Arc::new(ScriptedProvider::new(RankSource::Ecr, &[])),
    ];
    let roster = Arc::new(InMemoryRoster::new(vec![RosterEntry::new("Test Player B", "RB")]));

    let report = build(providers, roster).compute_rankings(Some(2)).await.unwrap();
    let rb = report.get("RB").unwrap();

    assert_eq!(rb.len(), 1);
    assert_eq!(rb[0].nfl_rank, Some(2));
    assert_eq!(rb[0].roto_rank, Some(4));
    assert_eq!(rb[0].ecr_rank, None);
    assert_eq!(rb[0].average_rank, Some(3.0));
}

#[tokio::test]
async fn test_requested_week_and_position_reach_sources() {
    let nfl = Arc::new(ScriptedProvider::new(RankSource::Nfl, &[]));
    let roster = Arc::new(InMemoryRoster::new(vec![
        RosterEntry::new("Trey McBride", "TE"),
        RosterEntry::new("Brandon Aubrey", "K"),
    ]));

    let aggregator = build(vec![nfl.clone() as Arc<dyn RankProvider>], roster);
    aggregator.compute_rankings(Some(9)).await.unwrap();

    let mut calls = nfl.calls();
    calls.sort();
    // Empty positions never hit the sources
    assert_eq!(calls, vec![("K".to_string(), 9), ("TE".to_string(), 9)]);
}

#[tokio::test]
async fn test_invalid_week_falls_back_to_current() {
    let nfl = Arc::new(ScriptedProvider::new(RankSource::Nfl, &[]));
    let roster = Arc::new(InMemoryRoster::new(vec![RosterEntry::new("Patrick Mahomes", "QB")]));

    let aggregator = build(vec![nfl.clone() as Arc<dyn RankProvider>], roster);
    let expected = aggregator.calendar().current_week();
    aggregator.compute_rankings(Some(40)).await.unwrap();

    assert_eq!(nfl.calls(), vec![("QB".to_string(), expected)]);
}

#[tokio::test]
async fn test_slow_source_does_not_serialize_others() {
    let delay = Duration::from_millis(300);
    let providers: Vec<Arc<dyn RankProvider>> = vec![
        Arc::new(ScriptedProvider::new(RankSource::Nfl, &[("A", 1)]).with_delay(delay)),
        Arc::new(ScriptedProvider::new(RankSource::Roto, &[("A", 3)]).with_delay(delay)),
        Arc::new(ScriptedProvider::new(RankSource::Ecr, &[("B", 2)]).with_delay(delay)),
    ];
    let roster = Arc::new(InMemoryRoster::new(vec![
        RosterEntry::new("A", "QB"),
        RosterEntry::new("B", "WR"),
    ]));

    let started = Instant::now();
    let report = build(providers, roster).compute_rankings(Some(1)).await.unwrap();
    let elapsed = started.elapsed();

    // Six delayed calls would take 1.8s back to back
    assert!(elapsed < Duration::from_millis(1200), "took {:?}", elapsed);
    assert_eq!(report.get("QB").unwrap()[0].average_rank, Some(2.0));
    assert_eq!(report.get("WR").unwrap()[0].average_rank, Some(2.0));
}

#[tokio::test]
async fn test_roster_failure_is_an_error() {
    let aggregator = build(Vec::new(), Arc::new(BrokenRoster));
    let err = aggregator.compute_rankings(None).await.unwrap_err();
    assert!(format!("{:#}", err).contains("roster file is corrupt"));
}

#[tokio::test]
async fn test_roster_read_once_per_request() {
    let roster = Arc::new(CountingRoster {
        inner: InMemoryRoster::new(vec![RosterEntry::new("Tony Pollard", "RB")]),
        loads: AtomicUsize::new(0),
    });
    let aggregator = build(Vec::new(), roster.clone());

    aggregator.compute_rankings(None).await.unwrap();
    aggregator.compute_rankings(Some(3)).await.unwrap();

    assert_eq!(roster.loads.load(Ordering::SeqCst), 2);
}

#[tokio::test]
async fn test_full_roster_sorted_with_unranked_last() {
    let providers: Vec<Arc<dyn RankProvider>> = vec![
        Arc::new(ScriptedProvider::new(
            RankSource::Nfl,
            &[("Terry McLaurin", 20), ("Chris Olave", 10)],
        )),
        Arc::new(ScriptedProvider::new(RankSource::Roto, &[("Chris Olave", 14)])),
        Arc::new(ScriptedProvider::new(RankSource::Ecr, &[("Terry McLaurin", 21)])),
    ];
    let roster = Arc::new(InMemoryRoster::new(vec![
        RosterEntry::new("Brian Thomas Jr.", "WR"),
        RosterEntry::new("Terry McLaurin", "WR"),
        RosterEntry::new("Wan'Dale Robinson", "WR"),
        RosterEntry::new("Chris Olave", "WR"),
    ]));

    let report = build(providers, roster).compute_rankings(Some(4)).await.unwrap();
    let names: Vec<&str> = report.get("WR").unwrap().iter().map(|r| r.name.as_str()).collect();

    assert_eq!(names, vec!["Chris Olave", "Terry McLaurin", "Brian Thomas Jr.", "Wan'Dale Robinson"]);
    assert_eq!(report.get("WR").unwrap()[1].average_rank, Some(20.5));
}
