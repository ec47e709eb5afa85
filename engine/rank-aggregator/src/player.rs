use rank_sources::{RankSource, SourceRanks};
use serde::{Deserialize, Serialize};

/// A roster record as stored by the roster backend
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RosterEntry {
    /// Display name (e.g., "Deebo Samuel Sr.")
    pub name: String,
    /// Position label (QB, WR, RB, TE, K, DEF, or anything else)
    pub position: String,
}

impl RosterEntry {
    pub fn new(name: impl Into<String>, position: impl Into<String>) -> Self {
        Self { name: name.into(), position: position.into() }
    }
}

/// A roster player being ranked for one request
///
/// Built fresh from the roster snapshot; the ranks are filled in once per
/// aggregation pass and never persisted.
#[derive(Debug, Clone, PartialEq)]
pub struct Player {
    pub name: String,
    pub position: String,
    pub nfl_rank: Option<u32>,
    pub roto_rank: Option<u32>,
    pub ecr_rank: Option<u32>,
}

impl Player {
    pub fn new(name: impl Into<String>, position: impl Into<String>) -> Self {
        Self { name: name.into(), position: position.into(), nfl_rank: None, roto_rank: None, ecr_rank: None }
    }

    /// Set the rank reported by one source
    pub fn set_rank(&mut self, source: RankSource, rank: Option<u32>) {
        match source {
            RankSource::Nfl => self.nfl_rank = rank,
            RankSource::Roto => self.roto_rank = rank,
            RankSource::Ecr => self.ecr_rank = rank,
        }
    }

    /// Copy this player's rank out of a source's results
    pub fn apply(&mut self, ranks: &SourceRanks) {
        self.set_rank(ranks.source(), ranks.get(&self.name));
    }

    /// Ranks from every source, in report order
    pub fn ranks(&self) -> [Option<u32>; 3] {
        [self.nfl_rank, self.roto_rank, self.ecr_rank]
    }

    /// Mean of the ranks that are present; `None` when no source ranked the player
    pub fn average_rank(&self) -> Option<f64> {
        let present: Vec<u32> = self.ranks().into_iter().flatten().collect();
        if present.is_empty() {
            return None;
        }
        let total: u64 = present.iter().map(|&rank| u64::from(rank)).sum();
        Some(total as f64 / present.len() as f64)
    }
}

impl From<RosterEntry> for Player {
    fn from(entry: RosterEntry) -> Self {
        Player::new(entry.name, entry.position)
    }
}

impl From<&RosterEntry> for Player {
    fn from(entry: &RosterEntry) -> Self {
        Player::new(entry.name.clone(), entry.position.clone())
    }
}
