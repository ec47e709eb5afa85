use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;

/// The external ranking sources, in the order their ranks are reported
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RankSource {
    /// NFL.com weekly fantasy rankings
    Nfl,
    /// RotoPat weekly rankings articles on NBC Sports
    Roto,
    /// FantasyPros expert consensus rankings
    Ecr,
}

impl RankSource {
    /// All sources, in report order
    pub const ALL: [RankSource; 3] = [RankSource::Nfl, RankSource::Roto, RankSource::Ecr];

    /// Short identifier used in logs and config keys
    pub fn as_str(&self) -> &'static str {
        match self {
            RankSource::Nfl => "nfl",
            RankSource::Roto => "roto",
            RankSource::Ecr => "ecr",
        }
    }
}

impl fmt::Display for RankSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Ranks reported by one source for a set of requested names
///
/// Every requested name has an entry; `None` means the source had no usable
/// rank for that player.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceRanks {
    source: RankSource,
    ranks: HashMap<String, Option<u32>>,
}

impl SourceRanks {
    /// Every name starts out unranked
    pub fn unranked<S: AsRef<str>>(source: RankSource, names: &[S]) -> Self {
        let ranks = names.iter().map(|name| (name.as_ref().to_string(), None)).collect();
        Self { source, ranks }
    }

    /// Record a rank for a requested name
    pub fn set(&mut self, name: &str, rank: u32) {
        self.ranks.insert(name.to_string(), Some(rank));
    }

    /// Rank for a name; unranked and unknown names both give `None`
    pub fn get(&self, name: &str) -> Option<u32> {
        self.ranks.get(name).copied().flatten()
    }

    /// Whether the name was part of the request
    pub fn contains(&self, name: &str) -> bool {
        self.ranks.contains_key(name)
    }

    pub fn source(&self) -> RankSource {
        self.source
    }

    pub fn len(&self) -> usize {
        self.ranks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ranks.is_empty()
    }

    /// Number of names that received a rank
    pub fn ranked_count(&self) -> usize {
        self.ranks.values().filter(|rank| rank.is_some()).count()
    }
}
