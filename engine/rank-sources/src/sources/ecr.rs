use async_trait::async_trait;
use regex::Regex;
use serde::Deserialize;
use std::sync::{Arc, OnceLock};
use tracing::{debug, info, warn};

use super::RankProvider;
use crate::client::SourceClient;
use crate::config::SourcesConfig;
use crate::error::{SourceError, SourceResult};
use crate::normalize::normalize_name;
use crate::types::{RankSource, SourceRanks};

/// FantasyPros expert consensus rankings
///
/// The rankings page embeds its data as `var ecrData = {...};` in an inline
/// script. The object is pulled out and parsed as JSON.
pub struct EcrAdapter {
    client: SourceClient,
    config: Arc<SourcesConfig>,
}

/// Consensus dataset embedded in the rankings page
#[derive(Debug, Clone, Default, Deserialize)]
pub struct EcrDataset {
    #[serde(default)]
    pub players: Vec<EcrEntry>,
}

/// One ranked player in the consensus dataset
#[derive(Debug, Clone, Default, Deserialize)]
pub struct EcrEntry {
    #[serde(default)]
    pub player_name: Option<String>,

    #[serde(default)]
    pub rank_ecr: Option<serde_json::Value>,
}

impl EcrEntry {
    /// Declared consensus rank, if it is a whole number
    pub fn rank(&self) -> Option<u32> {
        let value = self.rank_ecr.as_ref()?;
        if let Some(rank) = value.as_u64() {
            return u32::try_from(rank).ok();
        }
        value.as_f64().filter(|rank| rank.fract() == 0.0 && *rank >= 0.0).map(|rank| rank as u32)
    }
}

impl EcrDataset {
    pub fn is_empty(&self) -> bool {
        self.players.is_empty()
    }

    /// Pull the embedded dataset out of a rankings page
    pub fn from_page(url: &str, html: &str) -> SourceResult<Self> {
        let captures = dataset_pattern()
            .captures(html)
            .ok_or_else(|| SourceError::MissingDataset { url: url.to_string() })?;
        let dataset = serde_json::from_str(&captures[1])?;
        Ok(dataset)
    }
}

fn dataset_pattern() -> &'static Regex {
    static DATASET: OnceLock<Regex> = OnceLock::new();
    DATASET.get_or_init(|| Regex::new(r"(?s)var ecrData = (\{.*?\});").expect("valid regex"))
}

impl EcrAdapter {
    pub fn new(client: SourceClient, config: Arc<SourcesConfig>) -> Self {
        Self { client, config }
    }

    /// FantasyPros position slug; `None` for positions it does not rank
    pub fn position_param(position: &str) -> Option<&'static str> {
        match position.to_uppercase().as_str() {
            "QB" => Some("qb"),
            "RB" => Some("rb"),
            "WR" => Some("wr"),
            "TE" => Some("te"),
            "K" => Some("k"),
            "DEF" => Some("dst"),
            _ => None,
        }
    }

    /// Consensus page URL; the consensus is season-to-date so the week is unused
    pub fn page_url(&self, position: &str, week: u32) -> Option<String> {
        Self::position_param(position)
            .map(|param| self.config.render_url(&self.config.ecr_url, param, week))
    }

    /// Fetch and parse the consensus dataset, empty on any failure
    pub async fn fetch(&self, position: &str, week: u32) -> EcrDataset {
        let Some(url) = self.page_url(position, week) else {
            debug!("ECR: no consensus rankings for position {}", position);
            return EcrDataset::default();
        };

        let parsed = match self.client.get_text(&url).await {
            Ok(html) => EcrDataset::from_page(&url, &html),
            Err(e) => Err(e),
        };

        parsed.unwrap_or_else(|e| {
            warn!("Treating source as empty: {}", e);
            EcrDataset::default()
        })
    }

    /// Rank each name from the first dataset entry whose name contains it
    pub fn extract_ranks<S: AsRef<str>>(dataset: &EcrDataset, names: &[S]) -> SourceRanks {
        let mut ranks = SourceRanks::unranked(RankSource::Ecr, names);
        if dataset.is_empty() {
            return ranks;
        }

        let keys: Vec<String> = dataset
            .players
            .iter()
            .map(|entry| normalize_name(entry.player_name.as_deref().unwrap_or_default()))
            .collect();

        for name in names {
            let name = name.as_ref();
            let target = normalize_name(name);

            let matched = dataset.players.iter().zip(&keys).find(|(_, key)| key.contains(&target));

            match matched.and_then(|(entry, _)| entry.rank()) {
                Some(rank) => ranks.set(name, rank),
                None => debug!("ECR: no consensus rank for {}", name),
            }
        }

        ranks
    }
}

#[async_trait]
impl RankProvider for EcrAdapter {
    fn source(&self) -> RankSource {
        RankSource::Ecr
    }

    async fn ranks(&self, position: &str, week: u32, names: &[String]) -> SourceRanks {
        let dataset = self.fetch(position, week).await;
        let ranks = Self::extract_ranks(&dataset, names);
        info!(
            "ECR: ranked {}/{} {} players ({} entries in dataset)",
            ranks.ranked_count(),
            names.len(),
            position,
            dataset.players.len()
        );
        ranks
    }
}
