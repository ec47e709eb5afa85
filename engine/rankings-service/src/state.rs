//! Shared state handed to every request handler

use anyhow::{Context, Result};
use rank_aggregator::RankingAggregator;
use rank_sources::{default_providers, SourceClient};
use roster_store::JsonRosterStore;
use std::sync::Arc;
use tracing::info;

use crate::config::ServiceConfig;

#[derive(Clone)]
pub struct AppState {
    aggregator: Arc<RankingAggregator>,
    roster: Arc<JsonRosterStore>,
    expose_errors: bool,
}

impl AppState {
    /// Open the roster and wire the three ranking sources into an aggregator
    pub async fn new(config: &ServiceConfig) -> Result<Self> {
        let sources = Arc::new(config.sources());
        let client = SourceClient::new(&sources).context("Failed to build HTTP client")?;
        let providers = default_providers(client, sources);

        let roster = Arc::new(
            JsonRosterStore::open(&config.roster.path)
                .await
                .with_context(|| format!("Failed to open roster file: {:?}", config.roster.path))?,
        );
        info!("Roster loaded from {:?}", roster.path());

        let aggregator = RankingAggregator::new(
            providers,
            roster.clone(),
            config.calendar(),
            config.aggregator.clone(),
        );

        Ok(Self::from_parts(Arc::new(aggregator), roster, config.service.development_mode))
    }

    pub fn from_parts(
        aggregator: Arc<RankingAggregator>,
        roster: Arc<JsonRosterStore>,
        expose_errors: bool,
    ) -> Self {
        Self { aggregator, roster, expose_errors }
    }

    pub fn aggregator(&self) -> &RankingAggregator {
        &self.aggregator
    }

    pub fn roster(&self) -> &JsonRosterStore {
        &self.roster
    }

    /// Whether error responses carry internal detail (development mode)
    pub fn expose_errors(&self) -> bool {
        self.expose_errors
    }
}
