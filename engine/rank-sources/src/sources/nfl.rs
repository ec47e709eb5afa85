use async_trait::async_trait;
use scraper::{ElementRef, Html};
use std::sync::Arc;
use tracing::{debug, info};

use super::{first_number_in_cells, is_row, HtmlPage, RankProvider};
use crate::client::SourceClient;
use crate::config::SourcesConfig;
use crate::types::{RankSource, SourceRanks};

/// NFL.com weekly fantasy rankings
///
/// The rankings table keeps display names intact, so names are matched
/// with a plain case-insensitive substring search against the page text.
pub struct NflAdapter {
    client: SourceClient,
    config: Arc<SourcesConfig>,
}

impl NflAdapter {
    pub fn new(client: SourceClient, config: Arc<SourcesConfig>) -> Self {
        Self { client, config }
    }

    /// Rankings page for a position and week; positions are passed through as-is
    pub fn page_url(&self, position: &str, week: u32) -> String {
        self.config.render_url(&self.config.nfl_url, position, week)
    }

    /// Fetch the rankings page, empty on any failure
    pub async fn fetch(&self, position: &str, week: u32) -> HtmlPage {
        let url = self.page_url(position, week);
        HtmlPage::new(self.client.get_text_or_empty(&url).await)
    }

    /// Rank each name from the first text node containing it.
    ///
    /// The rank is the first number in the cells of that node's table row.
    /// A node outside a table, or a row without numbers, leaves the player
    /// unranked; later matches are not consulted.
    pub fn extract_ranks<S: AsRef<str>>(page: &HtmlPage, names: &[S]) -> SourceRanks {
        let mut ranks = SourceRanks::unranked(RankSource::Nfl, names);
        if page.is_empty() {
            return ranks;
        }

        let document = Html::parse_document(page.as_str());
        for name in names {
            let name = name.as_ref();
            let needle = name.to_lowercase();

            let Some(node) = document.tree.root().descendants().find(|node| {
                node.value().as_text().is_some_and(|text| text.to_lowercase().contains(&needle))
            }) else {
                debug!("NFL: no text matching {}", name);
                continue;
            };

            let rank = node
                .ancestors()
                .filter_map(ElementRef::wrap)
                .find(is_row)
                .and_then(|row| first_number_in_cells(&row));

            match rank {
                Some(rank) => ranks.set(name, rank),
                None => debug!("NFL: {} matched outside a ranked row", name),
            }
        }

        ranks
    }
}

#[async_trait]
impl RankProvider for NflAdapter {
    fn source(&self) -> RankSource {
        RankSource::Nfl
    }

    async fn ranks(&self, position: &str, week: u32, names: &[String]) -> SourceRanks {
        let page = self.fetch(position, week).await;
        let ranks = Self::extract_ranks(&page, names);
        info!("NFL: ranked {}/{} {} players for week {}", ranks.ranked_count(), names.len(), position, week);
        ranks
    }
}
