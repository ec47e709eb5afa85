use async_trait::async_trait;
use scraper::{ElementRef, Html};
use std::sync::Arc;
use tracing::{debug, info};

use super::{first_number, first_number_in_cells, is_row, selector, stripped_text, HtmlPage, RankProvider};
use crate::client::SourceClient;
use crate::config::SourcesConfig;
use crate::normalize::normalize_name;
use crate::types::{RankSource, SourceRanks};

/// Positions RotoPat publishes together in a single article
const COMBINED_POSITIONS: [&str; 3] = ["TE", "K", "DEF"];

/// Slug of the combined TE/K/DEF article
const COMBINED_PAGE: &str = "te-k-def";

/// RotoPat weekly rankings articles
///
/// Article tables abbreviate and decorate names inconsistently, so both
/// the roster name and each cell are normalized before matching.
pub struct RotoAdapter {
    client: SourceClient,
    config: Arc<SourcesConfig>,
}

impl RotoAdapter {
    pub fn new(client: SourceClient, config: Arc<SourcesConfig>) -> Self {
        Self { client, config }
    }

    /// Article slug for a position: TE, K and DEF share one article
    pub fn page_variant(position: &str) -> String {
        if COMBINED_POSITIONS.iter().any(|p| p.eq_ignore_ascii_case(position)) {
            COMBINED_PAGE.to_string()
        } else {
            position.to_lowercase()
        }
    }

    pub fn page_url(&self, position: &str, week: u32) -> String {
        self.config.render_url(&self.config.roto_url, &Self::page_variant(position), week)
    }

    /// Fetch the rankings article, empty on any failure
    pub async fn fetch(&self, position: &str, week: u32) -> HtmlPage {
        let url = self.page_url(position, week);
        HtmlPage::new(self.client.get_text_or_empty(&url).await)
    }

    /// Rank each name from the row of the first cell containing it.
    ///
    /// RotoPat bolds the overall rank, so when the row has a `<b>` element
    /// the rank comes from the first one only. Rows without bold text fall
    /// back to the first number across the row's cells.
    pub fn extract_ranks<S: AsRef<str>>(page: &HtmlPage, names: &[S]) -> SourceRanks {
        let mut ranks = SourceRanks::unranked(RankSource::Roto, names);
        if page.is_empty() {
            return ranks;
        }

        let document = Html::parse_document(page.as_str());
        let cell_selector = selector("td");
        let bold_selector = selector("b");

        let cells: Vec<(ElementRef, String)> = document
            .select(&cell_selector)
            .map(|cell| {
                let key = normalize_name(&cell.text().collect::<String>());
                (cell, key)
            })
            .collect();

        for name in names {
            let name = name.as_ref();
            let target = normalize_name(name);

            let Some((cell, _)) = cells.iter().find(|(_, key)| key.contains(&target)) else {
                debug!("Roto: no cell matching {}", name);
                continue;
            };

            let Some(row) = cell.ancestors().filter_map(ElementRef::wrap).find(is_row) else {
                continue;
            };

            let rank = match row.select(&bold_selector).next() {
                Some(bold) => first_number(&stripped_text(&bold)),
                None => first_number_in_cells(&row),
            };

            if let Some(rank) = rank {
                ranks.set(name, rank);
            }
        }

        ranks
    }
}

#[async_trait]
impl RankProvider for RotoAdapter {
    fn source(&self) -> RankSource {
        RankSource::Roto
    }

    async fn ranks(&self, position: &str, week: u32, names: &[String]) -> SourceRanks {
        let page = self.fetch(position, week).await;
        let ranks = Self::extract_ranks(&page, names);
        info!(
            "Roto: ranked {}/{} {} players for week {}",
            ranks.ranked_count(),
            names.len(),
            position,
            week
        );
        ranks
    }
}
