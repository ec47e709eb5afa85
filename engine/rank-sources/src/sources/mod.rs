//! Source adapters
//!
//! Each adapter fetches one page (or embedded dataset) for a position and
//! week and extracts a rank per requested name. Matching is first-match in
//! document order: the first element whose text contains the target name
//! wins, with no scoring between candidates. Names that are substrings of
//! other players' names ("Josh Allen" / "Keenan Allen") can therefore pick
//! up the wrong row.

mod ecr;
mod nfl;
mod roto;

use async_trait::async_trait;
use regex::Regex;
use scraper::{ElementRef, Selector};
use std::sync::{Arc, OnceLock};

use crate::client::SourceClient;
use crate::config::SourcesConfig;
use crate::types::{RankSource, SourceRanks};

pub use ecr::{EcrAdapter, EcrDataset, EcrEntry};
pub use nfl::NflAdapter;
pub use roto::RotoAdapter;

/// Capability shared by every ranking source
#[async_trait]
pub trait RankProvider: Send + Sync {
    /// Which source this provider reports for
    fn source(&self) -> RankSource;

    /// Fetch the source for a position and week and rank the given names.
    ///
    /// Never fails: an unreachable or unparsable source yields an unranked
    /// entry for every name.
    async fn ranks(&self, position: &str, week: u32, names: &[String]) -> SourceRanks;
}

impl RankSource {
    /// Build the adapter for this source
    pub fn provider(
        &self,
        client: SourceClient,
        config: Arc<SourcesConfig>,
    ) -> Arc<dyn RankProvider> {
        match self {
            RankSource::Nfl => Arc::new(NflAdapter::new(client, config)),
            RankSource::Roto => Arc::new(RotoAdapter::new(client, config)),
            RankSource::Ecr => Arc::new(EcrAdapter::new(client, config)),
        }
    }
}

/// Adapters for all three sources, in report order
pub fn default_providers(
    client: SourceClient,
    config: Arc<SourcesConfig>,
) -> Vec<Arc<dyn RankProvider>> {
    RankSource::ALL.iter().map(|source| source.provider(client.clone(), config.clone())).collect()
}

/// Raw HTML of a fetched page; empty when the fetch failed
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct HtmlPage {
    body: String,
}

impl HtmlPage {
    pub fn new(body: impl Into<String>) -> Self {
        Self { body: body.into() }
    }

    pub fn empty() -> Self {
        Self::default()
    }

    pub fn is_empty(&self) -> bool {
        self.body.trim().is_empty()
    }

    pub fn as_str(&self) -> &str {
        &self.body
    }
}

fn digits_pattern() -> &'static Regex {
    static DIGITS: OnceLock<Regex> = OnceLock::new();
    DIGITS.get_or_init(|| Regex::new(r"[0-9]+").expect("valid regex"))
}

/// First run of ASCII digits in the text, if it fits a rank
pub(crate) fn first_number(text: &str) -> Option<u32> {
    digits_pattern().find(text).and_then(|m| m.as_str().parse().ok())
}

/// Text of an element with each text node trimmed and blanks dropped
pub(crate) fn stripped_text(element: &ElementRef) -> String {
    element.text().map(str::trim).filter(|piece| !piece.is_empty()).collect()
}

/// First number found scanning a row's cells in order
pub(crate) fn first_number_in_cells(row: &ElementRef) -> Option<u32> {
    row.select(&selector("td")).find_map(|cell| first_number(&stripped_text(&cell)))
}

/// Whether an element is a table row
pub(crate) fn is_row(element: &ElementRef) -> bool {
    element.value().name().eq_ignore_ascii_case("tr")
}

/// Parse one of the fixed tag selectors used by the adapters
pub(crate) fn selector(css: &'static str) -> Selector {
    Selector::parse(css).expect("valid selector")
}
