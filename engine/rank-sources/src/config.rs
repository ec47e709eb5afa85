//! Configuration for the ranking sources

use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Default per-request timeout in seconds
pub const DEFAULT_TIMEOUT_SECS: u64 = 10;

/// Browser user agent; some of the ranking sites reject unknown clients
pub const DEFAULT_USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/124.0.0.0 Safari/537.36";

/// URL templates and HTTP settings for the three sources
///
/// Templates understand `{season}`, `{week}` and `{position}` placeholders.
/// The meaning of `{position}` is source specific (see each adapter).
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SourcesConfig {
    /// Season year substituted for `{season}`
    pub season: i32,

    /// Per-request timeout in seconds
    pub timeout_secs: u64,

    /// User agent sent with every request
    pub user_agent: String,

    /// NFL.com rankings page
    pub nfl_url: String,

    /// RotoPat weekly rankings article
    pub roto_url: String,

    /// FantasyPros consensus rankings page
    pub ecr_url: String,
}

impl Default for SourcesConfig {
    fn default() -> Self {
        Self {
            season: 2025,
            timeout_secs: DEFAULT_TIMEOUT_SECS,
            user_agent: DEFAULT_USER_AGENT.to_string(),
            nfl_url: "https://fantasy.nfl.com/research/rankings?leagueId=0&position={position}&statSeason={season}&statType=weekStats&week={week}".to_string(),
            roto_url: "https://www.nbcsports.com/fantasy/football/news/{season}-week-{week}-fantasy-football-rankings-{position}".to_string(),
            ecr_url: "https://www.fantasypros.com/nfl/rankings/{position}.php?scoring=PPR".to_string(),
        }
    }
}

impl SourcesConfig {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    /// Fill a URL template for this season
    pub fn render_url(&self, template: &str, position: &str, week: u32) -> String {
        template
            .replace("{season}", &self.season.to_string())
            .replace("{week}", &week.to_string())
            .replace("{position}", position)
    }
}
