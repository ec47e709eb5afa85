//! Rank Sources - weekly fantasy rankings scraped from public pages
//!
//! Three independent sources are supported (NFL.com, RotoPat and the
//! FantasyPros expert consensus). Each one fetches a page for a position and
//! week, then extracts a rank for every requested roster name. A source that
//! cannot be reached or parsed reports every player as unranked instead of
//! failing.

pub mod client;
pub mod config;
pub mod error;
pub mod normalize;
pub mod sources;
pub mod types;

pub use client::SourceClient;
pub use config::SourcesConfig;
pub use error::SourceError;
pub use normalize::normalize_name;
pub use sources::{default_providers, EcrAdapter, NflAdapter, RankProvider, RotoAdapter};
pub use types::{RankSource, SourceRanks};
