//! Roster Store - JSON file backed roster persistence
//!
//! Keeps the list of rostered players in a single JSON file. The file is
//! created with a default roster the first time it is opened, and every
//! change is written to a temp file and renamed into place.

pub mod defaults;
pub mod error;
pub mod store;

pub use defaults::default_roster;
pub use error::{Result, RosterError};
pub use store::JsonRosterStore;
