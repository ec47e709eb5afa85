//! Error types for the roster store

use thiserror::Error;

pub type Result<T> = std::result::Result<T, RosterError>;

#[derive(Error, Debug)]
pub enum RosterError {
    /// Reading or writing the roster file failed
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// The roster file is not valid JSON
    #[error("Serialization error: {0}")]
    Json(#[from] serde_json::Error),

    /// A player with the same name is already on the roster
    #[error("Player already exists: {0}")]
    Duplicate(String),

    #[error("Player not found: {0}")]
    NotFound(String),

    /// Blank name or position
    #[error("Invalid roster entry: {0}")]
    InvalidEntry(String),
}
