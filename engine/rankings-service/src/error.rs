//! Error types for the HTTP API

use roster_store::RosterError;
use serde::Serialize;
use thiserror::Error;
use warp::http::StatusCode;

/// Errors returned by API handlers, each mapped to an HTTP status
#[derive(Error, Debug)]
pub enum ApiError {
    #[error("{0}")]
    BadRequest(String),

    #[error("{0}")]
    NotFound(String),

    #[error("{0}")]
    Conflict(String),

    #[error("{0}")]
    Internal(String),
}

impl warp::reject::Reject for ApiError {}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::BadRequest(_) => StatusCode::BAD_REQUEST,
            ApiError::NotFound(_) => StatusCode::NOT_FOUND,
            ApiError::Conflict(_) => StatusCode::CONFLICT,
            ApiError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Internal error whose detail is only shown when `expose` is set
    pub fn internal(err: &anyhow::Error, expose: bool) -> Self {
        tracing::error!("Request failed: {:#}", err);
        if expose {
            ApiError::Internal(format!("{:#}", err))
        } else {
            ApiError::Internal("Internal server error".to_string())
        }
    }

    /// Map a roster failure; storage errors become `Internal`
    pub fn from_roster(err: RosterError, expose: bool) -> Self {
        match err {
            RosterError::Duplicate(_) => ApiError::Conflict("Player already exists".to_string()),
            RosterError::NotFound(_) => ApiError::NotFound("Player not found".to_string()),
            RosterError::InvalidEntry(msg) => ApiError::BadRequest(msg),
            other => ApiError::internal(&other.into(), expose),
        }
    }
}

/// JSON error body
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
}

impl ErrorResponse {
    pub fn new(message: impl Into<String>) -> Self {
        Self { error: message.into() }
    }
}
