//! REST API endpoints
//!
//! - `GET /rankings?week=N` merged rankings per position
//! - `GET /players` roster grouped by position
//! - `POST /players` add a player
//! - `DELETE /players/{name}` remove a player
//! - `GET /health` liveness

use rank_aggregator::{parse_week_param, PositionGroups, RosterEntry};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::convert::Infallible;
use tracing::{debug, info};
use warp::http::StatusCode;
use warp::path::Tail;
use warp::{Filter, Rejection, Reply};

use crate::error::{ApiError, ErrorResponse};
use crate::state::AppState;

/// Largest accepted request body
const MAX_BODY_BYTES: u64 = 16 * 1024;

/// Body of `POST /players`
#[derive(Debug, Deserialize)]
pub struct NewPlayerRequest {
    pub name: Option<String>,
    pub position: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct MessageResponse {
    pub message: String,
}

impl MessageResponse {
    fn new(message: impl Into<String>) -> Self {
        Self { message: message.into() }
    }
}

/// Get merged rankings for the requested (or current) week
pub async fn get_rankings(
    params: HashMap<String, String>,
    state: AppState,
) -> Result<impl Reply, Rejection> {
    let week = parse_week_param(params.get("week").map(String::as_str));
    debug!("Rankings requested for week {:?}", week);

    let report = state
        .aggregator()
        .compute_rankings(week)
        .await
        .map_err(|e| warp::reject::custom(ApiError::internal(&e, state.expose_errors())))?;

    Ok(warp::reply::json(&report))
}

/// Get the roster grouped by position
pub async fn list_players(state: AppState) -> Result<impl Reply, Rejection> {
    let entries = state
        .roster()
        .list()
        .await
        .map_err(|e| warp::reject::custom(ApiError::from_roster(e, state.expose_errors())))?;

    let groups: PositionGroups<RosterEntry> =
        PositionGroups::from_items(entries, |entry| entry.position.as_str());

    Ok(warp::reply::json(&groups))
}

/// Add a player to the roster
pub async fn add_player(
    request: NewPlayerRequest,
    state: AppState,
) -> Result<impl Reply, Rejection> {
    let (name, position) = match (request.name, request.position) {
        (Some(name), Some(position)) => (name, position),
        _ => return Err(warp::reject::custom(ApiError::BadRequest("Bad payload".to_string()))),
    };

    let entry = state
        .roster()
        .add(&name, &position)
        .await
        .map_err(|e| warp::reject::custom(ApiError::from_roster(e, state.expose_errors())))?;
    info!("Player {} added via API", entry.name);

    Ok(warp::reply::with_status(
        warp::reply::json(&MessageResponse::new("Player added")),
        StatusCode::CREATED,
    ))
}

/// Remove a player from the roster; the name is matched ignoring case.
///
/// The name is the whole rest of the path, so names containing `/` work.
pub async fn delete_player(tail: Tail, state: AppState) -> Result<impl Reply, Rejection> {
    if tail.as_str().is_empty() {
        return Err(warp::reject::not_found());
    }
    let name = urlencoding::decode(tail.as_str())
        .map_err(|_| warp::reject::custom(ApiError::BadRequest("Invalid player name".to_string())))?;

    state
        .roster()
        .remove(&name)
        .await
        .map_err(|e| warp::reject::custom(ApiError::from_roster(e, state.expose_errors())))?;
    info!("Player {} deleted via API", name.trim());

    Ok(warp::reply::json(&MessageResponse::new("Player deleted")))
}

/// Turn rejections into JSON error bodies
pub async fn handle_rejection(err: Rejection) -> Result<impl Reply, Infallible> {
    let (status, message) = if let Some(api_error) = err.find::<ApiError>() {
        (api_error.status(), api_error.to_string())
    } else if err.find::<warp::filters::body::BodyDeserializeError>().is_some() {
        (StatusCode::BAD_REQUEST, "Bad payload".to_string())
    } else if err.find::<warp::reject::PayloadTooLarge>().is_some() {
        (StatusCode::PAYLOAD_TOO_LARGE, "Payload too large".to_string())
    } else if err.find::<warp::reject::LengthRequired>().is_some() {
        (StatusCode::LENGTH_REQUIRED, "Content length required".to_string())
    } else if err.find::<warp::reject::UnsupportedMediaType>().is_some() {
        (StatusCode::UNSUPPORTED_MEDIA_TYPE, "Content type must be application/json".to_string())
    } else if err.is_not_found() {
        (StatusCode::NOT_FOUND, "Not found".to_string())
    } else if err.find::<warp::reject::MethodNotAllowed>().is_some() {
        (StatusCode::METHOD_NOT_ALLOWED, "Method not allowed".to_string())
    } else {
        tracing::error!("Unhandled rejection: {:?}", err);
        (StatusCode::INTERNAL_SERVER_ERROR, "Internal server error".to_string())
    };

    Ok(warp::reply::with_status(warp::reply::json(&ErrorResponse::new(message)), status))
}

/// Create REST API routes
pub fn create_routes(
    state: AppState,
) -> impl Filter<Extract = impl Reply, Error = Infallible> + Clone {
    let state_filter = warp::any().map(move || state.clone());

    let rankings = warp::path("rankings")
        .and(warp::path::end())
        .and(warp::get())
        .and(warp::query::<HashMap<String, String>>())
        .and(state_filter.clone())
        .and_then(get_rankings);

    let players = warp::path("players").and(warp::path::end());

    let get_players =
        players.clone().and(warp::get()).and(state_filter.clone()).and_then(list_players);

    let post_player = players
        .and(warp::post())
        .and(warp::body::content_length_limit(MAX_BODY_BYTES))
        .and(warp::body::json::<NewPlayerRequest>())
        .and(state_filter.clone())
        .and_then(add_player);

    let delete = warp::path("players")
        .and(warp::path::tail())
        .and(warp::delete())
        .and(state_filter)
        .and_then(delete_player);

    // Health check endpoint
    let health = warp::path("health").and(warp::path::end()).and(warp::get()).map(|| {
        warp::reply::json(&serde_json::json!({
            "status": "healthy",
            "timestamp": chrono::Utc::now().to_rfc3339()
        }))
    });

    rankings
        .or(get_players)
        .or(post_player)
        .or(delete)
        .or(health)
        .with(
            warp::cors()
                .allow_any_origin()
                .allow_headers(vec!["content-type"])
                .allow_methods(vec!["GET", "POST", "DELETE", "OPTIONS"]),
        )
        .recover(handle_rejection)
}
