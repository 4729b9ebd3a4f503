//! HTTP route handlers.

use std::path::Path;

use askama::Template;
use axum::{
    Json, Router,
    extract::{Query, State},
    http::StatusCode,
    response::{Html, IntoResponse, Response},
    routing::get,
};
use chrono::Utc;
use thiserror::Error;
use tower_http::services::ServeDir;
use tower_http::trace::TraceLayer;
use tracing::{debug, error};

use crate::digitraffic::FetchError;
use crate::select::select_next_departures;

use super::dto::*;
use super::state::AppState;

/// Create the application router.
///
/// `static_dir` is the path to the static assets directory.
pub fn create_router(state: AppState, static_dir: impl AsRef<Path>) -> Router {
    Router::new()
        .route("/", get(index_page))
        .route("/health", get(health))
        .route("/api/next-z-train", get(next_z_train))
        .nest_service("/static", ServeDir::new(static_dir))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Health check endpoint.
async fn health() -> &'static str {
    "ok"
}

/// Dashboard page.
async fn index_page(State(state): State<AppState>) -> Result<Html<String>, AppError> {
    Ok(Html(state.dashboard.render()?))
}

/// Next departures from a station, optionally only towards a target.
///
/// Answers 404 when nothing qualifies, a bare object when exactly one
/// departure was asked for, and an array otherwise.
async fn next_z_train(
    State(state): State<AppState>,
    Query(req): Query<NextTrainRequest>,
) -> Result<Response, AppError> {
    let station = req.station();
    let target = req.target();
    let count = req.count();

    let trains = state.trains.line_trains_today().await?;
    let departures = select_next_departures(
        &trains,
        &station,
        target.as_ref(),
        count.limit(),
        Utc::now(),
    );

    debug!(
        %station,
        target = target.as_ref().map(|t| t.as_str()),
        ?count,
        found = departures.len(),
        "selected departures"
    );

    if count.wants_single() {
        if let Some(first) = departures.into_iter().next() {
            return Ok(Json(first).into_response());
        }
    } else if !departures.is_empty() {
        return Ok(Json(departures).into_response());
    }

    let body = Json(NoDeparturesResponse::for_station(&station));
    Ok((StatusCode::NOT_FOUND, body).into_response())
}

/// Application error type.
///
/// Every variant is a 500 to the caller; the detail only goes to the log.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("fetching trains failed: {0}")]
    Upstream(#[from] FetchError),

    #[error("rendering template failed: {0}")]
    Template(#[from] askama::Error),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        if let AppError::Upstream(fetch) = &self {
            error!(status = ?fetch.status(), error = %self, "request failed");
        } else {
            error!(error = %self, "request failed");
        }

        let body = Json(ErrorResponse {
            error: INTERNAL_ERROR_MESSAGE.to_string(),
        });
        (StatusCode::INTERNAL_SERVER_ERROR, body).into_response()
    }
}
