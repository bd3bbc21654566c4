//! HTTP route handlers for the clock page and API.

use axum::Router;
use axum::extract::State;
use axum::http::StatusCode;
use axum::response::{Html, Json};
use axum::routing::get;
use clock::core::commit::CommitInfo;
use clock::core::types::Tick;
use serde::Serialize;
use tracing::warn;

use crate::page::render_index;
use crate::state::AppState;

/// Build the API router.
pub fn api_router() -> Router<AppState> {
    Router::new()
        .route("/health", get(health))
        .route("/time", get(get_time))
        .route("/commit", get(get_commit))
}

async fn health() -> &'static str {
    "ok"
}

/// GET / - the clock page with the current tick pre-rendered.
pub async fn index(State(state): State<AppState>) -> Result<Html<String>, StatusCode> {
    let tick = current(&state).await?;
    render_index(&state.config.display, &tick)
        .map(Html)
        .map_err(|err| {
            warn!(error = %format!("{err:#}"), "render index failed");
            StatusCode::INTERNAL_SERVER_ERROR
        })
}

/// GET /api/time - current tick as JSON.
async fn get_time(State(state): State<AppState>) -> Result<Json<Tick>, StatusCode> {
    current(&state).await.map(Json)
}

#[derive(Serialize)]
struct CommitResponse {
    commit: CommitInfo,
}

/// GET /api/commit - latest commit, 404 when the probe is disabled.
async fn get_commit(State(state): State<AppState>) -> Result<Json<CommitResponse>, StatusCode> {
    let tick = current(&state).await?;
    let commit = tick.commit.ok_or(StatusCode::NOT_FOUND)?;
    Ok(Json(CommitResponse { commit }))
}

async fn current(state: &AppState) -> Result<Tick, StatusCode> {
    state.current().await.map_err(|err| {
        warn!(error = %err, "sample tick failed");
        StatusCode::INTERNAL_SERVER_ERROR
    })
}
