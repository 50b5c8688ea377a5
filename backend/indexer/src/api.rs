//! Axum REST API handlers.

use std::sync::Arc;

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use sqlx::SqlitePool;

use crate::db;
use crate::errors::Result;
use crate::events::EventRecord;

#[derive(Clone)]
pub struct ApiState {
    pub pool: SqlitePool,
}

// ─────────────────────────────────────────────────────────
// Response shapes
// ─────────────────────────────────────────────────────────

#[derive(Serialize)]
pub struct ContributionEventsResponse {
    pub contribution_id: String,
    pub count: usize,
    pub events: Vec<EventRecord>,
}

#[derive(Serialize)]
pub struct ActorEventsResponse {
    pub actor: String,
    pub count: usize,
    pub events: Vec<EventRecord>,
}

#[derive(Serialize)]
pub struct AllEventsResponse {
    pub count: usize,
    pub events: Vec<EventRecord>,
}

#[derive(Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub version: &'static str,
}

#[derive(Serialize)]
pub struct ErrorResponse {
    pub error: String,
}

/// Render a query result as `200` with the built body, or `500` with the error.
fn respond<T: Serialize>(
    result: Result<Vec<EventRecord>>,
    build: impl FnOnce(Vec<EventRecord>) -> T,
) -> Response {
    match result {
        Ok(events) => (StatusCode::OK, Json(build(events))).into_response(),
        Err(e) => (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(ErrorResponse {
                error: e.to_string(),
            }),
        )
            .into_response(),
    }
}

// ─────────────────────────────────────────────────────────
// Handlers
// ─────────────────────────────────────────────────────────

/// `GET /health`
pub async fn health() -> impl IntoResponse {
    Json(HealthResponse {
        status: "ok",
        version: env!("CARGO_PKG_VERSION"),
    })
}

/// `GET /contributions/:id/events`
///
/// Returns the logged/approved/verified/rejected history of one contribution.
pub async fn get_contribution_events(
    State(state): State<Arc<ApiState>>,
    Path(contribution_id): Path<String>,
) -> Response {
    let result = db::get_events_for_contribution(&state.pool, &contribution_id).await;
    respond(result, |events| ContributionEventsResponse {
        contribution_id,
        count: events.len(),
        events,
    })
}

/// `GET /actors/:address/events`
///
/// Returns every event in which the address acted as volunteer, approver
/// or authority.
pub async fn get_actor_events(
    State(state): State<Arc<ApiState>>,
    Path(actor): Path<String>,
) -> Response {
    let result = db::get_events_for_actor(&state.pool, &actor).await;
    respond(result, |events| ActorEventsResponse {
        actor,
        count: events.len(),
        events,
    })
}

/// `GET /events`
///
/// Returns all indexed events.
pub async fn get_all_events(State(state): State<Arc<ApiState>>) -> Response {
    let result = db::get_all_events(&state.pool).await;
    respond(result, |events| AllEventsResponse {
        count: events.len(),
        events,
    })
}
