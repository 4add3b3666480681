//! API Handlers
//!
//! HTTP request handlers for each agent event endpoint.

use axum::{
    body::{Body, Bytes},
    extract::State,
    http::{header::HeaderName, HeaderValue, StatusCode},
    response::{IntoResponse, Response},
    Json,
};

use crate::agent::CacheAgent;
use crate::error::Result;
use crate::models::{
    FetchRequest, HealthResponse, NotificationClick, StatsResponse, SyncRequest,
};
use crate::net::Fetcher;

/// Application state shared across all handlers.
#[derive(Clone)]
pub struct AppState {
    /// The cache agent; clones share all underlying state
    pub agent: CacheAgent,
}

impl AppState {
    /// Creates a new AppState around an agent.
    pub fn new(agent: CacheAgent) -> Self {
        Self { agent }
    }
}

/// Handler for POST /fetch
///
/// Runs the interception pipeline and answers with the chosen response's
/// real status, headers and body. Declined requests (mutating methods,
/// non-network schemes) are relayed to the network untouched and uncached.
pub async fn fetch_handler(
    State(state): State<AppState>,
    Json(request): Json<FetchRequest>,
) -> Response {
    match state.agent.handle_fetch(request.clone()).await {
        Some(snapshot) => build_response(snapshot.status, &snapshot.headers, snapshot.body),
        None => match state.agent.fetcher().fetch(&request).await {
            Ok(response) => build_response(response.status, &response.headers, response.body),
            Err(err) => err.into_response(),
        },
    }
}

/// Handler for POST /message
///
/// Control messages are fire-and-forget: the agent applies recognized kinds
/// and ignores the rest, and the sender always gets 202.
pub async fn message_handler(
    State(state): State<AppState>,
    Json(raw): Json<serde_json::Value>,
) -> StatusCode {
    state.agent.handle_message(raw).await;
    StatusCode::ACCEPTED
}

/// Handler for POST /sync
pub async fn sync_handler(
    State(state): State<AppState>,
    Json(request): Json<SyncRequest>,
) -> StatusCode {
    state.agent.handle_sync(&request.tag).await;
    StatusCode::NO_CONTENT
}

/// Handler for POST /periodic-sync
pub async fn periodic_sync_handler(
    State(state): State<AppState>,
    Json(request): Json<SyncRequest>,
) -> StatusCode {
    state.agent.handle_periodic_sync(&request.tag).await;
    StatusCode::NO_CONTENT
}

/// Handler for POST /push
///
/// An empty request body is a push without payload (a no-op); anything else
/// is handed to the push handler as the raw payload.
pub async fn push_handler(State(state): State<AppState>, body: Bytes) -> Result<StatusCode> {
    let payload = if body.is_empty() {
        None
    } else {
        Some(body.to_vec())
    };
    state.agent.handle_push(payload).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// Handler for POST /notification-click
pub async fn notification_click_handler(
    State(state): State<AppState>,
    Json(click): Json<NotificationClick>,
) -> Result<StatusCode> {
    state.agent.handle_notification_click(click).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// Handler for GET /stats
///
/// Returns current interception statistics.
pub async fn stats_handler(State(state): State<AppState>) -> Json<StatsResponse> {
    let stats = state.agent.stats().await;
    Json(StatsResponse::new(&stats))
}

/// Handler for GET /health
///
/// Returns lifecycle state and the current generation name.
pub async fn health_handler(State(state): State<AppState>) -> Json<HealthResponse> {
    let state_now = state.agent.state().await;
    Json(HealthResponse::healthy(
        state_now,
        state.agent.config().cache_version.clone(),
    ))
}

// == Response Building ==
/// Rebuilds a real HTTP response from stored or relayed parts.
///
/// Headers that do not survive the round-trip as valid HTTP are skipped
/// rather than failing the whole response.
fn build_response(
    status: u16,
    headers: &std::collections::HashMap<String, String>,
    body: Vec<u8>,
) -> Response {
    let status = StatusCode::from_u16(status).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
    let mut builder = Response::builder().status(status);
    if let Some(map) = builder.headers_mut() {
        for (name, value) in headers {
            if let (Ok(name), Ok(value)) = (
                name.parse::<HeaderName>(),
                HeaderValue::from_str(value),
            ) {
                map.insert(name, value);
            }
        }
    }
    builder
        .body(Body::from(body))
        .unwrap_or_else(|_| StatusCode::INTERNAL_SERVER_ERROR.into_response())
}
