//! API Routes
//!
//! Configures the Axum router with all agent event endpoints.

use axum::{
    routing::{get, post},
    Router,
};
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};

use super::handlers::{
    fetch_handler, health_handler, message_handler, notification_click_handler,
    periodic_sync_handler, push_handler, stats_handler, sync_handler, AppState,
};

/// Creates the main router with all endpoints configured.
///
/// # Endpoints
/// - `POST /fetch` - Intercept a network request
/// - `POST /message` - Deliver a control message
/// - `POST /sync` - Deliver a background-sync event
/// - `POST /periodic-sync` - Deliver a periodic-sync event
/// - `POST /push` - Deliver a push payload
/// - `POST /notification-click` - Deliver a notification click
/// - `GET /stats` - Interception statistics
/// - `GET /health` - Lifecycle state and generation name
///
/// # Middleware
/// - CORS: Allows any origin (the host page may live anywhere in dev)
/// - Tracing: Logs all requests for debugging
pub fn create_router(state: AppState) -> Router {
    // Configure CORS middleware
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    // Build router with all endpoints
    Router::new()
        .route("/fetch", post(fetch_handler))
        .route("/message", post(message_handler))
        .route("/sync", post(sync_handler))
        .route("/periodic-sync", post(periodic_sync_handler))
        .route("/push", post(push_handler))
        .route("/notification-click", post(notification_click_handler))
        .route("/stats", get(stats_handler))
        .route("/health", get(health_handler))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
