//! API Module
//!
//! HTTP intake surface for the agent: the host page and platform deliver
//! events as HTTP requests.
//!
//! # Endpoints
//! - `POST /fetch` - Intercept a network request
//! - `POST /message` - Deliver a control message
//! - `POST /sync` - Deliver a background-sync event
//! - `POST /periodic-sync` - Deliver a periodic-sync event
//! - `POST /push` - Deliver a push payload
//! - `POST /notification-click` - Deliver a notification click
//! - `GET /stats` - Interception statistics
//! - `GET /health` - Lifecycle state and generation name

pub mod handlers;
pub mod routes;

pub use handlers::*;
pub use routes::create_router;
