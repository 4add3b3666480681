//! Offline Agent - A client-side offline caching agent
//!
//! Serves a single-page app from a versioned cache generation with
//! stale-while-revalidate freshness and offline fallbacks.

pub mod agent;
pub mod api;
pub mod cache;
pub mod config;
pub mod error;
pub mod models;
pub mod net;
pub mod platform;
pub mod tasks;

pub use agent::CacheAgent;
pub use api::AppState;
pub use config::AgentConfig;
pub use tasks::spawn_periodic_sync_task;
