//! Response DTOs for the agent's HTTP surface
//!
//! Defines the structure of outgoing diagnostic response bodies.

use serde::Serialize;

use crate::cache::CacheStats;
use crate::models::events::LifecycleState;

/// Response body for the stats endpoint (GET /stats)
#[derive(Debug, Clone, Serialize)]
pub struct StatsResponse {
    /// Requests served from the cache
    pub hits: u64,
    /// Requests with no stored entry
    pub misses: u64,
    /// Completed background revalidations
    pub refreshes: u64,
    /// Navigations answered with the cached app shell
    pub shell_fallbacks: u64,
    /// Requests answered with the synthetic offline response
    pub offline_fallbacks: u64,
    /// Entries in the current cache generation
    pub total_entries: usize,
    /// Hit rate (hits / (hits + misses))
    pub hit_rate: f64,
}

impl StatsResponse {
    /// Creates a new StatsResponse from cache statistics
    pub fn new(stats: &CacheStats) -> Self {
        Self {
            hits: stats.hits,
            misses: stats.misses,
            refreshes: stats.refreshes,
            shell_fallbacks: stats.shell_fallbacks,
            offline_fallbacks: stats.offline_fallbacks,
            total_entries: stats.total_entries,
            hit_rate: stats.hit_rate(),
        }
    }
}

/// Response body for the health endpoint (GET /health)
#[derive(Debug, Clone, Serialize)]
pub struct HealthResponse {
    /// Health status (e.g., "healthy")
    pub status: String,
    /// Lifecycle state of the agent
    pub state: LifecycleState,
    /// Name of the current cache generation
    pub generation: String,
    /// Current timestamp in ISO 8601 format
    pub timestamp: String,
}

impl HealthResponse {
    /// Creates a new HealthResponse with current timestamp
    pub fn healthy(state: LifecycleState, generation: impl Into<String>) -> Self {
        Self {
            status: "healthy".to_string(),
            state,
            generation: generation.into(),
            timestamp: chrono::Utc::now().to_rfc3339(),
        }
    }
}
