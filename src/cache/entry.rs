//! Cache Entry Module
//!
//! Defines the stored response snapshot kept per cache key.

use std::collections::HashMap;
use std::time::{SystemTime, UNIX_EPOCH};

use serde::{Deserialize, Serialize};

use crate::cache::OFFLINE_STATUS;

// == Cached Response ==
/// A complete snapshot of one response: status, headers and body bytes.
///
/// Entries are immutable once stored; a revalidation replaces the whole
/// snapshot rather than mutating it in place.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CachedResponse {
    /// HTTP status code
    pub status: u16,
    /// Status reason phrase
    pub reason: String,
    /// Response headers
    pub headers: HashMap<String, String>,
    /// Response body
    pub body: Vec<u8>,
    /// Storage timestamp (Unix milliseconds)
    pub stored_at: u64,
}

impl CachedResponse {
    // == Constructor ==
    /// Creates a snapshot with the current timestamp.
    pub fn new(
        status: u16,
        reason: impl Into<String>,
        headers: HashMap<String, String>,
        body: Vec<u8>,
    ) -> Self {
        Self {
            status,
            reason: reason.into(),
            headers,
            body,
            stored_at: current_timestamp_ms(),
        }
    }

    // == Offline Stub ==
    /// The synthetic response served when the network is unreachable and no
    /// entry exists: empty body, status 408, reason "Offline".
    ///
    /// Other parts of the app rely on this shape to detect offline state.
    pub fn offline() -> Self {
        Self::new(OFFLINE_STATUS, "Offline", HashMap::new(), Vec::new())
    }

    /// Whether this snapshot is the synthetic offline response.
    pub fn is_offline_stub(&self) -> bool {
        self.status == OFFLINE_STATUS && self.body.is_empty()
    }

    /// Body size in bytes.
    pub fn body_len(&self) -> usize {
        self.body.len()
    }
}

// == Utility Functions ==
/// Returns current Unix timestamp in milliseconds.
pub fn current_timestamp_ms() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .expect("Time went backwards")
        .as_millis() as u64
}
