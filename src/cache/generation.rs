//! Cache Generation Module
//!
//! One named, versioned bucket of request-key to response-snapshot entries.

use std::collections::HashMap;

use crate::cache::{CachedResponse, MAX_BODY_SIZE};
use crate::error::{AgentError, Result};

// == Cache Generation ==
/// A named bucket of stored responses.
///
/// The generation name carries the deployed version string; the agent keeps
/// exactly one generation current and deletes the rest on activation.
#[derive(Debug, Clone, Default)]
pub struct CacheGeneration {
    /// Generation name (the version string)
    name: String,
    /// Key-value storage, keyed by request method + URL
    entries: HashMap<String, CachedResponse>,
}

impl CacheGeneration {
    // == Constructor ==
    /// Creates a new empty generation with the given name.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            entries: HashMap::new(),
        }
    }

    /// Generation name.
    pub fn name(&self) -> &str {
        &self.name
    }

    // == Lookup ==
    /// Returns the stored snapshot for a key, if any.
    pub fn lookup(&self, key: &str) -> Option<&CachedResponse> {
        self.entries.get(key)
    }

    // == Put ==
    /// Stores a snapshot under a key, overwriting any previous entry.
    ///
    /// Only status-200 snapshots within the body size bound are accepted;
    /// everything else is rejected so a failed or partial response can never
    /// shadow a good one.
    pub fn put(&mut self, key: impl Into<String>, snapshot: CachedResponse) -> Result<()> {
        if snapshot.status != 200 {
            return Err(AgentError::CacheWrite(format!(
                "refusing to store status {} response",
                snapshot.status
            )));
        }
        if snapshot.body_len() > MAX_BODY_SIZE {
            return Err(AgentError::CacheWrite(format!(
                "body exceeds maximum size of {} bytes",
                MAX_BODY_SIZE
            )));
        }

        self.entries.insert(key.into(), snapshot);
        Ok(())
    }

    // == Delete ==
    /// Removes an entry by key. Returns true if an entry was removed.
    pub fn delete(&mut self, key: &str) -> bool {
        self.entries.remove(key).is_some()
    }

    // == Keys ==
    /// Returns all stored keys.
    pub fn keys(&self) -> Vec<&str> {
        self.entries.keys().map(|k| k.as_str()).collect()
    }

    // == Length ==
    /// Returns the current number of entries.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    // == Is Empty ==
    /// Returns true if the generation holds no entries.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
