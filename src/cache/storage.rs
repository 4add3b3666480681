//! Cache Storage Module
//!
//! The set of named cache generations owned by the agent.

use std::collections::HashMap;

use crate::cache::CacheGeneration;

// == Cache Storage ==
/// Registry of cache generations, addressed by name.
///
/// Handlers open a generation per operation rather than holding onto one;
/// the activation cleanup guarantees at most one generation survives a
/// deploy.
#[derive(Debug, Default)]
pub struct CacheStorage {
    /// Generations by name
    generations: HashMap<String, CacheGeneration>,
}

impl CacheStorage {
    // == Constructor ==
    /// Creates an empty cache storage.
    pub fn new() -> Self {
        Self::default()
    }

    // == Open ==
    /// Opens a generation by name, creating it if absent.
    pub fn open(&mut self, name: &str) -> &mut CacheGeneration {
        self.generations
            .entry(name.to_string())
            .or_insert_with(|| CacheGeneration::new(name))
    }

    // == Get ==
    /// Returns a generation by name without creating it.
    pub fn get(&self, name: &str) -> Option<&CacheGeneration> {
        self.generations.get(name)
    }

    // == Insert ==
    /// Inserts a fully built generation, replacing any with the same name.
    ///
    /// Install uses this to publish a generation only after every seed
    /// resource has been fetched, so a failed install never leaves a
    /// partially filled generation addressable.
    pub fn insert(&mut self, generation: CacheGeneration) {
        self.generations
            .insert(generation.name().to_string(), generation);
    }

    // == Has ==
    /// Whether a generation with this name exists.
    pub fn has(&self, name: &str) -> bool {
        self.generations.contains_key(name)
    }

    // == Delete ==
    /// Deletes a generation and all its entries. Returns true if it existed.
    pub fn delete(&mut self, name: &str) -> bool {
        self.generations.remove(name).is_some()
    }

    // == Purge Stale ==
    /// Deletes every generation whose name differs from `current`.
    ///
    /// Returns the number of generations removed. Afterwards at most one
    /// generation (the current one) remains.
    pub fn purge_stale(&mut self, current: &str) -> usize {
        let before = self.generations.len();
        self.generations.retain(|name, _| name == current);
        before - self.generations.len()
    }

    // == Names ==
    /// Returns all generation names.
    pub fn names(&self) -> Vec<&str> {
        self.generations.keys().map(|n| n.as_str()).collect()
    }

    // == Length ==
    /// Returns the number of generations present.
    pub fn len(&self) -> usize {
        self.generations.len()
    }

    /// Returns true if no generations exist.
    pub fn is_empty(&self) -> bool {
        self.generations.is_empty()
    }
}
