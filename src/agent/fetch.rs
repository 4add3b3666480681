//! Fetch interception: stale-while-revalidate with offline fallbacks
//!
//! Cached entries are served immediately while a detached task refreshes
//! them; misses go to the network with write-through for eligible origins;
//! total failure degrades to the cached app shell (navigations) or a
//! synthetic 408 "Offline" response.

use tracing::{debug, warn};

use super::CacheAgent;
use crate::cache::CachedResponse;
use crate::error::Result;
use crate::models::FetchRequest;
use crate::net::Fetcher;

impl CacheAgent {
    // == Handle Fetch ==
    /// Intercepts one request, or declines it.
    ///
    /// Only idempotent-read requests on network schemes are intercepted;
    /// `None` means the caller must pass the request through untouched.
    /// An intercepted request always produces a response: the fallback chain
    /// absorbs every pipeline failure.
    pub async fn handle_fetch(&self, request: FetchRequest) -> Option<CachedResponse> {
        if !request.is_interceptable() {
            debug!(method = %request.method, url = %request.url, "request passed through");
            return None;
        }

        let response = match self.stale_while_revalidate(&request).await {
            Ok(response) => response,
            Err(err) => {
                warn!(url = %request.url, error = %err, "fetch pipeline failed, using fallback");
                self.fallback(&request).await
            }
        };
        Some(response)
    }

    // == Stale While Revalidate ==
    /// Serves from cache with a background refresh, or fetches live.
    async fn stale_while_revalidate(&self, request: &FetchRequest) -> Result<CachedResponse> {
        let key = request.cache_key();

        if let Some(cached) = self.lookup_cached(&key).await {
            self.stats.write().await.record_hit();
            self.spawn_revalidation(request.clone());
            return Ok(cached);
        }

        self.stats.write().await.record_miss();
        match self.fetch_and_store(request).await {
            Ok(response) => Ok(response),
            Err(err) => {
                // A concurrent request may have stored the entry meanwhile.
                if let Some(cached) = self.lookup_cached(&key).await {
                    return Ok(cached);
                }
                Err(err)
            }
        }
    }

    // == Fetch And Store ==
    /// Live fetch with best-effort write-through.
    ///
    /// The response returned to the caller is fixed before the write is
    /// attempted; a rejected write never fails the fetch.
    async fn fetch_and_store(&self, request: &FetchRequest) -> Result<CachedResponse> {
        let response = self.fetcher.fetch(request).await?;
        let snapshot = CachedResponse::from(response);

        if snapshot.status == 200 && self.config.is_eligible(&request.url) {
            let mut storage = self.storage.write().await;
            let generation = storage.open(&self.config.cache_version);
            if let Err(err) = generation.put(request.cache_key(), snapshot.clone()) {
                warn!(url = %request.url, error = %err, "cache write failed");
            }
        }

        Ok(snapshot)
    }

    // == Revalidation ==
    /// Spawns the detached refresh for an already-served cached response.
    ///
    /// The task has its own error boundary; its outcome never reaches the
    /// caller that received the cached entry.
    fn spawn_revalidation(&self, request: FetchRequest) {
        let agent = self.clone();
        tokio::spawn(async move {
            match agent.fetch_and_store(&request).await {
                Ok(_) => agent.stats.write().await.record_refresh(),
                Err(err) => {
                    debug!(url = %request.url, error = %err, "background refresh failed");
                }
            }
        });
    }

    // == Lookup ==
    /// Reads a snapshot out of the current generation.
    async fn lookup_cached(&self, key: &str) -> Option<CachedResponse> {
        let storage = self.storage.read().await;
        storage
            .get(&self.config.cache_version)?
            .lookup(key)
            .cloned()
    }

    // == Fallback ==
    /// Last-resort response when the pipeline failed outright.
    ///
    /// Navigations get the cached app shell so the app always loads its
    /// shell offline; everything else gets the synthetic offline response.
    async fn fallback(&self, request: &FetchRequest) -> CachedResponse {
        if request.navigation {
            let shell_key = FetchRequest::get(self.config.shell_url()).cache_key();
            if let Some(shell) = self.lookup_cached(&shell_key).await {
                self.stats.write().await.record_shell_fallback();
                return shell;
            }
        }
        self.stats.write().await.record_offline_fallback();
        CachedResponse::offline()
    }
}
