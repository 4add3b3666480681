//! Lifecycle handlers: install and activate
//!
//! Install seeds a fresh cache generation from the fixed manifest;
//! activate purges every stale generation and claims all open page contexts.

use tracing::info;

use super::CacheAgent;
use crate::cache::{CacheGeneration, CachedResponse};
use crate::error::{AgentError, Result};
use crate::models::{FetchRequest, LifecycleState};
use crate::net::Fetcher;

impl CacheAgent {
    // == Install ==
    /// Fetches every seed resource and publishes them as a new generation.
    ///
    /// All-or-nothing: the manifest is a hard dependency set for offline
    /// shell correctness, so any unreachable or non-200 seed fails the whole
    /// install and no partially filled generation becomes addressable. The
    /// hosting runtime retries a failed install on its next opportunity.
    pub async fn install(&self) -> Result<()> {
        let version = &self.config.cache_version;
        self.set_state(LifecycleState::Installing).await;
        info!(generation = %version, "installing: seeding cache generation");

        let mut generation = CacheGeneration::new(version);
        for url in self.config.seed_manifest() {
            let request = FetchRequest::get(url.clone());
            let response = self.fetcher.fetch(&request).await.map_err(|err| {
                AgentError::InstallFailed(format!("seed {} unreachable: {}", url, err))
            })?;
            if !response.is_cacheable_status() {
                return Err(AgentError::InstallFailed(format!(
                    "seed {} returned status {}",
                    url, response.status
                )));
            }
            generation
                .put(request.cache_key(), CachedResponse::from(response))
                .map_err(|err| AgentError::InstallFailed(format!("seed {}: {}", url, err)))?;
        }

        let seeded = generation.len();
        self.storage.write().await.insert(generation);
        self.set_state(LifecycleState::Installed).await;
        info!(generation = %version, seeded, "install complete, skipping waiting hand-off");
        Ok(())
    }

    // == Activate ==
    /// Deletes every generation except the current one, then claims all
    /// open page contexts so they use this agent without a reload.
    pub async fn activate(&self) -> Result<()> {
        let version = &self.config.cache_version;
        self.set_state(LifecycleState::Activating).await;

        let removed = self.storage.write().await.purge_stale(version);
        self.clients.write().await.claim_all();

        self.set_state(LifecycleState::Active).await;
        info!(generation = %version, removed, "activated and claimed clients");
        Ok(())
    }
}
