//! The Cache Agent
//!
//! Owns the cache-generation lifecycle and handles every platform event:
//! install, activate, fetch, message, sync, periodic-sync, push and
//! notification-click.

mod fetch;
mod lifecycle;
mod messages;
mod push;
mod sync;

pub use push::{DEFAULT_BODY, DEFAULT_TITLE, NOTIFICATION_TAG};
pub use sync::{STUDY_REFRESH_TAG, STUDY_SYNC_TAG};

use std::sync::Arc;

use tokio::sync::RwLock;
use tracing::debug;

use crate::cache::{CacheStats, CacheStorage};
use crate::config::AgentConfig;
use crate::error::Result;
use crate::models::{AgentEvent, EventOutcome, LifecycleState};
use crate::net::Fetcher;
use crate::platform::{ClientRegistry, NotificationHost};

// == Cache Agent ==
/// The offline caching agent.
///
/// Cloning is cheap; clones share the same cache storage, client registry
/// and statistics. There is no mutable global state: every handler acquires
/// the storage lock for the duration of one operation and releases it.
#[derive(Clone)]
pub struct CacheAgent {
    /// Versioned configuration, shared by every handler
    config: Arc<AgentConfig>,
    /// Named cache generations
    storage: Arc<RwLock<CacheStorage>>,
    /// Interception metrics
    stats: Arc<RwLock<CacheStats>>,
    /// Install/activate lifecycle position
    state: Arc<RwLock<LifecycleState>>,
    /// Live network transport
    fetcher: Arc<dyn Fetcher>,
    /// Open page contexts
    clients: Arc<RwLock<ClientRegistry>>,
    /// Notification display surface
    notifications: Arc<dyn NotificationHost>,
}

impl CacheAgent {
    // == Constructor ==
    /// Creates an agent over the given transport and notification surface.
    pub fn new(
        config: AgentConfig,
        fetcher: Arc<dyn Fetcher>,
        notifications: Arc<dyn NotificationHost>,
    ) -> Self {
        Self {
            config: Arc::new(config),
            storage: Arc::new(RwLock::new(CacheStorage::new())),
            stats: Arc::new(RwLock::new(CacheStats::new())),
            state: Arc::new(RwLock::new(LifecycleState::Parsed)),
            fetcher,
            clients: Arc::new(RwLock::new(ClientRegistry::new())),
            notifications,
        }
    }

    /// Agent configuration.
    pub fn config(&self) -> &AgentConfig {
        &self.config
    }

    /// The live network transport, for callers relaying pass-through requests.
    pub fn fetcher(&self) -> Arc<dyn Fetcher> {
        Arc::clone(&self.fetcher)
    }

    /// The shared page-context registry.
    pub fn clients(&self) -> Arc<RwLock<ClientRegistry>> {
        Arc::clone(&self.clients)
    }

    /// Current lifecycle state.
    pub async fn state(&self) -> LifecycleState {
        *self.state.read().await
    }

    /// Snapshot of the interception metrics, with the entry count of the
    /// current generation filled in.
    pub async fn stats(&self) -> CacheStats {
        let mut stats = self.stats.read().await.clone();
        let storage = self.storage.read().await;
        let entries = storage
            .get(&self.config.cache_version)
            .map(|generation| generation.len())
            .unwrap_or(0);
        stats.set_total_entries(entries);
        stats
    }

    pub(crate) async fn set_state(&self, next: LifecycleState) {
        *self.state.write().await = next;
    }

    // == Dispatch ==
    /// Routes one platform event to its handler.
    ///
    /// This is the single entry point for all event kinds; the mapping from
    /// kind to handler lives here and nowhere else.
    pub async fn dispatch(&self, event: AgentEvent) -> Result<EventOutcome> {
        debug!(kind = event.kind(), "dispatching event");
        match event {
            AgentEvent::Install => self.install().await.map(|_| EventOutcome::Completed),
            AgentEvent::Activate => self.activate().await.map(|_| EventOutcome::Completed),
            AgentEvent::Fetch(request) => Ok(match self.handle_fetch(request).await {
                Some(response) => EventOutcome::Response(response),
                None => EventOutcome::PassedThrough,
            }),
            AgentEvent::Message(raw) => {
                self.handle_message(raw).await;
                Ok(EventOutcome::Completed)
            }
            AgentEvent::Sync { tag } => {
                self.handle_sync(&tag).await;
                Ok(EventOutcome::Completed)
            }
            AgentEvent::PeriodicSync { tag } => {
                self.handle_periodic_sync(&tag).await;
                Ok(EventOutcome::Completed)
            }
            AgentEvent::Push { payload } => self
                .handle_push(payload)
                .await
                .map(|_| EventOutcome::Completed),
            AgentEvent::NotificationClick(click) => self
                .handle_notification_click(click)
                .await
                .map(|_| EventOutcome::Completed),
        }
    }
}
