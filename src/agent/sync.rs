//! Background-sync and periodic-sync handlers
//!
//! There is no remote server to reconcile with, so the known tags complete
//! as logged no-ops. The handlers resolve promptly; a future server
//! integration slots in here without touching the interception design.

use tracing::debug;

use super::CacheAgent;

/// Background-sync tag registered by the app for deferred data sync.
pub const STUDY_SYNC_TAG: &str = "study-sync";

/// Periodic-sync tag registered by the app for content refresh.
pub const STUDY_REFRESH_TAG: &str = "study-refresh";

impl CacheAgent {
    // == Handle Sync ==
    /// Completes one tagged background-sync event.
    pub async fn handle_sync(&self, tag: &str) {
        if tag == STUDY_SYNC_TAG {
            debug!(tag, "background sync acknowledged, nothing to reconcile");
        } else {
            debug!(tag, "ignoring unknown sync tag");
        }
    }

    // == Handle Periodic Sync ==
    /// Completes one tagged periodic-sync event.
    pub async fn handle_periodic_sync(&self, tag: &str) {
        if tag == STUDY_REFRESH_TAG {
            debug!(tag, "periodic sync acknowledged, nothing to refresh");
        } else {
            debug!(tag, "ignoring unknown periodic sync tag");
        }
    }
}
