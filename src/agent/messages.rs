//! Control-message handler
//!
//! The host page sends structured messages; anything unrecognized is
//! ignored so future host versions can send kinds this agent predates.

use tracing::{debug, error, info};

use super::CacheAgent;
use crate::models::ControlMessage;

impl CacheAgent {
    // == Handle Message ==
    /// Applies one control message from the host page.
    ///
    /// Fire-and-forget: there is no response payload, and failures are
    /// logged rather than surfaced to the sender.
    pub async fn handle_message(&self, raw: serde_json::Value) {
        match serde_json::from_value::<ControlMessage>(raw) {
            Ok(ControlMessage::ForceActivate) => {
                info!("force-activate requested by host page");
                if let Err(err) = self.activate().await {
                    error!(error = %err, "forced activation failed");
                }
            }
            Ok(ControlMessage::ClearCache) => {
                let version = &self.config.cache_version;
                let removed = self.storage.write().await.delete(version);
                info!(generation = %version, removed, "cache cleared by host page");
            }
            Err(_) => {
                debug!("ignoring unrecognized control message");
            }
        }
    }
}
