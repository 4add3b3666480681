//! Periodic Sync Task
//!
//! Background task that delivers periodic-sync events to the agent on a
//! fixed interval, standing in for a platform scheduler.

use std::time::Duration;

use tokio::task::JoinHandle;
use tracing::{info, warn};

use crate::agent::{CacheAgent, STUDY_REFRESH_TAG};
use crate::models::AgentEvent;

/// Spawns a background task that periodically dispatches a periodic-sync
/// event with the refresh tag.
///
/// The task runs in an infinite loop, sleeping for the specified interval
/// between dispatches.
///
/// # Arguments
/// * `agent` - The agent receiving the events
/// * `interval_secs` - Interval in seconds between dispatches
///
/// # Returns
/// A JoinHandle for the spawned task, which can be used to abort the task
/// during graceful shutdown.
pub fn spawn_periodic_sync_task(agent: CacheAgent, interval_secs: u64) -> JoinHandle<()> {
    let interval = Duration::from_secs(interval_secs);

    tokio::spawn(async move {
        info!(
            "Starting periodic sync task with interval of {} seconds",
            interval_secs
        );

        loop {
            // Sleep for the configured interval
            tokio::time::sleep(interval).await;

            let event = AgentEvent::PeriodicSync {
                tag: STUDY_REFRESH_TAG.to_string(),
            };
            if let Err(err) = agent.dispatch(event).await {
                warn!(error = %err, "periodic sync dispatch failed");
            }
        }
    })
}
