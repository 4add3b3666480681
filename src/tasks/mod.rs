//! Background Tasks Module
//!
//! Contains background tasks that run for the lifetime of the agent.
//!
//! # Tasks
//! - Periodic Sync: emits periodic-sync events at a configured interval

mod periodic;

pub use periodic::spawn_periodic_sync_task;
