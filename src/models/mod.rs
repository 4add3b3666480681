//! Event and message models for the offline agent
//!
//! Defines the platform event kinds the agent dispatches on, the control
//! messages the host page sends, and the DTOs of the HTTP surface.

pub mod events;
pub mod push;
pub mod responses;

// Re-export commonly used types
pub use events::{
    AgentEvent, ControlMessage, EventOutcome, FetchRequest, LifecycleState, SyncRequest,
};
pub use push::{Notification, NotificationAction, NotificationClick, PushPayload};
pub use responses::{HealthResponse, StatsResponse};
