//! Platform events and control messages
//!
//! Every platform event kind maps to one `AgentEvent` variant; the agent's
//! dispatch is an explicit match over this enum rather than implicit
//! listener registration.

use serde::{Deserialize, Serialize};
use url::Url;

use crate::cache::CachedResponse;
use crate::models::push::NotificationClick;

// == Fetch Request ==
/// A network request observed by the agent.
///
/// # Fields
/// - `url`: absolute request URL
/// - `method`: HTTP method (defaults to GET)
/// - `navigation`: whether this is a page-navigation request
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FetchRequest {
    /// Request URL
    pub url: Url,
    /// HTTP method
    #[serde(default = "default_method")]
    pub method: String,
    /// Page-navigation request flag
    #[serde(default)]
    pub navigation: bool,
}

fn default_method() -> String {
    "GET".to_string()
}

impl FetchRequest {
    /// Creates a GET request.
    pub fn get(url: Url) -> Self {
        Self {
            url,
            method: default_method(),
            navigation: false,
        }
    }

    /// Creates a page-navigation GET request.
    pub fn navigation(url: Url) -> Self {
        Self {
            url,
            method: default_method(),
            navigation: true,
        }
    }

    /// Whether the method is an idempotent read.
    pub fn is_idempotent_read(&self) -> bool {
        self.method.eq_ignore_ascii_case("GET")
    }

    /// Whether the URL scheme is network-addressable.
    pub fn is_network_scheme(&self) -> bool {
        matches!(self.url.scheme(), "http" | "https")
    }

    /// Whether the agent intercepts this request at all.
    ///
    /// Mutating methods and non-network schemes (extension-internal URLs)
    /// are passed through untouched.
    pub fn is_interceptable(&self) -> bool {
        self.is_idempotent_read() && self.is_network_scheme()
    }

    /// Cache key for this request, derived from method and URL.
    pub fn cache_key(&self) -> String {
        format!("{} {}", self.method.to_uppercase(), self.url)
    }
}

// == Control Message ==
/// Structured message from the host page.
///
/// Unrecognized message kinds fail to parse and are silently ignored by the
/// handler, so future host versions can send messages this agent predates.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(tag = "type", rename_all = "kebab-case")]
pub enum ControlMessage {
    /// Bypass the waiting period and activate immediately
    ForceActivate,
    /// Delete the entire current cache generation
    ClearCache,
}

// == Sync Request ==
/// A tagged background-sync or periodic-sync event.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SyncRequest {
    /// Sync registration tag
    pub tag: String,
}

// == Lifecycle State ==
/// Where the agent is in its install/activate lifecycle.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LifecycleState {
    /// Created, nothing cached yet
    #[default]
    Parsed,
    /// Seeding the new cache generation
    Installing,
    /// Seeded, ready to take over
    Installed,
    /// Purging stale generations and claiming clients
    Activating,
    /// Controlling all page contexts
    Active,
}

impl LifecycleState {
    /// Whether the agent has finished activation.
    pub fn is_active(&self) -> bool {
        matches!(self, LifecycleState::Active)
    }
}

// == Agent Event ==
/// One platform event, dispatched to exactly one handler.
#[derive(Debug, Clone)]
pub enum AgentEvent {
    /// Seed a new cache generation
    Install,
    /// Purge stale generations and claim clients
    Activate,
    /// An intercepted network request
    Fetch(FetchRequest),
    /// A raw control message from the host page
    Message(serde_json::Value),
    /// A tagged background-sync event
    Sync { tag: String },
    /// A tagged periodic-sync event
    PeriodicSync { tag: String },
    /// A push event, possibly without payload
    Push { payload: Option<Vec<u8>> },
    /// A click on a displayed notification
    NotificationClick(NotificationClick),
}

impl AgentEvent {
    /// Stable event-kind name, used for logging.
    pub fn kind(&self) -> &'static str {
        match self {
            AgentEvent::Install => "install",
            AgentEvent::Activate => "activate",
            AgentEvent::Fetch(_) => "fetch",
            AgentEvent::Message(_) => "message",
            AgentEvent::Sync { .. } => "sync",
            AgentEvent::PeriodicSync { .. } => "periodicsync",
            AgentEvent::Push { .. } => "push",
            AgentEvent::NotificationClick(_) => "notificationclick",
        }
    }
}

// == Event Outcome ==
/// What dispatching one event produced.
#[derive(Debug, Clone, PartialEq)]
pub enum EventOutcome {
    /// Handler ran to completion with nothing to return
    Completed,
    /// A fetch event produced this response
    Response(CachedResponse),
    /// A fetch event was declined; the request goes to the network untouched
    PassedThrough,
}
