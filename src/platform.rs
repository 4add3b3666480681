//! Platform services
//!
//! Page contexts (clients) and notification display, the two host-platform
//! surfaces the agent drives beyond the network.

use std::collections::HashMap;

use async_trait::async_trait;
use tracing::info;
use url::Url;

use crate::error::{AgentError, Result};
use crate::models::Notification;

// == Page Client ==
/// One open page context known to the agent.
#[derive(Debug, Clone)]
pub struct PageClient {
    /// Client identifier
    pub id: String,
    /// Current page URL
    pub url: Url,
    /// Whether the context currently has focus
    pub focused: bool,
    /// Whether this agent controls the context
    pub controlled: bool,
}

// == Client Registry ==
/// Registry of open page contexts.
#[derive(Debug, Default)]
pub struct ClientRegistry {
    clients: HashMap<String, PageClient>,
    next_id: u64,
    claimed: bool,
}

impl ClientRegistry {
    /// Creates an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    // == Register ==
    /// Adds a page context and returns its id.
    pub fn register(&mut self, url: Url) -> String {
        self.next_id += 1;
        let id = format!("client-{}", self.next_id);
        self.clients.insert(
            id.clone(),
            PageClient {
                id: id.clone(),
                url,
                focused: false,
                controlled: self.claimed,
            },
        );
        id
    }

    /// Removes a page context.
    pub fn remove(&mut self, id: &str) -> Option<PageClient> {
        self.clients.remove(id)
    }

    /// Returns a page context by id.
    pub fn get(&self, id: &str) -> Option<&PageClient> {
        self.clients.get(id)
    }

    // == Find By Origin ==
    /// Finds any open context whose URL shares the given origin.
    pub fn find_by_origin(&self, origin: &Url) -> Option<&PageClient> {
        self.clients
            .values()
            .find(|client| client.url.origin() == origin.origin())
    }

    // == Focus ==
    /// Focuses a context, unfocusing the others.
    pub fn focus(&mut self, id: &str) -> Result<()> {
        if !self.clients.contains_key(id) {
            return Err(AgentError::Client(format!("no client {}", id)));
        }
        for client in self.clients.values_mut() {
            client.focused = client.id == id;
        }
        Ok(())
    }

    // == Open Window ==
    /// Opens a new focused page context at a URL and returns its id.
    pub fn open_window(&mut self, url: Url) -> String {
        let id = self.register(url);
        // A freshly opened window always takes focus.
        for client in self.clients.values_mut() {
            client.focused = client.id == id;
        }
        id
    }

    // == Claim ==
    /// Takes control of every open context without a reload.
    pub fn claim_all(&mut self) {
        self.claimed = true;
        for client in self.clients.values_mut() {
            client.controlled = true;
        }
    }

    /// Whether claim has happened.
    pub fn is_claimed(&self) -> bool {
        self.claimed
    }

    /// Number of open contexts.
    pub fn len(&self) -> usize {
        self.clients.len()
    }

    /// Returns true if no contexts are open.
    pub fn is_empty(&self) -> bool {
        self.clients.is_empty()
    }
}

// == Notification Host ==
/// Displays and closes notifications on behalf of the agent.
#[async_trait]
pub trait NotificationHost: Send + Sync {
    /// Shows a notification. The event handling the push is not complete
    /// until this returns.
    async fn show(&self, notification: &Notification) -> Result<()>;

    /// Closes the notification with the given tag.
    async fn close(&self, tag: &str) -> Result<()>;
}

// == Tracing Notification Host ==
/// Notification host that renders to the log, used by the binary.
#[derive(Debug, Default)]
pub struct TracingNotificationHost;

#[async_trait]
impl NotificationHost for TracingNotificationHost {
    async fn show(&self, notification: &Notification) -> Result<()> {
        info!(
            tag = %notification.tag,
            title = %notification.title,
            url = %notification.url,
            "showing notification"
        );
        Ok(())
    }

    async fn close(&self, tag: &str) -> Result<()> {
        info!(tag = %tag, "closing notification");
        Ok(())
    }
}
