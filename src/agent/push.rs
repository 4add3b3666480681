//! Push and notification-click handlers
//!
//! A push with a payload becomes a displayed reminder with "open" and
//! "dismiss" actions; clicking routes back into the app by focusing an open
//! page context or opening a new one.

use tracing::{debug, info};

use super::CacheAgent;
use crate::error::{AgentError, Result};
use crate::models::{Notification, NotificationAction, NotificationClick, PushPayload};
use crate::platform::NotificationHost;

/// Default notification title when the payload omits one.
pub const DEFAULT_TITLE: &str = "Time to study!";

/// Default notification body when the payload omits one.
pub const DEFAULT_BODY: &str = "Your next study session is ready.";

/// Platform tag under which reminders are shown.
pub const NOTIFICATION_TAG: &str = "study-reminder";

impl CacheAgent {
    // == Handle Push ==
    /// Shows a reminder for one push event.
    ///
    /// No payload means nothing to show. Missing payload fields fall back to
    /// the fixed defaults; a payload that is present but unparseable is an
    /// invalid-payload error. The event is handled only once the platform
    /// has actually displayed the notification.
    pub async fn handle_push(&self, payload: Option<Vec<u8>>) -> Result<()> {
        let Some(raw) = payload else {
            debug!("push event without payload, nothing to show");
            return Ok(());
        };

        let payload: PushPayload = serde_json::from_slice(&raw)
            .map_err(|err| AgentError::InvalidPayload(format!("push payload: {}", err)))?;

        let notification = Notification {
            tag: NOTIFICATION_TAG.to_string(),
            title: payload.title.unwrap_or_else(|| DEFAULT_TITLE.to_string()),
            body: payload.body.unwrap_or_else(|| DEFAULT_BODY.to_string()),
            url: self.config.resolve(payload.url.as_deref().unwrap_or("/")),
            actions: vec![NotificationAction::Open, NotificationAction::Dismiss],
        };

        info!(title = %notification.title, url = %notification.url, "displaying notification");
        self.notifications.show(&notification).await
    }

    // == Handle Notification Click ==
    /// Routes one notification click.
    ///
    /// The notification is always dismissed first. "open" and bare body
    /// clicks focus an open page context on the app's origin when one
    /// exists, otherwise open a new context at the notification's target.
    pub async fn handle_notification_click(&self, click: NotificationClick) -> Result<()> {
        let tag = click.tag.as_deref().unwrap_or(NOTIFICATION_TAG);
        self.notifications.close(tag).await?;

        if click.action == Some(NotificationAction::Dismiss) {
            return Ok(());
        }

        let target = self.config.resolve(click.url.as_deref().unwrap_or("/"));
        let mut clients = self.clients.write().await;
        let existing = clients
            .find_by_origin(&self.config.app_origin)
            .map(|client| client.id.clone());

        match existing {
            Some(id) => {
                info!(client = %id, "focusing existing page context");
                clients.focus(&id)?;
            }
            None => {
                let id = clients.open_window(target.clone());
                info!(client = %id, url = %target, "opened new page context");
            }
        }
        Ok(())
    }
}
