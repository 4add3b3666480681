//! Push payload and notification models

use serde::{Deserialize, Serialize};
use url::Url;

// == Push Payload ==
/// Structured push payload delivered by the platform.
///
/// All fields are optional; the push handler substitutes fixed defaults for
/// whatever is missing.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct PushPayload {
    /// Notification title
    #[serde(default)]
    pub title: Option<String>,
    /// Notification body text
    #[serde(default)]
    pub body: Option<String>,
    /// Target URL opened on click, possibly relative to the app origin
    #[serde(default)]
    pub url: Option<String>,
}

// == Notification Action ==
/// The two actions every displayed notification carries.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NotificationAction {
    Open,
    Dismiss,
}

// == Notification ==
/// A notification handed to the platform for display.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Notification {
    /// Platform tag identifying the notification
    pub tag: String,
    /// Title line
    pub title: String,
    /// Body text
    pub body: String,
    /// Absolute target URL opened on click
    pub url: Url,
    /// Action buttons
    pub actions: Vec<NotificationAction>,
}

// == Notification Click ==
/// A click on a displayed notification.
///
/// An absent action means the notification body itself was clicked, which
/// behaves like "open".
#[derive(Debug, Clone, Default, Deserialize)]
pub struct NotificationClick {
    /// Tag of the clicked notification
    #[serde(default)]
    pub tag: Option<String>,
    /// Action button pressed, if any
    #[serde(default)]
    pub action: Option<NotificationAction>,
    /// Target URL carried by the notification, possibly relative
    #[serde(default)]
    pub url: Option<String>,
}
