//! Integration Tests for the Agent Event Surface
//!
//! Drives install/activate plus every event endpoint through the router and
//! checks the offline-serving guarantees end to end.

use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use axum::{
    body::Body,
    http::{Request, StatusCode},
    Router,
};
use serde_json::Value;
use tower::ServiceExt;
use url::Url;

use offline_agent::agent::CacheAgent;
use offline_agent::api::create_router;
use offline_agent::error::Result;
use offline_agent::models::{AgentEvent, Notification};
use offline_agent::net::StaticFetcher;
use offline_agent::platform::NotificationHost;
use offline_agent::{AgentConfig, AppState};

// == Helper Types ==

/// Notification host that records what the agent asked it to display.
#[derive(Debug, Default)]
struct RecordingNotificationHost {
    shown: Mutex<Vec<Notification>>,
    closed: Mutex<Vec<String>>,
}

impl RecordingNotificationHost {
    fn shown(&self) -> Vec<Notification> {
        self.shown.lock().unwrap().clone()
    }

    fn closed(&self) -> Vec<String> {
        self.closed.lock().unwrap().clone()
    }
}

#[async_trait]
impl NotificationHost for RecordingNotificationHost {
    async fn show(&self, notification: &Notification) -> Result<()> {
        self.shown.lock().unwrap().push(notification.clone());
        Ok(())
    }

    async fn close(&self, tag: &str) -> Result<()> {
        self.closed.lock().unwrap().push(tag.to_string());
        Ok(())
    }
}

struct TestHarness {
    app: Router,
    agent: CacheAgent,
    fetcher: Arc<StaticFetcher>,
    notifications: Arc<RecordingNotificationHost>,
}

// == Helper Functions ==

fn build_harness() -> TestHarness {
    let fetcher = Arc::new(StaticFetcher::new());
    let notifications = Arc::new(RecordingNotificationHost::default());
    let agent = CacheAgent::new(
        AgentConfig::default(),
        fetcher.clone(),
        notifications.clone(),
    );
    let app = create_router(AppState::new(agent.clone()));
    TestHarness {
        app,
        agent,
        fetcher,
        notifications,
    }
}

/// A harness whose agent has been installed and activated over a seeded
/// network.
async fn installed_harness() -> TestHarness {
    let harness = build_harness();
    for url in harness.agent.config().seed_manifest() {
        harness
            .fetcher
            .insert_ok(url.as_str(), format!("seed:{}", url.path()).as_bytes());
    }
    harness.agent.dispatch(AgentEvent::Install).await.unwrap();
    harness.agent.dispatch(AgentEvent::Activate).await.unwrap();
    harness
}

fn post_json(uri: &str, body: &str) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri(uri)
        .header("content-type", "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

async fn body_bytes(body: Body) -> Vec<u8> {
    axum::body::to_bytes(body, usize::MAX).await.unwrap().to_vec()
}

async fn body_to_json(body: Body) -> Value {
    serde_json::from_slice(&body_bytes(body).await).unwrap()
}

// == Fetch Endpoint Tests ==

#[tokio::test]
async fn test_fetch_then_offline_replay_is_byte_for_byte() {
    let harness = installed_harness().await;
    harness
        .fetcher
        .insert_ok("http://localhost:8080/api/decks", b"[{\"deck\":7}]");

    let online = harness
        .app
        .clone()
        .oneshot(post_json(
            "/fetch",
            r#"{"url":"http://localhost:8080/api/decks"}"#,
        ))
        .await
        .unwrap();
    assert_eq!(online.status(), StatusCode::OK);
    let online_body = body_bytes(online.into_body()).await;

    harness.fetcher.set_offline(true);

    let offline = harness
        .app
        .clone()
        .oneshot(post_json(
            "/fetch",
            r#"{"url":"http://localhost:8080/api/decks"}"#,
        ))
        .await
        .unwrap();
    assert_eq!(offline.status(), StatusCode::OK);
    let offline_body = body_bytes(offline.into_body()).await;

    assert_eq!(online_body, offline_body);
    assert_eq!(offline_body, b"[{\"deck\":7}]");
}

#[tokio::test]
async fn test_offline_navigation_serves_app_shell() {
    let harness = installed_harness().await;
    harness.fetcher.set_offline(true);

    let response = harness
        .app
        .clone()
        .oneshot(post_json(
            "/fetch",
            r#"{"url":"http://localhost:8080/deck/7","navigation":true}"#,
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body = body_bytes(response.into_body()).await;
    assert_eq!(body, b"seed:/index.html");
}

#[tokio::test]
async fn test_offline_non_navigation_returns_408_empty() {
    let harness = installed_harness().await;
    harness.fetcher.set_offline(true);

    let response = harness
        .app
        .clone()
        .oneshot(post_json(
            "/fetch",
            r#"{"url":"http://localhost:8080/api/progress"}"#,
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::REQUEST_TIMEOUT);
    let body = body_bytes(response.into_body()).await;
    assert!(body.is_empty());
}

#[tokio::test]
async fn test_mutating_request_is_relayed_uncached() {
    let harness = installed_harness().await;
    harness
        .fetcher
        .insert_ok("http://localhost:8080/api/decks", b"created");
    let entries_before = harness.agent.stats().await.total_entries;

    let response = harness
        .app
        .clone()
        .oneshot(post_json(
            "/fetch",
            r#"{"url":"http://localhost:8080/api/decks","method":"POST"}"#,
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(harness.agent.stats().await.total_entries, entries_before);
}

// == Message Endpoint Tests ==

#[tokio::test]
async fn test_clear_cache_message_empties_cache_until_repopulated() {
    let harness = installed_harness().await;

    let response = harness
        .app
        .clone()
        .oneshot(post_json("/message", r#"{"type":"clear-cache"}"#))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::ACCEPTED);
    assert_eq!(harness.agent.stats().await.total_entries, 0);

    // Offline navigation now has no shell to fall back on.
    harness.fetcher.set_offline(true);
    let offline = harness
        .app
        .clone()
        .oneshot(post_json(
            "/fetch",
            r#"{"url":"http://localhost:8080/","navigation":true}"#,
        ))
        .await
        .unwrap();
    assert_eq!(offline.status(), StatusCode::REQUEST_TIMEOUT);

    // A live fetch repopulates the generation.
    harness.fetcher.set_offline(false);
    harness
        .fetcher
        .insert_ok("http://localhost:8080/api/decks", b"[]");
    let _ = harness
        .app
        .clone()
        .oneshot(post_json(
            "/fetch",
            r#"{"url":"http://localhost:8080/api/decks"}"#,
        ))
        .await
        .unwrap();
    assert_eq!(harness.agent.stats().await.total_entries, 1);
}

#[tokio::test]
async fn test_unknown_message_kind_is_accepted_and_ignored() {
    let harness = installed_harness().await;
    let entries_before = harness.agent.stats().await.total_entries;

    let response = harness
        .app
        .clone()
        .oneshot(post_json("/message", r#"{"type":"future-kind","x":1}"#))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::ACCEPTED);
    assert_eq!(harness.agent.stats().await.total_entries, entries_before);
}

// == Push and Notification Tests ==

#[tokio::test]
async fn test_push_shows_notification_and_open_click_routes_to_target() {
    let harness = installed_harness().await;

    let push = harness
        .app
        .clone()
        .oneshot(post_json(
            "/push",
            r#"{"title":"Reminder","body":"Study now","url":"/session"}"#,
        ))
        .await
        .unwrap();
    assert_eq!(push.status(), StatusCode::NO_CONTENT);

    let shown = harness.notifications.shown();
    assert_eq!(shown.len(), 1);
    assert_eq!(shown[0].title, "Reminder");
    assert_eq!(shown[0].body, "Study now");
    assert_eq!(shown[0].url.as_str(), "http://localhost:8080/session");

    let click = harness
        .app
        .clone()
        .oneshot(post_json(
            "/notification-click",
            r#"{"action":"open","url":"/session"}"#,
        ))
        .await
        .unwrap();
    assert_eq!(click.status(), StatusCode::NO_CONTENT);
    assert_eq!(harness.notifications.closed().len(), 1);

    let clients = harness.agent.clients();
    let registry = clients.read().await;
    let origin = Url::parse("http://localhost:8080/").unwrap();
    let opened = registry.find_by_origin(&origin).unwrap();
    assert_eq!(opened.url.as_str(), "http://localhost:8080/session");
    assert!(opened.focused);
}

#[tokio::test]
async fn test_push_without_payload_shows_nothing() {
    let harness = installed_harness().await;

    let response = harness
        .app
        .clone()
        .oneshot(
            Request::builder()
                .method("POST")
                .uri("/push")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::NO_CONTENT);
    assert!(harness.notifications.shown().is_empty());
}

#[tokio::test]
async fn test_push_with_garbage_payload_is_rejected() {
    let harness = installed_harness().await;

    let response = harness
        .app
        .clone()
        .oneshot(
            Request::builder()
                .method("POST")
                .uri("/push")
                .body(Body::from("definitely not json"))
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert!(harness.notifications.shown().is_empty());
}

#[tokio::test]
async fn test_dismiss_click_closes_without_opening() {
    let harness = installed_harness().await;

    let response = harness
        .app
        .clone()
        .oneshot(post_json(
            "/notification-click",
            r#"{"action":"dismiss","url":"/session"}"#,
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::NO_CONTENT);
    assert_eq!(harness.notifications.closed().len(), 1);
    assert!(harness.agent.clients().read().await.is_empty());
}

// == Sync Endpoint Tests ==

#[tokio::test]
async fn test_sync_endpoints_resolve_promptly() {
    let harness = installed_harness().await;

    let sync = harness
        .app
        .clone()
        .oneshot(post_json("/sync", r#"{"tag":"study-sync"}"#))
        .await
        .unwrap();
    assert_eq!(sync.status(), StatusCode::NO_CONTENT);

    let periodic = harness
        .app
        .clone()
        .oneshot(post_json("/periodic-sync", r#"{"tag":"study-refresh"}"#))
        .await
        .unwrap();
    assert_eq!(periodic.status(), StatusCode::NO_CONTENT);
}

// == Lifecycle Tests ==

#[tokio::test]
async fn test_install_failure_leaves_nothing_addressable() {
    let harness = build_harness();
    // No seeds registered: every seed fetch fails.

    let result = harness.agent.dispatch(AgentEvent::Install).await;

    assert!(result.is_err());
    assert_eq!(harness.agent.stats().await.total_entries, 0);
}

#[tokio::test]
async fn test_health_reports_active_generation() {
    let harness = installed_harness().await;

    let response = harness
        .app
        .clone()
        .oneshot(
            Request::builder()
                .uri("/health")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let json = body_to_json(response.into_body()).await;
    assert_eq!(json["status"], "healthy");
    assert_eq!(json["state"], "active");
    assert_eq!(json["generation"], "study-cache-v1");
}

#[tokio::test]
async fn test_stats_reflect_hits_and_misses() {
    let harness = installed_harness().await;
    harness
        .fetcher
        .insert_ok("http://localhost:8080/api/decks", b"[]");

    // Miss, then hit.
    for _ in 0..2 {
        let _ = harness
            .app
            .clone()
            .oneshot(post_json(
                "/fetch",
                r#"{"url":"http://localhost:8080/api/decks"}"#,
            ))
            .await
            .unwrap();
    }

    let response = harness
        .app
        .clone()
        .oneshot(
            Request::builder()
                .uri("/stats")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    let json = body_to_json(response.into_body()).await;
    assert_eq!(json["misses"], 1);
    assert_eq!(json["hits"], 1);
    assert!(json["total_entries"].as_u64().unwrap() >= 1);
}
