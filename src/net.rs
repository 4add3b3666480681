//! Network transport
//!
//! The `Fetcher` trait is the agent's only route to the live network. The
//! binary wires in the reqwest-backed `HttpFetcher`; tests use the canned
//! `StaticFetcher`.

use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Mutex;

use async_trait::async_trait;

use crate::cache::CachedResponse;
use crate::error::{AgentError, Result};
use crate::models::FetchRequest;

// == Network Response ==
/// A response as it came off the wire.
#[derive(Debug, Clone)]
pub struct NetworkResponse {
    /// HTTP status code
    pub status: u16,
    /// Status reason phrase
    pub reason: String,
    /// Response headers
    pub headers: HashMap<String, String>,
    /// Response body
    pub body: Vec<u8>,
}

impl NetworkResponse {
    /// Creates a bodyless 200 response.
    pub fn ok(body: Vec<u8>) -> Self {
        Self {
            status: 200,
            reason: "OK".to_string(),
            headers: HashMap::new(),
            body,
        }
    }

    /// Creates a response with an arbitrary status.
    pub fn with_status(status: u16, reason: impl Into<String>) -> Self {
        Self {
            status,
            reason: reason.into(),
            headers: HashMap::new(),
            body: Vec::new(),
        }
    }

    /// Whether this response may be written to the cache.
    pub fn is_cacheable_status(&self) -> bool {
        self.status == 200
    }
}

impl From<NetworkResponse> for CachedResponse {
    fn from(response: NetworkResponse) -> Self {
        CachedResponse::new(
            response.status,
            response.reason,
            response.headers,
            response.body,
        )
    }
}

// == Fetcher Trait ==
/// Issues live network requests on behalf of the agent.
#[async_trait]
pub trait Fetcher: Send + Sync {
    /// Performs the request and returns the raw response.
    ///
    /// A transport-level failure (unreachable network, refused connection)
    /// is an error; a non-success HTTP status is a normal response.
    async fn fetch(&self, request: &FetchRequest) -> Result<NetworkResponse>;
}

// == HTTP Fetcher ==
/// Production fetcher backed by a reqwest client.
#[derive(Debug, Default)]
pub struct HttpFetcher {
    client: reqwest::Client,
}

impl HttpFetcher {
    /// Creates a fetcher with a fresh client.
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl Fetcher for HttpFetcher {
    async fn fetch(&self, request: &FetchRequest) -> Result<NetworkResponse> {
        let method = reqwest::Method::from_bytes(request.method.as_bytes())
            .map_err(|e| AgentError::Network(format!("invalid method: {}", e)))?;

        let response = self
            .client
            .request(method, request.url.clone())
            .send()
            .await
            .map_err(|e| AgentError::Network(e.to_string()))?;

        let status = response.status();
        let headers = response
            .headers()
            .iter()
            .filter_map(|(name, value)| {
                value
                    .to_str()
                    .ok()
                    .map(|v| (name.to_string(), v.to_string()))
            })
            .collect();
        let body = response
            .bytes()
            .await
            .map_err(|e| AgentError::Network(e.to_string()))?
            .to_vec();

        Ok(NetworkResponse {
            status: status.as_u16(),
            reason: status.canonical_reason().unwrap_or("").to_string(),
            headers,
            body,
        })
    }
}

// == Static Fetcher ==
/// Canned-response fetcher for tests.
///
/// Serves a fixed URL → response map, records every request it sees, and can
/// be switched offline to simulate an unreachable network.
#[derive(Debug, Default)]
pub struct StaticFetcher {
    responses: Mutex<HashMap<String, NetworkResponse>>,
    requests: Mutex<Vec<String>>,
    offline: AtomicBool,
}

impl StaticFetcher {
    /// Creates an empty fetcher (every request fails until routes exist).
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a response for a URL.
    pub fn insert(&self, url: &str, response: NetworkResponse) {
        self.responses
            .lock()
            .expect("responses lock poisoned")
            .insert(url.to_string(), response);
    }

    /// Registers a status-200 response with the given body.
    pub fn insert_ok(&self, url: &str, body: &[u8]) {
        self.insert(url, NetworkResponse::ok(body.to_vec()));
    }

    /// Switches the simulated network on or off.
    pub fn set_offline(&self, offline: bool) {
        self.offline.store(offline, Ordering::SeqCst);
    }

    /// Every URL fetched so far, in order.
    pub fn requests(&self) -> Vec<String> {
        self.requests
            .lock()
            .expect("requests lock poisoned")
            .clone()
    }

    /// Number of requests that reached this fetcher.
    pub fn request_count(&self) -> usize {
        self.requests.lock().expect("requests lock poisoned").len()
    }
}

#[async_trait]
impl Fetcher for StaticFetcher {
    async fn fetch(&self, request: &FetchRequest) -> Result<NetworkResponse> {
        self.requests
            .lock()
            .expect("requests lock poisoned")
            .push(request.url.to_string());

        if self.offline.load(Ordering::SeqCst) {
            return Err(AgentError::Network("network unreachable".to_string()));
        }

        self.responses
            .lock()
            .expect("responses lock poisoned")
            .get(request.url.as_str())
            .cloned()
            .ok_or_else(|| AgentError::Network(format!("no route to {}", request.url)))
    }
}

// == Unit Tests ==
#[cfg(test)]
mod tests {
    use super::*;
    use url::Url;

    fn request(url: &str) -> FetchRequest {
        FetchRequest::get(Url::parse(url).unwrap())
    }

    #[tokio::test]
    async fn test_static_fetcher_serves_registered_response() {
        let fetcher = StaticFetcher::new();
        fetcher.insert_ok("http://localhost:8080/", b"<html>");

        let response = fetcher.fetch(&request("http://localhost:8080/")).await.unwrap();
        assert_eq!(response.status, 200);
        assert_eq!(response.body, b"<html>");
    }

    #[tokio::test]
    async fn test_static_fetcher_unknown_url_is_network_error() {
        let fetcher = StaticFetcher::new();

        let result = fetcher.fetch(&request("http://localhost:8080/missing")).await;
        assert!(matches!(result, Err(AgentError::Network(_))));
    }

    #[tokio::test]
    async fn test_static_fetcher_offline_switch() {
        let fetcher = StaticFetcher::new();
        fetcher.insert_ok("http://localhost:8080/", b"<html>");
        fetcher.set_offline(true);

        let result = fetcher.fetch(&request("http://localhost:8080/")).await;
        assert!(matches!(result, Err(AgentError::Network(_))));

        fetcher.set_offline(false);
        assert!(fetcher.fetch(&request("http://localhost:8080/")).await.is_ok());
    }

    #[tokio::test]
    async fn test_static_fetcher_records_requests() {
        let fetcher = StaticFetcher::new();
        fetcher.insert_ok("http://localhost:8080/a", b"a");

        let _ = fetcher.fetch(&request("http://localhost:8080/a")).await;
        let _ = fetcher.fetch(&request("http://localhost:8080/b")).await;

        assert_eq!(
            fetcher.requests(),
            vec!["http://localhost:8080/a", "http://localhost:8080/b"]
        );
    }

    #[test]
    fn test_cacheable_status() {
        assert!(NetworkResponse::ok(Vec::new()).is_cacheable_status());
        assert!(!NetworkResponse::with_status(301, "Moved Permanently").is_cacheable_status());
        assert!(!NetworkResponse::with_status(500, "Internal Server Error").is_cacheable_status());
    }

    #[test]
    fn test_snapshot_conversion_preserves_fields() {
        let mut response = NetworkResponse::ok(b"body".to_vec());
        response
            .headers
            .insert("content-type".to_string(), "text/html".to_string());

        let snapshot: CachedResponse = response.into();
        assert_eq!(snapshot.status, 200);
        assert_eq!(snapshot.body, b"body");
        assert_eq!(
            snapshot.headers.get("content-type").map(String::as_str),
            Some("text/html")
        );
    }
}
