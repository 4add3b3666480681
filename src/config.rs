//! Configuration Module
//!
//! Handles loading and managing agent configuration from environment variables,
//! plus the fixed seed manifest and cache-eligibility allowlist.

use std::env;

use url::Url;

// == Fixed Lists ==
/// Same-origin paths cached at install time (the offline app shell).
const SEED_PATHS: &[&str] = &["/", "/index.html", "/manifest.json"];

/// Pinned third-party assets the shell needs for first paint offline.
const SEED_ASSETS: &[&str] = &[
    "https://fonts.googleapis.com/css2?family=Inter:wght@400;600&display=swap",
    "https://cdn.jsdelivr.net/npm/idb@8/build/umd.js",
];

/// Third-party hosts whose responses may be written to the cache.
const ELIGIBLE_HOSTS: &[&str] = &[
    "fonts.googleapis.com",
    "fonts.gstatic.com",
    "cdn.jsdelivr.net",
];

const DEFAULT_APP_ORIGIN: &str = "http://localhost:8080";

/// Agent configuration parameters.
///
/// All values can be configured via environment variables with sensible defaults.
#[derive(Debug, Clone)]
pub struct AgentConfig {
    /// Name of the current cache generation; changing it invalidates all
    /// prior offline state on the next deploy
    pub cache_version: String,
    /// Origin of the app being served offline
    pub app_origin: Url,
    /// HTTP port the agent listens on
    pub server_port: u16,
    /// Periodic-sync interval in seconds (0 disables the scheduler)
    pub periodic_sync_interval: u64,
}

impl AgentConfig {
    /// Creates a new AgentConfig by loading values from environment variables.
    ///
    /// # Environment Variables
    /// - `CACHE_VERSION` - Cache generation name (default: "study-cache-v1")
    /// - `APP_ORIGIN` - App origin (default: "http://localhost:8080")
    /// - `AGENT_PORT` - HTTP port (default: 3000)
    /// - `PERIODIC_SYNC_INTERVAL` - Periodic-sync interval in seconds (default: 0)
    pub fn from_env() -> Self {
        Self {
            cache_version: env::var("CACHE_VERSION").unwrap_or_else(|_| "study-cache-v1".into()),
            app_origin: env::var("APP_ORIGIN")
                .ok()
                .and_then(|v| Url::parse(&v).ok())
                .unwrap_or_else(default_app_origin),
            server_port: env::var("AGENT_PORT")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(3000),
            periodic_sync_interval: env::var("PERIODIC_SYNC_INTERVAL")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(0),
        }
    }

    // == Seed Manifest ==
    /// Returns the fixed list of URLs cached at install time: the app shell
    /// document, its entry points and manifest, and pinned third-party assets.
    pub fn seed_manifest(&self) -> Vec<Url> {
        let mut seeds: Vec<Url> = SEED_PATHS.iter().map(|p| self.resolve(p)).collect();
        seeds.extend(SEED_ASSETS.iter().filter_map(|a| Url::parse(a).ok()));
        seeds
    }

    /// URL of the app shell document served as the navigation fallback.
    pub fn shell_url(&self) -> Url {
        self.resolve("/index.html")
    }

    // == Eligibility ==
    /// Whether a URL's origin is allowed to be written to the cache.
    ///
    /// The app's own origin is always eligible; cross-origin responses are
    /// eligible only for the fixed third-party host allowlist.
    pub fn is_eligible(&self, url: &Url) -> bool {
        if url.origin() == self.app_origin.origin() {
            return true;
        }
        url.host_str()
            .map(|host| ELIGIBLE_HOSTS.contains(&host))
            .unwrap_or(false)
    }

    // == Resolve ==
    /// Resolves a possibly-relative path against the app origin.
    ///
    /// Absolute URLs pass through unchanged; anything unjoinable falls back
    /// to the app root.
    pub fn resolve(&self, path: &str) -> Url {
        if let Ok(url) = Url::parse(path) {
            return url;
        }
        self.app_origin
            .join(path)
            .unwrap_or_else(|_| self.app_origin.clone())
    }
}

impl Default for AgentConfig {
    fn default() -> Self {
        Self {
            cache_version: "study-cache-v1".to_string(),
            app_origin: default_app_origin(),
            server_port: 3000,
            periodic_sync_interval: 0,
        }
    }
}

fn default_app_origin() -> Url {
    Url::parse(DEFAULT_APP_ORIGIN).expect("default app origin is a valid URL")
}
