//! Offline Agent - A client-side offline caching agent
//!
//! Serves a single-page app from a versioned cache generation with
//! stale-while-revalidate freshness and offline fallbacks.

use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::Context;
use tokio::signal;
use tokio::task::JoinHandle;
use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use offline_agent::api::create_router;
use offline_agent::models::AgentEvent;
use offline_agent::net::HttpFetcher;
use offline_agent::platform::TracingNotificationHost;
use offline_agent::{spawn_periodic_sync_task, AgentConfig, AppState, CacheAgent};

/// Main entry point for the offline cache agent.
///
/// # Startup Sequence
/// 1. Initialize tracing subscriber for logging
/// 2. Load configuration from environment variables
/// 3. Build the agent over the live network transport
/// 4. Install: seed the cache generation (failure aborts; the supervisor retries)
/// 5. Activate immediately (skip the waiting hand-off)
/// 6. Start the periodic-sync scheduler if configured
/// 7. Start HTTP server on configured port
/// 8. Handle graceful shutdown on SIGINT/SIGTERM
#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing subscriber with env filter
    // Defaults to "info" level, can be overridden with RUST_LOG env var
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "offline_agent=info,tower_http=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting Offline Cache Agent");

    // Load configuration from environment variables
    let config = AgentConfig::from_env();
    info!(
        "Configuration loaded: generation={}, origin={}, port={}, periodic_sync={}s",
        config.cache_version, config.app_origin, config.server_port, config.periodic_sync_interval
    );

    // Build the agent over the live transport
    let fetcher = Arc::new(HttpFetcher::new());
    let notifications = Arc::new(TracingNotificationHost);
    let agent = CacheAgent::new(config.clone(), fetcher, notifications);

    // Seed the cache generation; a failed install leaves nothing behind and
    // the supervising runtime retries on the next start.
    agent
        .dispatch(AgentEvent::Install)
        .await
        .context("install failed")?;

    // Skip the waiting hand-off: activate right away
    agent
        .dispatch(AgentEvent::Activate)
        .await
        .context("activation failed")?;

    // Start the periodic-sync scheduler if configured
    let periodic_handle = if config.periodic_sync_interval > 0 {
        let handle = spawn_periodic_sync_task(agent.clone(), config.periodic_sync_interval);
        info!("Periodic sync task started");
        Some(handle)
    } else {
        None
    };

    // Create router with all endpoints
    let state = AppState::new(agent);
    let app = create_router(state);

    // Bind to configured port
    let addr = SocketAddr::from(([0, 0, 0, 0], config.server_port));
    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("failed to bind {}", addr))?;
    info!("Agent listening on http://{}", addr);

    // Start server with graceful shutdown
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal(periodic_handle))
        .await
        .context("server error")?;

    info!("Agent shutdown complete");
    Ok(())
}

/// Waits for shutdown signal (Ctrl+C or SIGTERM).
///
/// On shutdown signal, aborts the periodic-sync task and allows graceful
/// shutdown.
async fn shutdown_signal(periodic_handle: Option<JoinHandle<()>>) {
    let ctrl_c = async {
        signal::ctrl_c()
            .await
            .expect("Failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        signal::unix::signal(signal::unix::SignalKind::terminate())
            .expect("Failed to install SIGTERM handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            info!("Received Ctrl+C, initiating shutdown...");
        }
        _ = terminate => {
            info!("Received SIGTERM, initiating shutdown...");
        }
    }

    // Abort the periodic-sync task
    if let Some(handle) = periodic_handle {
        handle.abort();
        warn!("Periodic sync task aborted");
    }
}
