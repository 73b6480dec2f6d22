//! Math Service - Bounded arithmetic over HTTP
//!
//! Wires the computation service to its cache, event channel and HTTP router,
//! and owns the lifecycle of the background tasks.

use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::Context;
use tokio::signal;
use tokio::task::JoinHandle;
use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use math_service::api::{create_router, AppState};
use math_service::cache::{MemoryResultCache, ResultCache};
use math_service::events::{BroadcastEmitter, EventDispatcher};
use math_service::history::MemoryOperationRepository;
use math_service::{spawn_audit_logger, spawn_cleanup_task, ComputationService, Config};

/// Main entry point for the math service.
///
/// # Startup Sequence
/// 1. Initialize tracing subscriber for logging
/// 2. Load configuration from environment variables
/// 3. Create the result cache and start the TTL cleanup task
/// 4. Create the event channel and start the audit logger
/// 5. Build the computation service, with operation history if enabled, and router
/// 6. Serve until SIGINT/SIGTERM, then stop background tasks
#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Defaults to "info" level, can be overridden with RUST_LOG env var
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "math_service=info,audit=info,tower_http=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting Math Service");

    let config = Config::from_env();
    info!(
        "Configuration loaded: port={}, cache_enabled={}, cache_ttl={}s, events_enabled={}, max_result_bits={}",
        config.server_port,
        config.cache_enabled,
        config.cache_ttl,
        config.events_enabled,
        config.max_result_bits
    );

    let mut background: Vec<JoinHandle<()>> = Vec::new();

    let cache: Option<Arc<dyn ResultCache>> = if config.cache_enabled {
        let memory = MemoryResultCache::new(config.cache_max_entries);
        background.push(spawn_cleanup_task(memory.store(), config.cleanup_interval));
        info!(max_entries = config.cache_max_entries, "Result cache initialized");
        Some(Arc::new(memory))
    } else {
        info!("Result caching disabled");
        None
    };

    let events = if config.events_enabled {
        let emitter = BroadcastEmitter::new(config.event_topic.clone(), config.event_channel_capacity);
        background.push(spawn_audit_logger(emitter.subscribe()));
        info!(topic = %config.event_topic, "Event channel initialized");
        EventDispatcher::new(Arc::new(emitter), config.emit_timeout())
    } else {
        info!("Event publishing disabled");
        EventDispatcher::disabled()
    };

    let mut service = ComputationService::from_config(&config, cache, events);
    if config.history_enabled {
        let repository = MemoryOperationRepository::new(config.history_max_entries);
        service = service.with_history(Arc::new(repository));
        info!(max_entries = config.history_max_entries, "Operation history initialized");
    } else {
        info!("Operation history disabled");
    }

    let app = create_router(AppState::new(service));

    let addr = SocketAddr::from(([0, 0, 0, 0], config.server_port));
    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("failed to bind {}", addr))?;
    info!("Server listening on http://{}", addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal(background))
        .await
        .context("server error")?;

    info!("Server shutdown complete");
    Ok(())
}

/// Waits for shutdown signal (Ctrl+C or SIGTERM), then aborts background tasks.
async fn shutdown_signal(background: Vec<JoinHandle<()>>) {
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

    for handle in &background {
        handle.abort();
    }
    warn!(tasks = background.len(), "Background tasks aborted");
}
