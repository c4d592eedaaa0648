//! Supplement Cache - operational server
//!
//! Composition root: builds every cache once, warms what needs warming and
//! serves the operational API until SIGINT/SIGTERM.

use std::net::SocketAddr;

use anyhow::Context;
use tokio::signal;
use tokio::task::JoinHandle;
use tracing::{error, info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use supplement_cache::api::{create_router, AppState};
use supplement_cache::domain::{InMemoryRoleStore, JsonFileRoleSeeder, RoleCache};
use supplement_cache::trie::{Vocabulary, VocabularyStore};
use supplement_cache::{spawn_cleanup_task, spawn_daily_reset_task, spawn_flush_task, Config};

/// Main entry point for the supplement cache server.
///
/// # Startup Sequence
/// 1. Initialize tracing subscriber for logging
/// 2. Load configuration from environment variables
/// 3. Load the autocomplete vocabulary, falling back to the built-in seed
/// 4. Create the caches and warm the role cache if a seed file is configured
/// 5. Start background cleanup, flush and daily reset tasks
/// 6. Serve HTTP until SIGINT/SIGTERM, then flush the vocabulary
#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // RUST_LOG overrides the default filter
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "supplement_cache=info,tower_http=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting supplement cache server");

    let config = Config::from_env();
    info!(
        max_entries = config.max_entries,
        default_ttl = config.default_ttl,
        port = config.server_port,
        cleanup_interval = config.cleanup_interval,
        vocabulary_dir = ?config.vocabulary_dir,
        "configuration loaded"
    );

    let vocabulary = Vocabulary::initialize(VocabularyStore::new(&config.vocabulary_dir)).await;
    let mut state = AppState::from_config(&config, vocabulary);

    if let Some(path) = config.role_seed_file.clone() {
        let seeder = JsonFileRoleSeeder::new(path);
        let seed_path = seeder.path().display().to_string();
        state = state.with_role_cache(RoleCache::with_seeder(InMemoryRoleStore::new(), seeder));

        let warmed = state
            .roles
            .reload()
            .await
            .with_context(|| format!("loading roles from {}", seed_path));
        if let Err(e) = warmed {
            // Serving without roles only denies privileged actions; lookups retry
            warn!(error = %format!("{:#}", e), "role cache warm-up failed, starting empty");
        }
    }

    let tasks = vec![
        spawn_cleanup_task(
            "product_lists",
            state.products.shared().clone(),
            config.cleanup_interval(),
        ),
        spawn_cleanup_task(
            "leaderboard",
            state.leaderboard.shared().clone(),
            config.cleanup_interval(),
        ),
        spawn_flush_task(state.vocabulary.clone(), config.vocabulary_flush_interval()),
        spawn_daily_reset_task(state.products.clone(), config.daily_reset_interval()),
    ];
    info!(count = tasks.len(), "background tasks started");

    let vocabulary = state.vocabulary.clone();
    let app = create_router(state);

    let addr = SocketAddr::from(([0, 0, 0, 0], config.server_port));
    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("failed to bind {}", addr))?;
    info!("Server listening on http://{}", addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal(tasks))
        .await
        .context("server error")?;

    if vocabulary.flush().await {
        info!("vocabulary flushed on shutdown");
    }

    info!("Server shutdown complete");
    Ok(())
}

/// Waits for Ctrl+C or SIGTERM, then aborts the background tasks.
async fn shutdown_signal(tasks: Vec<JoinHandle<()>>) {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            error!(error = %e, "failed to install Ctrl+C handler");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut sigterm) => {
                sigterm.recv().await;
            }
            Err(e) => {
                error!(error = %e, "failed to install SIGTERM handler");
                std::future::pending::<()>().await;
            }
        }
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

    for task in tasks {
        task.abort();
    }
    warn!("Background tasks aborted");
}
