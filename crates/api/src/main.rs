use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use gather_admission::{Admissions, AdmissionStore, MemoryStore, StoreProfileDirectory};
use gather_api::config::ServerConfig;
use gather_api::router::build_app_router;
use gather_api::state::AppState;
use gather_events::NotificationBus;

#[tokio::main]
async fn main() {
    dotenvy::dotenv().ok();

    // --- Tracing ---
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "gather_api=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // --- Configuration ---
    let config = ServerConfig::from_env();
    tracing::info!(host = %config.host, port = %config.port, "Loaded server configuration");

    // --- Store ---
    let store: Arc<dyn AdmissionStore> = match std::env::var("DATABASE_URL") {
        Ok(database_url) => {
            let pool = gather_db::create_pool(&database_url)
                .await
                .expect("Failed to connect to database");
            tracing::info!("Database connection pool created");

            gather_db::health_check(&pool)
                .await
                .expect("Database health check failed");

            gather_db::run_migrations(&pool)
                .await
                .expect("Failed to run database migrations");
            tracing::info!("Database migrations applied");

            Arc::new(gather_db::PgStore::new(pool))
        }
        Err(_) => {
            tracing::warn!("DATABASE_URL not set, using the in-memory store");
            Arc::new(MemoryStore::new())
        }
    };

    // --- Notification bus ---
    let notification_bus = Arc::new(NotificationBus::default());

    // Drain notifications into the log; external delivery subscribes the
    // same way.
    let mut drain_rx = notification_bus.subscribe();
    let drain_handle = tokio::spawn(async move {
        while let Ok(notification) = drain_rx.recv().await {
            tracing::info!(
                kind = %notification.kind,
                user_id = %notification.user_id,
                event_id = %notification.event_id,
                "notification"
            );
        }
    });

    // --- Admission orchestrator ---
    let profiles = Arc::new(StoreProfileDirectory::new(Arc::clone(&store)));
    let admissions = Arc::new(Admissions::new(
        Arc::clone(&store),
        profiles,
        Arc::clone(&notification_bus),
    ));

    // --- App state / router ---
    let state = AppState {
        admissions,
        store,
        config: Arc::new(config.clone()),
    };
    let app = build_app_router(state, &config);

    // --- Start server ---
    let addr = SocketAddr::new(
        config.host.parse().expect("Invalid HOST address"),
        config.port,
    );
    tracing::info!(%addr, "Starting server");

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .expect("Failed to bind to address");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .expect("Server error");

    // --- Post-shutdown cleanup ---
    tracing::info!("Server stopped accepting connections, cleaning up");

    // Drop the bus sender to close the broadcast channel and stop the
    // drain task.
    drop(notification_bus);
    let _ = tokio::time::timeout(Duration::from_secs(5), drain_handle).await;

    tracing::info!("Graceful shutdown complete");
}

/// Wait for a termination signal to initiate graceful shutdown.
///
/// Handles both SIGINT (Ctrl-C) and SIGTERM (on Unix) so the server
/// shuts down cleanly whether stopped interactively or by a process
/// manager (e.g. systemd, Docker, Kubernetes).
async fn shutdown_signal() {
    let ctrl_c = async {
        tokio::signal::ctrl_c()
            .await
            .expect("Failed to install Ctrl-C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate())
            .expect("Failed to install SIGTERM handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => {
            tracing::info!("Received SIGINT (Ctrl-C), starting graceful shutdown");
        }
        () = terminate => {
            tracing::info!("Received SIGTERM, starting graceful shutdown");
        }
    }
}
