//! Cuppa - a café directory.
//!
//! This binary serves the café directory site.
//!
//! # Architecture
//!
//! - Axum web framework with server-side rendering
//! - Askama templates
//! - `SQLite` for café listings and accounts
//! - tower-sessions (`SQLite`-backed) for login state

#![cfg_attr(not(test), forbid(unsafe_code))]

use cuppa_web::config::AppConfig;
use cuppa_web::state::AppState;
use cuppa_web::{app, db};

#[tokio::main]
async fn main() {
    // Load configuration from environment
    let config = AppConfig::from_env().expect("Failed to load configuration");

    // Initialize tracing with EnvFilter
    // Defaults to info level for our crate if RUST_LOG is not set
    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| "cuppa_web=info,tower_http=debug".into());

    tracing_subscriber::fmt().with_env_filter(env_filter).init();

    // Initialize database connection pool
    let pool = db::create_pool(&config.database_url)
        .await
        .expect("Failed to create database pool");
    tracing::info!("Database pool created");

    // Create the schema if absent
    db::MIGRATOR
        .run(&pool)
        .await
        .expect("Failed to run database migrations");

    // Build application state and router (sessions included)
    let state = AppState::new(config.clone(), pool);
    let app = app(state).await.expect("Failed to initialize session store");

    // Start server
    let addr = config.socket_addr();
    tracing::info!("cuppa listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .expect("Failed to bind to address");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .expect("Server error");
}

/// Wait for shutdown signal (Ctrl+C or SIGTERM).
async fn shutdown_signal() {
    let ctrl_c = async {
        tokio::signal::ctrl_c()
            .await
            .expect("Failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate())
            .expect("Failed to install signal handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => {},
        () = terminate => {},
    }

    tracing::info!("Shutdown signal received, starting graceful shutdown");
}
