//! Cuppa web application library.
//!
//! This crate provides the café directory site as a library, allowing it to
//! be tested and reused by the CLI.

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod config;
pub mod db;
pub mod error;
pub mod filters;
pub mod forms;
pub mod middleware;
pub mod models;
pub mod routes;
pub mod services;
pub mod state;

use axum::{Router, routing::get};
use tower_http::trace::TraceLayer;
use tower_sessions_sqlx_store::SqliteStore;

use crate::state::AppState;

/// Build the application router with sessions and tracing wired up.
///
/// The session table is created in the application database if absent.
///
/// # Errors
///
/// Returns `sqlx::Error` if the session store migration fails.
pub async fn app(state: AppState) -> Result<Router, sqlx::Error> {
    let session_store = SqliteStore::new(state.pool().clone());
    session_store.migrate().await?;
    let session_layer = middleware::create_session_layer(session_store, state.config());

    Ok(Router::new()
        .route("/health", get(routes::health))
        .merge(routes::router())
        .layer(session_layer)
        .with_state(state)
        .layer(TraceLayer::new_for_http()))
}
