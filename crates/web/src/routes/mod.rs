//! HTTP route handlers.
//!
//! # Route Structure
//!
//! ```text
//! GET       /                     - Café listing
//! GET       /cafe/{id}            - Café detail (404 if absent)
//! GET  POST /cafe/add             - Add a café (auth required)
//! GET  POST /cafe/{id}/edit       - Edit a café (auth required)
//! GET  POST /cafe/{id}/delete     - Delete confirmation (auth required)
//! GET  POST /signup               - Create an account
//! GET  POST /login                - Establish a session
//! GET       /logout               - Destroy the session (auth required)
//! GET  POST /edit_profile         - Change display name (auth required)
//! GET       /health               - Liveness check
//! ```

pub mod account;
pub mod auth;
pub mod cafes;

use axum::{Router, routing::get};

use crate::state::AppState;

/// Create all application routes.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(cafes::index))
        .route("/cafe/{cafe_id}", get(cafes::show))
        .route("/cafe/add", get(cafes::add_page).post(cafes::add_submit))
        .route(
            "/cafe/{cafe_id}/edit",
            get(cafes::edit_page).post(cafes::edit_submit),
        )
        .route(
            "/cafe/{cafe_id}/delete",
            get(cafes::delete_page).post(cafes::delete_submit),
        )
        .route("/signup", get(auth::signup_page).post(auth::signup))
        .route("/login", get(auth::login_page).post(auth::login))
        .route("/logout", get(auth::logout))
        .route(
            "/edit_profile",
            get(account::edit_profile_page).post(account::edit_profile),
        )
}

/// Liveness health check endpoint.
///
/// Returns "ok" if the server is running. Does not check dependencies.
pub async fn health() -> &'static str {
    "ok"
}
