//! Anti-forgery token handling.
//!
//! A random per-session token is embedded as a hidden field in every
//! state-mutating form and checked on every POST. The token lives in the
//! session store alongside the login state.

use base64::Engine;
use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use rand::RngCore;
use tower_sessions::Session;

use crate::error::AppError;
use crate::models::session_keys;

/// Token length in bytes before encoding.
const TOKEN_BYTES: usize = 32;

/// Get the session's anti-forgery token, creating one on first use.
///
/// # Errors
///
/// Returns `AppError::Session` if the session cannot be read or written.
pub async fn issue_token(session: &Session) -> Result<String, AppError> {
    if let Some(token) = session.get::<String>(session_keys::CSRF_TOKEN).await? {
        return Ok(token);
    }

    let token = generate_token();
    session.insert(session_keys::CSRF_TOKEN, &token).await?;
    Ok(token)
}

/// Check a submitted token against the session's token.
///
/// # Errors
///
/// Returns `AppError::InvalidCsrf` if the token is missing, the session has
/// no token, or the values differ.
pub async fn verify_token(session: &Session, submitted: &str) -> Result<(), AppError> {
    let expected: Option<String> = session.get(session_keys::CSRF_TOKEN).await?;

    match expected {
        Some(token) if !submitted.is_empty() && constant_time_eq(&token, submitted) => Ok(()),
        _ => Err(AppError::InvalidCsrf),
    }
}

fn generate_token() -> String {
    let mut bytes = [0u8; TOKEN_BYTES];
    rand::rng().fill_bytes(&mut bytes);
    URL_SAFE_NO_PAD.encode(bytes)
}

fn constant_time_eq(a: &str, b: &str) -> bool {
    let (a, b) = (a.as_bytes(), b.as_bytes());
    if a.len() != b.len() {
        return false;
    }
    a.iter().zip(b).fold(0u8, |acc, (x, y)| acc | (x ^ y)) == 0
}
