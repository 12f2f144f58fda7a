//! User domain types.

use cuppa_core::{Email, UserId};

/// A site account.
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct User {
    /// Unique user ID.
    pub id: UserId,
    /// Email address, globally unique, used as the login identifier.
    pub email: Email,
    /// Argon2 hash of the password. Never empty, never the plaintext.
    pub password_hash: String,
    /// Display name, mutable via edit-profile.
    pub name: String,
}
