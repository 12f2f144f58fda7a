//! Authentication error types.

use thiserror::Error;

use crate::db::RepositoryError;

/// Errors that can occur during authentication operations.
#[derive(Debug, Error)]
pub enum AuthError {
    /// No account exists for the given email.
    #[error("no account with this email exists")]
    UnknownEmail,

    /// The password does not match the stored hash.
    #[error("password is incorrect")]
    WrongPassword,

    /// An account with this email already exists.
    #[error("an account with this email already exists")]
    EmailTaken,

    /// Hashing the password failed.
    #[error("failed to hash password")]
    PasswordHash,

    /// Database operation failed.
    #[error(transparent)]
    Repository(#[from] RepositoryError),
}
