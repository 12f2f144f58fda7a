//! Authentication service.
//!
//! Password signup and login on top of the user repository.

mod error;

pub use error::AuthError;

use argon2::{
    Argon2,
    password_hash::{PasswordHash, PasswordHasher, PasswordVerifier, SaltString, rand_core::OsRng},
};
use sqlx::SqlitePool;

use cuppa_core::Email;

use crate::db::RepositoryError;
use crate::db::users::UserRepository;
use crate::models::User;

/// Authentication service.
///
/// Handles account creation and credential verification.
pub struct AuthService<'a> {
    users: UserRepository<'a>,
}

impl<'a> AuthService<'a> {
    /// Create a new authentication service.
    #[must_use]
    pub const fn new(pool: &'a SqlitePool) -> Self {
        Self {
            users: UserRepository::new(pool),
        }
    }

    /// Register a new account.
    ///
    /// Password rules (minimum length) are enforced at the form layer; the
    /// email unique index is the last-resort guard against duplicates.
    ///
    /// # Errors
    ///
    /// Returns `AuthError::EmailTaken` if the email is already registered.
    pub async fn signup(
        &self,
        email: &Email,
        name: &str,
        password: &str,
    ) -> Result<User, AuthError> {
        let password_hash = hash_password(password)?;

        self.users
            .create(email, name, &password_hash)
            .await
            .map_err(|e| match e {
                RepositoryError::Conflict(_) => AuthError::EmailTaken,
                other => AuthError::Repository(other),
            })
    }

    /// Login with email and password.
    ///
    /// The two failure cases are distinguished only for user-facing
    /// messaging.
    ///
    /// # Errors
    ///
    /// Returns `AuthError::UnknownEmail` if no account has this email, and
    /// `AuthError::WrongPassword` if the password doesn't verify.
    pub async fn login(&self, email: &Email, password: &str) -> Result<User, AuthError> {
        let user = self
            .users
            .get_by_email(email)
            .await?
            .ok_or(AuthError::UnknownEmail)?;

        verify_password(password, &user.password_hash)?;

        Ok(user)
    }
}

/// Hash a password using Argon2id.
fn hash_password(password: &str) -> Result<String, AuthError> {
    let salt = SaltString::generate(&mut OsRng);
    let argon2 = Argon2::default();

    argon2
        .hash_password(password.as_bytes(), &salt)
        .map(|hash| hash.to_string())
        .map_err(|_| AuthError::PasswordHash)
}

/// Verify a password against a hash.
fn verify_password(password: &str, hash: &str) -> Result<(), AuthError> {
    let parsed_hash = PasswordHash::new(hash).map_err(|_| AuthError::WrongPassword)?;
    let argon2 = Argon2::default();

    argon2
        .verify_password(password.as_bytes(), &parsed_hash)
        .map_err(|_| AuthError::WrongPassword)
}
