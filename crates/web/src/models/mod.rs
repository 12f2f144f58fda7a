//! Domain models for the café directory.

pub mod cafe;
pub mod session;
pub mod user;

pub use cafe::{Cafe, CafeDraft};
pub use session::{CurrentUser, session_keys};
pub use user::User;
