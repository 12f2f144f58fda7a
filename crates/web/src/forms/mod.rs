//! Form schemas and validation.
//!
//! Each user-facing form has a raw struct deserialized from the request body
//! and a pure `decode` function that turns it into a validated value set (or
//! a per-field error map). The inverse `encode` functions load entity
//! attributes back into raw field values for edit flows, keeping validation
//! logic independent of presentation.

pub mod auth;
pub mod cafe;

use std::borrow::Cow;
use std::collections::BTreeMap;

use validator::ValidationErrors;

pub use auth::{LoginData, LoginForm, ProfileData, ProfileForm, SignupData, SignupForm};
pub use cafe::{CafeForm, DeleteCafeForm};

/// Per-field validation messages, keyed by form field name.
///
/// Only the first message recorded for a field is kept.
#[derive(Debug, Clone, Default)]
pub struct FieldErrors(BTreeMap<String, String>);

impl FieldErrors {
    /// Record a message for a field unless one is already present.
    pub fn insert(&mut self, field: &str, message: impl Into<String>) {
        self.0
            .entry(field.to_owned())
            .or_insert_with(|| message.into());
    }

    /// The message for a field, if any. Used by form templates.
    #[must_use]
    pub fn field(&self, name: &str) -> Option<&str> {
        self.0.get(name).map(String::as_str)
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Collect the outcome of a `validator` derive check.
    #[must_use]
    pub fn from_validation(result: Result<(), ValidationErrors>) -> Self {
        result.err().map(Self::from).unwrap_or_default()
    }
}

impl From<ValidationErrors> for FieldErrors {
    fn from(errors: ValidationErrors) -> Self {
        let mut fields = BTreeMap::new();
        for (field, errs) in errors.field_errors() {
            if let Some(err) = errs.first() {
                let message = err
                    .message
                    .clone()
                    .map_or_else(|| err.code.to_string(), Cow::into_owned);
                fields.entry(field.to_string()).or_insert(message);
            }
        }
        Self(fields)
    }
}
