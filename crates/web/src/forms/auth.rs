//! Signup, login, and profile forms.

use serde::Deserialize;
use validator::Validate;

use cuppa_core::Email;

use super::FieldErrors;

/// Raw signup form input.
#[derive(Debug, Clone, Default, Deserialize, Validate)]
pub struct SignupForm {
    #[serde(default)]
    pub email: String,
    #[validate(length(min = 1, message = "Name is required"))]
    #[serde(default)]
    pub name: String,
    #[validate(length(min = 8, message = "Password must be at least 8 characters"))]
    #[serde(default)]
    pub password: String,
    #[serde(default)]
    pub csrf_token: String,
}

/// Validated signup values.
#[derive(Debug, Clone)]
pub struct SignupData {
    pub email: Email,
    pub name: String,
    pub password: String,
}

/// Validate raw signup input.
///
/// # Errors
///
/// Returns the per-field messages if any rule fails.
pub fn decode_signup(form: &SignupForm) -> Result<SignupData, FieldErrors> {
    let mut errors = FieldErrors::from_validation(form.validate());
    let email = parse_email(&mut errors, &form.email);

    match (errors.is_empty(), email) {
        (true, Some(email)) => Ok(SignupData {
            email,
            name: form.name.clone(),
            password: form.password.clone(),
        }),
        _ => Err(errors),
    }
}

/// Raw login form input.
#[derive(Debug, Clone, Default, Deserialize, Validate)]
pub struct LoginForm {
    #[serde(default)]
    pub email: String,
    #[validate(length(min = 8, message = "Password must be at least 8 characters"))]
    #[serde(default)]
    pub password: String,
    #[serde(default)]
    pub csrf_token: String,
}

/// Validated login values.
#[derive(Debug, Clone)]
pub struct LoginData {
    pub email: Email,
    pub password: String,
}

/// Validate raw login input.
///
/// # Errors
///
/// Returns the per-field messages if any rule fails.
pub fn decode_login(form: &LoginForm) -> Result<LoginData, FieldErrors> {
    let mut errors = FieldErrors::from_validation(form.validate());
    let email = parse_email(&mut errors, &form.email);

    match (errors.is_empty(), email) {
        (true, Some(email)) => Ok(LoginData {
            email,
            password: form.password.clone(),
        }),
        _ => Err(errors),
    }
}

/// Raw edit-profile form input.
#[derive(Debug, Clone, Default, Deserialize, Validate)]
pub struct ProfileForm {
    #[validate(length(min = 1, message = "Name is required"))]
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub csrf_token: String,
}

/// Validated edit-profile values.
#[derive(Debug, Clone)]
pub struct ProfileData {
    pub name: String,
}

/// Validate raw edit-profile input.
///
/// # Errors
///
/// Returns the per-field messages if any rule fails.
pub fn decode_profile(form: &ProfileForm) -> Result<ProfileData, FieldErrors> {
    let errors = FieldErrors::from_validation(form.validate());
    if errors.is_empty() {
        Ok(ProfileData {
            name: form.name.clone(),
        })
    } else {
        Err(errors)
    }
}

fn parse_email(errors: &mut FieldErrors, raw: &str) -> Option<Email> {
    match Email::parse(raw) {
        Ok(email) => Some(email),
        Err(e) => {
            errors.insert("email", e.to_string());
            None
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_signup_valid() {
        let form = SignupForm {
            email: "ada@example.com".to_owned(),
            name: "Ada".to_owned(),
            password: "correct horse".to_owned(),
            csrf_token: String::new(),
        };
        let data = decode_signup(&form).unwrap();
        assert_eq!(data.email.as_str(), "ada@example.com");
        assert_eq!(data.name, "Ada");
    }

    #[test]
    fn test_signup_empty_submission_rejected() {
        let errors = decode_signup(&SignupForm::default()).unwrap_err();
        assert!(errors.field("email").is_some());
        assert!(errors.field("name").is_some());
        assert!(errors.field("password").is_some());
    }

    #[test]
    fn test_signup_short_password_rejected() {
        let form = SignupForm {
            email: "ada@example.com".to_owned(),
            name: "Ada".to_owned(),
            password: "short".to_owned(),
            csrf_token: String::new(),
        };
        let errors = decode_signup(&form).unwrap_err();
        assert_eq!(
            errors.field("password"),
            Some("Password must be at least 8 characters")
        );
    }

    #[test]
    fn test_login_rejects_malformed_email() {
        let form = LoginForm {
            email: "not-an-email".to_owned(),
            password: "correct horse".to_owned(),
            csrf_token: String::new(),
        };
        let errors = decode_login(&form).unwrap_err();
        assert!(errors.field("email").is_some());
    }

    #[test]
    fn test_profile_requires_name() {
        let errors = decode_profile(&ProfileForm::default()).unwrap_err();
        assert_eq!(errors.field("name"), Some("Name is required"));
    }
}
