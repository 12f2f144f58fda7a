//! Authentication route handlers.
//!
//! Signup, login, and logout. Failed credentials are reported with
//! flash-style messages carried through redirect query parameters, mapped to
//! human text when the page renders.

use askama::Template;
use askama_web::WebTemplate;
use axum::{
    Form,
    extract::{Query, State},
    http::{HeaderMap, header},
    response::{IntoResponse, Redirect, Response},
};
use serde::Deserialize;
use tower_sessions::Session;

use crate::error::AppError;
use crate::filters;
use crate::forms::FieldErrors;
use crate::forms::auth::{LoginForm, SignupForm, decode_login, decode_signup};
use crate::middleware::auth::login_redirect;
use crate::middleware::{OptionalAuth, RequireAuth, clear_current_user, csrf, set_current_user};
use crate::models::CurrentUser;
use crate::services::auth::{AuthError, AuthService};
use crate::state::AppState;

// =============================================================================
// Query Types
// =============================================================================

/// Query parameters for the login page.
#[derive(Debug, Deserialize)]
pub struct LoginQuery {
    /// Destination to return to after a successful login.
    pub next: Option<String>,
    pub error: Option<String>,
}

/// Query parameters for flash-style messages.
#[derive(Debug, Deserialize)]
pub struct MessageQuery {
    pub error: Option<String>,
}

// =============================================================================
// Templates
// =============================================================================

/// Login page template.
#[derive(Template, WebTemplate)]
#[template(path = "auth/login.html")]
pub struct LoginTemplate {
    pub form: LoginForm,
    pub errors: FieldErrors,
    pub message: Option<&'static str>,
    pub action: String,
    pub csrf_token: String,
    pub current_user: Option<CurrentUser>,
}

/// Signup page template.
#[derive(Template, WebTemplate)]
#[template(path = "auth/signup.html")]
pub struct SignupTemplate {
    pub form: SignupForm,
    pub errors: FieldErrors,
    pub message: Option<&'static str>,
    pub csrf_token: String,
    pub current_user: Option<CurrentUser>,
}

fn login_message(code: &str) -> Option<&'static str> {
    match code {
        "unknown_email" => Some("User with this email does not exist"),
        "wrong_password" => Some("Password is incorrect"),
        _ => None,
    }
}

fn signup_message(code: &str) -> Option<&'static str> {
    match code {
        "email_taken" => Some("User with this email already exists"),
        _ => None,
    }
}

/// The login form posts back to itself, keeping `next` in the query string.
fn login_action(next: Option<&str>) -> String {
    next.map_or_else(|| "/login".to_owned(), login_redirect)
}

fn login_failure(code: &str, next: Option<&str>) -> String {
    match next {
        Some(next) => format!("/login?error={code}&next={}", urlencoding::encode(next)),
        None => format!("/login?error={code}"),
    }
}

// =============================================================================
// Signup
// =============================================================================

/// Display the signup page.
///
/// GET /signup
pub async fn signup_page(
    OptionalAuth(current_user): OptionalAuth,
    session: Session,
    Query(query): Query<MessageQuery>,
) -> Result<SignupTemplate, AppError> {
    let csrf_token = csrf::issue_token(&session).await?;
    Ok(SignupTemplate {
        form: SignupForm::default(),
        errors: FieldErrors::default(),
        message: query.error.as_deref().and_then(signup_message),
        csrf_token,
        current_user,
    })
}

/// Handle the signup submission.
///
/// POST /signup
///
/// A duplicate email re-shows the form with a warning and creates nothing.
pub async fn signup(
    State(state): State<AppState>,
    session: Session,
    Form(form): Form<SignupForm>,
) -> Result<Response, AppError> {
    csrf::verify_token(&session, &form.csrf_token).await?;

    let data = match decode_signup(&form) {
        Ok(data) => data,
        Err(errors) => {
            let csrf_token = csrf::issue_token(&session).await?;
            return Ok(SignupTemplate {
                form,
                errors,
                message: None,
                csrf_token,
                current_user: None,
            }
            .into_response());
        }
    };

    match AuthService::new(state.pool())
        .signup(&data.email, &data.name, &data.password)
        .await
    {
        Ok(_) => Ok(Redirect::to("/login").into_response()),
        Err(AuthError::EmailTaken) => Ok(Redirect::to("/signup?error=email_taken").into_response()),
        Err(e) => Err(e.into()),
    }
}

// =============================================================================
// Login
// =============================================================================

/// Display the login page.
///
/// GET /login
pub async fn login_page(
    OptionalAuth(current_user): OptionalAuth,
    session: Session,
    Query(query): Query<LoginQuery>,
) -> Result<LoginTemplate, AppError> {
    let csrf_token = csrf::issue_token(&session).await?;
    Ok(LoginTemplate {
        form: LoginForm::default(),
        errors: FieldErrors::default(),
        message: query.error.as_deref().and_then(login_message),
        action: login_action(query.next.as_deref()),
        csrf_token,
        current_user,
    })
}

/// Handle the login submission.
///
/// POST /login
///
/// "No such email" and "wrong password" get distinct messages; a successful
/// login honors the requested `next` destination when it is a local path.
pub async fn login(
    State(state): State<AppState>,
    session: Session,
    Query(query): Query<LoginQuery>,
    Form(form): Form<LoginForm>,
) -> Result<Response, AppError> {
    csrf::verify_token(&session, &form.csrf_token).await?;

    let data = match decode_login(&form) {
        Ok(data) => data,
        Err(errors) => {
            let csrf_token = csrf::issue_token(&session).await?;
            return Ok(LoginTemplate {
                form,
                errors,
                message: None,
                action: login_action(query.next.as_deref()),
                csrf_token,
                current_user: None,
            }
            .into_response());
        }
    };

    match AuthService::new(state.pool())
        .login(&data.email, &data.password)
        .await
    {
        Ok(user) => {
            set_current_user(&session, &CurrentUser::from(&user)).await?;

            let destination = query
                .next
                .as_deref()
                .filter(|n| n.starts_with('/') && !n.starts_with("//"))
                .unwrap_or("/");
            Ok(Redirect::to(destination).into_response())
        }
        Err(AuthError::UnknownEmail) => {
            Ok(Redirect::to(&login_failure("unknown_email", query.next.as_deref())).into_response())
        }
        Err(AuthError::WrongPassword) => Ok(Redirect::to(&login_failure(
            "wrong_password",
            query.next.as_deref(),
        ))
        .into_response()),
        Err(e) => Err(e.into()),
    }
}

// =============================================================================
// Logout
// =============================================================================

/// Handle logout.
///
/// GET /logout
///
/// Unconditionally destroys the session and returns to the referring page.
pub async fn logout(
    RequireAuth(_user): RequireAuth,
    session: Session,
    headers: HeaderMap,
) -> Result<Response, AppError> {
    clear_current_user(&session).await?;
    session.flush().await?;

    let referrer = headers
        .get(header::REFERER)
        .and_then(|v| v.to_str().ok())
        .unwrap_or("/");
    Ok(Redirect::to(referrer).into_response())
}
