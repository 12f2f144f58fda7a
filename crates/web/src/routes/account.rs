//! Account route handlers.
//!
//! These routes require authentication.

use askama::Template;
use askama_web::WebTemplate;
use axum::{
    Form,
    extract::State,
    response::{IntoResponse, Redirect, Response},
};
use tower_sessions::Session;

use crate::db::UserRepository;
use crate::error::AppError;
use crate::filters;
use crate::forms::FieldErrors;
use crate::forms::auth::{ProfileForm, decode_profile};
use crate::middleware::{RequireAuth, csrf, set_current_user};
use crate::models::CurrentUser;
use crate::state::AppState;

/// Edit-profile page template.
#[derive(Template, WebTemplate)]
#[template(path = "account/edit_profile.html")]
pub struct EditProfileTemplate {
    pub form: ProfileForm,
    pub errors: FieldErrors,
    pub csrf_token: String,
    pub current_user: Option<CurrentUser>,
}

/// Display the edit-profile form, prefilled with the current name.
///
/// GET /edit_profile
pub async fn edit_profile_page(
    RequireAuth(user): RequireAuth,
    session: Session,
) -> Result<EditProfileTemplate, AppError> {
    let csrf_token = csrf::issue_token(&session).await?;
    Ok(EditProfileTemplate {
        form: ProfileForm {
            name: user.name.clone(),
            csrf_token: String::new(),
        },
        errors: FieldErrors::default(),
        csrf_token,
        current_user: Some(user),
    })
}

/// Handle the edit-profile submission.
///
/// POST /edit_profile
///
/// Only the display name of the authenticated user is touched.
pub async fn edit_profile(
    State(state): State<AppState>,
    RequireAuth(user): RequireAuth,
    session: Session,
    Form(form): Form<ProfileForm>,
) -> Result<Response, AppError> {
    csrf::verify_token(&session, &form.csrf_token).await?;

    let data = match decode_profile(&form) {
        Ok(data) => data,
        Err(errors) => {
            let csrf_token = csrf::issue_token(&session).await?;
            return Ok(EditProfileTemplate {
                form,
                errors,
                csrf_token,
                current_user: Some(user),
            }
            .into_response());
        }
    };

    UserRepository::new(state.pool())
        .update_name(user.id, &data.name)
        .await?;

    // Keep the session identity in step with the new name.
    let refreshed = CurrentUser {
        name: data.name,
        ..user
    };
    set_current_user(&session, &refreshed).await?;

    Ok(Redirect::to("/").into_response())
}
