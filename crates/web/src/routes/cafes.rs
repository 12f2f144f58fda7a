//! Café route handlers.
//!
//! Each mutating flow is a two-step machine: show the form (blank or
//! prefilled), then validate the submission. A failed submission re-renders
//! the form with the user's in-progress values and per-field messages.

use askama::Template;
use askama_web::WebTemplate;
use axum::{
    Form,
    extract::{Path, State},
    response::{IntoResponse, Redirect, Response},
};
use tower_sessions::Session;

use cuppa_core::{CafeId, SeatsBucket};

use crate::db::{CafeRepository, RepositoryError};
use crate::error::AppError;
use crate::filters;
use crate::forms::FieldErrors;
use crate::forms::cafe::{CafeForm, DeleteCafeForm, decode, encode};
use crate::middleware::{OptionalAuth, RequireAuth, csrf};
use crate::models::{Cafe, CurrentUser};
use crate::state::AppState;

// =============================================================================
// Templates
// =============================================================================

/// Café listing page template.
#[derive(Template, WebTemplate)]
#[template(path = "index.html")]
pub struct IndexTemplate {
    pub cafes: Vec<Cafe>,
    pub current_user: Option<CurrentUser>,
}

/// Café detail page template.
#[derive(Template, WebTemplate)]
#[template(path = "cafe.html")]
pub struct CafeTemplate {
    pub cafe: Cafe,
    pub map_embed_url: Option<String>,
    pub current_user: Option<CurrentUser>,
}

/// Shared add/edit form page template.
#[derive(Template, WebTemplate)]
#[template(path = "cafe_form.html")]
pub struct CafeFormTemplate {
    pub heading: &'static str,
    pub action: String,
    pub submit_label: &'static str,
    pub form: CafeForm,
    pub errors: FieldErrors,
    pub seat_choices: Vec<String>,
    pub csrf_token: String,
    pub current_user: Option<CurrentUser>,
}

/// Delete confirmation page template.
#[derive(Template, WebTemplate)]
#[template(path = "cafe_delete.html")]
pub struct DeleteCafeTemplate {
    pub cafe: Cafe,
    pub csrf_token: String,
    pub current_user: Option<CurrentUser>,
}

fn seat_choices() -> Vec<String> {
    SeatsBucket::ALL
        .iter()
        .map(|bucket| bucket.as_str().to_owned())
        .collect()
}

async fn render_cafe_form(
    session: &Session,
    user: CurrentUser,
    heading: &'static str,
    submit_label: &'static str,
    action: String,
    form: CafeForm,
    errors: FieldErrors,
) -> Result<CafeFormTemplate, AppError> {
    let csrf_token = csrf::issue_token(session).await?;
    Ok(CafeFormTemplate {
        heading,
        action,
        submit_label,
        form,
        errors,
        seat_choices: seat_choices(),
        csrf_token,
        current_user: Some(user),
    })
}

async fn get_cafe_or_404(state: &AppState, cafe_id: i64) -> Result<Cafe, AppError> {
    CafeRepository::new(state.pool())
        .get(CafeId::new(cafe_id))
        .await?
        .ok_or_else(|| AppError::NotFound(format!("cafe {cafe_id}")))
}

// =============================================================================
// Listing and detail
// =============================================================================

/// Display the café listing.
///
/// GET /
pub async fn index(
    State(state): State<AppState>,
    OptionalAuth(current_user): OptionalAuth,
) -> Result<IndexTemplate, AppError> {
    let cafes = CafeRepository::new(state.pool()).list().await?;
    Ok(IndexTemplate {
        cafes,
        current_user,
    })
}

/// Display one café.
///
/// GET /cafe/{id}
///
/// The map embed URL is built from the configured key and the café's name
/// and location; without a key the detail page simply has no map.
pub async fn show(
    State(state): State<AppState>,
    OptionalAuth(current_user): OptionalAuth,
    Path(cafe_id): Path<i64>,
) -> Result<CafeTemplate, AppError> {
    let cafe = get_cafe_or_404(&state, cafe_id).await?;

    let map_embed_url = state.config().maps_api_key.as_ref().map(|key| {
        let query = urlencoding::encode(&format!("{},{}", cafe.name, cafe.location)).into_owned();
        format!("https://www.google.com/maps/embed/v1/search?key={key}&q={query}")
    });

    Ok(CafeTemplate {
        cafe,
        map_embed_url,
        current_user,
    })
}

// =============================================================================
// Add
// =============================================================================

/// Display the blank add-café form.
///
/// GET /cafe/add
pub async fn add_page(
    RequireAuth(user): RequireAuth,
    session: Session,
) -> Result<CafeFormTemplate, AppError> {
    render_cafe_form(
        &session,
        user,
        "Add cafe",
        "Add cafe",
        "/cafe/add".to_owned(),
        CafeForm::default(),
        FieldErrors::default(),
    )
    .await
}

/// Handle the add-café submission.
///
/// POST /cafe/add
pub async fn add_submit(
    State(state): State<AppState>,
    RequireAuth(user): RequireAuth,
    session: Session,
    Form(form): Form<CafeForm>,
) -> Result<Response, AppError> {
    csrf::verify_token(&session, &form.csrf_token).await?;

    let draft = match decode(&form) {
        Ok(draft) => draft,
        Err(errors) => {
            return Ok(render_cafe_form(
                &session,
                user,
                "Add cafe",
                "Add cafe",
                "/cafe/add".to_owned(),
                form,
                errors,
            )
            .await?
            .into_response());
        }
    };

    match CafeRepository::new(state.pool()).create(&draft).await {
        Ok(cafe) => Ok(Redirect::to(&format!("/cafe/{}", cafe.id)).into_response()),
        Err(RepositoryError::Conflict(message)) => {
            let mut errors = FieldErrors::default();
            errors.insert("name", message);
            Ok(render_cafe_form(
                &session,
                user,
                "Add cafe",
                "Add cafe",
                "/cafe/add".to_owned(),
                form,
                errors,
            )
            .await?
            .into_response())
        }
        Err(e) => Err(e.into()),
    }
}

// =============================================================================
// Edit
// =============================================================================

/// Display the edit form, prefilled from the stored café.
///
/// GET /cafe/{id}/edit
///
/// Prefilling happens only here; a failed submission re-renders the user's
/// in-progress values instead of clobbering them.
pub async fn edit_page(
    State(state): State<AppState>,
    RequireAuth(user): RequireAuth,
    session: Session,
    Path(cafe_id): Path<i64>,
) -> Result<CafeFormTemplate, AppError> {
    let cafe = get_cafe_or_404(&state, cafe_id).await?;
    render_cafe_form(
        &session,
        user,
        "Edit cafe",
        "Apply changes",
        format!("/cafe/{cafe_id}/edit"),
        encode(&cafe),
        FieldErrors::default(),
    )
    .await
}

/// Handle the edit-café submission.
///
/// POST /cafe/{id}/edit
pub async fn edit_submit(
    State(state): State<AppState>,
    RequireAuth(user): RequireAuth,
    session: Session,
    Path(cafe_id): Path<i64>,
    Form(form): Form<CafeForm>,
) -> Result<Response, AppError> {
    csrf::verify_token(&session, &form.csrf_token).await?;

    let cafe = get_cafe_or_404(&state, cafe_id).await?;

    let draft = match decode(&form) {
        Ok(draft) => draft,
        Err(errors) => {
            return Ok(render_cafe_form(
                &session,
                user,
                "Edit cafe",
                "Apply changes",
                format!("/cafe/{cafe_id}/edit"),
                form,
                errors,
            )
            .await?
            .into_response());
        }
    };

    match CafeRepository::new(state.pool()).update(cafe.id, &draft).await {
        Ok(updated) => Ok(Redirect::to(&format!("/cafe/{}", updated.id)).into_response()),
        Err(RepositoryError::Conflict(message)) => {
            let mut errors = FieldErrors::default();
            errors.insert("name", message);
            Ok(render_cafe_form(
                &session,
                user,
                "Edit cafe",
                "Apply changes",
                format!("/cafe/{cafe_id}/edit"),
                form,
                errors,
            )
            .await?
            .into_response())
        }
        Err(e) => Err(e.into()),
    }
}

// =============================================================================
// Delete
// =============================================================================

/// Display the delete confirmation page.
///
/// GET /cafe/{id}/delete
pub async fn delete_page(
    State(state): State<AppState>,
    RequireAuth(user): RequireAuth,
    session: Session,
    Path(cafe_id): Path<i64>,
) -> Result<DeleteCafeTemplate, AppError> {
    let cafe = get_cafe_or_404(&state, cafe_id).await?;
    let csrf_token = csrf::issue_token(&session).await?;
    Ok(DeleteCafeTemplate {
        cafe,
        csrf_token,
        current_user: Some(user),
    })
}

/// Handle the delete confirmation.
///
/// POST /cafe/{id}/delete
///
/// Only the explicit "delete" action removes the café; anything else is a
/// cancel and leaves it untouched.
pub async fn delete_submit(
    State(state): State<AppState>,
    RequireAuth(_user): RequireAuth,
    session: Session,
    Path(cafe_id): Path<i64>,
    Form(form): Form<DeleteCafeForm>,
) -> Result<Response, AppError> {
    csrf::verify_token(&session, &form.csrf_token).await?;

    let cafe = get_cafe_or_404(&state, cafe_id).await?;

    if form.action == "delete" {
        CafeRepository::new(state.pool()).delete(cafe.id).await?;
        return Ok(Redirect::to("/").into_response());
    }

    Ok(Redirect::to(&format!("/cafe/{}", cafe.id)).into_response())
}
