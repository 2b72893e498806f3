use axum::{
    Form,
    extract::{State, rejection::FormRejection},
    http::{StatusCode, header::LOCATION},
    response::{Html, IntoResponse, Response},
};
use tracing::{error, info, warn};

use crate::middleware::flash::{Flash, FlashKind};
use crate::types::person_form::PersonForm;
use crate::{HobbyistError, router::AppState, views};

pub const SAVED_MESSAGE: &str = "The person was saved successfully!";

/// `302 Found` to a local path.
pub struct Found(pub &'static str);

impl IntoResponse for Found {
    fn into_response(self) -> Response {
        (StatusCode::FOUND, [(LOCATION, self.0)]).into_response()
    }
}

/// GET / -> entry form with any pending danger messages.
pub async fn show_form(flash: Flash) -> impl IntoResponse {
    let (flash, messages) = flash.take(FlashKind::Danger);
    (flash, Html(views::form_page(&messages)))
}

/// GET /show -> every stored person with any pending success messages.
pub async fn list_people(
    State(state): State<AppState>,
    flash: Flash,
) -> Result<impl IntoResponse, HobbyistError> {
    let people = state.people.list_all().await.inspect_err(|e| {
        error!(error = %e, "failed to list people");
    })?;
    let (flash, messages) = flash.take(FlashKind::Success);
    Ok((flash, Html(views::list_page(&people, &messages))))
}

/// POST / -> validate, insert, then redirect to `/show` on success or back
/// to `/` with the reason.
pub async fn submit_person(
    State(state): State<AppState>,
    flash: Flash,
    form: Result<Form<PersonForm>, FormRejection>,
) -> Result<impl IntoResponse, HobbyistError> {
    let Form(form) = form.inspect_err(|e| {
        info!(status = %e.status(), reason = %e.body_text(), "unreadable form body");
    })?;
    let person = match form.validate() {
        Ok(person) => person,
        Err(e) => {
            info!(reason = ?e, "rejected submission");
            return Ok((flash.push(FlashKind::Danger, e.to_string()), Found("/")));
        }
    };

    match state.people.insert(&person).await {
        Ok(id) => {
            info!(id, name = %person.name, "person saved");
            Ok((flash.push(FlashKind::Success, SAVED_MESSAGE), Found("/show")))
        }
        Err(HobbyistError::Constraint(detail)) => {
            warn!(name = %person.name, detail = %detail, "insert rejected by constraint");
            Ok((flash.push(FlashKind::Danger, detail), Found("/")))
        }
        Err(e) => {
            error!(error = %e, "failed to insert person");
            Err(e)
        }
    }
}
