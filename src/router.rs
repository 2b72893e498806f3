use axum::{
    Router,
    extract::{DefaultBodyLimit, FromRef},
    routing::get,
};
use axum_extra::extract::cookie::Key;

use crate::db::PeopleStorage;
use crate::handlers::people::{list_people, show_form, submit_person};

/// Upper bound for a `POST /` body; two short text fields fit easily.
pub const FORM_BODY_LIMIT: usize = 16 * 1024;

#[derive(Clone)]
pub struct AppState {
    pub people: PeopleStorage,
    key: Key,
}

impl AppState {
    pub fn new(people: PeopleStorage, key: Key) -> Self {
        Self { people, key }
    }
}

impl FromRef<AppState> for Key {
    fn from_ref(state: &AppState) -> Self {
        state.key.clone()
    }
}

pub fn app_router(state: AppState) -> Router {
    Router::new()
        .route("/", get(show_form).post(submit_person))
        .route("/show", get(list_people))
        .layer(DefaultBodyLimit::max(FORM_BODY_LIMIT))
        .with_state(state)
}
