use axum::{
    extract::rejection::FormRejection,
    http::StatusCode,
    response::{Html, IntoResponse},
};
use sqlx::Error as SqlxError;
use sqlx::error::ErrorKind;
use thiserror::Error as ThisError;

use crate::views;

/// Generic text shown whenever storage or startup plumbing fails.
pub const GENERIC_ERROR_MESSAGE: &str = "Something went wrong. Please try again later.";

pub const MALFORMED_FORM_MESSAGE: &str = "The submitted form could not be read.";

#[derive(Debug, ThisError)]
pub enum HobbyistError {
    /// The `POST /` body could not be read as a form.
    #[error("Form rejected: {0}")]
    Form(#[from] FormRejection),

    /// The database refused the write because of a column constraint.
    /// Carries the driver's human-readable detail.
    #[error("{0}")]
    Constraint(String),

    #[error("Database error: {0}")]
    Database(#[from] SqlxError),

    #[error("Configuration error: {0}")]
    Config(Box<figment::Error>),

    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),
}

impl HobbyistError {
    /// Split insert failures into constraint violations, which are reported
    /// back to the user, and everything else.
    pub fn from_insert(err: SqlxError) -> Self {
        if let SqlxError::Database(db_err) = &err
            && matches!(
                db_err.kind(),
                ErrorKind::UniqueViolation
                    | ErrorKind::NotNullViolation
                    | ErrorKind::CheckViolation
                    | ErrorKind::ForeignKeyViolation
            )
        {
            return HobbyistError::Constraint(db_err.message().to_string());
        }
        HobbyistError::Database(err)
    }

    pub fn status(&self) -> StatusCode {
        match self {
            HobbyistError::Form(rejection) => rejection.status(),
            HobbyistError::Constraint(_) => StatusCode::BAD_REQUEST,
            HobbyistError::Database(_)
            | HobbyistError::Config(_)
            | HobbyistError::InvalidConfig(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl From<figment::Error> for HobbyistError {
    fn from(e: figment::Error) -> Self {
        HobbyistError::Config(Box::new(e))
    }
}

impl IntoResponse for HobbyistError {
    fn into_response(self) -> axum::response::Response {
        let status = self.status();
        let message = match &self {
            HobbyistError::Constraint(_) => self.to_string(),
            HobbyistError::Form(_) => MALFORMED_FORM_MESSAGE.to_string(),
            _ => GENERIC_ERROR_MESSAGE.to_string(),
        };
        (status, Html(views::error_page(status, &message))).into_response()
    }
}
