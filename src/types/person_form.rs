use serde::Deserialize;
use thiserror::Error as ThisError;

use crate::db::models::NewPerson;

/// Raw `application/x-www-form-urlencoded` body of `POST /`.
/// Missing fields read as empty strings and fail validation like them.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct PersonForm {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub hobby: String,
}

/// A required field was left empty. `Display` is the exact message shown
/// to the user.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ThisError)]
pub enum ValidationError {
    #[error("You must enter a name.\nYou must enter a hobby.")]
    MissingBoth,
    #[error("You must enter a name.")]
    MissingName,
    #[error("You must enter a hobby.")]
    MissingHobby,
}

impl PersonForm {
    pub fn validate(self) -> Result<NewPerson, ValidationError> {
        match (self.name.is_empty(), self.hobby.is_empty()) {
            (true, true) => Err(ValidationError::MissingBoth),
            (true, false) => Err(ValidationError::MissingName),
            (false, true) => Err(ValidationError::MissingHobby),
            (false, false) => Ok(NewPerson {
                name: self.name,
                hobby: self.hobby,
            }),
        }
    }
}
