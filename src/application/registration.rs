//! Person registration against the backend.
//!
//! The email check is best-effort: another client can register the same
//! address between the check and the create call. Only a unique constraint on
//! the backend guarantees uniqueness; a rejection from it surfaces as
//! [`RegistrationError::Api`].

use crate::domain::{FailureClass, NewPerson};
use crate::infrastructure::{ApiError, PersonApi};
use log::info;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum RegistrationError {
    #[error("Email is already in use")]
    EmailTaken,
    #[error(transparent)]
    Api(#[from] ApiError),
}

impl RegistrationError {
    pub fn class(&self) -> FailureClass {
        match self {
            RegistrationError::EmailTaken => FailureClass::Conflict,
            RegistrationError::Api(e) => e.class(),
        }
    }
}

/// Checks the email is free, then creates the person. Returns the new
/// record's document identifier.
pub fn register_person(api: &dyn PersonApi, person: &NewPerson) -> Result<String, RegistrationError> {
    if api.count_people_with_email(&person.email)? > 0 {
        return Err(RegistrationError::EmailTaken);
    }

    let document_id = api.create_person(person)?;
    info!("Registered {} as {}", person.email, document_id);
    Ok(document_id)
}
