use thiserror::Error;

use super::models::MAX_NAME_CHARS;

/// Reasons a person draft is rejected before anything is sent.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("Name is required and must have at most {} characters", MAX_NAME_CHARS)]
    NameLength,
    #[error("All fields are required")]
    MissingFields,
    #[error("Email address is not valid")]
    InvalidEmail,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RouteError {
    #[error("Missing person identifier")]
    MissingId,
    #[error("Invalid person identifier: {0}")]
    MalformedId(String),
}

pub type DomainResult<T> = Result<T, ValidationError>;
