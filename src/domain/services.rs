//! Client-side rules for person registration.
//!
//! Validation runs before any request is issued; the failure classes decide
//! how every error in the application is logged and shown.

use super::errors::{DomainResult, ValidationError};
use super::models::{MAX_NAME_CHARS, NewPerson};
use log::Level;

/// Raw form contents as typed by the user.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PersonDraft {
    pub name: String,
    pub email: String,
    pub state_id: Option<u64>,
    pub city_id: Option<u64>,
}

pub struct PersonValidator;

impl PersonValidator {
    /// Validates a draft in the order the form reports problems: name length
    /// first, then required fields, then the email shape.
    ///
    /// # Examples
    ///
    /// ```
    /// use cadastro::domain::{PersonDraft, PersonValidator, ValidationError};
    ///
    /// let draft = PersonDraft {
    ///     name: "Ana Silva".to_string(),
    ///     email: "ana@example.com".to_string(),
    ///     state_id: Some(1),
    ///     city_id: None,
    /// };
    /// assert_eq!(PersonValidator::validate(&draft), Err(ValidationError::MissingFields));
    /// ```
    pub fn validate(draft: &PersonDraft) -> DomainResult<NewPerson> {
        if draft.name.is_empty() || draft.name.chars().count() > MAX_NAME_CHARS {
            return Err(ValidationError::NameLength);
        }

        let (Some(state_id), Some(city_id)) = (draft.state_id, draft.city_id) else {
            return Err(ValidationError::MissingFields);
        };
        if draft.email.is_empty() {
            return Err(ValidationError::MissingFields);
        }

        if !Self::is_plausible_email(&draft.email) {
            return Err(ValidationError::InvalidEmail);
        }

        Ok(NewPerson::new(&draft.name, &draft.email, city_id, state_id))
    }

    /// Shape check only: one `@` with something on both sides and no
    /// whitespace. Deliverability is the backend's problem.
    pub fn is_plausible_email(email: &str) -> bool {
        if email.chars().any(char::is_whitespace) {
            return false;
        }
        match email.split_once('@') {
            Some((local, domain)) => !local.is_empty() && !domain.is_empty() && !domain.contains('@'),
            None => false,
        }
    }
}

/// Category of a failure, used to pick how it is reported.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FailureClass {
    /// State or city lists could not be loaded
    ReferenceData,
    /// User input failed a precondition
    Validation,
    /// Email already registered
    Conflict,
    /// Backend answered with a non-success status or an unusable payload
    Backend,
    /// Transport or decoding failure
    Network,
}

/// Severity of a user-facing notification.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoticeLevel {
    Success,
    Info,
    Warning,
    Error,
}

/// How a failure class is reported: the log level it is written at and the
/// notification level shown to the user, if any.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ReportPolicy {
    pub log_level: Level,
    pub notice: Option<NoticeLevel>,
}

impl FailureClass {
    pub const fn policy(self) -> ReportPolicy {
        match self {
            FailureClass::ReferenceData => ReportPolicy {
                log_level: Level::Warn,
                notice: Some(NoticeLevel::Warning),
            },
            FailureClass::Validation => ReportPolicy {
                log_level: Level::Debug,
                notice: Some(NoticeLevel::Error),
            },
            FailureClass::Conflict => ReportPolicy {
                log_level: Level::Info,
                notice: Some(NoticeLevel::Error),
            },
            FailureClass::Backend | FailureClass::Network => ReportPolicy {
                log_level: Level::Error,
                notice: Some(NoticeLevel::Error),
            },
        }
    }
}
