use super::jobs::{Job, JobOutcome, Outbox, Ticket};
use super::notifications::Notifications;
use crate::domain::{FailureClass, Person, Route};
use crate::infrastructure::ApiError;
use log::debug;

pub const LOAD_FAILED: &str = "Failed to load person details";

/// Lifecycle of one visit to the detail screen. `Displaying` and `Failed`
/// are final until the screen is entered again.
#[derive(Debug, Clone, PartialEq)]
pub enum DetailState {
    Loading,
    Displaying(Person),
    Failed(String),
}

#[derive(Debug)]
pub struct DetailScreen {
    /// Identifier as it appeared in the route
    pub document_id: String,
    pub state: DetailState,
    ticket: Option<Ticket>,
}

impl DetailScreen {
    /// Starts loading the person named by `route`. An unusable identifier
    /// fails the screen straight away instead of leaving it loading.
    pub fn enter(route: &Route, outbox: &mut Outbox, notifications: &mut Notifications) -> Self {
        let raw = match route {
            Route::PersonDetail(id) => id.clone(),
            Route::NewPerson => String::new(),
        };

        match route.document_id() {
            Ok(id) => Self {
                ticket: Some(outbox.issue(Job::LoadPerson {
                    document_id: id.to_string(),
                })),
                document_id: raw,
                state: DetailState::Loading,
            },
            Err(e) => {
                notifications.report(FailureClass::Validation, LOAD_FAILED, &e);
                Self {
                    document_id: raw,
                    state: DetailState::Failed(e.to_string()),
                    ticket: None,
                }
            }
        }
    }

    pub fn is_loading(&self) -> bool {
        matches!(self.state, DetailState::Loading)
    }

    pub fn person(&self) -> Option<&Person> {
        match &self.state {
            DetailState::Displaying(person) => Some(person),
            _ => None,
        }
    }

    pub fn error(&self) -> Option<&str> {
        match &self.state {
            DetailState::Failed(message) => Some(message),
            _ => None,
        }
    }

    pub fn apply(&mut self, ticket: Ticket, outcome: JobOutcome, notifications: &mut Notifications) {
        let result = match outcome {
            JobOutcome::Person(result) if self.ticket == Some(ticket) => result,
            other => {
                debug!("Discarding stale completion for ticket {}: {:?}", ticket.0, other);
                return;
            }
        };
        self.ticket = None;

        self.state = match result {
            Ok(person) => DetailState::Displaying(person),
            Err(e) => {
                let message = match &e {
                    ApiError::Status { .. } => "Failed to fetch person data".to_string(),
                    other => other.to_string(),
                };
                notifications.report(e.class(), LOAD_FAILED, &e);
                DetailState::Failed(message)
            }
        };
    }
}
