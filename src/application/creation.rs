//! Person creation screen: cascading state and city selects, name and email
//! inputs, validation and submission.

use super::form::{FormField, TextField, cycle_option};
use super::jobs::{Job, JobOutcome, Outbox, Ticket};
use super::notifications::Notifications;
use super::registration::RegistrationError;
use crate::domain::{City, FailureClass, MAX_NAME_CHARS, PersonDraft, PersonValidator, Route, State};
use log::{debug, info};

pub const REGISTRATION_FAILED: &str = "Failed to register person";

#[derive(Debug)]
pub struct CreationScreen {
    pub name: TextField,
    pub email: TextField,
    pub states: Vec<State>,
    /// Cities of the selected state only
    pub cities: Vec<City>,
    pub selected_state: Option<u64>,
    pub selected_city: Option<u64>,
    /// Inline error shown above the form after a failed submission
    pub error_message: Option<String>,
    pub focus: FormField,
    states_ticket: Option<Ticket>,
    cities_ticket: Option<Ticket>,
    submit_ticket: Option<Ticket>,
}

impl CreationScreen {
    /// Builds a fresh form and requests the state list.
    pub fn enter(outbox: &mut Outbox) -> Self {
        Self {
            name: TextField::with_limit(MAX_NAME_CHARS),
            email: TextField::default(),
            states: Vec::new(),
            cities: Vec::new(),
            selected_state: None,
            selected_city: None,
            error_message: None,
            focus: FormField::Name,
            states_ticket: Some(outbox.issue(Job::LoadStates)),
            cities_ticket: None,
            submit_ticket: None,
        }
    }

    pub fn is_loading_states(&self) -> bool {
        self.states_ticket.is_some()
    }

    pub fn is_loading_cities(&self) -> bool {
        self.cities_ticket.is_some()
    }

    pub fn is_submitting(&self) -> bool {
        self.submit_ticket.is_some()
    }

    pub fn selected_state_name(&self) -> Option<&str> {
        let id = self.selected_state?;
        self.states.iter().find(|s| s.id == id).map(|s| s.name.as_str())
    }

    pub fn selected_city_name(&self) -> Option<&str> {
        let id = self.selected_city?;
        self.cities.iter().find(|c| c.id == id).map(|c| c.name.as_str())
    }

    /// Changes the selected state. A change to a state requests its cities
    /// and supersedes any city request still in flight; a change to no state
    /// requests nothing and keeps the current city list.
    pub fn select_state(&mut self, state_id: Option<u64>, outbox: &mut Outbox) {
        if state_id == self.selected_state {
            return;
        }

        self.selected_state = state_id;
        self.selected_city = None;
        self.cities_ticket = state_id.map(|id| outbox.issue(Job::LoadCities { state_id: id }));
    }

    pub fn cycle_state(&mut self, forward: bool, outbox: &mut Outbox) {
        let options: Vec<u64> = self.states.iter().map(|s| s.id).collect();
        let next = cycle_option(&options, self.selected_state, forward);
        self.select_state(next, outbox);
    }

    pub fn cycle_city(&mut self, forward: bool) {
        let options: Vec<u64> = self.cities.iter().map(|c| c.id).collect();
        self.selected_city = cycle_option(&options, self.selected_city, forward);
    }

    pub fn draft(&self) -> PersonDraft {
        PersonDraft {
            name: self.name.value.clone(),
            email: self.email.value.clone(),
            state_id: self.selected_state,
            city_id: self.selected_city,
        }
    }

    /// Validates the form and, if it passes, queues the registration.
    /// Nothing is queued when validation fails.
    pub fn submit(&mut self, outbox: &mut Outbox, notifications: &mut Notifications) {
        if self.is_submitting() {
            notifications.info("Submission already in progress");
            return;
        }

        self.error_message = None;

        match PersonValidator::validate(&self.draft()) {
            Ok(person) => {
                self.submit_ticket = Some(outbox.issue(Job::Submit(person)));
            }
            Err(e) => notifications.report(FailureClass::Validation, &e.to_string(), &e),
        }
    }

    fn reset(&mut self) {
        self.name.clear();
        self.email.clear();
        self.selected_state = None;
        self.selected_city = None;
        self.cities_ticket = None;
        self.focus = FormField::Name;
    }

    /// Applies a finished job. Returns the route to open when a person was
    /// created.
    pub fn apply(
        &mut self,
        ticket: Ticket,
        outcome: JobOutcome,
        notifications: &mut Notifications,
    ) -> Option<Route> {
        match outcome {
            JobOutcome::States(result) if self.states_ticket == Some(ticket) => {
                self.states_ticket = None;
                match result {
                    Ok(states) => self.states = states,
                    Err(e) => notifications.report(FailureClass::ReferenceData, "Failed to load states", &e),
                }
                None
            }
            JobOutcome::Cities { state_id, result } if self.cities_ticket == Some(ticket) => {
                self.cities_ticket = None;
                match result {
                    Ok(cities) => self.cities = cities,
                    Err(e) => {
                        self.cities.clear();
                        notifications.report(
                            FailureClass::ReferenceData,
                            "Failed to load cities",
                            &format!("state {state_id}: {e}"),
                        );
                    }
                }
                None
            }
            JobOutcome::Submitted(result) if self.submit_ticket == Some(ticket) => {
                self.submit_ticket = None;
                match result {
                    Ok(document_id) => {
                        self.reset();
                        notifications.success("Person created successfully");
                        Some(Route::PersonDetail(document_id))
                    }
                    Err(e @ RegistrationError::EmailTaken) => {
                        notifications.report(e.class(), "Email is already in use", &e);
                        None
                    }
                    Err(RegistrationError::Api(e)) => {
                        self.error_message = Some(REGISTRATION_FAILED.to_string());
                        notifications.report(e.class(), REGISTRATION_FAILED, &e);
                        None
                    }
                }
            }
            other => {
                debug!("Discarding stale completion for ticket {}: {:?}", ticket.0, other);
                if let JobOutcome::Submitted(Ok(document_id)) = other {
                    info!("Person {document_id} was created after the form was left");
                }
                None
            }
        }
    }
}
