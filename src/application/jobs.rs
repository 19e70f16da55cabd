//! Backend work executed off the UI thread.
//!
//! Screens never call the backend directly. They put a [`Job`] in the
//! [`Outbox`] and remember the [`Ticket`] it was given; the main loop hands
//! jobs to the [`Worker`], and each [`Completion`] comes back carrying its
//! ticket. A screen ignores any completion whose ticket it is no longer
//! waiting for, so only the latest request's result is ever applied.

use super::registration::{RegistrationError, register_person};
use crate::domain::{City, NewPerson, Person, State};
use crate::infrastructure::{ApiResult, PersonApi};
use log::{debug, error};
use std::sync::Arc;
use std::sync::mpsc::{self, Receiver, Sender};
use std::thread;

/// Identifies one issued job. Tickets only ever increase.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Ticket(pub u64);

#[derive(Debug, Clone, PartialEq)]
pub enum Job {
    LoadStates,
    LoadCities { state_id: u64 },
    Submit(NewPerson),
    LoadPerson { document_id: String },
}

#[derive(Debug)]
pub enum JobOutcome {
    States(ApiResult<Vec<State>>),
    Cities {
        state_id: u64,
        result: ApiResult<Vec<City>>,
    },
    Submitted(Result<String, RegistrationError>),
    Person(ApiResult<Person>),
}

#[derive(Debug)]
pub struct Completion {
    pub ticket: Ticket,
    pub outcome: JobOutcome,
}

/// Jobs issued by screens and not yet handed to the worker.
#[derive(Debug, Default)]
pub struct Outbox {
    next_ticket: u64,
    jobs: Vec<(Ticket, Job)>,
}

impl Outbox {
    pub fn issue(&mut self, job: Job) -> Ticket {
        self.next_ticket += 1;
        let ticket = Ticket(self.next_ticket);
        debug!("Issued {:?} as ticket {}", job, ticket.0);
        self.jobs.push((ticket, job));
        ticket
    }

    pub fn drain(&mut self) -> Vec<(Ticket, Job)> {
        std::mem::take(&mut self.jobs)
    }

    pub fn pending(&self) -> &[(Ticket, Job)] {
        &self.jobs
    }
}

/// Runs a job to completion against the backend.
pub fn run_job(api: &dyn PersonApi, job: Job) -> JobOutcome {
    match job {
        Job::LoadStates => JobOutcome::States(api.list_states()),
        Job::LoadCities { state_id } => JobOutcome::Cities {
            state_id,
            result: api.list_cities(state_id),
        },
        Job::Submit(person) => JobOutcome::Submitted(register_person(api, &person)),
        Job::LoadPerson { document_id } => JobOutcome::Person(api.get_person(&document_id)),
    }
}

/// Executes each job on its own thread and reports back over a channel.
pub struct Worker {
    api: Arc<dyn PersonApi>,
    sender: Sender<Completion>,
}

impl Worker {
    pub fn new(api: Arc<dyn PersonApi>) -> (Self, Receiver<Completion>) {
        let (sender, receiver) = mpsc::channel();
        (Self { api, sender }, receiver)
    }

    /// Starts `job` in the background; its [`Completion`] arrives on the
    /// receiver returned by [`Worker::new`].
    pub fn dispatch(&self, ticket: Ticket, job: Job) {
        let api = Arc::clone(&self.api);
        let sender = self.sender.clone();

        let spawned = thread::Builder::new()
            .name(format!("job-{}", ticket.0))
            .spawn(move || {
                let outcome = run_job(api.as_ref(), job);
                // The receiver is gone only when the UI has exited.
                let _ = sender.send(Completion { ticket, outcome });
            });

        if let Err(e) = spawned {
            error!("Could not start worker thread for ticket {}: {}", ticket.0, e);
        }
    }
}
