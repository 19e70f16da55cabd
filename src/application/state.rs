//! Application state management for the terminal client.
//!
//! This module contains the main application state: the active screen, the
//! navigation history, notifications and the queue of backend jobs.

use super::creation::CreationScreen;
use super::detail::DetailScreen;
use super::jobs::{Job, JobOutcome, Outbox, Ticket};
use super::notifications::Notifications;
use crate::domain::{NoticeLevel, Route};
use log::info;
use std::time::Instant;

/// Represents the current mode of the application.
///
/// The mode determines how keyboard input is interpreted and whether the
/// help popup is drawn over the active screen.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AppMode {
    /// Input goes to the active screen
    Normal,
    /// Help popup is displayed
    Help,
}

/// The screen currently mounted.
#[derive(Debug)]
pub enum Screen {
    Creation(CreationScreen),
    Detail(DetailScreen),
}

/// Main application state.
///
/// # Examples
///
/// ```
/// use cadastro::application::{App, Job};
/// use cadastro::domain::Route;
///
/// let mut app = App::new(Route::NewPerson);
/// let jobs = app.take_jobs();
/// assert_eq!(jobs[0].1, Job::LoadStates);
/// ```
#[derive(Debug)]
pub struct App {
    pub screen: Screen,
    /// Route of the mounted screen
    pub route: Route,
    /// Previously visited routes, most recent last
    pub history: Vec<Route>,
    pub mode: AppMode,
    /// Scroll position in help text
    pub help_scroll: usize,
    pub notifications: Notifications,
    pub should_quit: bool,
    outbox: Outbox,
}

impl Default for App {
    fn default() -> Self {
        Self::new(Route::NewPerson)
    }
}

impl App {
    pub fn new(start: Route) -> Self {
        let mut outbox = Outbox::default();
        let mut notifications = Notifications::default();
        let screen = Self::mount(&start, &mut outbox, &mut notifications);

        Self {
            screen,
            route: start,
            history: Vec::new(),
            mode: AppMode::Normal,
            help_scroll: 0,
            notifications,
            should_quit: false,
            outbox,
        }
    }

    fn mount(route: &Route, outbox: &mut Outbox, notifications: &mut Notifications) -> Screen {
        match route {
            Route::NewPerson => Screen::Creation(CreationScreen::enter(outbox)),
            Route::PersonDetail(_) => Screen::Detail(DetailScreen::enter(route, outbox, notifications)),
        }
    }

    fn enter(&mut self, route: Route) {
        info!("Opening {route}");
        self.screen = Self::mount(&route, &mut self.outbox, &mut self.notifications);
        self.route = route;
    }

    /// Opens `route`, remembering the current one for [`App::back`].
    pub fn navigate(&mut self, route: Route) {
        let previous = std::mem::replace(&mut self.route, route.clone());
        self.history.push(previous);
        self.enter(route);
    }

    /// Returns to the previous route, or to the form when there is none.
    pub fn back(&mut self) {
        let route = self.history.pop().unwrap_or(Route::NewPerson);
        self.enter(route);
    }

    /// Mounts the current route again from scratch.
    pub fn reload(&mut self) {
        self.enter(self.route.clone());
    }

    /// Jobs issued since the last call, for the worker to run.
    pub fn take_jobs(&mut self) -> Vec<(Ticket, Job)> {
        self.outbox.drain()
    }

    /// Hands a finished job to the mounted screen. Completions the screen
    /// is not waiting for are dropped.
    pub fn complete(&mut self, ticket: Ticket, outcome: JobOutcome) {
        let navigation = match &mut self.screen {
            Screen::Creation(form) => form.apply(ticket, outcome, &mut self.notifications),
            Screen::Detail(detail) => {
                detail.apply(ticket, outcome, &mut self.notifications);
                None
            }
        };

        if let Some(route) = navigation {
            self.navigate(route);
        }
    }

    pub fn tick(&mut self, now: Instant) {
        self.notifications.prune(now);
    }

    pub fn submit_form(&mut self) {
        if let Screen::Creation(form) = &mut self.screen {
            form.submit(&mut self.outbox, &mut self.notifications);
        }
    }

    pub fn cycle_state(&mut self, forward: bool) {
        if let Screen::Creation(form) = &mut self.screen {
            form.cycle_state(forward, &mut self.outbox);
        }
    }

    pub fn cycle_city(&mut self, forward: bool) {
        if let Screen::Creation(form) = &mut self.screen {
            form.cycle_city(forward);
        }
    }

    pub fn toggle_help(&mut self) {
        self.mode = match self.mode {
            AppMode::Normal => {
                self.help_scroll = 0;
                AppMode::Help
            }
            AppMode::Help => AppMode::Normal,
        };
    }

    /// Text copied by the detail screen's copy action.
    pub fn clipboard_text(&self) -> Option<String> {
        match &self.screen {
            Screen::Detail(detail) if detail.person().is_some() => Some(detail.document_id.clone()),
            _ => None,
        }
    }

    /// Processes the result of a clipboard copy.
    pub fn set_clipboard_result(&mut self, result: Result<String, String>) {
        match result {
            Ok(text) => self.notifications.info(format!("Copied {}", text)),
            Err(error) => self
                .notifications
                .push(NoticeLevel::Warning, format!("Clipboard unavailable: {}", error)),
        }
    }
}
