//! Application layer managing screens and backend workflows.
//!
//! This module coordinates between the domain layer and presentation layer:
//! screen state, navigation, notifications and the jobs that talk to the
//! backend.

pub mod creation;
pub mod detail;
pub mod form;
pub mod jobs;
pub mod notifications;
pub mod registration;
pub mod state;

#[cfg(test)]
pub(crate) mod testing;

pub use creation::*;
pub use detail::*;
pub use form::*;
pub use jobs::*;
pub use notifications::*;
pub use registration::*;
pub use state::*;
