//! cadastro - terminal client for person registration
//!
//! Registers people against a headless content backend and shows a
//! registered person's details, with cascading state and city selection.

pub mod domain;
pub mod application;
pub mod infrastructure;
pub mod presentation;

pub use domain::*;
pub use application::*;
