//! Infrastructure layer providing external service integrations.
//!
//! This module contains the HTTP client for the content backend, command-line
//! configuration, log setup and system clipboard access.

pub mod api;
pub mod clipboard;
pub mod config;
pub mod logging;

pub use api::*;
pub use clipboard::*;
pub use config::*;
pub use logging::*;
