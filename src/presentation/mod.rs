//! Presentation layer handling terminal UI and user input.
//!
//! This module renders the person form and detail screens using ratatui
//! and translates key presses into application actions.

pub mod ui;
pub mod input;

pub use ui::*;
pub use input::*;
