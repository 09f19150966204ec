//! Application state management module.
//!
//! This module contains the core state management for the application, including:
//! - Main `State` struct that holds all application data
//! - The quality gate projects pane hosting the select list
//! - Navigation types
//! - State error handling

mod error;
mod gate;
mod navigation;
mod state_impl;

pub use error::StateError;
pub use gate::{GateProjects, PaneSettings};
pub use navigation::Focus;
pub use state_impl::State;

#[cfg(test)]
pub(crate) use gate::test_settings;
