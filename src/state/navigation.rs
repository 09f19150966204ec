//! Navigation-related types for application state.

use crate::config::hotkeys::InputMode;
use crate::select_list::Column;

/// Specifying the different foci.
///
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Focus {
    Column(Column),
    Search,
    Log,
}

impl Focus {
    /// Hotkey set that applies while this focus is active.
    ///
    pub fn input_mode(&self) -> InputMode {
        match self {
            Focus::Column(_) => InputMode::Pane,
            Focus::Search => InputMode::Search,
            Focus::Log => InputMode::Log,
        }
    }
}

impl Default for Focus {
    fn default() -> Self {
        Focus::Column(Column::Available)
    }
}
