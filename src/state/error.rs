//! State management-specific error types.

/// Errors that can occur during state operations.
#[derive(Debug, thiserror::Error)]
pub enum StateError {
    /// No gate has been loaded into the pane yet
    #[error("Quality gate pane not mounted")]
    PaneNotMounted,

    /// Pane is mounted for the default gate, which has no project list
    #[error("The default quality gate has no project selection")]
    NoSelectList,

    /// Cursor does not point at an item
    #[error("No item under the cursor")]
    NoItemSelected,
}
