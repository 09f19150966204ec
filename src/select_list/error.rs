//! Select list error types.

use crate::sonar::{ItemId, SonarError};

/// Errors surfaced by the select list, either from a completed request or
/// from rejecting a user action locally.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SelectListError {
    /// Request failed to complete
    #[error("Network error: {0}")]
    Network(String),

    /// Server returned a non-success status
    #[error("Server error (status {status}): {message}")]
    Server { status: u16, message: String },

    /// Success status but the body could not be understood
    #[error("Unexpected server response: {0}")]
    MalformedResponse(String),

    /// Select/deselect attempted while the list is read-only
    #[error("Selection is read-only")]
    ReadOnly,

    /// Select/deselect attempted while a request for the same item is in flight
    #[error("A request for item {id} is already in progress")]
    TogglePending { id: ItemId },

    /// Item is not in the column the action moves it out of
    #[error("Item {id} is not in the {column} list")]
    ItemNotFound { id: ItemId, column: &'static str },

    /// Options rejected at construction
    #[error("Invalid select list options: {0}")]
    InvalidOptions(String),
}

impl SelectListError {
    /// Whether the error came back from a request, as opposed to an action
    /// rejected before any request was made.
    ///
    pub fn is_request_error(&self) -> bool {
        matches!(
            self,
            SelectListError::Network(_)
                | SelectListError::Server { .. }
                | SelectListError::MalformedResponse(_)
        )
    }
}

impl From<SonarError> for SelectListError {
    fn from(error: SonarError) -> Self {
        match error {
            SonarError::Http(e) => SelectListError::Network(e.to_string()),
            SonarError::Server { status, message } => SelectListError::Server { status, message },
            SonarError::MalformedResponse(message) => SelectListError::MalformedResponse(message),
            SonarError::GateNotFound { id } => {
                SelectListError::MalformedResponse(format!("unknown quality gate {}", id))
            }
        }
    }
}
