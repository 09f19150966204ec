//! SonarQube API-specific error types.

/// Errors that can occur during SonarQube API operations.
#[derive(Debug, thiserror::Error)]
pub enum SonarError {
    /// The request did not complete (connection, timeout, TLS, ...)
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// API answered with a non-success status
    #[error("API error (status {status}): {message}")]
    Server { status: u16, message: String },

    /// API answered with a success status but an unexpected body
    #[error("Malformed API response: {0}")]
    MalformedResponse(String),

    /// Requested quality gate does not exist
    #[error("Quality gate not found: {id}")]
    GateNotFound { id: String },
}
