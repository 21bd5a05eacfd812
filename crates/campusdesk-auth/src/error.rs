//! Error taxonomy for the login flow and the session store.

/// Why a login attempt did not produce a session.
///
/// `Display` is the user-facing message. Transport and protocol details are
/// kept in the payload for logs and shown only through [`LoginError::detail`].
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum LoginError {
    /// A form field is missing or malformed. No request was made.
    #[error("{0}")]
    Validation(String),

    /// The server rejected the credentials; carries its message verbatim.
    #[error("{0}")]
    InvalidCredentials(String),

    #[error("Unable to reach the server. Check your connection and try again.")]
    Unreachable(String),

    #[error("The server sent an incomplete response. Please try again.")]
    MalformedResponse(String),

    /// The session could not be written to the profile store.
    #[error("Could not save your session. Please try again.")]
    Storage(String),
}

impl LoginError {
    pub fn detail(&self) -> &str {
        match self {
            LoginError::Validation(detail)
            | LoginError::InvalidCredentials(detail)
            | LoginError::Unreachable(detail)
            | LoginError::MalformedResponse(detail)
            | LoginError::Storage(detail) => detail,
        }
    }

    /// Short label used in logs and metrics.
    pub fn kind(&self) -> &'static str {
        match self {
            LoginError::Validation(_) => "validation",
            LoginError::InvalidCredentials(_) => "invalid_credentials",
            LoginError::Unreachable(_) => "unreachable",
            LoginError::MalformedResponse(_) => "malformed_response",
            LoginError::Storage(_) => "storage",
        }
    }
}

/// Error type for session store writes.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("Session storage I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Session serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}
