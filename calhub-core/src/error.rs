//! Error types for calhub.

use thiserror::Error;

/// Errors that can occur in calhub operations.
#[derive(Error, Debug)]
pub enum CalHubError {
    #[error("Malformed identifier '{0}'")]
    MalformedIdentifier(String),

    #[error("Missing field: {0}")]
    MissingField(&'static str),

    #[error("Color channel '{channel}' out of range [0, 1]: {value}")]
    ChannelOutOfRange { channel: &'static str, value: f64 },

    #[error("Invalid request: {0}")]
    Validation(String),

    #[error("Authentication failed: {0}")]
    Auth(String),

    #[error("{entity} not found: {id}")]
    NotFound { entity: &'static str, id: String },

    #[error("{entity} already exists: {id}")]
    Conflict { entity: &'static str, id: String },

    #[error("Snapshot decode error: {0}")]
    Decode(String),

    #[error("Snapshot encode error: {0}")]
    Encode(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl CalHubError {
    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation(message.into())
    }

    pub fn auth(message: impl Into<String>) -> Self {
        Self::Auth(message.into())
    }

    pub fn not_found(entity: &'static str, id: impl ToString) -> Self {
        Self::NotFound {
            entity,
            id: id.to_string(),
        }
    }

    pub fn conflict(entity: &'static str, id: impl ToString) -> Self {
        Self::Conflict {
            entity,
            id: id.to_string(),
        }
    }

    /// True for errors caused by malformed client input.
    pub fn is_validation(&self) -> bool {
        matches!(
            self,
            Self::MalformedIdentifier(_)
                | Self::MissingField(_)
                | Self::ChannelOutOfRange { .. }
                | Self::Validation(_)
        )
    }
}

/// Result type alias for calhub operations.
pub type CalHubResult<T> = Result<T, CalHubError>;
