//! Session error types.

use thiserror::Error;

use crate::decode::DecodeError;
use crate::exec::ExecError;

/// Session errors.
#[derive(Debug, Error)]
pub enum SessionError {
    /// The bean or columns could not be turned into SQL.
    #[error("builder error: {0}")]
    BuilderError(#[from] tally_builder::BuilderError),

    /// The database reported a failure other than "no rows".
    #[error("execution error: {0}")]
    ExecutionError(#[from] ExecError),

    /// The returned row did not fit the requested output shape.
    #[error("decode error: {0}")]
    DecodeError(#[from] DecodeError),

    /// Transaction control misuse.
    #[error("transaction error: {message}")]
    TransactionError { message: String },

    /// The session was closed.
    #[error("session closed: {id}")]
    SessionClosed { id: u64 },

    /// Configuration could not be loaded.
    #[error("invalid configuration: {message}")]
    ConfigError { message: String },
}

impl SessionError {
    pub fn transaction_error(message: impl Into<String>) -> Self {
        Self::TransactionError {
            message: message.into(),
        }
    }

    pub fn session_closed(id: u64) -> Self {
        Self::SessionClosed { id }
    }

    pub fn config_error(message: impl Into<String>) -> Self {
        Self::ConfigError {
            message: message.into(),
        }
    }
}

impl From<serde_json::Error> for SessionError {
    fn from(err: serde_json::Error) -> Self {
        SessionError::config_error(err.to_string())
    }
}

/// Result type for session operations.
pub type SessionResult<T> = Result<T, SessionError>;
