//! Builder error types.

use tally_core::messages;
use thiserror::Error;

/// Result type for builder operations.
pub type BuilderResult<T> = Result<T, BuilderError>;

/// Errors that can occur while synthesizing SQL.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum BuilderError {
    #[error("{}", messages::ERR_NO_TABLE)]
    NoTable,

    #[error("{}", messages::ERR_SUM_REQUIRES_COLUMNS)]
    NoColumns,

    #[error("invalid identifier: {name}")]
    InvalidIdentifier { name: String },

    #[error("unknown column: {column} on table {table}")]
    UnknownColumn { table: String, column: String },
}

impl BuilderError {
    pub fn invalid_identifier(name: impl Into<String>) -> Self {
        Self::InvalidIdentifier { name: name.into() }
    }

    pub fn unknown_column(table: impl Into<String>, column: impl Into<String>) -> Self {
        Self::UnknownColumn {
            table: table.into(),
            column: column.into(),
        }
    }
}
