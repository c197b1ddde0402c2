//! Execution handles and target selection.
//!
//! The database and its transactions live behind these traits. A query
//! returns a tagged `QueryRow` so "no rows" never travels as an error.

use tally_core::{messages, Value};
use thiserror::Error;

use crate::error::{SessionError, SessionResult};

/// A failure reported by a database or transaction handle.
#[derive(Debug, Clone, PartialEq, Error)]
#[error("{message}")]
pub struct ExecError {
    message: String,
}

impl ExecError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }

    pub fn message(&self) -> &str {
        &self.message
    }
}

/// Outcome of a single-row query.
#[derive(Debug, Clone, PartialEq)]
pub enum QueryRow {
    /// The query ran and returned no rows.
    Empty,
    /// The first returned row, column values in select order.
    Row(Vec<Value>),
    /// The query failed.
    Failure(ExecError),
}

impl QueryRow {
    /// Check if this is the empty outcome.
    pub fn is_empty(&self) -> bool {
        matches!(self, QueryRow::Empty)
    }
}

/// Something that can run a query and return its first row.
pub trait Queryer {
    fn query_row(&self, sql: &str, args: &[Value]) -> QueryRow;
}

/// A database handle; queries on it run in autocommit mode.
pub trait Database: Queryer + Send + Sync {
    /// Start a transaction.
    fn begin(&self) -> Result<Box<dyn Transaction>, ExecError>;
}

/// An open transaction.
pub trait Transaction: Queryer + Send {
    fn commit(self: Box<Self>) -> Result<(), ExecError>;

    fn rollback(self: Box<Self>) -> Result<(), ExecError>;
}

/// The handle a call executes against.
#[derive(Clone, Copy)]
pub enum ExecTarget<'a> {
    Database(&'a dyn Database),
    Transaction(&'a dyn Transaction),
}

impl ExecTarget<'_> {
    /// Run the query on the selected handle.
    pub fn query_row(&self, sql: &str, args: &[Value]) -> QueryRow {
        match self {
            ExecTarget::Database(db) => db.query_row(sql, args),
            ExecTarget::Transaction(tx) => tx.query_row(sql, args),
        }
    }

    /// Short name for logging.
    pub fn name(&self) -> &'static str {
        match self {
            ExecTarget::Database(_) => "database",
            ExecTarget::Transaction(_) => "transaction",
        }
    }
}

/// Choose where a call executes.
///
/// Autocommit runs on the database handle. Otherwise the active
/// transaction is required.
pub fn select_target<'a>(
    auto_commit: bool,
    database: &'a dyn Database,
    transaction: Option<&'a dyn Transaction>,
) -> SessionResult<ExecTarget<'a>> {
    if auto_commit {
        return Ok(ExecTarget::Database(database));
    }

    transaction
        .map(ExecTarget::Transaction)
        .ok_or_else(|| SessionError::transaction_error(messages::ERR_NO_ACTIVE_TRANSACTION))
}
