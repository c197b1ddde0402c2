//! Session type.

use log::{debug, warn};
use tally_builder::{GeneratedSql, Statement};
use tally_core::Value;

use crate::engine::Engine;
use crate::error::{SessionError, SessionResult};
use crate::transaction::{self, TransactionResult, TransactionState, TxnCommand};

/// Session ID type.
pub type SessionId = u64;

/// Lifecycle state of a session.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionState {
    /// Idle, accepting calls.
    Ready,
    /// A call is executing.
    InFlight,
    /// Closed; calls fail with `SessionError::SessionClosed`.
    Closed,
}

/// A unit of work against an engine's database.
///
/// Chain statement setters (`sql`, `table`, `where_`, `and`) before an
/// aggregate call; the statement is cleared when the call returns.
pub struct Session<'e> {
    /// Unique session ID.
    id: SessionId,
    /// The owning engine (shared).
    pub(crate) engine: &'e Engine,
    /// Per-call statement state.
    pub(crate) statement: Statement,
    /// Auto-commit mode.
    pub(crate) auto_commit: bool,
    /// Close after the next call completes.
    pub(crate) auto_close: bool,
    /// Transaction state.
    pub(crate) txn_state: TransactionState,
    pub(crate) state: SessionState,
    /// Last SQL handed to the database, after filters.
    pub(crate) last_sql: Option<GeneratedSql>,
}

impl<'e> Session<'e> {
    /// Create a new session.
    pub fn new(id: SessionId, engine: &'e Engine) -> Self {
        Self {
            id,
            engine,
            statement: Statement::new(),
            auto_commit: true,
            auto_close: false,
            txn_state: TransactionState::new(),
            state: SessionState::Ready,
            last_sql: None,
        }
    }

    /// Get the session ID.
    pub fn id(&self) -> SessionId {
        self.id
    }

    /// Get the engine.
    pub fn engine(&self) -> &'e Engine {
        self.engine
    }

    /// Get the pending statement.
    pub fn statement(&self) -> &Statement {
        &self.statement
    }

    /// Check if auto-commit is enabled.
    pub fn is_auto_commit(&self) -> bool {
        self.auto_commit
    }

    /// Check if the session closes itself after the next call.
    pub fn is_auto_close(&self) -> bool {
        self.auto_close
    }

    /// Set auto-close mode.
    pub fn set_auto_close(&mut self, enabled: bool) {
        self.auto_close = enabled;
    }

    /// Check if a transaction is active.
    pub fn in_transaction(&self) -> bool {
        self.txn_state.in_transaction()
    }

    /// Current lifecycle state.
    pub fn state(&self) -> SessionState {
        self.state
    }

    /// Check if the session is closed.
    pub fn is_closed(&self) -> bool {
        self.state == SessionState::Closed
    }

    /// The last SQL and arguments sent to the database.
    pub fn last_sql(&self) -> Option<&GeneratedSql> {
        self.last_sql.as_ref()
    }

    // ========== Statement ==========

    /// Use a raw query instead of a synthesized one.
    pub fn sql(&mut self, query: impl Into<String>, params: Vec<Value>) -> &mut Self {
        self.statement.set_raw(query, params);
        self
    }

    /// Override the table derived from the bean.
    pub fn table(&mut self, name: impl Into<String>) -> &mut Self {
        self.statement.set_table(name);
        self
    }

    /// Add a condition to the WHERE clause.
    pub fn where_(&mut self, condition: impl Into<String>, args: Vec<Value>) -> &mut Self {
        self.statement.push_condition(condition, args);
        self
    }

    /// Add another condition, joined with AND.
    pub fn and(&mut self, condition: impl Into<String>, args: Vec<Value>) -> &mut Self {
        self.where_(condition, args)
    }

    // ========== Transaction Lifecycle ==========

    /// Begin a transaction. Subsequent calls run inside it.
    pub fn begin(&mut self) -> SessionResult<()> {
        self.execute_txn(TxnCommand::Begin).map(|_| ())
    }

    /// Commit the active transaction.
    pub fn commit(&mut self) -> SessionResult<()> {
        self.execute_txn(TxnCommand::Commit).map(|_| ())
    }

    /// Roll back the active transaction.
    pub fn rollback(&mut self) -> SessionResult<()> {
        self.execute_txn(TxnCommand::Rollback).map(|_| ())
    }

    fn execute_txn(&mut self, command: TxnCommand) -> SessionResult<TransactionResult> {
        self.ensure_open()?;
        let result =
            transaction::execute_txn(&mut self.txn_state, self.engine.database(), command);
        self.auto_commit = !self.txn_state.in_transaction();
        debug!("session {}: {:?} -> {:?}", self.id, command, result);
        result
    }

    /// Close the session.
    ///
    /// An uncommitted transaction is rolled back. Closing twice is a no-op.
    pub fn close(&mut self) -> SessionResult<()> {
        if self.is_closed() {
            return Ok(());
        }

        self.state = SessionState::Closed;
        self.statement.reset();
        self.auto_commit = true;

        if let Some(tx) = self.txn_state.take() {
            debug!("session {}: rolling back uncommitted transaction", self.id);
            tx.rollback()?;
        }
        Ok(())
    }

    /// Close from a cleanup path where the error cannot be returned.
    pub(crate) fn close_quietly(&mut self) {
        if let Err(e) = self.close() {
            warn!("session {}: close failed: {}", self.id, e);
        }
    }

    pub(crate) fn ensure_open(&self) -> SessionResult<()> {
        if self.is_closed() {
            Err(SessionError::session_closed(self.id))
        } else {
            Ok(())
        }
    }
}

impl Drop for Session<'_> {
    fn drop(&mut self) {
        if self.txn_state.in_transaction() {
            self.close_quietly();
        }
    }
}
