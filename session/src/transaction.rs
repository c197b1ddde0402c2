//! Transaction handling for Tally sessions.
//!
//! This module contains the logic for the transaction control commands
//! (BEGIN, COMMIT, ROLLBACK). Aggregate calls never issue these; they only
//! read the active transaction.

use tally_core::messages;

use crate::error::{SessionError, SessionResult};
use crate::exec::{Database, Transaction};

/// A transaction control command.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TxnCommand {
    Begin,
    Commit,
    Rollback,
}

/// Result of a transaction control command.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum TransactionResult {
    /// Transaction began.
    Begun,
    /// Transaction committed.
    Committed,
    /// Transaction rolled back.
    RolledBack,
}

/// Transaction state tracker.
#[derive(Default)]
pub(crate) struct TransactionState {
    /// The active transaction, if any.
    active: Option<Box<dyn Transaction>>,
}

impl TransactionState {
    /// Create a new transaction state.
    pub(crate) fn new() -> Self {
        Self { active: None }
    }

    /// Whether a transaction is active.
    pub(crate) fn in_transaction(&self) -> bool {
        self.active.is_some()
    }

    /// The active transaction handle.
    pub(crate) fn active(&self) -> Option<&dyn Transaction> {
        self.active.as_deref()
    }

    /// Detach the active transaction, if any.
    pub(crate) fn take(&mut self) -> Option<Box<dyn Transaction>> {
        self.active.take()
    }
}

/// Execute a transaction control command.
pub(crate) fn execute_txn(
    state: &mut TransactionState,
    database: &dyn Database,
    command: TxnCommand,
) -> SessionResult<TransactionResult> {
    match command {
        TxnCommand::Begin => {
            if state.in_transaction() {
                return Err(SessionError::transaction_error(
                    messages::ERR_TRANSACTION_ACTIVE,
                ));
            }
            state.active = Some(database.begin()?);
            Ok(TransactionResult::Begun)
        }

        TxnCommand::Commit => {
            let tx = state.take().ok_or_else(|| {
                SessionError::transaction_error(messages::ERR_NO_ACTIVE_TRANSACTION)
            })?;
            tx.commit()?;
            Ok(TransactionResult::Committed)
        }

        TxnCommand::Rollback => {
            let tx = state.take().ok_or_else(|| {
                SessionError::transaction_error(messages::ERR_NO_ACTIVE_TRANSACTION)
            })?;
            tx.rollback()?;
            Ok(TransactionResult::RolledBack)
        }
    }
}
