//! Scripted, recording in-memory database.

use std::collections::VecDeque;
use std::sync::{Arc, Mutex, MutexGuard};

use tally_core::Value;
use tally_session::{Database, Engine, EngineConfig, ExecError, QueryRow, Queryer, Transaction};

/// Which handle received a query.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Handle {
    /// The database handle (autocommit).
    Database,
    /// The transaction with the given sequence number, starting at 1.
    Transaction(usize),
}

/// A query as the database saw it.
#[derive(Debug, Clone, PartialEq)]
pub struct ExecutedQuery {
    pub handle: Handle,
    pub sql: String,
    pub args: Vec<Value>,
}

#[derive(Default)]
struct MockState {
    responses: VecDeque<QueryRow>,
    executed: Vec<ExecutedQuery>,
    begun: usize,
    commits: usize,
    rollbacks: usize,
    fail_rollback: bool,
}

/// An in-memory database that replays scripted outcomes in order and
/// records every query it receives. Unscripted queries return no rows.
#[derive(Clone, Default)]
pub struct MockDatabase {
    state: Arc<Mutex<MockState>>,
}

impl MockDatabase {
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> MutexGuard<'_, MockState> {
        self.state.lock().unwrap_or_else(|e| e.into_inner())
    }

    /// Queue an outcome for the next query.
    pub fn respond(&self, outcome: QueryRow) -> &Self {
        self.lock().responses.push_back(outcome);
        self
    }

    /// Queue a returned row.
    pub fn respond_row(&self, values: Vec<Value>) -> &Self {
        self.respond(QueryRow::Row(values))
    }

    /// Queue a "no rows" outcome.
    pub fn respond_empty(&self) -> &Self {
        self.respond(QueryRow::Empty)
    }

    /// Queue a failure.
    pub fn respond_error(&self, message: &str) -> &Self {
        self.respond(QueryRow::Failure(ExecError::new(message)))
    }

    /// Make transaction rollbacks fail.
    pub fn fail_rollback(&self) -> &Self {
        self.lock().fail_rollback = true;
        self
    }

    /// Every query received so far.
    pub fn executed(&self) -> Vec<ExecutedQuery> {
        self.lock().executed.clone()
    }

    /// The most recent query.
    pub fn last(&self) -> Option<ExecutedQuery> {
        self.lock().executed.last().cloned()
    }

    pub fn commits(&self) -> usize {
        self.lock().commits
    }

    pub fn rollbacks(&self) -> usize {
        self.lock().rollbacks
    }

    /// An engine over this database with the default configuration.
    pub fn engine(&self) -> Engine {
        Engine::new(Arc::new(self.clone()))
    }

    /// An engine over this database with the given configuration.
    pub fn engine_with(&self, config: EngineConfig) -> Engine {
        Engine::with_config(Arc::new(self.clone()), config)
    }

    fn run(&self, handle: Handle, sql: &str, args: &[Value]) -> QueryRow {
        let mut state = self.lock();
        state.executed.push(ExecutedQuery {
            handle,
            sql: sql.to_string(),
            args: args.to_vec(),
        });
        state.responses.pop_front().unwrap_or(QueryRow::Empty)
    }
}

impl Queryer for MockDatabase {
    fn query_row(&self, sql: &str, args: &[Value]) -> QueryRow {
        self.run(Handle::Database, sql, args)
    }
}

impl Database for MockDatabase {
    fn begin(&self) -> Result<Box<dyn Transaction>, ExecError> {
        let seq = {
            let mut state = self.lock();
            state.begun += 1;
            state.begun
        };
        Ok(Box::new(MockTransaction {
            seq,
            db: self.clone(),
        }))
    }
}

struct MockTransaction {
    seq: usize,
    db: MockDatabase,
}

impl Queryer for MockTransaction {
    fn query_row(&self, sql: &str, args: &[Value]) -> QueryRow {
        self.db.run(Handle::Transaction(self.seq), sql, args)
    }
}

impl Transaction for MockTransaction {
    fn commit(self: Box<Self>) -> Result<(), ExecError> {
        self.db.lock().commits += 1;
        Ok(())
    }

    fn rollback(self: Box<Self>) -> Result<(), ExecError> {
        let mut state = self.db.lock();
        if state.fail_rollback {
            return Err(ExecError::new("connection lost during rollback"));
        }
        state.rollbacks += 1;
        Ok(())
    }
}
