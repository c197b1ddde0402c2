//! Engine: shared database handle, configuration and session factory.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use log::debug;
use tally_builder::{Bean, QueryFilter, SeqFilter};
use tally_core::Value;

use crate::config::{EngineConfig, Placeholder};
use crate::error::SessionResult;
use crate::exec::Database;
use crate::session::{Session, SessionId};

/// Entry point for creating sessions against one database.
///
/// The engine is `Send + Sync`; sessions borrow it and are used by one
/// caller at a time.
pub struct Engine {
    database: Arc<dyn Database>,
    config: EngineConfig,
    filters: Vec<Box<dyn QueryFilter>>,
    /// Next session ID to assign.
    next_id: AtomicU64,
}

impl Engine {
    /// Create an engine with the default configuration.
    pub fn new(database: Arc<dyn Database>) -> Self {
        Self::with_config(database, EngineConfig::default())
    }

    /// Create an engine with the given configuration.
    pub fn with_config(database: Arc<dyn Database>, config: EngineConfig) -> Self {
        let mut filters: Vec<Box<dyn QueryFilter>> = Vec::new();
        if config.placeholder == Placeholder::Dollar {
            filters.push(Box::new(SeqFilter::dollar()));
        }

        Self {
            database,
            config,
            filters,
            next_id: AtomicU64::new(1),
        }
    }

    /// Append a filter to run before every query.
    pub fn add_filter(&mut self, filter: impl QueryFilter + 'static) {
        self.filters.push(Box::new(filter));
    }

    /// Get the database handle.
    pub fn database(&self) -> &dyn Database {
        self.database.as_ref()
    }

    /// Get the configuration.
    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Get the query filters, in application order.
    pub fn filters(&self) -> &[Box<dyn QueryFilter>] {
        &self.filters
    }

    /// Allocate a new session ID.
    pub fn alloc_id(&self) -> SessionId {
        self.next_id.fetch_add(1, Ordering::Relaxed)
    }

    /// Create a new session in autocommit mode.
    pub fn new_session(&self) -> Session<'_> {
        let id = self.alloc_id();
        debug!("engine: opened session {}", id);
        Session::new(id, self)
    }

    /// Create a session that closes itself after its first call.
    fn auto_close_session(&self) -> Session<'_> {
        let mut session = self.new_session();
        session.set_auto_close(true);
        session
    }

    // ========== One-shot sessions ==========

    /// Start an auto-close session with a raw query.
    pub fn sql(&self, query: impl Into<String>, params: Vec<Value>) -> Session<'_> {
        let mut session = self.auto_close_session();
        session.sql(query, params);
        session
    }

    /// Start an auto-close session on a table.
    pub fn table(&self, name: impl Into<String>) -> Session<'_> {
        let mut session = self.auto_close_session();
        session.table(name);
        session
    }

    /// Start an auto-close session with a condition.
    pub fn where_(&self, condition: impl Into<String>, args: Vec<Value>) -> Session<'_> {
        let mut session = self.auto_close_session();
        session.where_(condition, args);
        session
    }

    /// Count on a fresh auto-close session.
    pub fn count(&self, bean: Option<&dyn Bean>) -> SessionResult<i64> {
        self.auto_close_session().count(bean)
    }

    /// Sum on a fresh auto-close session.
    pub fn sum(&self, bean: &dyn Bean, column: &str) -> SessionResult<f64> {
        self.auto_close_session().sum(bean, column)
    }

    /// Integer sum on a fresh auto-close session.
    pub fn sum_int(&self, bean: &dyn Bean, column: &str) -> SessionResult<i64> {
        self.auto_close_session().sum_int(bean, column)
    }

    /// Multi-column sum on a fresh auto-close session.
    pub fn sums(&self, bean: &dyn Bean, columns: &[&str]) -> SessionResult<Vec<f64>> {
        self.auto_close_session().sums(bean, columns)
    }

    /// Multi-column integer sum on a fresh auto-close session.
    pub fn sums_int(&self, bean: &dyn Bean, columns: &[&str]) -> SessionResult<Vec<i64>> {
        self.auto_close_session().sums_int(bean, columns)
    }
}
