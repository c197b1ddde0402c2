//! Per-call statement state.

use tally_core::Value;

/// An extra condition appended to the synthesized WHERE clause.
#[derive(Debug, Clone, PartialEq)]
pub struct Condition {
    /// SQL fragment with `?` placeholders.
    pub sql: String,
    /// Arguments for the placeholders, in order.
    pub args: Vec<Value>,
}

impl Condition {
    /// Create a new condition.
    pub fn new(sql: impl Into<String>, args: Vec<Value>) -> Self {
        Self {
            sql: sql.into(),
            args,
        }
    }
}

/// Query state accumulated for a single call.
///
/// A non-empty `raw_sql` is executed verbatim with `raw_params` and
/// everything else is ignored. The session resets the statement after
/// every call.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Statement {
    /// Raw SQL override.
    pub raw_sql: String,
    /// Arguments for the raw SQL override.
    pub raw_params: Vec<Value>,
    /// Table override; takes precedence over the bean's table.
    pub table: Option<String>,
    /// Extra conditions joined with AND after the bean conditions.
    pub conditions: Vec<Condition>,
}

impl Statement {
    /// Create an empty statement.
    pub fn new() -> Self {
        Self::default()
    }

    /// Check if a raw SQL override is set.
    pub fn has_raw_sql(&self) -> bool {
        !self.raw_sql.is_empty()
    }

    /// Set the raw SQL override.
    pub fn set_raw(&mut self, sql: impl Into<String>, params: Vec<Value>) {
        self.raw_sql = sql.into();
        self.raw_params = params;
    }

    /// Set the table override.
    pub fn set_table(&mut self, table: impl Into<String>) {
        self.table = Some(table.into());
    }

    /// Append a condition.
    pub fn push_condition(&mut self, sql: impl Into<String>, args: Vec<Value>) {
        self.conditions.push(Condition::new(sql, args));
    }

    /// Check whether the statement holds no state.
    pub fn is_empty(&self) -> bool {
        *self == Statement::default()
    }

    /// Clear all state.
    pub fn reset(&mut self) {
        *self = Statement::default();
    }
}
