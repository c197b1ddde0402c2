//! Aggregate operations: COUNT and SUM.
//!
//! All five entry points share one protocol: resolve the SQL (raw
//! override or synthesized), run the filters, pick the execution target,
//! then decode the single returned row. The call guard cleans up on every
//! exit path.

use log::{debug, info};
use tally_builder::{gen_count_sql, gen_sum_sql, Bean, BuilderResult, GeneratedSql, Statement};
use tally_core::Value;

use crate::decode::{decode_row, Decode};
use crate::error::SessionResult;
use crate::exec::select_target;
use crate::guard::CallGuard;
use crate::session::Session;

/// What an aggregate call asks for.
#[derive(Clone, Copy)]
pub enum AggregateRequest<'a> {
    /// `count(*)`, optionally filtered by a bean.
    Count { bean: Option<&'a dyn Bean> },
    /// `sum` over one or more columns of the bean's table.
    Sum {
        bean: &'a dyn Bean,
        columns: &'a [&'a str],
    },
}

impl AggregateRequest<'_> {
    /// Number of values the result row carries.
    pub fn arity(&self) -> usize {
        match self {
            AggregateRequest::Count { .. } => 1,
            AggregateRequest::Sum { columns, .. } => columns.len(),
        }
    }

    fn name(&self) -> &'static str {
        match self {
            AggregateRequest::Count { .. } => "count",
            AggregateRequest::Sum { .. } => "sum",
        }
    }
}

/// Pick the SQL to run for a request.
///
/// A raw SQL override is returned verbatim with its parameters and the
/// builder is not consulted.
pub fn resolve_query(
    stmt: &Statement,
    request: &AggregateRequest<'_>,
) -> BuilderResult<GeneratedSql> {
    if stmt.has_raw_sql() {
        return Ok(GeneratedSql {
            sql: stmt.raw_sql.clone(),
            args: stmt.raw_params.clone(),
        });
    }

    match *request {
        AggregateRequest::Count { bean } => gen_count_sql(stmt, bean),
        AggregateRequest::Sum { bean, columns } => gen_sum_sql(stmt, bean, columns),
    }
}

impl<'e> Session<'e> {
    /// Count the rows matching the bean's non-empty fields and the
    /// statement's conditions.
    pub fn count(&mut self, bean: Option<&dyn Bean>) -> SessionResult<i64> {
        self.aggregate(AggregateRequest::Count { bean })
    }

    /// Sum one column as a float.
    pub fn sum(&mut self, bean: &dyn Bean, column: &str) -> SessionResult<f64> {
        self.aggregate(AggregateRequest::Sum {
            bean,
            columns: &[column],
        })
    }

    /// Sum one column as an integer.
    pub fn sum_int(&mut self, bean: &dyn Bean, column: &str) -> SessionResult<i64> {
        self.aggregate(AggregateRequest::Sum {
            bean,
            columns: &[column],
        })
    }

    /// Sum several columns as floats, in the order given.
    pub fn sums(&mut self, bean: &dyn Bean, columns: &[&str]) -> SessionResult<Vec<f64>> {
        self.aggregate(AggregateRequest::Sum { bean, columns })
    }

    /// Sum several columns as integers, in the order given.
    pub fn sums_int(&mut self, bean: &dyn Bean, columns: &[&str]) -> SessionResult<Vec<i64>> {
        self.aggregate(AggregateRequest::Sum { bean, columns })
    }

    fn aggregate<T: Decode>(&mut self, request: AggregateRequest<'_>) -> SessionResult<T> {
        let mut call = CallGuard::enter(self);
        call.ensure_open()?;

        let GeneratedSql { mut sql, mut args } = resolve_query(&call.statement, &request)?;
        call.preprocess(&mut sql, &mut args);

        let engine = call.engine;
        let target =
            select_target(call.auto_commit, engine.database(), call.txn_state.active())?;
        debug!(
            "session {}: {} on {} ({} columns)",
            call.id(),
            request.name(),
            target.name(),
            request.arity()
        );

        let outcome = target.query_row(&sql, &args);
        if outcome.is_empty() {
            debug!("session {}: no rows, returning zero", call.id());
        }
        decode_row(outcome, request.arity())
    }

    /// Run the engine's filters and record the final SQL.
    fn preprocess(&mut self, sql: &mut String, args: &mut Vec<Value>) {
        for filter in self.engine.filters() {
            filter.apply(sql, args);
        }

        if self.engine.config().show_sql {
            let shown: Vec<String> = args.iter().map(Value::to_string).collect();
            info!("[SQL] {} [{}]", sql, shown.join(", "));
        }

        self.last_sql = Some(GeneratedSql {
            sql: sql.clone(),
            args: args.clone(),
        });
    }
}
