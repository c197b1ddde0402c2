//! Tally Builder
//!
//! Turn a filter bean and a statement into executable aggregate SQL.
//!
//! Responsibilities:
//! - Define the `Bean` contract (table name + mapped fields)
//! - Hold per-call statement state (raw SQL override, table, conditions)
//! - Synthesize COUNT and SUM queries with positional arguments
//! - Provide the query filter hook applied before execution

mod bean;
mod error;
mod filter;
mod sql;
mod statement;

pub use bean::Bean;
pub use error::{BuilderError, BuilderResult};
pub use filter::{QueryFilter, SeqFilter};
pub use sql::{gen_count_sql, gen_sum_sql, GeneratedSql};
pub use statement::{Condition, Statement};
