//! SQL synthesis for aggregate queries.

use std::sync::OnceLock;

use regex_lite::Regex;
use tally_core::Value;

use crate::bean::Bean;
use crate::error::{BuilderError, BuilderResult};
use crate::statement::Statement;

/// SQL text plus its positional arguments.
#[derive(Debug, Clone, PartialEq)]
pub struct GeneratedSql {
    pub sql: String,
    pub args: Vec<Value>,
}

/// Generate `SELECT count(*)` for the statement and optional bean.
pub fn gen_count_sql(stmt: &Statement, bean: Option<&dyn Bean>) -> BuilderResult<GeneratedSql> {
    let table = resolve_table(stmt, bean)?;
    let (where_clause, args) = build_conditions(stmt, bean)?;

    Ok(GeneratedSql {
        sql: format!("SELECT count(*) FROM {}{}", table, where_clause),
        args,
    })
}

/// Generate `SELECT COALESCE(sum(col),0), ...` for the given columns.
///
/// Every column must be a mapped field of the bean.
pub fn gen_sum_sql(
    stmt: &Statement,
    bean: &dyn Bean,
    columns: &[&str],
) -> BuilderResult<GeneratedSql> {
    if columns.is_empty() {
        return Err(BuilderError::NoColumns);
    }

    let table = resolve_table(stmt, Some(bean))?;

    let mut sums = Vec::with_capacity(columns.len());
    for column in columns {
        check_identifier(column)?;
        if !bean.has_column(column) {
            return Err(BuilderError::unknown_column(table, *column));
        }
        sums.push(format!("COALESCE(sum({}),0)", column));
    }

    let (where_clause, args) = build_conditions(stmt, Some(bean))?;

    Ok(GeneratedSql {
        sql: format!("SELECT {} FROM {}{}", sums.join(", "), table, where_clause),
        args,
    })
}

/// Pick the table override or the bean's table.
fn resolve_table<'a>(stmt: &'a Statement, bean: Option<&'a dyn Bean>) -> BuilderResult<&'a str> {
    let table = match (&stmt.table, bean) {
        (Some(table), _) => table.as_str(),
        (None, Some(bean)) => bean.table_name(),
        (None, None) => return Err(BuilderError::NoTable),
    };
    check_identifier(table)?;
    Ok(table)
}

/// Build the WHERE clause: bean equality conditions first, then the
/// statement's extra conditions.
fn build_conditions(
    stmt: &Statement,
    bean: Option<&dyn Bean>,
) -> BuilderResult<(String, Vec<Value>)> {
    let mut parts = Vec::new();
    let mut args = Vec::new();

    if let Some(bean) = bean {
        for (column, value) in bean.conditions() {
            check_identifier(column)?;
            parts.push(format!("{} = ?", column));
            args.push(value);
        }
    }

    for cond in &stmt.conditions {
        parts.push(format!("({})", cond.sql));
        args.extend(cond.args.iter().cloned());
    }

    if parts.is_empty() {
        Ok((String::new(), args))
    } else {
        Ok((format!(" WHERE {}", parts.join(" AND ")), args))
    }
}

fn identifier_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| {
        Regex::new(r"^[A-Za-z_][A-Za-z0-9_]*(\.[A-Za-z_][A-Za-z0-9_]*)?$")
            .expect("identifier pattern is a valid regex")
    })
}

fn check_identifier(name: &str) -> BuilderResult<()> {
    if identifier_pattern().is_match(name) {
        Ok(())
    } else {
        Err(BuilderError::invalid_identifier(name))
    }
}
