//! Query filters applied to SQL right before execution.
//!
//! Filters run on every query, raw or synthesized, so each must leave
//! already-filtered SQL unchanged.

use tally_core::Value;

/// Rewrites SQL text and/or arguments in place.
pub trait QueryFilter: Send + Sync {
    fn apply(&self, sql: &mut String, args: &mut Vec<Value>);
}

/// Rewrites `?` placeholders into numbered ones (`$1`, `$2`, ...).
///
/// Question marks inside single-quoted literals are left alone.
#[derive(Debug, Clone)]
pub struct SeqFilter {
    prefix: String,
    start: usize,
}

impl SeqFilter {
    /// Create a filter producing `<prefix><n>` starting at `start`.
    pub fn new(prefix: impl Into<String>, start: usize) -> Self {
        Self {
            prefix: prefix.into(),
            start,
        }
    }

    /// PostgreSQL-style `$1, $2, ...` placeholders.
    pub fn dollar() -> Self {
        Self::new("$", 1)
    }
}

/// Lexical context while scanning SQL text.
#[derive(Clone, Copy, PartialEq, Eq)]
enum Scan {
    Code,
    /// Inside `'...'`.
    Literal,
    /// Inside `"..."`.
    Identifier,
    /// After `--`, up to the end of the line.
    LineComment,
    /// Inside `/* ... */`.
    BlockComment,
}

impl QueryFilter for SeqFilter {
    fn apply(&self, sql: &mut String, _args: &mut Vec<Value>) {
        if !sql.contains('?') {
            return;
        }

        let mut out = String::with_capacity(sql.len() + 8);
        let mut next = self.start;
        let mut scan = Scan::Code;
        let mut chars = sql.chars().peekable();

        while let Some(ch) = chars.next() {
            let token = match (scan, ch) {
                (Scan::Code, '?') => {
                    out.push_str(&self.prefix);
                    out.push_str(&next.to_string());
                    next += 1;
                    continue;
                }
                (Scan::Code, '\'') => {
                    scan = Scan::Literal;
                    "'"
                }
                (Scan::Code, '"') => {
                    scan = Scan::Identifier;
                    "\""
                }
                (Scan::Code, '-') if chars.peek() == Some(&'-') => {
                    chars.next();
                    scan = Scan::LineComment;
                    "--"
                }
                (Scan::Code, '/') if chars.peek() == Some(&'*') => {
                    chars.next();
                    scan = Scan::BlockComment;
                    "/*"
                }
                // '' and "" escapes leave and re-enter the quoted run
                (Scan::Literal, '\'') => {
                    scan = Scan::Code;
                    "'"
                }
                (Scan::Identifier, '"') => {
                    scan = Scan::Code;
                    "\""
                }
                (Scan::LineComment, '\n') => {
                    scan = Scan::Code;
                    "\n"
                }
                (Scan::BlockComment, '*') if chars.peek() == Some(&'/') => {
                    chars.next();
                    scan = Scan::Code;
                    "*/"
                }
                _ => {
                    out.push(ch);
                    continue;
                }
            };
            out.push_str(token);
        }

        *sql = out;
    }
}
