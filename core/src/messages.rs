//! Common error messages used across Tally components.
//!
//! These constants keep the builder and session wording consistent.

/// Error: a column list is required for SUM.
pub const ERR_SUM_REQUIRES_COLUMNS: &str = "SUM requires at least one column";

/// Error: no table could be resolved for the statement.
pub const ERR_NO_TABLE: &str = "no table name: pass a bean or set a table on the statement";

/// Error: the session has no active transaction.
pub const ERR_NO_ACTIVE_TRANSACTION: &str = "no transaction is active";

/// Error: the session already has an active transaction.
pub const ERR_TRANSACTION_ACTIVE: &str = "transaction already active";

/// Error: NULL cannot be scanned into a numeric target.
pub const ERR_NULL_INTO_NUMBER: &str = "cannot scan NULL into a numeric target";
