//! Tally Session
//!
//! Sessions, engines and the aggregate query protocol.
//!
//! Responsibilities:
//! - Resolve raw or synthesized SQL for each call
//! - Pick the execution target (database handle or active transaction)
//! - Decode single-row aggregate results, treating "no rows" as zero
//! - Reset per-call state and honour auto-close on every exit path

mod aggregate;
mod config;
mod decode;
mod engine;
mod error;
mod exec;
mod guard;
mod session;
mod transaction;

pub use aggregate::{resolve_query, AggregateRequest};
pub use config::{EngineConfig, Placeholder};
pub use decode::{decode_row, Decode, DecodeError, Scalar};
pub use engine::Engine;
pub use error::{SessionError, SessionResult};
pub use exec::{select_target, Database, ExecError, ExecTarget, QueryRow, Queryer, Transaction};
pub use session::{Session, SessionId, SessionState};
pub use transaction::TxnCommand;
