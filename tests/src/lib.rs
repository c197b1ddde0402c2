//! Tally integration test support.
//!
//! Provides a scripted, recording in-memory database and fixture beans.
//!
//! # Example
//!
//! ```ignore
//! use tally_tests::prelude::*;
//!
//! let db = MockDatabase::new();
//! db.respond_row(vec![Value::Float(42.5)]);
//! let engine = db.engine();
//! let total = engine.new_session().sum(&Order::any(), "amount")?;
//! ```

mod mock;

pub use fixtures::Order;
pub use mock::{ExecutedQuery, Handle, MockDatabase};

/// Prelude for convenient imports.
pub mod prelude {
    pub use crate::fixtures::Order;
    pub use crate::mock::{ExecutedQuery, Handle, MockDatabase};
    pub use tally_builder::{Bean, BuilderError};
    pub use tally_core::{args, Value};
    pub use tally_session::{
        Engine, EngineConfig, ExecError, Placeholder, QueryRow, Session, SessionError,
        SessionState,
    };
}
