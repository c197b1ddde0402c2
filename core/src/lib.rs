//! Tally Core Types
//!
//! This crate provides the foundational types shared by the Tally crates:
//! - Value types (the Value enum used for query arguments and result columns)
//! - Conversions from Rust scalars into values
//! - Common error messages

pub mod messages;
mod value;

pub use value::*;
