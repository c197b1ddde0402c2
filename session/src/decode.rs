//! Decoding of single-row aggregate results.
//!
//! Every output shape starts from its zero value, sized to the requested
//! arity. An empty outcome returns that zero value untouched.

use tally_core::{messages, Value};
use thiserror::Error;

use crate::error::SessionResult;
use crate::exec::QueryRow;

/// Errors raised while scanning a row into an output shape.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum DecodeError {
    #[error("expected {expected} columns, row has {actual}")]
    ColumnCount { expected: usize, actual: usize },

    #[error("column {index}: {}", messages::ERR_NULL_INTO_NUMBER)]
    Null { index: usize },

    #[error("column {index}: cannot scan {found} into {target}")]
    TypeMismatch {
        index: usize,
        found: &'static str,
        target: &'static str,
    },

    #[error("column {index}: cannot convert {text:?} to {target}")]
    Conversion {
        index: usize,
        text: String,
        target: &'static str,
    },
}

impl DecodeError {
    fn column_count(expected: usize, actual: usize) -> Self {
        Self::ColumnCount { expected, actual }
    }

    fn mismatch(index: usize, value: &Value, target: &'static str) -> Self {
        match value {
            Value::Null => Self::Null { index },
            other => Self::TypeMismatch {
                index,
                found: other.type_name(),
                target,
            },
        }
    }

    fn conversion(index: usize, text: impl Into<String>, target: &'static str) -> Self {
        Self::Conversion {
            index,
            text: text.into(),
            target,
        }
    }
}

/// A numeric column type a row value can be scanned into.
pub trait Scalar: Copy + Default {
    /// Target name used in error messages.
    const NAME: &'static str;

    fn from_value(index: usize, value: &Value) -> Result<Self, DecodeError>;
}

impl Scalar for i64 {
    const NAME: &'static str = "i64";

    fn from_value(index: usize, value: &Value) -> Result<Self, DecodeError> {
        match value {
            Value::Int(i) => Ok(*i),
            Value::Float(f) => integral(*f)
                .ok_or_else(|| DecodeError::conversion(index, f.to_string(), Self::NAME)),
            Value::String(s) => parse_i64(index, s),
            Value::Bytes(b) => parse_i64(index, utf8(index, b, Self::NAME)?),
            other => Err(DecodeError::mismatch(index, other, Self::NAME)),
        }
    }
}

impl Scalar for f64 {
    const NAME: &'static str = "f64";

    fn from_value(index: usize, value: &Value) -> Result<Self, DecodeError> {
        match value {
            Value::Int(i) => Ok(*i as f64),
            Value::Float(f) => Ok(*f),
            Value::String(s) => parse_f64(index, s),
            Value::Bytes(b) => parse_f64(index, utf8(index, b, Self::NAME)?),
            other => Err(DecodeError::mismatch(index, other, Self::NAME)),
        }
    }
}

/// Drivers hand DECIMAL results back as text, either as a string or as
/// raw bytes.
fn utf8<'a>(index: usize, bytes: &'a [u8], target: &'static str) -> Result<&'a str, DecodeError> {
    std::str::from_utf8(bytes)
        .map_err(|_| DecodeError::conversion(index, String::from_utf8_lossy(bytes), target))
}

fn parse_i64(index: usize, text: &str) -> Result<i64, DecodeError> {
    let trimmed = text.trim();
    trimmed
        .parse::<i64>()
        .ok()
        .or_else(|| trimmed.parse::<f64>().ok().and_then(integral))
        .ok_or_else(|| DecodeError::conversion(index, text, i64::NAME))
}

fn parse_f64(index: usize, text: &str) -> Result<f64, DecodeError> {
    text.trim()
        .parse::<f64>()
        .map_err(|_| DecodeError::conversion(index, text, f64::NAME))
}

/// Whole-number floats within i64 range.
fn integral(f: f64) -> Option<i64> {
    if f.is_finite() && f.fract() == 0.0 && f >= i64::MIN as f64 && f < i64::MAX as f64 {
        Some(f as i64)
    } else {
        None
    }
}

/// An output shape for an aggregate call.
pub trait Decode: Sized {
    /// The zero value for a request of `arity` columns.
    fn zeroed(arity: usize) -> Self;

    /// Scan row values into `self`, positionally.
    fn scan(&mut self, values: &[Value]) -> Result<(), DecodeError>;
}

fn scan_scalar<T: Scalar>(target: &mut T, values: &[Value]) -> Result<(), DecodeError> {
    match values {
        [value] => {
            *target = T::from_value(0, value)?;
            Ok(())
        }
        _ => Err(DecodeError::column_count(1, values.len())),
    }
}

impl Decode for i64 {
    fn zeroed(_arity: usize) -> Self {
        0
    }

    fn scan(&mut self, values: &[Value]) -> Result<(), DecodeError> {
        scan_scalar(self, values)
    }
}

impl Decode for f64 {
    fn zeroed(_arity: usize) -> Self {
        0.0
    }

    fn scan(&mut self, values: &[Value]) -> Result<(), DecodeError> {
        scan_scalar(self, values)
    }
}

impl<T: Scalar> Decode for Vec<T> {
    fn zeroed(arity: usize) -> Self {
        vec![T::default(); arity]
    }

    fn scan(&mut self, values: &[Value]) -> Result<(), DecodeError> {
        if values.len() != self.len() {
            return Err(DecodeError::column_count(self.len(), values.len()));
        }
        for (index, (slot, value)) in self.iter_mut().zip(values).enumerate() {
            *slot = T::from_value(index, value)?;
        }
        Ok(())
    }
}

/// Decode a query outcome into `T`.
///
/// `Empty` yields the zero value sized to `arity`; `Failure` and scan
/// errors discard the value.
pub fn decode_row<T: Decode>(outcome: QueryRow, arity: usize) -> SessionResult<T> {
    let mut value = T::zeroed(arity);
    match outcome {
        QueryRow::Empty => Ok(value),
        QueryRow::Row(values) => {
            value.scan(&values)?;
            Ok(value)
        }
        QueryRow::Failure(err) => Err(err.into()),
    }
}
