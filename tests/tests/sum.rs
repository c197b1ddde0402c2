//! SUM variants through a session.

use pretty_assertions::assert_eq;
use tally_tests::prelude::*;

#[test]
fn test_sum_returns_row_value() {
    // GIVEN the synthesized query returns 42.5
    let db = MockDatabase::new();
    db.respond_row(vec![Value::Float(42.5)]);
    let engine = db.engine();
    let mut session = engine.new_session();

    // WHEN
    let total = session.sum(&Order::any(), "amount").unwrap();

    // THEN
    assert_eq!(total, 42.5);
    assert_eq!(
        db.last().unwrap().sql,
        "SELECT COALESCE(sum(amount),0) FROM orders"
    );
}

#[test]
fn test_sum_on_empty_result_is_zero() {
    let db = MockDatabase::new();
    db.respond_empty();
    let engine = db.engine();
    let mut session = engine.new_session();

    let total = session.sum(&Order::any(), "amount").unwrap();

    assert_eq!(total, 0.0);
}

#[test]
fn test_sum_int_accepts_decimal_text() {
    // GIVEN a driver reporting the sum as DECIMAL text
    let db = MockDatabase::new();
    db.respond_row(vec![Value::String("17".into())]);
    let engine = db.engine();
    let mut session = engine.new_session();

    // WHEN
    let total = session
        .sum_int(&Order::any().customer("acme"), "quantity")
        .unwrap();

    // THEN
    assert_eq!(total, 17);
    let executed = db.last().unwrap();
    assert_eq!(
        executed.sql,
        "SELECT COALESCE(sum(quantity),0) FROM orders WHERE customer = ?"
    );
    assert_eq!(executed.args, args!["acme"]);
}

#[test]
fn test_sum_unknown_column_is_builder_error() {
    // GIVEN
    let db = MockDatabase::new();
    let engine = db.engine();
    let mut session = engine.new_session();

    // WHEN
    let result = session.sum(&Order::any(), "discount");

    // THEN
    assert!(matches!(
        result,
        Err(SessionError::BuilderError(BuilderError::UnknownColumn { .. }))
    ));
    assert!(db.executed().is_empty());
}

#[test]
fn test_sums_on_empty_result_keeps_length() {
    // GIVEN a raw query over three columns that matches nothing
    let db = MockDatabase::new();
    db.respond_empty();
    let engine = db.engine();
    let mut session = engine.new_session();

    // WHEN
    let totals = session
        .sql("SELECT sum(a), sum(b), sum(c) FROM t WHERE 1 = 0", args![])
        .sums(&Order::any(), &["a", "b", "c"])
        .unwrap();

    // THEN
    assert_eq!(totals, vec![0.0, 0.0, 0.0]);
}

#[test]
fn test_sums_returns_values_in_column_order() {
    // GIVEN
    let db = MockDatabase::new();
    db.respond_row(vec![Value::Float(10.5), Value::Int(4)]);
    let engine = db.engine();
    let mut session = engine.new_session();

    // WHEN
    let totals = session
        .sums(&Order::any().status(1), &["amount", "quantity"])
        .unwrap();

    // THEN
    assert_eq!(totals, vec![10.5, 4.0]);
    assert_eq!(
        db.last().unwrap().sql,
        "SELECT COALESCE(sum(amount),0), COALESCE(sum(quantity),0) FROM orders WHERE status = ?"
    );
}

#[test]
fn test_sums_int_single_column() {
    let db = MockDatabase::new();
    db.respond_row(vec![Value::Int(7)]);
    let engine = db.engine();
    let mut session = engine.new_session();

    let totals = session.sums_int(&Order::any(), &["quantity"]).unwrap();

    assert_eq!(totals, vec![7]);
}

#[test]
fn test_sums_int_on_empty_result_keeps_length() {
    let db = MockDatabase::new();
    let engine = db.engine();
    let mut session = engine.new_session();

    let totals = session
        .sums_int(&Order::any(), &["quantity", "status"])
        .unwrap();

    assert_eq!(totals, vec![0, 0]);
}

#[test]
fn test_sums_without_columns_is_builder_error() {
    let db = MockDatabase::new();
    let engine = db.engine();
    let mut session = engine.new_session();

    let result = session.sums(&Order::any(), &[]);

    assert!(matches!(
        result,
        Err(SessionError::BuilderError(BuilderError::NoColumns))
    ));
}

#[test]
fn test_sums_row_width_mismatch_is_error() {
    // GIVEN a raw query returning fewer columns than requested
    let db = MockDatabase::new();
    db.respond_row(vec![Value::Int(1)]);
    let engine = db.engine();
    let mut session = engine.new_session();

    // WHEN
    let result = session
        .sql("SELECT sum(a) FROM t", args![])
        .sums_int(&Order::any(), &["a", "b"]);

    // THEN
    assert!(matches!(result, Err(SessionError::DecodeError(_))));
    assert!(session.statement().is_empty());
}

#[test]
fn test_sum_int_rejects_fractional_value() {
    let db = MockDatabase::new();
    db.respond_row(vec![Value::Float(2.5)]);
    let engine = db.engine();
    let mut session = engine.new_session();

    let result = session.sum_int(&Order::any(), "amount");

    assert!(matches!(result, Err(SessionError::DecodeError(_))));
}

#[test]
fn test_sum_null_is_error() {
    let db = MockDatabase::new();
    db.respond_row(vec![Value::Null]);
    let engine = db.engine();
    let mut session = engine.new_session();

    let result = session
        .sql("SELECT sum(amount) FROM orders", args![])
        .sum(&Order::any(), "amount");

    assert!(matches!(result, Err(SessionError::DecodeError(_))));
}

#[test]
fn test_sum_int_accepts_decimal_bytes() {
    // GIVEN a driver reporting the sum as raw DECIMAL bytes
    let db = MockDatabase::new();
    db.respond_row(vec![Value::Bytes(b"17".to_vec())]);
    let engine = db.engine();
    let mut session = engine.new_session();

    // WHEN
    let total = session.sum_int(&Order::any(), "quantity").unwrap();

    // THEN
    assert_eq!(total, 17);
}

#[test]
fn test_sums_accepts_mixed_text_and_bytes() {
    let db = MockDatabase::new();
    db.respond_row(vec![
        Value::Bytes(b"10.25".to_vec()),
        Value::String("4".into()),
    ]);
    let engine = db.engine();
    let mut session = engine.new_session();

    let totals = session
        .sums(&Order::any(), &["amount", "quantity"])
        .unwrap();

    assert_eq!(totals, vec![10.25, 4.0]);
}
