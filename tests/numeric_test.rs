//! Integration tests for numeric validation.

use std::sync::Arc;

use serde_json::{json, Value};
use yep::{NamedInput, NumericValidator, Record, Schema, Validator};

fn numeric_form<F>(value: Value, build: F) -> (Arc<Record>, Schema)
where
    F: FnOnce(NamedInput) -> NumericValidator,
{
    let record = Arc::new(Record::new().with_field("value", value));
    let input = NamedInput::new("test", record.clone(), "value");
    (record, Schema::new().input(build(input)))
}

#[test]
fn test_min_and_max_are_inclusive() {
    let (input, schema) = numeric_form(json!(5), |i| i.number().min(5).max(10));
    assert_eq!(schema.validate().unwrap()["test"], json!(5));

    input.set("value", json!(10));
    assert_eq!(schema.validate().unwrap()["test"], json!(10));

    input.set("value", json!(4));
    let error = schema.validate().unwrap_err().into_validation().unwrap();
    assert_eq!(error.code, "min");
    assert_eq!(error.message, "value must be at least 5, got 4");

    input.set("value", json!(11));
    let error = schema.validate().unwrap_err().into_validation().unwrap();
    assert_eq!(error.code, "max");
}

#[test]
fn test_numeric_text() {
    let (input, schema) = numeric_form(json!("3.5"), |i| i.number().max(4));
    assert_eq!(schema.validate().unwrap()["test"], json!(3.5));

    input.set("value", json!("four"));
    let error = schema.validate().unwrap_err().into_validation().unwrap();
    assert_eq!(error.code, "non_numeric");
    assert_eq!(error.message, "non-numeric value received, got string");
}

#[test]
fn test_required_accepts_zero_rejects_null() {
    let (input, schema) = numeric_form(json!(0), |i| i.number().required());
    assert_eq!(schema.validate().unwrap()["test"], json!(0));

    input.set("value", Value::Null);
    let error = schema.validate().unwrap_err().into_validation().unwrap();
    assert_eq!(error.code, "non_numeric");
}

#[test]
fn test_in_compares_numerically() {
    let (input, schema) = numeric_form(json!("2"), |i| i.number().in_([1, 2, 3]));
    assert_eq!(schema.validate().unwrap()["test"], json!(2.0));

    input.set("value", json!(2.5));
    assert!(schema.validate().is_err());
}

#[test]
fn test_modifier_runs_after_bounds() {
    let (_, schema) = numeric_form(json!(3), |i| {
        i.number()
            .min(0)
            .modifier(|v| json!(v.as_f64().unwrap_or_default() * 10.0))
            .max(40)
    });
    assert_eq!(schema.validate().unwrap()["test"], json!(30.0));
}

#[test]
fn test_conditional_bound() {
    let (input, schema) = numeric_form(json!(150), |i| {
        i.number()
            .max(100)
            .condition(|v| v.as_f64().is_some_and(|n| n >= 0.0))
    });
    assert!(schema.validate().is_err());

    input.set("value", json!(-150));
    assert!(schema.validate().is_ok());
}
