//! Integration tests for string validation.

use std::sync::Arc;

use serde_json::{json, Value};
use yep::{ConfigError, Error, NamedInput, Record, Schema, StringValidator, Validator};

fn string_input(value: Value) -> (Arc<Record>, StringValidator) {
    let record = Arc::new(Record::new().with_field("value", value));
    let validator = NamedInput::new("test", record.clone(), "value").string();
    (record, validator)
}

#[test]
fn test_required_rejects_empty_and_null() {
    let (input, validator) = string_input(json!(""));
    let schema = Schema::new().input(validator.required());
    assert!(schema.validate().is_err());

    input.set("value", Value::Null);
    let error = schema.validate().unwrap_err().into_validation().unwrap();
    assert_eq!(error.code, "required");
    assert_eq!(error.path.to_string(), "test");
}

#[test]
fn test_email() {
    let (input, validator) = string_input(json!("test@test.com"));
    let schema = Schema::new().input(validator.email());
    assert_eq!(schema.validate().unwrap()["test"], json!("test@test.com"));

    for bad in ["test", "test@test", "test.com"] {
        input.set("value", json!(bad));
        assert!(schema.validate().is_err(), "{} should be rejected", bad);
    }
}

#[test]
fn test_min_and_max_length() {
    let (input, validator) = string_input(json!("12345"));
    let schema = Schema::new().input(validator.min(5).max(10));
    assert_eq!(schema.validate().unwrap()["test"], json!("12345"));

    input.set("value", json!("1234567890"));
    assert_eq!(schema.validate().unwrap()["test"], json!("1234567890"));

    input.set("value", json!("1234"));
    assert!(schema.validate().is_err());

    input.set("value", json!("1234567890+"));
    assert!(schema.validate().is_err());
}

#[test]
fn test_non_text_values_are_rendered() {
    let (input, validator) = string_input(json!(true));
    let schema = Schema::new().input(validator.max(5));
    assert_eq!(schema.validate().unwrap()["test"], json!("true"));

    input.set("value", json!([1, 2]));
    assert_eq!(schema.validate().unwrap()["test"], json!("[1,2]"));
}

#[test]
fn test_in_after_coercion() {
    let (input, validator) = string_input(json!(2));
    let schema = Schema::new().input(validator.in_(["1", "2"]));
    assert_eq!(schema.validate().unwrap()["test"], json!("2"));

    input.set("value", json!(3));
    let error = schema.validate().unwrap_err().into_validation().unwrap();
    assert_eq!(error.code, "not_in");
}

#[test]
fn test_brazilian_documents() {
    let (input, validator) = string_input(json!("529.982.247-25"));
    let schema = Schema::new().input(validator.required().cpf());
    assert!(schema.validate().is_ok());

    input.set("value", json!("111.111.111-11"));
    assert_eq!(
        schema.validate().unwrap_err().into_validation().unwrap().code,
        "cpf"
    );

    let (input, validator) = string_input(json!("11.222.333/0001-81"));
    let schema = Schema::new().input(validator.cnpj());
    assert!(schema.validate().is_ok());

    input.set("value", json!("11.222.333/0001-80"));
    assert!(schema.validate().is_err());
}

#[test]
fn test_detached_validator_without_checks_has_no_input() {
    assert_eq!(
        StringValidator::new().verify().unwrap_err(),
        Error::Configuration(ConfigError::MissingInput)
    );
}

#[test]
fn test_documents_with_non_ascii_digits_fail_cleanly() {
    let (input, validator) = string_input(json!("529.982.247-2\u{0665}"));
    let schema = Schema::new().input(validator.cpf());
    let error = schema.validate().unwrap_err().into_validation().unwrap();
    assert_eq!(error.code, "cpf");

    input.set("value", json!("529.982.247-25"));
    assert!(schema.validate().is_ok());

    let (_, validator) = string_input(json!("11.222.333/0001-8\u{0661}"));
    let error = validator.cnpj().verify().unwrap_err().into_validation().unwrap();
    assert_eq!(error.code, "cnpj");
    assert_eq!(error.path.to_string(), "test");
}
