//! Integration tests for boolean validation.

use std::sync::Arc;

use serde_json::json;
use yep::{NamedInput, Record, Schema, Validator};

#[test]
fn test_lenient_boolean_coerces_truthiness() {
    let record = Arc::new(Record::new().with_field("terms", json!("yes")));
    let schema = Schema::new().input(
        NamedInput::new("terms", record.clone(), "terms")
            .boolean(false)
            .to_be(true),
    );

    assert_eq!(schema.validate().unwrap()["terms"], json!(true));

    record.set("terms", json!(""));
    let error = schema.validate().unwrap_err().into_validation().unwrap();
    assert_eq!(error.code, "to_be");
    assert_eq!(error.path.to_string(), "terms");
}

#[test]
fn test_strict_boolean_rejects_other_types() {
    let record = Arc::new(Record::new().with_field("flag", json!(1)));
    let schema = Schema::new()
        .input(NamedInput::new("flag", record.clone(), "flag").boolean(true));

    let error = schema.validate().unwrap_err().into_validation().unwrap();
    assert_eq!(error.code, "non_boolean");
    assert_eq!(error.message, "non-boolean value received, got number");

    record.set("flag", json!(false));
    assert_eq!(schema.validate().unwrap()["flag"], json!(false));
}

#[test]
fn test_detached_boolean_inside_dict() {
    let mut settings = Schema::dict().shape(
        yep::Shape::new()
            .field("enabled", Schema::boolean(true).required())
            .field("beta", Schema::boolean(false).to_be(false)),
    );

    assert!(settings.verify_value(json!({"enabled": false})).is_ok());

    let error = settings
        .verify_value(json!({"enabled": "no", "beta": 1}))
        .unwrap_err()
        .into_validation()
        .unwrap();
    let codes: Vec<&str> = error.inner.iter().map(|e| e.code.as_str()).collect();
    assert_eq!(codes, vec!["non_boolean", "to_be"]);
}
