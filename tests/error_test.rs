//! Integration tests for error trees.

use serde_json::json;
use yep::{ConfigError, Error, JsonPath, Schema, Shape, ValidationError, ValidationErrors, Validator};

#[test]
fn test_leaf_display() {
    let error = ValidationError::new(JsonPath::from_name("email"), "invalid email format");
    assert_eq!(error.to_string(), "email: invalid email format");

    let root = ValidationError::new(JsonPath::root(), "expected a dictionary, got null");
    assert_eq!(root.to_string(), "(root): expected a dictionary, got null");
}

#[test]
fn test_aggregate_display_lists_leaves() {
    let mut validator = Schema::dict().shape(
        Shape::new()
            .field("a", Schema::number())
            .field("b", Schema::array().of(Schema::number())),
    );

    let error = validator
        .verify_value(json!({"a": "x", "b": [1, "y"]}))
        .unwrap_err()
        .into_validation()
        .unwrap();

    assert_eq!(
        error.to_string(),
        "validation failed with 2 error(s)\n  \
         1. a: non-numeric value received, got string\n  \
         2. b[1]: non-numeric value received, got string"
    );
}

#[test]
fn test_leaves_and_filters() {
    let mut validator = Schema::dict().shape(
        Shape::new()
            .field("name", Schema::string().required())
            .field("tags", Schema::array().of(Schema::string().min(2))),
    );

    let error = validator
        .verify_value(json!({"tags": ["x", "ok", "y"]}))
        .unwrap_err()
        .into_validation()
        .unwrap();

    assert!(error.leaf_at("tags[2]").is_some());
    assert!(error.leaf_at("tags[1]").is_none());

    let errors = ValidationErrors::from_vec(error.inner.clone()).unwrap();
    assert_eq!(errors.len(), 3);
    assert_eq!(errors.with_code("min_length").len(), 2);
    assert_eq!(errors.at_path("name").len(), 1);
}

#[test]
fn test_empty_collection_is_not_an_error() {
    assert!(ValidationErrors::from_vec(Vec::new()).is_none());
}

#[test]
fn test_error_conversions() {
    let leaf = ValidationError::new(JsonPath::from_name("x"), "bad");
    let error: Error = leaf.clone().into();
    assert_eq!(error.as_validation(), Some(&leaf));
    assert!(!error.is_configuration());
    assert_eq!(error.to_string(), "x: bad");

    let error: Error = ConfigError::NotSettable {
        name: "item".to_string(),
    }
    .into();
    assert!(error.is_configuration());
    assert_eq!(
        error.to_string(),
        "validator 'item' requires a settable value source"
    );
    assert!(error.into_validation().is_none());
}
