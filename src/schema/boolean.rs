//! Boolean validation.

use serde_json::Value;

use crate::error::ValidationError;
use crate::input::NamedInput;
use crate::path::JsonPath;
use crate::value::{is_truthy, type_name};

use super::traits::{attach, reject, Validator};

/// Validates boolean inputs.
///
/// A strict validator rejects anything that is not already a boolean. A lenient
/// one converts the value by truthiness: null, zero and empty strings, arrays
/// and objects become `false`, everything else `true`.
///
/// ```rust
/// use std::sync::Arc;
/// use yep::{NamedInput, Validator};
/// use serde_json::json;
///
/// let source = Arc::new(json!({"terms": "yes"}));
///
/// let lenient = NamedInput::new("terms", source.clone(), "terms").boolean(false).to_be(true);
/// assert_eq!(lenient.verify().unwrap(), json!(true));
///
/// let strict = NamedInput::new("terms", source, "terms").boolean(true);
/// assert!(strict.verify().is_err());
/// ```
pub struct BooleanValidator {
    input: Option<NamedInput>,
    strict: bool,
}

impl BooleanValidator {
    /// Creates a detached boolean validator.
    pub fn new(strict: bool) -> Self {
        Self {
            input: None,
            strict,
        }
    }

    pub(crate) fn bound(input: NamedInput, strict: bool) -> Self {
        Self {
            input: Some(input),
            strict,
        }
    }

    /// Whether non-boolean values are rejected instead of coerced.
    pub fn is_strict(&self) -> bool {
        self.strict
    }

    /// Fails unless the (coerced) value is exactly `expected`.
    pub fn to_be(mut self, expected: bool) -> Self {
        let input = self.input_mut();
        let path = input.path();
        input.push_check(move |value| {
            if value.as_bool() == Some(expected) {
                Ok(())
            } else {
                Err(reject(
                    &path,
                    "to_be",
                    format!("expected {}, got {}", expected, value),
                ))
            }
        });
        self
    }
}

impl Validator for BooleanValidator {
    fn input(&self) -> Option<&NamedInput> {
        self.input.as_ref()
    }

    fn input_mut(&mut self) -> &mut NamedInput {
        attach(&mut self.input)
    }

    fn coerce(&self, raw: Value, path: &JsonPath) -> Result<Value, ValidationError> {
        match raw {
            Value::Bool(_) => Ok(raw),
            other if self.strict => Err(ValidationError::new(
                path.clone(),
                format!("non-boolean value received, got {}", type_name(&other)),
            )
            .with_code("non_boolean")),
            other => Ok(Value::Bool(is_truthy(&other))),
        }
    }
}
