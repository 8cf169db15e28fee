//! Numeric validation.
//!
//! [`NumericValidator`] accepts JSON numbers as they are and parses numeric text
//! into a float. Anything else fails before the bound checks run.

use serde_json::{Number, Value};

use crate::error::{Error, ValidationError};
use crate::input::NamedInput;
use crate::path::JsonPath;
use crate::value::type_name;

use super::traits::{attach, reject, Validator};

/// Validates numeric inputs with inclusive bounds.
///
/// # Example
///
/// ```rust
/// use std::sync::Arc;
/// use yep::{NamedInput, Validator};
/// use serde_json::json;
///
/// let source = Arc::new(json!({"age": "42"}));
/// let age = NamedInput::new("age", source, "age").number().min(18).max(130);
///
/// // Numeric text is parsed.
/// assert_eq!(age.verify().unwrap(), json!(42.0));
/// ```
pub struct NumericValidator {
    input: Option<NamedInput>,
}

impl NumericValidator {
    /// Creates a detached numeric validator.
    pub fn new() -> Self {
        Self { input: None }
    }

    pub(crate) fn bound(input: NamedInput) -> Self {
        Self { input: Some(input) }
    }

    /// Fails when the value is below `min`.
    pub fn min(self, min: impl Into<f64>) -> Self {
        let min = min.into();
        self.bound_check(move |n, path| {
            if n < min {
                Err(reject(
                    path,
                    "min",
                    format!("value must be at least {}, got {}", min, n),
                ))
            } else {
                Ok(())
            }
        })
    }

    /// Fails when the value is above `max`.
    pub fn max(self, max: impl Into<f64>) -> Self {
        let max = max.into();
        self.bound_check(move |n, path| {
            if n > max {
                Err(reject(
                    path,
                    "max",
                    format!("value must be at most {}, got {}", max, n),
                ))
            } else {
                Ok(())
            }
        })
    }

    fn bound_check<F>(mut self, check: F) -> Self
    where
        F: Fn(f64, &JsonPath) -> Result<(), Error> + Send + Sync + 'static,
    {
        let input = self.input_mut();
        let path = input.path();
        input.push_check(move |value| match value.as_f64() {
            Some(n) => check(n, &path),
            None => Err(Error::Validation(non_numeric(value, &path))),
        });
        self
    }
}

impl Default for NumericValidator {
    fn default() -> Self {
        Self::new()
    }
}

impl Validator for NumericValidator {
    fn input(&self) -> Option<&NamedInput> {
        self.input.as_ref()
    }

    fn input_mut(&mut self) -> &mut NamedInput {
        attach(&mut self.input)
    }

    fn coerce(&self, raw: Value, path: &JsonPath) -> Result<Value, ValidationError> {
        match raw {
            Value::Number(_) => Ok(raw),
            Value::String(ref text) => text
                .trim()
                .parse::<f64>()
                .ok()
                .and_then(Number::from_f64)
                .map(Value::Number)
                .ok_or_else(|| non_numeric(&raw, path)),
            other => Err(non_numeric(&other, path)),
        }
    }
}

fn non_numeric(value: &Value, path: &JsonPath) -> ValidationError {
    ValidationError::new(
        path.clone(),
        format!("non-numeric value received, got {}", type_name(value)),
    )
    .with_code("non_numeric")
}
