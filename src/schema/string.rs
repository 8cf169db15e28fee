//! String validation.
//!
//! [`StringValidator`] converts non-null values to text before its checks run and
//! offers email, length and Brazilian document checks.

use once_cell::sync::Lazy;
use regex::Regex;
use serde_json::Value;

use crate::error::ValidationError;
use crate::input::NamedInput;
use crate::locale::pt_br;
use crate::path::JsonPath;
use crate::value::to_text;

use super::traits::{attach, Validator};

static EMAIL: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[^@]+@[^@]+\.[^@]+$").expect("email pattern is valid"));

/// Validates text inputs.
///
/// Null passes through coercion untouched so that [`required`](Validator::required)
/// can reject it; the length and format checks pass over null.
///
/// # Example
///
/// ```rust
/// use std::sync::Arc;
/// use yep::{NamedInput, Validator};
/// use serde_json::json;
///
/// let email = NamedInput::new("email", Arc::new(json!({"email": "a@b.io"})), "email")
///     .string()
///     .required()
///     .email()
///     .max(64);
///
/// assert_eq!(email.verify().unwrap(), json!("a@b.io"));
/// ```
pub struct StringValidator {
    input: Option<NamedInput>,
}

impl StringValidator {
    /// Creates a detached string validator.
    pub fn new() -> Self {
        Self { input: None }
    }

    pub(crate) fn bound(input: NamedInput) -> Self {
        Self { input: Some(input) }
    }

    /// Fails unless the value looks like `local@domain.tld`.
    pub fn email(self) -> Self {
        self.text_check(|text, path| {
            if EMAIL.is_match(text) {
                None
            } else {
                Some(
                    ValidationError::new(path.clone(), "invalid email format")
                        .with_code("email"),
                )
            }
        })
    }

    /// Minimum length in characters, inclusive.
    pub fn min(self, min: usize) -> Self {
        self.text_check(move |text, path| {
            let len = text.chars().count();
            (len < min).then(|| {
                ValidationError::new(
                    path.clone(),
                    format!("length must be at least {}, got {}", min, len),
                )
                .with_code("min_length")
            })
        })
    }

    /// Maximum length in characters, inclusive.
    pub fn max(self, max: usize) -> Self {
        self.text_check(move |text, path| {
            let len = text.chars().count();
            (len > max).then(|| {
                ValidationError::new(
                    path.clone(),
                    format!("length must be at most {}, got {}", max, len),
                )
                .with_code("max_length")
            })
        })
    }

    /// Brazilian individual taxpayer number, formatted `000.000.000-00`.
    pub fn cpf(self) -> Self {
        self.text_check(|text, path| {
            pt_br::check_cpf(text)
                .err()
                .map(|e| ValidationError::new(path.clone(), e.to_string()).with_code("cpf"))
        })
    }

    /// Brazilian company number, formatted `00.000.000/0000-00`.
    pub fn cnpj(self) -> Self {
        self.text_check(|text, path| {
            pt_br::check_cnpj(text)
                .err()
                .map(|e| ValidationError::new(path.clone(), e.to_string()).with_code("cnpj"))
        })
    }

    /// Registers a check over the textual value. Null values are skipped.
    fn text_check<F>(mut self, check: F) -> Self
    where
        F: Fn(&str, &JsonPath) -> Option<ValidationError> + Send + Sync + 'static,
    {
        let input = self.input_mut();
        let path = input.path();
        input.push_check(move |value| match value {
            Value::Null => Ok(()),
            Value::String(text) => check(text, &path).map_or(Ok(()), |e| Err(e.into())),
            other => check(&to_text(other), &path).map_or(Ok(()), |e| Err(e.into())),
        });
        self
    }
}

impl Default for StringValidator {
    fn default() -> Self {
        Self::new()
    }
}

impl Validator for StringValidator {
    fn input(&self) -> Option<&NamedInput> {
        self.input.as_ref()
    }

    fn input_mut(&mut self) -> &mut NamedInput {
        attach(&mut self.input)
    }

    fn coerce(&self, raw: Value, _path: &JsonPath) -> Result<Value, ValidationError> {
        Ok(match raw {
            Value::Null => Value::Null,
            Value::String(text) => Value::String(text),
            other => Value::String(to_text(&other)),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn verify(validator: StringValidator, value: Value) -> Result<Value, ValidationError> {
        validator
            .input()
            .and_then(|input| input.source().as_proxy())
            .unwrap()
            .set(value);
        validator.verify().map_err(|e| e.into_validation().unwrap())
    }

    #[test]
    fn test_numbers_are_coerced_to_text() {
        let result = verify(StringValidator::new().max(5), json!(10)).unwrap();
        assert_eq!(result, json!("10"));
    }

    #[test]
    fn test_null_passes_through_without_required() {
        let result = verify(StringValidator::new().email().min(3), Value::Null).unwrap();
        assert_eq!(result, Value::Null);
    }

    #[test]
    fn test_null_rejected_by_required() {
        let error = verify(StringValidator::new().required(), Value::Null).unwrap_err();
        assert_eq!(error.code, "required");
    }

    #[test]
    fn test_email_shapes() {
        assert!(verify(StringValidator::new().email(), json!("test@test.com")).is_ok());
        assert!(verify(StringValidator::new().email(), json!("a.b@sub.domain.org")).is_ok());

        for bad in ["test", "test@test", "a@b@c.com", "@test.com", "test@.com"] {
            let error = verify(StringValidator::new().email(), json!(bad));
            assert!(error.is_err(), "{} should be rejected", bad);
        }
    }

    #[test]
    fn test_length_bounds_are_inclusive() {
        let validator = || StringValidator::new().min(5).max(10);
        assert!(verify(validator(), json!("12345")).is_ok());
        assert!(verify(validator(), json!("1234567890")).is_ok());

        let error = verify(validator(), json!("1234")).unwrap_err();
        assert_eq!(error.code, "min_length");

        let error = verify(validator(), json!("1234567890+")).unwrap_err();
        assert_eq!(error.code, "max_length");
    }

    #[test]
    fn test_length_counts_characters() {
        assert!(verify(StringValidator::new().min(3).max(3), json!("日本語")).is_ok());
    }

    #[test]
    fn test_first_failing_check_wins() {
        let error = verify(StringValidator::new().min(10).email(), json!("abc")).unwrap_err();
        assert_eq!(error.code, "min_length");
    }

    #[test]
    fn test_documents() {
        assert!(verify(StringValidator::new().cpf(), json!("529.982.247-25")).is_ok());
        let error = verify(StringValidator::new().cpf(), json!("529.982.247-26")).unwrap_err();
        assert_eq!(error.code, "cpf");

        assert!(verify(StringValidator::new().cnpj(), json!("11.222.333/0001-81")).is_ok());
        let error = verify(StringValidator::new().cnpj(), json!("11222333000181")).unwrap_err();
        assert_eq!(error.code, "cnpj");
    }
}
