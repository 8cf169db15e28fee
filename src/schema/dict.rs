//! Dict validation.
//!
//! [`DictValidator`] checks that a value is a mapping and, through
//! [`shape`](DictValidator::shape), verifies selected keys with their own
//! validators. Like array items, shape validators are reused through their
//! settable cells and every key's failure is collected before one aggregate is
//! raised.

use indexmap::IndexMap;
use serde_json::Value;

use crate::error::{accumulate, ConfigError, Error, ValidationError};
use crate::input::NamedInput;
use crate::path::JsonPath;
use crate::source::{ProxyCell, ValueSource};
use crate::value::type_name;

use super::traits::{attach, Validator};

/// Key-to-validator mapping for [`DictValidator::shape`].
///
/// Keys are verified in insertion order.
#[derive(Default)]
pub struct Shape {
    fields: IndexMap<String, Box<dyn Validator>>,
}

impl Shape {
    /// Creates an empty shape.
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds (or replaces) the validator for `key`.
    pub fn field<V>(mut self, key: impl Into<String>, validator: V) -> Self
    where
        V: Validator + 'static,
    {
        self.fields.insert(key.into(), Box::new(validator));
        self
    }

    /// Number of keys in the shape.
    pub fn len(&self) -> usize {
        self.fields.len()
    }

    /// Returns true if the shape has no keys.
    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// Keys in verification order.
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.fields.keys().map(String::as_str)
    }
}

impl<K: Into<String>> FromIterator<(K, Box<dyn Validator>)> for Shape {
    fn from_iter<I: IntoIterator<Item = (K, Box<dyn Validator>)>>(iter: I) -> Self {
        Self {
            fields: iter.into_iter().map(|(k, v)| (k.into(), v)).collect(),
        }
    }
}

/// Validates mapping inputs.
///
/// # Example
///
/// ```rust
/// use yep::{Schema, Shape, Validator};
/// use serde_json::json;
///
/// let mut point = Schema::dict().shape(
///     Shape::new()
///         .field("x", Schema::number().required())
///         .field("y", Schema::number().required()),
/// );
///
/// assert!(point.verify_value(json!({"x": 1, "y": 2})).is_ok());
///
/// let error = point.verify_value(json!({"x": 1})).unwrap_err().into_validation().unwrap();
/// assert_eq!(error.inner[0].path.to_string(), "y");
/// ```
///
/// # Thread safety
///
/// [`shape`](DictValidator::shape) rebinds each key validator's cell in turn.
/// Do not verify the same validator from several threads at once.
pub struct DictValidator {
    input: Option<NamedInput>,
}

impl DictValidator {
    /// Creates a detached dict validator.
    pub fn new() -> Self {
        Self { input: None }
    }

    pub(crate) fn bound(input: NamedInput) -> Self {
        Self { input: Some(input) }
    }

    /// Verifies each key of `shape` with its validator.
    ///
    /// A missing key is presented to its validator as null; only `required()`
    /// on that validator makes absence an error. Failures are qualified as
    /// `name.key` (or `name.key<sub path>` for nested arrays and dicts).
    pub fn shape(mut self, mut shape: Shape) -> Self {
        for validator in shape.fields.values_mut() {
            validator.input_mut();
        }

        let input = self.input_mut();
        let base = input.path();
        input.push_check(move |value| {
            let Some(object) = value.as_object() else {
                return Err(Error::Validation(not_a_dict(value, &base)));
            };

            let mut collected = None;
            for (key, validator) in &shape.fields {
                let cell = validator
                    .input()
                    .and_then(|input| input.source().as_proxy())
                    .ok_or_else(|| ConfigError::NotSettable { name: key.clone() })?;

                tracing::trace!(path = %base, key = %key, "verifying dict key");
                cell.set(object.get(key).cloned().unwrap_or(Value::Null));
                match validator.verify() {
                    Ok(_) => {}
                    Err(Error::Validation(error)) => {
                        accumulate(&mut collected, error.qualify(&base.push_field(key.as_str())))
                    }
                    Err(other) => return Err(other),
                }
            }

            match collected {
                Some(errors) => Err(ValidationError::aggregate(errors).into()),
                None => Ok(()),
            }
        });
        self
    }

    /// Verifies `data` directly instead of reading the input's source.
    ///
    /// Intended for standalone use outside a schema. The input is switched to a
    /// settable cell holding `data` (attaching one if the validator is detached),
    /// so later calls to [`verify`](Validator::verify) see the same mapping.
    pub fn verify_value(&mut self, data: Value) -> Result<Value, Error> {
        let input = self.input_mut();
        match input.source().as_proxy() {
            Some(cell) => cell.set(data),
            None => input.set_source(ValueSource::Proxy(ProxyCell::with_value(data))),
        }
        self.verify()
    }
}

impl Default for DictValidator {
    fn default() -> Self {
        Self::new()
    }
}

impl Validator for DictValidator {
    fn input(&self) -> Option<&NamedInput> {
        self.input.as_ref()
    }

    fn input_mut(&mut self) -> &mut NamedInput {
        attach(&mut self.input)
    }

    fn coerce(&self, raw: Value, path: &JsonPath) -> Result<Value, ValidationError> {
        if raw.is_object() {
            Ok(raw)
        } else {
            Err(not_a_dict(&raw, path))
        }
    }
}

fn not_a_dict(value: &Value, path: &JsonPath) -> ValidationError {
    ValidationError::new(
        path.clone(),
        format!("expected a dictionary, got {}", type_name(value)),
    )
    .with_code("expected_object")
}
