//! Array validation.
//!
//! [`ArrayValidator`] checks the length and contents of a sequence and, through
//! [`of`](ArrayValidator::of), runs an item validator over every element. The
//! item validator is reused: its settable cell is rebound to each element in
//! turn, and every element's failure is collected before one aggregate is raised.

use serde_json::Value;

use crate::error::{accumulate, ConfigError, Error, ValidationError};
use crate::input::NamedInput;
use crate::path::JsonPath;
use crate::value::{loosely_equal, type_name};

use super::traits::{attach, reject, Validator};

/// Validates sequence inputs.
///
/// # Example
///
/// ```rust
/// use std::sync::Arc;
/// use yep::{NamedInput, Schema, Validator};
/// use serde_json::json;
///
/// let source = Arc::new(json!({"scores": [1, "x", 3]}));
/// let scores = NamedInput::new("scores", source, "scores")
///     .array()
///     .min(1)
///     .of(Schema::number().required());
///
/// let error = scores.verify().unwrap_err().into_validation().unwrap();
/// assert_eq!(error.inner.len(), 1);
/// assert_eq!(error.inner[0].path.to_string(), "scores[1]");
/// ```
///
/// # Thread safety
///
/// [`of`](ArrayValidator::of) rebinds the item validator's cell for every
/// element. Do not verify the same validator from several threads at once.
pub struct ArrayValidator {
    input: Option<NamedInput>,
}

impl ArrayValidator {
    /// Creates a detached array validator.
    pub fn new() -> Self {
        Self { input: None }
    }

    pub(crate) fn bound(input: NamedInput) -> Self {
        Self { input: Some(input) }
    }

    /// Fails unless the sequence has exactly `size` items.
    pub fn len(self, size: usize) -> Self {
        self.items_check(move |items, path| {
            if items.len() == size {
                Ok(())
            } else {
                Err(reject(
                    path,
                    "length",
                    format!("array must have exactly {} items, got {}", size, items.len()),
                ))
            }
        })
    }

    /// Fails when the sequence has fewer than `min` items.
    pub fn min(self, min: usize) -> Self {
        self.items_check(move |items, path| {
            if items.len() < min {
                Err(reject(
                    path,
                    "min_length",
                    format!("array must have at least {} items, got {}", min, items.len()),
                ))
            } else {
                Ok(())
            }
        })
    }

    /// Fails when the sequence has more than `max` items.
    pub fn max(self, max: usize) -> Self {
        self.items_check(move |items, path| {
            if items.len() > max {
                Err(reject(
                    path,
                    "max_length",
                    format!("array must have at most {} items, got {}", max, items.len()),
                ))
            } else {
                Ok(())
            }
        })
    }

    /// Fails unless some element equals `item`.
    pub fn includes(self, item: impl Into<Value>) -> Self {
        let item = item.into();
        self.items_check(move |items, path| {
            if items.iter().any(|element| loosely_equal(element, &item)) {
                Ok(())
            } else {
                Err(reject(
                    path,
                    "includes",
                    format!("array does not include {}", item),
                ))
            }
        })
    }

    /// Verifies every element with `item`.
    ///
    /// Element failures are qualified as `name[i]` (or `name[i].<sub path>` for
    /// failures of nested arrays and dicts) and raised together as one aggregate
    /// after the whole sequence has been visited.
    ///
    /// `item` must read from a settable cell. Detached validators get one here;
    /// a validator bound to a host-backed input makes verification fail with
    /// [`ConfigError::NotSettable`].
    pub fn of<V>(mut self, mut item: V) -> Self
    where
        V: Validator + 'static,
    {
        item.input_mut();

        let input = self.input_mut();
        let base = input.path();
        input.push_check(move |value| {
            let Some(elements) = value.as_array() else {
                return Err(Error::Validation(not_an_array(value, &base)));
            };
            let cell = item
                .input()
                .and_then(|input| input.source().as_proxy())
                .ok_or_else(|| ConfigError::NotSettable {
                    name: item.name().to_string(),
                })?;

            let mut collected = None;
            for (index, element) in elements.iter().enumerate() {
                tracing::trace!(path = %base, index, "verifying array item");
                cell.set(element.clone());
                match item.verify() {
                    Ok(_) => {}
                    Err(Error::Validation(error)) => {
                        accumulate(&mut collected, error.qualify(&base.push_index(index)))
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

    fn items_check<F>(mut self, check: F) -> Self
    where
        F: Fn(&[Value], &JsonPath) -> Result<(), Error> + Send + Sync + 'static,
    {
        let input = self.input_mut();
        let path = input.path();
        input.push_check(move |value| match value.as_array() {
            Some(items) => check(items, &path),
            None => Err(Error::Validation(not_an_array(value, &path))),
        });
        self
    }
}

impl Default for ArrayValidator {
    fn default() -> Self {
        Self::new()
    }
}

impl Validator for ArrayValidator {
    fn input(&self) -> Option<&NamedInput> {
        self.input.as_ref()
    }

    fn input_mut(&mut self) -> &mut NamedInput {
        attach(&mut self.input)
    }

    fn coerce(&self, raw: Value, path: &JsonPath) -> Result<Value, ValidationError> {
        if raw.is_array() {
            Ok(raw)
        } else {
            Err(not_an_array(&raw, path))
        }
    }
}

fn not_an_array(value: &Value, path: &JsonPath) -> ValidationError {
    ValidationError::new(
        path.clone(),
        format!("expected an iterable, got {}", type_name(value)),
    )
    .with_code("expected_array")
}
