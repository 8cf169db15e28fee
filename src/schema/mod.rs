//! Forms and validators.
//!
//! A [`Schema`] owns an ordered list of validators, each bound to a
//! [`NamedInput`](crate::NamedInput), and validates them together. The factory
//! functions on `Schema` build *detached* validators for use inside
//! [`ArrayValidator::of`] and [`DictValidator::shape`].
//!
//! # Example
//!
//! ```rust
//! use std::sync::Arc;
//! use yep::{NamedInput, Schema, Validator};
//! use serde_json::json;
//!
//! let form = Arc::new(json!({"name": "Ada", "age": "36"}));
//!
//! let schema = Schema::new()
//!     .input(NamedInput::new("name", form.clone(), "name").string().required().max(32))
//!     .input(NamedInput::new("age", form, "age").number().min(0));
//!
//! let values = schema.validate().unwrap();
//! assert_eq!(values["name"], json!("Ada"));
//! assert_eq!(values["age"], json!(36.0));
//! ```

mod array;
mod boolean;
mod dict;
mod numeric;
mod string;
mod traits;

pub use array::ArrayValidator;
pub use boolean::BooleanValidator;
pub use dict::{DictValidator, Shape};
pub use numeric::NumericValidator;
pub use string::StringValidator;
pub use traits::Validator;

use std::fmt;
use std::sync::Arc;

use indexmap::IndexMap;
use serde_json::Value;
use stillwater::Validation;

use crate::error::{accumulate, ConfigError, Error, ValidationError, ValidationErrors};
use crate::input::FailHook;
use crate::ValidationResult;

/// An ordered form of validated inputs.
///
/// With `abort_early` (the default) validation stops at the first failing input
/// and its error is returned as is. Without it every input is evaluated and the
/// failures are returned together as one aggregate whose children are the
/// individual input errors, in input order.
///
/// Configuration errors are never collected; they stop validation immediately
/// in both modes.
///
/// # Thread safety
///
/// A `Schema` is `Send + Sync` and can be moved to another thread. Calling
/// [`validate`](Schema::validate) from several threads at once is only sound
/// when no input uses [`ArrayValidator::of`] or [`DictValidator::shape`]: those
/// rebind a shared cell per item, so concurrent calls would check each other's
/// items.
pub struct Schema {
    inputs: Vec<Box<dyn Validator>>,
    on_fail: Option<FailHook>,
    abort_early: bool,
}

impl Schema {
    /// Creates an empty schema that aborts at the first failing input.
    pub fn new() -> Self {
        Self {
            inputs: Vec::new(),
            on_fail: None,
            abort_early: true,
        }
    }

    /// Creates a schema from already boxed validators, in order.
    pub fn from_inputs(inputs: Vec<Box<dyn Validator>>) -> Self {
        Self {
            inputs,
            ..Self::new()
        }
    }

    /// Appends an input. Inputs are validated in the order they are added.
    pub fn input<V>(mut self, validator: V) -> Self
    where
        V: Validator + 'static,
    {
        self.inputs.push(Box::new(validator));
        self
    }

    /// Failure hook for inputs that have none of their own.
    pub fn on_fail<F>(mut self, hook: F) -> Self
    where
        F: Fn(&ValidationError) + Send + Sync + 'static,
    {
        self.on_fail = Some(Arc::new(hook));
        self
    }

    /// Sets whether validation stops at the first failing input.
    pub fn abort_early(mut self, abort_early: bool) -> Self {
        self.abort_early = abort_early;
        self
    }

    /// Returns true if validation stops at the first failing input.
    pub fn is_abort_early(&self) -> bool {
        self.abort_early
    }

    /// Number of inputs.
    pub fn len(&self) -> usize {
        self.inputs.len()
    }

    /// Returns true if the schema has no inputs.
    pub fn is_empty(&self) -> bool {
        self.inputs.is_empty()
    }

    /// Validates every input and returns their values keyed by input name.
    ///
    /// # Example
    ///
    /// ```rust
    /// use std::sync::Arc;
    /// use yep::{NamedInput, Schema, Validator};
    /// use serde_json::json;
    ///
    /// let form = Arc::new(json!({"a": "", "b": "x"}));
    /// let schema = Schema::new()
    ///     .abort_early(false)
    ///     .input(NamedInput::new("a", form.clone(), "a").string().required())
    ///     .input(NamedInput::new("b", form, "b").string().min(2));
    ///
    /// let error = schema.validate().unwrap_err().into_validation().unwrap();
    /// assert_eq!(error.inner.len(), 2);
    /// ```
    pub fn validate(&self) -> Result<IndexMap<String, Value>, Error> {
        tracing::debug!(
            inputs = self.inputs.len(),
            abort_early = self.abort_early,
            "validating schema"
        );

        let mut values = IndexMap::with_capacity(self.inputs.len());
        let mut collected: Option<ValidationErrors> = None;
        for validator in &self.inputs {
            match validator.verify_with(self.on_fail.as_ref()) {
                Ok(value) => {
                    values.insert(validator.name().to_string(), value);
                }
                Err(Error::Validation(error)) if !self.abort_early => {
                    accumulate(&mut collected, ValidationErrors::single(error));
                }
                Err(error) => {
                    tracing::debug!(input = %validator.name(), "schema validation stopped");
                    return Err(error);
                }
            }
        }

        match collected {
            Some(errors) => {
                tracing::debug!(failures = errors.len(), "schema validation failed");
                Err(ValidationError::aggregate(errors).into())
            }
            None => {
                tracing::debug!("schema validation passed");
                Ok(values)
            }
        }
    }

    /// Validates every input, ignoring `abort_early`, and returns the outcome
    /// as a [`ValidationResult`].
    ///
    /// Each failing input contributes its own error to the failure.
    pub fn check(&self) -> Result<ValidationResult<IndexMap<String, Value>>, ConfigError> {
        let mut values = IndexMap::with_capacity(self.inputs.len());
        let mut collected: Option<ValidationErrors> = None;
        for validator in &self.inputs {
            match validator.verify_with(self.on_fail.as_ref()) {
                Ok(value) => {
                    values.insert(validator.name().to_string(), value);
                }
                Err(Error::Validation(error)) => {
                    accumulate(&mut collected, ValidationErrors::single(error));
                }
                Err(Error::Configuration(error)) => return Err(error),
            }
        }

        Ok(match collected {
            Some(errors) => Validation::Failure(errors),
            None => Validation::Success(values),
        })
    }

    /// A detached string validator.
    pub fn string() -> StringValidator {
        StringValidator::new()
    }

    /// A detached numeric validator.
    pub fn number() -> NumericValidator {
        NumericValidator::new()
    }

    /// A detached boolean validator. See [`BooleanValidator`] for `strict`.
    pub fn boolean(strict: bool) -> BooleanValidator {
        BooleanValidator::new(strict)
    }

    /// A detached array validator.
    pub fn array() -> ArrayValidator {
        ArrayValidator::new()
    }

    /// A detached dict validator.
    pub fn dict() -> DictValidator {
        DictValidator::new()
    }
}

impl Default for Schema {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for Schema {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Schema")
            .field(
                "inputs",
                &self.inputs.iter().map(|v| v.name()).collect::<Vec<_>>(),
            )
            .field("abort_early", &self.abort_early)
            .finish()
    }
}
