//! The [`Validator`] trait shared by every validator variant.
//!
//! A validator wraps one [`NamedInput`], adds typed coercion in front of the
//! input's pipeline, and contributes checks to it. The chain methods here
//! (`required`, `in_`, `condition`, `modifier`) are available on every variant.

use serde_json::Value;

use crate::error::{ConfigError, Error, ValidationError};
use crate::input::{FailHook, NamedInput};
use crate::path::JsonPath;
use crate::value::{is_present, loosely_equal};

/// A typed builder of checks over one input.
///
/// Validators built without an input (for example `Schema::number()`) are
/// *detached*: the first chain call gives them an unnamed input backed by a
/// settable cell, which is what array and dict validators rebind per item.
///
/// ```rust
/// use yep::{Schema, Validator};
/// use serde_json::json;
///
/// let mut age = Schema::dict().shape(
///     yep::Shape::new().field("age", Schema::number().min(0).required()),
/// );
///
/// assert!(age.verify_value(json!({"age": 0})).is_ok());
/// assert!(age.verify_value(json!({"age": -1})).is_err());
/// ```
pub trait Validator: Send + Sync {
    /// The bound input, if any.
    fn input(&self) -> Option<&NamedInput>;

    /// The bound input, attaching an unnamed proxy-backed input if there is none.
    fn input_mut(&mut self) -> &mut NamedInput;

    /// Converts the resolved value to this validator's type.
    ///
    /// Runs before any check. A failure here is reported like a failed check.
    fn coerce(&self, raw: Value, _path: &JsonPath) -> Result<Value, ValidationError> {
        Ok(raw)
    }

    fn name(&self) -> &str {
        self.input().map_or("", |input| input.name())
    }

    /// Resolves, coerces and checks the value, reporting failures to the input's
    /// hook or, when it has none, to `fallback`.
    fn verify_with(&self, fallback: Option<&FailHook>) -> Result<Value, Error> {
        let input = self.input().ok_or(ConfigError::MissingInput)?;
        let raw = input.resolve()?;
        match self.coerce(raw, &input.path()) {
            Ok(value) => input.check(value, fallback),
            Err(error) => Err(input.fail(error, fallback)),
        }
    }

    /// Resolves and checks the value, returning it (after any modifiers) on success.
    fn verify(&self) -> Result<Value, Error> {
        self.verify_with(None)
    }

    /// Fails on null and on empty strings, arrays and objects. Zero and `false`
    /// are present.
    fn required(mut self) -> Self
    where
        Self: Sized,
    {
        let input = self.input_mut();
        let path = input.path();
        input.push_check(move |value| {
            if is_present(value) {
                Ok(())
            } else {
                Err(reject(&path, "required", "value is required"))
            }
        });
        self
    }

    /// Fails unless the value equals one of `collection`'s members.
    fn in_<I, T>(mut self, collection: I) -> Self
    where
        Self: Sized,
        I: IntoIterator<Item = T>,
        T: Into<Value>,
    {
        let allowed: Vec<Value> = collection.into_iter().map(Into::into).collect();
        let input = self.input_mut();
        let path = input.path();
        input.push_check(move |value| {
            if allowed.iter().any(|member| loosely_equal(member, value)) {
                Ok(())
            } else {
                Err(reject(&path, "not_in", "value is not one of the allowed values"))
            }
        });
        self
    }

    /// Runs the previously added check or modifier only when `predicate` holds.
    fn condition<F>(mut self, predicate: F) -> Self
    where
        Self: Sized,
        F: Fn(&Value) -> bool + Send + Sync + 'static,
    {
        self.input_mut().gate_last(predicate);
        self
    }

    /// Replaces the value with `modify(value)` once the earlier steps pass.
    fn modifier<F>(mut self, modify: F) -> Self
    where
        Self: Sized,
        F: Fn(Value) -> Value + Send + Sync + 'static,
    {
        self.input_mut().push_modifier(modify);
        self
    }
}

impl Validator for NamedInput {
    fn input(&self) -> Option<&NamedInput> {
        Some(self)
    }

    fn input_mut(&mut self) -> &mut NamedInput {
        self
    }
}

impl Validator for Box<dyn Validator> {
    fn input(&self) -> Option<&NamedInput> {
        (**self).input()
    }

    fn input_mut(&mut self) -> &mut NamedInput {
        (**self).input_mut()
    }

    fn coerce(&self, raw: Value, path: &JsonPath) -> Result<Value, ValidationError> {
        (**self).coerce(raw, path)
    }

    fn verify_with(&self, fallback: Option<&FailHook>) -> Result<Value, Error> {
        (**self).verify_with(fallback)
    }
}

/// A leaf failure at `path`, ready to return from a check.
pub(crate) fn reject(path: &JsonPath, code: &str, message: impl Into<String>) -> Error {
    Error::Validation(ValidationError::new(path.clone(), message).with_code(code))
}

/// Attaches a detached input or returns the one already bound.
pub(crate) fn attach(input: &mut Option<NamedInput>) -> &mut NamedInput {
    input.get_or_insert_with(|| NamedInput::proxy(""))
}
