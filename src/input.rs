//! Named inputs and their check pipelines.
//!
//! A [`NamedInput`] binds a name to a [`ValueSource`] and an ordered list of
//! steps. Checks run in registration order and the first failure stops the
//! input; modifiers rebind the value seen by later steps and by the caller.

use std::fmt;
use std::sync::Arc;

use serde_json::Value;

use crate::error::{Error, ValidationError};
use crate::path::JsonPath;
use crate::schema::{ArrayValidator, BooleanValidator, DictValidator, NumericValidator, StringValidator};
use crate::source::{Host, ValueSource};

/// Called once with the failure when an input does not pass.
pub type FailHook = Arc<dyn Fn(&ValidationError) + Send + Sync>;

/// Called with the final value when an input passes.
pub type SuccessHook = Arc<dyn Fn(&Value) + Send + Sync>;

pub(crate) type CheckFn = Box<dyn Fn(&Value) -> Result<(), Error> + Send + Sync>;
pub(crate) type ModifyFn = Box<dyn Fn(Value) -> Value + Send + Sync>;
pub(crate) type PredicateFn = Box<dyn Fn(&Value) -> bool + Send + Sync>;

/// One entry of an input's pipeline.
pub(crate) enum Step {
    Check(CheckFn),
    Modify(ModifyFn),
    /// Runs the wrapped step only when the predicate holds for the current value.
    When {
        predicate: PredicateFn,
        step: Box<Step>,
    },
}

impl Step {
    fn apply(&self, value: Value) -> Result<Value, Error> {
        match self {
            Step::Check(check) => {
                check(&value)?;
                Ok(value)
            }
            Step::Modify(modify) => Ok(modify(value)),
            Step::When { predicate, step } => {
                if predicate(&value) {
                    step.apply(value)
                } else {
                    Ok(value)
                }
            }
        }
    }
}

/// A named value plus the checks it must pass.
///
/// Build one per form field, chain checks onto it (directly with
/// [`validate`](NamedInput::validate) or through a typed validator), and hand it
/// to a [`Schema`](crate::Schema).
///
/// ```rust
/// use std::sync::Arc;
/// use serde_json::{json, Value};
/// use yep::{JsonPath, NamedInput, Validator, ValidationError};
///
/// let input = NamedInput::new("code", Arc::new(json!({"code": "abc"})), "code")
///     .validate(|value: &Value| {
///         if value == "abc" {
///             Ok(())
///         } else {
///             Err(ValidationError::new(JsonPath::from_name("code"), "unknown code"))
///         }
///     });
///
/// assert_eq!(input.verify().unwrap(), json!("abc"));
/// ```
pub struct NamedInput {
    name: String,
    source: ValueSource,
    steps: Vec<Step>,
    on_fail: Option<FailHook>,
    on_success: Option<SuccessHook>,
}

impl NamedInput {
    /// An input reading member `accessor` of `target`.
    pub fn new(name: impl Into<String>, target: Arc<dyn Host>, accessor: impl Into<String>) -> Self {
        Self::with_source(name, ValueSource::attribute(target, accessor))
    }

    /// An input whose value is produced by `getter` on every verification.
    pub fn from_fn<F>(name: impl Into<String>, getter: F) -> Self
    where
        F: Fn() -> Value + Send + Sync + 'static,
    {
        Self::with_source(name, ValueSource::getter(getter))
    }

    /// An input backed by a settable cell.
    pub fn proxy(name: impl Into<String>) -> Self {
        Self::with_source(name, ValueSource::proxy())
    }

    /// An input reading from an explicit source.
    pub fn with_source(name: impl Into<String>, source: ValueSource) -> Self {
        Self {
            name: name.into(),
            source,
            steps: Vec::new(),
            on_fail: None,
            on_success: None,
        }
    }

    /// Sets the failure hook. It takes precedence over the schema's hook.
    pub fn on_fail<F>(mut self, hook: F) -> Self
    where
        F: Fn(&ValidationError) + Send + Sync + 'static,
    {
        self.on_fail = Some(Arc::new(hook));
        self
    }

    /// Sets the hook called with the final value when the input passes.
    pub fn on_success<F>(mut self, hook: F) -> Self
    where
        F: Fn(&Value) + Send + Sync + 'static,
    {
        self.on_success = Some(Arc::new(hook));
        self
    }

    /// Appends a custom check.
    pub fn validate<F>(mut self, check: F) -> Self
    where
        F: Fn(&Value) -> Result<(), ValidationError> + Send + Sync + 'static,
    {
        self.push_check(move |value| check(value).map_err(Error::from));
        self
    }

    /// Turns this input into a [`StringValidator`].
    pub fn string(self) -> StringValidator {
        StringValidator::bound(self)
    }

    /// Turns this input into a [`NumericValidator`].
    pub fn number(self) -> NumericValidator {
        NumericValidator::bound(self)
    }

    /// Turns this input into a [`BooleanValidator`].
    pub fn boolean(self, strict: bool) -> BooleanValidator {
        BooleanValidator::bound(self, strict)
    }

    /// Turns this input into an [`ArrayValidator`].
    pub fn array(self) -> ArrayValidator {
        ArrayValidator::bound(self)
    }

    /// Turns this input into a [`DictValidator`].
    pub fn dict(self) -> DictValidator {
        DictValidator::bound(self)
    }

    /// The input name, used as the key of the result mapping.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Path reported by checks on this input.
    pub fn path(&self) -> JsonPath {
        JsonPath::from_name(&self.name)
    }

    /// The source the raw value is read from.
    pub fn source(&self) -> &ValueSource {
        &self.source
    }

    pub(crate) fn set_source(&mut self, source: ValueSource) {
        self.source = source;
    }

    pub(crate) fn push_check<F>(&mut self, check: F)
    where
        F: Fn(&Value) -> Result<(), Error> + Send + Sync + 'static,
    {
        self.steps.push(Step::Check(Box::new(check)));
    }

    pub(crate) fn push_modifier<F>(&mut self, modify: F)
    where
        F: Fn(Value) -> Value + Send + Sync + 'static,
    {
        self.steps.push(Step::Modify(Box::new(modify)));
    }

    /// Gates the most recently added step behind `predicate`.
    ///
    /// Does nothing when no step has been added yet.
    pub(crate) fn gate_last<F>(&mut self, predicate: F)
    where
        F: Fn(&Value) -> bool + Send + Sync + 'static,
    {
        if let Some(step) = self.steps.pop() {
            self.steps.push(Step::When {
                predicate: Box::new(predicate),
                step: Box::new(step),
            });
        }
    }

    /// Reads the raw value from the source.
    pub fn resolve(&self) -> Result<Value, Error> {
        Ok(self.source.resolve()?)
    }

    /// Runs the pipeline over an already resolved (and coerced) value.
    ///
    /// On failure the input's own hook runs, or `fallback` when the input has
    /// none, and the error is returned unchanged. On success the success hook
    /// runs with the final value.
    pub fn check(&self, value: Value, fallback: Option<&FailHook>) -> Result<Value, Error> {
        let mut value = value;
        for step in &self.steps {
            value = match step.apply(value) {
                Ok(next) => next,
                Err(Error::Validation(error)) => return Err(self.fail(error, fallback)),
                Err(other) => return Err(other),
            };
        }

        if let Some(hook) = &self.on_success {
            hook(&value);
        }
        Ok(value)
    }

    /// Reports `error` to the nearest failure hook and wraps it for propagation.
    pub(crate) fn fail(&self, error: ValidationError, fallback: Option<&FailHook>) -> Error {
        tracing::debug!(input = %self.name, code = %error.code, "input failed validation");
        if let Some(hook) = self.on_fail.as_ref().or(fallback) {
            hook(&error);
        }
        Error::Validation(error)
    }
}

impl fmt::Debug for NamedInput {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("NamedInput")
            .field("name", &self.name)
            .field("source", &self.source)
            .field("steps", &self.steps.len())
            .finish()
    }
}
