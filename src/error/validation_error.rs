//! Validation failure trees.
//!
//! [`ValidationError`] is either a leaf (one failed check) or an aggregate
//! (an empty message plus children that are already path-qualified).
//! [`ValidationErrors`] is the non-empty accumulator used while collecting.

use std::fmt::{self, Display};

use stillwater::prelude::*;

use crate::path::JsonPath;

/// A failed check, or an aggregate of failed checks.
///
/// ```rust
/// use yep::{JsonPath, ValidationError};
///
/// let error = ValidationError::new(JsonPath::from_name("email"), "invalid email format")
///     .with_code("email");
///
/// assert_eq!(error.path.to_string(), "email");
/// assert!(!error.is_aggregate());
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct ValidationError {
    /// Where the failure happened. Root for top-level aggregates.
    pub path: JsonPath,
    /// Human-readable description. Empty for aggregates.
    pub message: String,
    /// Machine-readable error code (e.g. `min_length`).
    pub code: String,
    /// Nested failures. Empty for leaves.
    pub inner: Vec<ValidationError>,
}

impl ValidationError {
    /// Creates a leaf error. The code defaults to `validation_error`.
    pub fn new(path: JsonPath, message: impl Into<String>) -> Self {
        Self {
            path,
            message: message.into(),
            code: "validation_error".to_string(),
            inner: Vec::new(),
        }
    }

    /// Creates an aggregate whose children are the collected errors, in order.
    pub fn aggregate(errors: ValidationErrors) -> Self {
        Self {
            path: JsonPath::root(),
            message: String::new(),
            code: "aggregate".to_string(),
            inner: errors.into_vec(),
        }
    }

    /// Sets the machine-readable error code.
    pub fn with_code(mut self, code: impl Into<String>) -> Self {
        self.code = code.into();
        self
    }

    /// Returns true if this error holds nested failures.
    pub fn is_aggregate(&self) -> bool {
        !self.inner.is_empty()
    }

    /// Flattens the tree into its leaf errors, depth first.
    pub fn leaves(&self) -> Vec<&ValidationError> {
        if self.inner.is_empty() {
            return vec![self];
        }
        self.inner.iter().flat_map(|e| e.leaves()).collect()
    }

    /// Returns the first leaf whose rendered path equals `path`.
    pub fn leaf_at(&self, path: &str) -> Option<&ValidationError> {
        self.leaves().into_iter().find(|e| e.path.to_string() == path)
    }

    /// Rewrites this error for the location `prefix` inside an enclosing container.
    ///
    /// A leaf takes `prefix` as its path. An aggregate is dissolved: each child is
    /// prefixed instead, so the enclosing container never holds an aggregate whose
    /// children would be qualified twice.
    pub(crate) fn qualify(self, prefix: &JsonPath) -> ValidationErrors {
        if self.inner.is_empty() {
            return ValidationErrors::single(Self {
                path: prefix.clone(),
                ..self
            });
        }

        let children = self
            .inner
            .into_iter()
            .map(|child| Self {
                path: prefix.join(&child.path),
                ..child
            })
            .collect();
        match ValidationErrors::from_vec(children) {
            Some(errors) => errors,
            None => unreachable!("aggregate errors always have children"),
        }
    }
}

impl Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_aggregate() {
            let leaves = self.leaves();
            write!(f, "validation failed with {} error(s)", leaves.len())?;
            for (i, leaf) in leaves.iter().enumerate() {
                write!(f, "\n  {}. {}", i + 1, leaf)?;
            }
            return Ok(());
        }

        if self.path.is_root() {
            write!(f, "(root): {}", self.message)
        } else {
            write!(f, "{}: {}", self.path, self.message)
        }
    }
}

impl std::error::Error for ValidationError {}

const _: () = {
    const fn assert_send<T: Send>() {}
    const fn assert_sync<T: Sync>() {}
    assert_send::<ValidationError>();
    assert_sync::<ValidationError>();
};

/// A non-empty, ordered collection of validation errors.
///
/// Array, dict and collect-all schema validation gather failures here and turn
/// them into a single aggregate with [`ValidationError::aggregate`].
#[derive(Debug, Clone, PartialEq)]
pub struct ValidationErrors(NonEmptyVec<ValidationError>);

impl ValidationErrors {
    /// Creates a collection holding one error.
    pub fn single(error: ValidationError) -> Self {
        Self(NonEmptyVec::singleton(error))
    }

    /// Returns `None` when `errors` is empty.
    pub fn from_vec(errors: Vec<ValidationError>) -> Option<Self> {
        NonEmptyVec::from_vec(errors).map(Self)
    }

    /// Number of errors.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Returns false: the collection always holds at least one error.
    pub fn is_empty(&self) -> bool {
        false
    }

    /// Iterates over the errors in order.
    pub fn iter(&self) -> impl Iterator<Item = &ValidationError> {
        self.0.iter()
    }

    /// The first error collected.
    pub fn first(&self) -> &ValidationError {
        self.0.head()
    }

    /// Errors whose rendered path equals `path`.
    pub fn at_path(&self, path: &str) -> Vec<&ValidationError> {
        self.0.iter().filter(|e| e.path.to_string() == path).collect()
    }

    /// Returns errors whose code equals `code`.
    pub fn with_code(&self, code: &str) -> Vec<&ValidationError> {
        self.0.iter().filter(|e| e.code == code).collect()
    }

    /// Consumes the collection, returning the errors in order.
    pub fn into_vec(self) -> Vec<ValidationError> {
        self.0.into_vec()
    }
}

impl Semigroup for ValidationErrors {
    fn combine(self, other: Self) -> Self {
        ValidationErrors(self.0.combine(other.0))
    }
}

impl Display for ValidationErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Validation failed with {} error(s):", self.len())?;
        for (i, error) in self.iter().enumerate() {
            writeln!(f, "  {}. {}", i + 1, error)?;
        }
        Ok(())
    }
}

impl std::error::Error for ValidationErrors {}

impl IntoIterator for ValidationErrors {
    type Item = ValidationError;
    type IntoIter = std::vec::IntoIter<ValidationError>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_vec().into_iter()
    }
}

/// Appends `next` to the accumulator in `slot`.
pub(crate) fn accumulate(slot: &mut Option<ValidationErrors>, next: ValidationErrors) {
    *slot = Some(match slot.take() {
        Some(collected) => collected.combine(next),
        None => next,
    });
}

#[cfg(test)]
mod tests {
    use super::*;

    fn leaf(path: JsonPath, message: &str) -> ValidationError {
        ValidationError::new(path, message)
    }

    #[test]
    fn test_leaf_defaults() {
        let error = leaf(JsonPath::from_name("name"), "value is required");
        assert_eq!(error.code, "validation_error");
        assert!(error.inner.is_empty());
        assert!(!error.is_aggregate());
        assert_eq!(error.leaves(), vec![&error]);
    }

    #[test]
    fn test_aggregate_has_empty_message() {
        let errors = ValidationErrors::single(leaf(JsonPath::from_name("a"), "bad"));
        let aggregate = ValidationError::aggregate(errors);
        assert!(aggregate.is_aggregate());
        assert!(aggregate.message.is_empty());
        assert!(aggregate.path.is_root());
        assert_eq!(aggregate.code, "aggregate");
    }

    #[test]
    fn test_qualify_leaf_replaces_path() {
        let prefix = JsonPath::from_name("list").push_index(1);
        let qualified = leaf(JsonPath::root(), "non-numeric").qualify(&prefix);
        assert_eq!(qualified.len(), 1);
        assert_eq!(qualified.first().path.to_string(), "list[1]");
    }

    #[test]
    fn test_qualify_aggregate_prefixes_children() {
        let children = ValidationErrors::single(leaf(JsonPath::root().push_field("n"), "too large"))
            .combine(ValidationErrors::single(leaf(
                JsonPath::root().push_field("m"),
                "required",
            )));
        let aggregate = ValidationError::aggregate(children);

        let qualified = aggregate.qualify(&JsonPath::from_name("rows").push_index(0));
        let paths: Vec<String> = qualified.iter().map(|e| e.path.to_string()).collect();
        assert_eq!(paths, vec!["rows[0].n", "rows[0].m"]);
    }

    #[test]
    fn test_leaves_flattens_nested_aggregates() {
        let nested = ValidationError::aggregate(
            ValidationErrors::single(leaf(JsonPath::from_name("b"), "x"))
                .combine(ValidationErrors::single(leaf(JsonPath::from_name("c"), "y"))),
        );
        let top = ValidationError::aggregate(
            ValidationErrors::single(leaf(JsonPath::from_name("a"), "z"))
                .combine(ValidationErrors::single(nested)),
        );

        let messages: Vec<&str> = top.leaves().iter().map(|e| e.message.as_str()).collect();
        assert_eq!(messages, vec!["z", "x", "y"]);
        assert_eq!(top.leaf_at("c").unwrap().message, "y");
        assert!(top.leaf_at("d").is_none());
    }

    #[test]
    fn test_display() {
        assert_eq!(
            leaf(JsonPath::from_name("email"), "invalid format").to_string(),
            "email: invalid format"
        );
        assert_eq!(leaf(JsonPath::root(), "bad").to_string(), "(root): bad");

        let aggregate = ValidationError::aggregate(
            ValidationErrors::single(leaf(JsonPath::from_name("a"), "one"))
                .combine(ValidationErrors::single(leaf(JsonPath::from_name("b"), "two"))),
        );
        let display = aggregate.to_string();
        assert!(display.contains("2 error(s)"));
        assert!(display.contains("1. a: one"));
        assert!(display.contains("2. b: two"));
    }

    #[test]
    fn test_errors_filters() {
        let errors = ValidationErrors::single(
            leaf(JsonPath::from_name("a"), "1").with_code("required"),
        )
        .combine(ValidationErrors::single(
            leaf(JsonPath::from_name("b"), "2").with_code("max"),
        ))
        .combine(ValidationErrors::single(
            leaf(JsonPath::from_name("a"), "3").with_code("max"),
        ));

        assert_eq!(errors.len(), 3);
        assert_eq!(errors.at_path("a").len(), 2);
        assert_eq!(errors.with_code("max").len(), 2);
        assert_eq!(errors.first().message, "1");
    }

    #[test]
    fn test_from_vec_rejects_empty() {
        assert!(ValidationErrors::from_vec(Vec::new()).is_none());
    }

    #[test]
    fn test_accumulate_preserves_order() {
        let mut slot = None;
        accumulate(&mut slot, ValidationErrors::single(leaf(JsonPath::root(), "1")));
        accumulate(&mut slot, ValidationErrors::single(leaf(JsonPath::root(), "2")));

        let messages: Vec<String> = slot.unwrap().into_iter().map(|e| e.message).collect();
        assert_eq!(messages, vec!["1", "2"]);
    }
}
