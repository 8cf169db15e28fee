//! # Yep
//!
//! Declarative input validation: describe, per named input, a chain of checks
//! and get back either the validated values or a tree of path-qualified errors.
//!
//! ## Overview
//!
//! A [`NamedInput`] ties a name to a value source (a member of a host object, a
//! closure, or a settable cell). Typed validators ([`StringValidator`],
//! [`NumericValidator`], [`BooleanValidator`], [`ArrayValidator`],
//! [`DictValidator`]) coerce the value and append checks to the input. A
//! [`Schema`] validates a whole form, either stopping at the first failing input
//! or collecting every failure.
//!
//! Arrays and dicts reuse one validator per item or key and always collect all
//! item failures, qualifying their paths as `name[1].key`.
//!
//! ## Core Types
//!
//! - [`ValidationError`]: a leaf failure, or an aggregate whose `inner` errors
//!   carry qualified paths
//! - [`Error`]: a validation failure or a [`ConfigError`] (misuse)
//! - [`JsonPath`]: error location inside nested inputs
//! - [`ValueSource`] / [`ProxyCell`]: where inputs read their values from
//!
//! ## Example
//!
//! ```rust
//! use std::sync::Arc;
//! use yep::{NamedInput, Record, Schema, Validator};
//! use serde_json::json;
//!
//! let form = Arc::new(Record::new().with_field("value", json!("test@test.com")));
//! let schema = Schema::new().input(NamedInput::new("test", form.clone(), "value").string().email());
//!
//! let values = schema.validate().unwrap();
//! assert_eq!(values["test"], json!("test@test.com"));
//!
//! form.set("value", json!("test@test"));
//! let error = schema.validate().unwrap_err().into_validation().unwrap();
//! assert_eq!(error.path.to_string(), "test");
//! assert!(error.inner.is_empty());
//! ```

pub mod error;
pub mod input;
pub mod locale;
pub mod path;
pub mod schema;
pub mod source;
pub mod value;

pub use error::{ConfigError, Error, ValidationError, ValidationErrors};
pub use input::{FailHook, NamedInput, SuccessHook};
pub use path::{JsonPath, PathSegment};
pub use schema::{
    ArrayValidator, BooleanValidator, DictValidator, NumericValidator, Schema, Shape,
    StringValidator, Validator,
};
pub use source::{Host, Member, ProxyCell, Record, ValueSource};

/// Result of a verification or schema validation.
pub type Result<T> = std::result::Result<T, Error>;

/// Collect-all outcome in applicative form, see [`Schema::check`].
pub type ValidationResult<T> = stillwater::Validation<T, ValidationErrors>;
