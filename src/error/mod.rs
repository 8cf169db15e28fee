//! Error types for validation failures and configuration mistakes.
//!
//! Check failures are [`ValidationError`] trees: leaves carry a path and message,
//! aggregates carry path-qualified children. Programmer misuse is reported as a
//! [`ConfigError`] and is never collected into an aggregate.

mod config_error;
mod validation_error;

pub use config_error::{ConfigError, Error};
pub use validation_error::{ValidationError, ValidationErrors};

pub(crate) use validation_error::accumulate;
