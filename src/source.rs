//! Where input values come from.
//!
//! A [`ValueSource`] is resolved every time its input is verified, so the same
//! schema can be validated again after the underlying data changes. Host-backed
//! sources read a named member off a [`Host`] object and call it when it is a
//! method; proxy sources hold a settable [`ProxyCell`] that array and dict
//! validators rebind once per item.

use std::fmt;
use std::sync::Arc;

use indexmap::IndexMap;
use parking_lot::{Mutex, RwLock};
use serde_json::Value;

use crate::error::ConfigError;

/// Zero-argument accessor returning a value.
pub type Getter = Arc<dyn Fn() -> Value + Send + Sync>;

/// A member looked up on a [`Host`]: either a plain value or a method that
/// produces one.
pub enum Member<'a> {
    Value(Value),
    Callable(&'a (dyn Fn() -> Value + Send + Sync)),
}

/// An object whose members can be read by name.
///
/// Implemented for JSON values (object keys become members) and for
/// [`Record`]. Implement it for your own types to validate them in place.
pub trait Host: Send + Sync {
    fn member(&self, name: &str) -> Option<Member<'_>>;
}

impl Host for Value {
    fn member(&self, name: &str) -> Option<Member<'_>> {
        self.get(name).cloned().map(Member::Value)
    }
}

/// A host object with mutable fields and zero-argument methods.
///
/// ```rust
/// use std::sync::Arc;
/// use serde_json::json;
/// use yep::source::{Record, ValueSource};
///
/// let record = Arc::new(
///     Record::new()
///         .with_field("value", json!("a"))
///         .with_method("greeting", || json!("hello")),
/// );
///
/// let field = ValueSource::attribute(record.clone(), "value");
/// let method = ValueSource::attribute(record.clone(), "greeting");
/// assert_eq!(method.resolve().unwrap(), json!("hello"));
///
/// record.set("value", json!("b"));
/// assert_eq!(field.resolve().unwrap(), json!("b"));
/// ```
#[derive(Default)]
pub struct Record {
    fields: RwLock<IndexMap<String, Value>>,
    methods: IndexMap<String, Box<dyn Fn() -> Value + Send + Sync>>,
}

impl Record {
    /// Creates a record with no fields or methods.
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a field.
    pub fn with_field(mut self, name: impl Into<String>, value: Value) -> Self {
        self.fields.get_mut().insert(name.into(), value);
        self
    }

    /// Adds a zero-argument method. Methods shadow fields of the same name.
    pub fn with_method<F>(mut self, name: impl Into<String>, method: F) -> Self
    where
        F: Fn() -> Value + Send + Sync + 'static,
    {
        self.methods.insert(name.into(), Box::new(method));
        self
    }

    /// Replaces (or adds) a field value.
    pub fn set(&self, name: impl Into<String>, value: Value) {
        self.fields.write().insert(name.into(), value);
    }

    /// Returns a copy of the field value, if set.
    pub fn get(&self, name: &str) -> Option<Value> {
        self.fields.read().get(name).cloned()
    }
}

impl Host for Record {
    fn member(&self, name: &str) -> Option<Member<'_>> {
        if let Some(method) = self.methods.get(name) {
            return Some(Member::Callable(method.as_ref()));
        }
        self.fields.read().get(name).cloned().map(Member::Value)
    }
}

/// A settable value holder.
///
/// Cloning a cell yields a handle to the same slot. Validators that own a cell
/// must not be verified from several threads at once: rebinding one item while
/// another is being checked would mix their values.
#[derive(Debug, Clone, Default)]
pub struct ProxyCell(Arc<Mutex<Value>>);

impl ProxyCell {
    /// Creates a cell holding null.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a cell holding `value`.
    pub fn with_value(value: Value) -> Self {
        Self(Arc::new(Mutex::new(value)))
    }

    /// Replaces the held value.
    pub fn set(&self, value: Value) {
        *self.0.lock() = value;
    }

    /// Returns a copy of the held value.
    pub fn get(&self) -> Value {
        self.0.lock().clone()
    }
}

/// The origin of an input's raw value.
pub enum ValueSource {
    /// A named member of a host object; callable members are invoked.
    Attribute {
        target: Arc<dyn Host>,
        accessor: String,
    },
    /// A caller-supplied accessor, evaluated on every resolution.
    Getter(Getter),
    /// A settable cell, used for standalone and per-item validation.
    Proxy(ProxyCell),
}

impl ValueSource {
    /// A source reading member `accessor` of `target`.
    pub fn attribute(target: Arc<dyn Host>, accessor: impl Into<String>) -> Self {
        ValueSource::Attribute {
            target,
            accessor: accessor.into(),
        }
    }

    /// A source calling `getter` on every resolution.
    pub fn getter<F>(getter: F) -> Self
    where
        F: Fn() -> Value + Send + Sync + 'static,
    {
        ValueSource::Getter(Arc::new(getter))
    }

    /// A source backed by a fresh settable cell.
    pub fn proxy() -> Self {
        ValueSource::Proxy(ProxyCell::new())
    }

    /// Reads the current value.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::MissingMember` when the host has no member named by
    /// the accessor.
    pub fn resolve(&self) -> Result<Value, ConfigError> {
        match self {
            ValueSource::Attribute { target, accessor } => match target.member(accessor) {
                Some(Member::Value(value)) => Ok(value),
                Some(Member::Callable(method)) => Ok(method()),
                None => Err(ConfigError::MissingMember {
                    accessor: accessor.clone(),
                }),
            },
            ValueSource::Getter(getter) => Ok(getter()),
            ValueSource::Proxy(cell) => Ok(cell.get()),
        }
    }

    /// The settable cell behind this source, if it has one.
    pub fn as_proxy(&self) -> Option<&ProxyCell> {
        match self {
            ValueSource::Proxy(cell) => Some(cell),
            _ => None,
        }
    }
}

impl fmt::Debug for ValueSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ValueSource::Attribute { accessor, .. } => {
                f.debug_struct("Attribute").field("accessor", accessor).finish()
            }
            ValueSource::Getter(_) => f.write_str("Getter"),
            ValueSource::Proxy(cell) => f.debug_tuple("Proxy").field(&cell.get()).finish(),
        }
    }
}
