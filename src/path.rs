//! Error paths for nested inputs.
//!
//! A [`JsonPath`] locates a failure inside a validated input, e.g. `users[1].email`.
//! Leaf checks report the path of their own input; the nearest enclosing array or
//! dict validator qualifies it with the index or key it was iterating.

use std::fmt::{self, Display};

/// One step of a [`JsonPath`].
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum PathSegment {
    /// An input name or mapping key (`email`, `user`).
    Field(String),
    /// A sequence index (`[0]`).
    Index(usize),
}

/// A path to a value inside a validated input.
///
/// Paths are immutable; the `push_*` and [`join`](JsonPath::join) methods return
/// new paths.
///
/// ```rust
/// use yep::JsonPath;
///
/// let path = JsonPath::from_name("users").push_index(1).push_field("email");
/// assert_eq!(path.to_string(), "users[1].email");
///
/// // Unnamed validators (items of an array, values of a dict) report the root path.
/// assert!(JsonPath::from_name("").is_root());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
pub struct JsonPath {
    segments: Vec<PathSegment>,
}

impl JsonPath {
    /// The empty path. Displays as an empty string.
    pub fn root() -> Self {
        Self::default()
    }

    /// Path of a named input. An empty name yields the root path.
    pub fn from_name(name: &str) -> Self {
        if name.is_empty() {
            Self::root()
        } else {
            Self {
                segments: vec![PathSegment::Field(name.to_string())],
            }
        }
    }

    /// Returns a new path with a field segment appended.
    pub fn push_field(&self, name: impl Into<String>) -> Self {
        let mut segments = self.segments.clone();
        segments.push(PathSegment::Field(name.into()));
        Self { segments }
    }

    /// Returns a new path with an index segment appended.
    pub fn push_index(&self, index: usize) -> Self {
        let mut segments = self.segments.clone();
        segments.push(PathSegment::Index(index));
        Self { segments }
    }

    /// Appends every segment of `suffix` to this path.
    ///
    /// Used when an aggregate failure bubbles out of a nested validator: its
    /// children already carry paths relative to that validator, and the enclosing
    /// container prefixes them with its own location.
    pub fn join(&self, suffix: &JsonPath) -> Self {
        let mut segments = self.segments.clone();
        segments.extend(suffix.segments.iter().cloned());
        Self { segments }
    }

    /// Returns true for the empty path.
    pub fn is_root(&self) -> bool {
        self.segments.is_empty()
    }

    /// Number of segments.
    pub fn len(&self) -> usize {
        self.segments.len()
    }

    /// Returns true if the path has no segments.
    pub fn is_empty(&self) -> bool {
        self.segments.is_empty()
    }

    /// Iterates over the segments in order.
    pub fn segments(&self) -> impl Iterator<Item = &PathSegment> {
        self.segments.iter()
    }

    /// The last segment, if any.
    pub fn last(&self) -> Option<&PathSegment> {
        self.segments.last()
    }
}

impl Display for JsonPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, segment) in self.segments.iter().enumerate() {
            match segment {
                PathSegment::Field(name) if i == 0 => write!(f, "{}", name)?,
                PathSegment::Field(name) => write!(f, ".{}", name)?,
                PathSegment::Index(idx) => write!(f, "[{}]", idx)?,
            }
        }
        Ok(())
    }
}
