//! Core types for weft.
//!
//! These types define the vocabulary that everything builds on: the scalar
//! [`Value`] carried by attributes and text payloads, and the ordered
//! [`Attributes`] map copied from descriptors into work units.

use std::fmt;

use indexmap::IndexMap;

// =============================================================================
// Value
// =============================================================================

/// A scalar attribute or text-payload value.
///
/// Descriptors carry these in their attribute map and as raw text/number
/// payloads. Numbers are stored as `f64`; the `Display` impl prints integral
/// numbers without a fractional part so `42.0` renders as `42`.
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    /// A string value.
    Str(String),
    /// A numeric value.
    Num(f64),
    /// A boolean value.
    Bool(bool),
}

impl Value {
    /// Returns the string contents if this is a string value.
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::Str(s) => Some(s),
            _ => None,
        }
    }

    /// Returns the numeric contents if this is a number value.
    pub fn as_num(&self) -> Option<f64> {
        match self {
            Self::Num(n) => Some(*n),
            _ => None,
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Str(s) => f.write_str(s),
            Self::Num(n) => {
                if n.is_finite() && *n == n.trunc() {
                    write!(f, "{}", *n as i64)
                } else {
                    write!(f, "{n}")
                }
            }
            Self::Bool(b) => write!(f, "{b}"),
        }
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Self::Str(s.to_string())
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Self::Str(s)
    }
}

impl From<f64> for Value {
    fn from(n: f64) -> Self {
        Self::Num(n)
    }
}

impl From<i32> for Value {
    fn from(n: i32) -> Self {
        Self::Num(n as f64)
    }
}

impl From<u32> for Value {
    fn from(n: u32) -> Self {
        Self::Num(n as f64)
    }
}

impl From<bool> for Value {
    fn from(b: bool) -> Self {
        Self::Bool(b)
    }
}

// =============================================================================
// Attributes
// =============================================================================

/// Named attributes of a descriptor, excluding the reserved `children` key.
///
/// Insertion-ordered so attribute application on the target tree is
/// deterministic.
pub type Attributes = IndexMap<String, Value>;

// =============================================================================
// Tests
// =============================================================================
