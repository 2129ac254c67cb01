//! Runtime values for the Keel evaluator.
//!
//! # Heap enforcement
//!
//! Heap payloads are wrapped in [`Heap<T>`], whose constructor is private to
//! this module. Code outside it builds heap values through the factory
//! methods:
//!
//! ```text
//! let s = Value::string("present");                        // OK
//! let xs = Value::array(vec![Value::Integer(1)]);          // OK
//! let s = Value::Str(Heap::new(...));                      // ERROR: private
//! ```
//!
//! # Equality
//!
//! `PartialEq` here is structural identity, used for map keys and tests.
//! Language-level `==` (case-insensitive strings, numeric widening) is the
//! comparator service's job.

mod composite;
mod heap;

use std::fmt;
use std::hash::{Hash, Hasher};

use indexmap::IndexMap;
use rustc_hash::FxBuildHasher;

pub use composite::{Closure, MatchData, TypeRef};
pub use heap::Heap;

/// Insertion-ordered map used for `Hash` values.
pub type ValueMap = IndexMap<Value, Value, FxBuildHasher>;

/// Runtime value.
#[derive(Clone)]
pub enum Value {
    /// Absence of a value. Falsy.
    Undef,
    /// The `default` marker.
    Default,
    Bool(bool),
    Integer(i64),
    Float(f64),
    Str(Heap<String>),
    Array(Heap<Vec<Value>>),
    Hash(Heap<ValueMap>),
    Type(Heap<TypeRef>),
    Regex(Heap<regex::Regex>),
    Closure(Heap<Closure>),
}

// Factory methods

impl Value {
    /// Create a string value.
    #[inline]
    pub fn string(s: impl Into<String>) -> Self {
        Value::Str(Heap::new(s.into()))
    }

    /// Create an array value.
    #[inline]
    pub fn array(items: Vec<Value>) -> Self {
        Value::Array(Heap::new(items))
    }

    /// Create a hash value.
    #[inline]
    pub fn map(entries: ValueMap) -> Self {
        Value::Hash(Heap::new(entries))
    }

    /// Create a hash value from key/value pairs; later duplicates win.
    pub fn map_from_pairs(pairs: impl IntoIterator<Item = (Value, Value)>) -> Self {
        Value::Hash(Heap::new(pairs.into_iter().collect()))
    }

    /// Create a type reference value.
    #[inline]
    pub fn type_ref(t: TypeRef) -> Self {
        Value::Type(Heap::new(t))
    }

    /// Create a regex value from a compiled pattern.
    #[inline]
    pub fn regex(re: regex::Regex) -> Self {
        Value::Regex(Heap::new(re))
    }

    /// Create a closure value.
    #[inline]
    pub fn closure(c: Closure) -> Self {
        Value::Closure(Heap::new(c))
    }
}

// Value methods

impl Value {
    /// Truthiness: only `Undef` and `false` are falsy.
    #[inline]
    pub fn is_truthy(&self) -> bool {
        !matches!(self, Value::Undef | Value::Bool(false))
    }

    #[inline]
    pub fn is_undef(&self) -> bool {
        matches!(self, Value::Undef)
    }

    #[inline]
    pub fn is_default(&self) -> bool {
        matches!(self, Value::Default)
    }

    /// Array or Hash.
    #[inline]
    pub fn is_collection(&self) -> bool {
        matches!(self, Value::Array(_) | Value::Hash(_))
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::Str(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_array(&self) -> Option<&[Value]> {
        match self {
            Value::Array(items) => Some(items),
            _ => None,
        }
    }

    pub fn as_hash(&self) -> Option<&ValueMap> {
        match self {
            Value::Hash(map) => Some(map),
            _ => None,
        }
    }

    pub fn as_type(&self) -> Option<&TypeRef> {
        match self {
            Value::Type(t) => Some(t),
            _ => None,
        }
    }

    pub fn as_closure(&self) -> Option<&Closure> {
        match self {
            Value::Closure(c) => Some(c),
            _ => None,
        }
    }

    /// Name of this value's kind for error messages.
    pub fn type_name(&self) -> &'static str {
        match self {
            Value::Undef => "Undef",
            Value::Default => "Default",
            Value::Bool(_) => "Boolean",
            Value::Integer(_) => "Integer",
            Value::Float(_) => "Float",
            Value::Str(_) => "String",
            Value::Array(_) => "Array",
            Value::Hash(_) => "Hash",
            Value::Type(_) => "Type",
            Value::Regex(_) => "Regexp",
            Value::Closure(_) => "Callable",
        }
    }

    /// String conversion used by interpolation.
    ///
    /// `Undef` becomes the empty string; everything else uses `Display`.
    pub fn to_interpolated(&self) -> String {
        match self {
            Value::Undef => String::new(),
            Value::Str(s) => s.to_inner(),
            other => other.to_string(),
        }
    }
}

/// Write a float so that it always reads back as a float (`1.0`, not `1`).
fn fmt_float(f: &mut fmt::Formatter<'_>, x: f64) -> fmt::Result {
    let text = x.to_string();
    if x.is_finite() && !text.contains(['.', 'e', 'E']) {
        write!(f, "{text}.0")
    } else {
        f.write_str(&text)
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Undef => Ok(()),
            Value::Default => f.write_str("default"),
            Value::Bool(b) => write!(f, "{b}"),
            Value::Integer(n) => write!(f, "{n}"),
            Value::Float(x) => fmt_float(f, *x),
            Value::Str(s) => f.write_str(s),
            Value::Array(items) => {
                f.write_str("[")?;
                for (i, item) in items.iter().enumerate() {
                    if i > 0 {
                        f.write_str(", ")?;
                    }
                    write!(f, "{item}")?;
                }
                f.write_str("]")
            }
            Value::Hash(map) => {
                f.write_str("{")?;
                for (i, (k, v)) in map.iter().enumerate() {
                    if i > 0 {
                        f.write_str(", ")?;
                    }
                    write!(f, "{k} => {v}")?;
                }
                f.write_str("}")
            }
            Value::Type(t) => write!(f, "{t}"),
            Value::Regex(re) => write!(f, "/{}/", re.as_str()),
            Value::Closure(_) => f.write_str("<closure>"),
        }
    }
}

impl fmt::Debug for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Undef => f.write_str("Undef"),
            Value::Default => f.write_str("Default"),
            Value::Bool(b) => write!(f, "Bool({b})"),
            Value::Integer(n) => write!(f, "Integer({n})"),
            Value::Float(x) => write!(f, "Float({x:?})"),
            Value::Str(s) => write!(f, "Str({:?})", s.as_str()),
            Value::Array(items) => f.debug_list().entries(items.iter()).finish(),
            Value::Hash(map) => f.debug_map().entries(map.iter()).finish(),
            Value::Type(t) => write!(f, "Type({t})"),
            Value::Regex(re) => write!(f, "Regex(/{}/)", re.as_str()),
            Value::Closure(c) => write!(f, "Closure(arity={})", c.arity()),
        }
    }
}

impl PartialEq for Value {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Value::Undef, Value::Undef) | (Value::Default, Value::Default) => true,
            (Value::Bool(a), Value::Bool(b)) => a == b,
            (Value::Integer(a), Value::Integer(b)) => a == b,
            // Bitwise so that `Eq` and `Hash` stay consistent for map keys
            (Value::Float(a), Value::Float(b)) => a.to_bits() == b.to_bits(),
            (Value::Str(a), Value::Str(b)) => a == b,
            (Value::Array(a), Value::Array(b)) => a == b,
            (Value::Hash(a), Value::Hash(b)) => {
                a.len() == b.len() && a.iter().all(|(k, v)| b.get(k).is_some_and(|bv| v == bv))
            }
            (Value::Type(a), Value::Type(b)) => a == b,
            (Value::Regex(a), Value::Regex(b)) => a.as_str() == b.as_str(),
            (Value::Closure(a), Value::Closure(b)) => a == b,
            _ => false,
        }
    }
}

impl Eq for Value {}

impl Hash for Value {
    fn hash<H: Hasher>(&self, state: &mut H) {
        std::mem::discriminant(self).hash(state);

        match self {
            Value::Undef | Value::Default => {}
            Value::Bool(b) => b.hash(state),
            Value::Integer(n) => n.hash(state),
            Value::Float(x) => x.to_bits().hash(state),
            Value::Str(s) => s.hash(state),
            Value::Array(items) => items.hash(state),
            Value::Hash(map) => {
                // Order-independent, matching `PartialEq`
                map.len().hash(state);
            }
            Value::Type(t) => t.hash(state),
            Value::Regex(re) => re.as_str().hash(state),
            Value::Closure(c) => c.hash(state),
        }
    }
}

impl From<bool> for Value {
    fn from(b: bool) -> Self {
        Value::Bool(b)
    }
}

impl From<i64> for Value {
    fn from(n: i64) -> Self {
        Value::Integer(n)
    }
}

impl From<f64> for Value {
    fn from(x: f64) -> Self {
        Value::Float(x)
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Value::string(s)
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Value::string(s)
    }
}

#[cfg(test)]
#[expect(
    clippy::unwrap_used,
    reason = "tests use unwrap to panic on unexpected state"
)]
mod tests;
