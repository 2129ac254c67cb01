//! Composite payloads carried by `Value`: type references, closures and
//! regex match data.

use std::fmt;
use std::hash::{Hash, Hasher};
use std::sync::Arc;

use keel_ir::LambdaExpr;
use rustc_hash::FxHashMap;

use super::Value;

/// Abstract type descriptor produced by the type service.
///
/// `Integer`, `Integer[1, 10]` and `File` are all type references; what
/// they mean is up to the type service.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct TypeRef {
    pub name: String,
    pub params: Vec<Value>,
}

impl TypeRef {
    /// An unparameterized type.
    pub fn named(name: impl Into<String>) -> Self {
        TypeRef {
            name: name.into(),
            params: Vec::new(),
        }
    }

    /// A parameterized type.
    pub fn with_params(name: impl Into<String>, params: Vec<Value>) -> Self {
        TypeRef {
            name: name.into(),
            params,
        }
    }

    #[inline]
    pub fn is_parameterized(&self) -> bool {
        !self.params.is_empty()
    }
}

impl fmt::Display for TypeRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.name)?;
        if self.params.is_empty() {
            return Ok(());
        }
        f.write_str("[")?;
        for (i, param) in self.params.iter().enumerate() {
            if i > 0 {
                f.write_str(", ")?;
            }
            write!(f, "{param}")?;
        }
        f.write_str("]")
    }
}

/// A lambda paired with the local bindings visible where it was created.
///
/// Two closures are equal only when they come from the same lambda node
/// and captured equal bindings.
#[derive(Clone, Debug)]
pub struct Closure {
    pub lambda: Arc<LambdaExpr>,
    pub captures: FxHashMap<String, Value>,
}

impl Closure {
    pub fn new(lambda: Arc<LambdaExpr>, captures: FxHashMap<String, Value>) -> Self {
        Closure { lambda, captures }
    }

    /// Number of declared parameters.
    #[inline]
    pub fn arity(&self) -> usize {
        self.lambda.params.len()
    }
}

impl PartialEq for Closure {
    fn eq(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.lambda, &other.lambda) && self.captures == other.captures
    }
}

impl Eq for Closure {}

impl Hash for Closure {
    fn hash<H: Hasher>(&self, state: &mut H) {
        std::ptr::hash(Arc::as_ptr(&self.lambda), state);
    }
}

/// Capture groups of the most recent successful regex match.
///
/// Index 0 is the whole match; groups that did not participate are `None`.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct MatchData {
    captures: Vec<Option<String>>,
}

impl MatchData {
    pub fn new(captures: Vec<Option<String>>) -> Self {
        MatchData { captures }
    }

    /// Build match data from a `regex` capture set.
    pub fn from_captures(caps: &regex::Captures<'_>) -> Self {
        let captures = caps
            .iter()
            .map(|group| group.map(|m| m.as_str().to_string()))
            .collect();
        MatchData { captures }
    }

    /// Value of numbered variable `$index`; `Undef` when out of range or
    /// the group did not participate.
    pub fn group(&self, index: usize) -> Value {
        match self.captures.get(index) {
            Some(Some(text)) => Value::string(text.as_str()),
            _ => Value::Undef,
        }
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.captures.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.captures.is_empty()
    }
}
