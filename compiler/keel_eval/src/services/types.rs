//! Reference type service over a fixed type hierarchy.
//!
//! ```text
//! Any ─┬─ Data ── Scalar ─┬─ Numeric ─┬─ Integer
//!      │                  │           └─ Float
//!      │                  ├─ String
//!      │                  ├─ Boolean
//!      │                  └─ Regexp
//!      ├─ Collection ─┬─ Array
//!      │              └─ Hash
//!      └─ Undef, Default, Type, Callable, any other name
//! ```

use keel_ir::{Expr, ExprKind};
use keel_value::{illegal_expression, EvalError, TypeRef, Value};

use super::TypeSystem;

#[derive(Clone, Copy, Debug, Default)]
pub struct StandardTypes;

impl StandardTypes {
    pub fn new() -> Self {
        StandardTypes
    }

    fn parent(name: &str) -> Option<&'static str> {
        match name {
            "Any" => None,
            "Integer" | "Float" => Some("Numeric"),
            "Numeric" | "String" | "Boolean" | "Regexp" => Some("Scalar"),
            "Scalar" => Some("Data"),
            "Array" | "Hash" => Some("Collection"),
            _ => Some("Any"),
        }
    }

    /// Whether `name` is `ancestor` or one of its descendants.
    fn is_subtype(name: &str, ancestor: &str) -> bool {
        let mut current = name;
        loop {
            if current == ancestor {
                return true;
            }
            match Self::parent(current) {
                Some(parent) => current = parent,
                None => return false,
            }
        }
    }
}

/// `foo::bar` -> `Foo::Bar`.
fn capitalize_segments(name: &str) -> String {
    name.split("::")
        .map(|segment| {
            let mut chars = segment.chars();
            match chars.next() {
                Some(first) => first.to_uppercase().chain(chars).collect(),
                None => String::new(),
            }
        })
        .collect::<Vec<_>>()
        .join("::")
}

impl TypeSystem for StandardTypes {
    fn parse_type_name(&self, node: &Expr) -> Result<TypeRef, EvalError> {
        match &node.kind {
            ExprKind::QualifiedReference(name) => Ok(TypeRef::named(capitalize_segments(name))),
            other => Err(illegal_expression(other.name())),
        }
    }

    fn is_assignable(&self, target: &TypeRef, source: &TypeRef) -> bool {
        if target.is_parameterized() {
            return target == source;
        }
        Self::is_subtype(&source.name, &target.name)
    }

    fn infer(&self, value: &Value) -> TypeRef {
        TypeRef::named(value.type_name())
    }
}
