//! Collaborator services consumed by the evaluator.
//!
//! The evaluator owns no variable storage, type system or function table; it
//! calls through these traits. Each has a reference implementation in a
//! sibling module, used by [`EvaluatorBuilder`](crate::EvaluatorBuilder)
//! when the embedder supplies nothing else.

mod comparator;
mod functions;
mod indexer;
mod relationship;
mod types;

use std::cmp::Ordering;

use keel_ir::{Expr, RelationshipOp};
use keel_value::{Closure, EvalError, EvalResult, MatchData, TypeRef, Value};
use rustc_hash::FxHashMap;

pub use comparator::StandardComparator;
pub use functions::{FunctionTable, HostFn};
pub use indexer::StandardIndexer;
pub use relationship::{Edge, EdgeKind, RelationshipRecorder};
pub use types::StandardTypes;

/// Variable store with a nesting-level counter.
///
/// Levels above the embedder's base are ephemeral: local binding layers
/// created by [`new_child_scope`](Scope::new_child_scope) and match layers
/// created by [`new_match_scope`](Scope::new_match_scope) or
/// [`set_match_data`](Scope::set_match_data). Setting the level
/// back discards every layer above it.
pub trait Scope {
    /// Look up a variable. Numeric names (`"0"`, `"1"`, ...) read the
    /// innermost match captures.
    fn get(&self, name: &str) -> Option<Value>;

    /// Bind a variable in the innermost local layer.
    fn set(&mut self, name: &str, value: Value);

    fn exists(&self, name: &str) -> bool;

    fn nesting_level(&self) -> usize;

    fn set_nesting_level(&mut self, level: usize);

    /// Open a new innermost layer holding `bindings`.
    fn new_child_scope(&mut self, bindings: FxHashMap<String, Value>);

    /// Open an empty match level. Captures set after this replace only
    /// this level; outer captures stay visible until then.
    fn new_match_scope(&mut self);

    /// Replace the captures at the current level; `None` clears them.
    fn set_match_data(&mut self, data: Option<MatchData>);

    /// Ephemeral bindings visible here, captured by closures at creation.
    fn capture(&self) -> FxHashMap<String, Value> {
        FxHashMap::default()
    }
}

/// Type-name parsing and assignability.
pub trait TypeSystem {
    /// Turn a type-name node (`Integer`, `Foo::Bar`) into a type reference.
    fn parse_type_name(&self, node: &Expr) -> Result<TypeRef, EvalError>;

    /// Whether values of `source` are acceptable where `target` is expected.
    fn is_assignable(&self, target: &TypeRef, source: &TypeRef) -> bool;

    fn infer(&self, value: &Value) -> TypeRef;
}

/// Language-level equality, ordering and membership.
pub trait Comparator {
    fn equals(&self, a: &Value, b: &Value) -> bool;

    /// Three-way comparison; `None` if the values are incomparable.
    fn compare(&self, a: &Value, b: &Value) -> Option<Ordering>;

    /// Whether `collection` contains `value`.
    fn includes(&self, collection: &Value, value: &Value) -> bool;
}

/// Interpretation of relationship operators (`-> ~> <- <~`).
pub trait RelationshipResolver {
    fn resolve(&self, left: Value, right: Value, op: RelationshipOp, node: &Expr) -> EvalResult;
}

/// `receiver[keys...]`.
pub trait Indexer {
    fn access(&self, receiver: &Value, keys: &[Value], node: &Expr) -> EvalResult;
}

/// Named functions callable from the language.
pub trait FunctionRegistry {
    fn is_available(&self, name: &str) -> bool;

    /// Whether the function's result is usable as a value. Results of other
    /// functions are discarded to `Undef`.
    fn is_value_producing(&self, name: &str) -> bool;

    fn invoke(&self, name: &str, args: Vec<Value>, ctx: &mut dyn CallContext) -> EvalResult;
}

/// What a registry function can do with the evaluator that called it.
pub trait CallContext {
    /// Call a closure passed as an argument.
    fn call_closure(&mut self, closure: &Closure, args: Vec<Value>) -> EvalResult;

    /// Call any callable value.
    fn call_value(&mut self, callable: &Value, args: Vec<Value>) -> EvalResult;

    /// The scope of the call site.
    fn scope(&mut self) -> &mut dyn Scope;
}

#[cfg(test)]
#[expect(
    clippy::unwrap_used,
    reason = "tests use unwrap to panic on unexpected state"
)]
