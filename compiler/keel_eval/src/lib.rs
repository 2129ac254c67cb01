//! Keel Eval - tree-walking evaluator for the Keel configuration language.
//!
//! # Architecture
//!
//! - `Evaluator`: one exhaustive match per node kind, recursing through
//!   `evaluate`; also the entry points `assign`, `call`, `call_by_name`
//! - `collection`: Array/Hash concatenation, difference and append
//! - `operators`: numeric boxing and checked arithmetic
//! - `ScopeGuard`/`guarded`: RAII restore of the scope nesting level
//! - `services`: traits for the collaborators the evaluator calls into
//!   (scope, types, comparison, indexing, relationships, functions) and
//!   reference implementations of each
//! - `Environment`: reference `Scope` with globals and ephemeral layers
//! - `CallStack`: closure/function frames, depth limit and backtraces
//!
//! # Re-exports
//!
//! Value and error types come from `keel_value` and are re-exported here:
//! - `Value`, `ValueMap`, `Heap`, `TypeRef`, `Closure`, `MatchData`
//! - `EvalError`, `EvalErrorKind`, `EvalResult`

pub mod collection;
pub mod diagnostics;
mod environment;
mod eval_mode;
pub mod interpreter;
pub mod operators;
pub mod services;
mod shared;
#[cfg(any(test, feature = "test-helpers"))]
pub mod test_helpers;

pub use keel_value::{
    ArgBound, BacktraceFrame, Closure, EvalBacktrace, EvalError, EvalErrorKind, EvalNote,
    EvalResult, Heap, MatchData, TypeRef, Value, ValueMap,
};

pub use collection::CollectionError;
pub use diagnostics::{CallFrame, CallStack};
pub use environment::Environment;
pub use eval_mode::EvalMode;
pub use interpreter::{
    assign_lvalue, guarded, lvalue, Evaluator, EvaluatorBuilder, LValue, ScopeGuard,
};
pub use services::{
    CallContext, Comparator, Edge, EdgeKind, FunctionRegistry, FunctionTable, HostFn, Indexer,
    RelationshipRecorder, RelationshipResolver, Scope, StandardComparator, StandardIndexer,
    StandardTypes, TypeSystem,
};
pub use shared::SharedRecord;
