//! Keel Value - runtime values and evaluation errors.
//!
//! Shared by the evaluator (`keel_eval`) and by embedders implementing the
//! collaborator services (scope, type system, comparator, function table).

mod errors;
mod value;

pub use errors::{
    append_failed, comparison_not_possible, cross_scope_assignment, illegal_assignment,
    illegal_expression, illegal_numeric_assignment, illegal_variable_expression,
    match_operand_not_string, match_pattern_invalid, no_handler_found, operator_not_applicable,
    recursion_limit_exceeded, runtime_arithmetic, too_few_arguments, too_many_arguments,
    type_coercion, unknown_function, unknown_variable, unsupported_operator, ArgBound,
    BacktraceFrame, EvalBacktrace, EvalError, EvalErrorKind, EvalNote, EvalResult,
};
pub use value::{Closure, Heap, MatchData, TypeRef, Value, ValueMap};
