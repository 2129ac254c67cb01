//! Keel IR - AST types for the Keel configuration language.
//!
//! The parser produces an immutable tree of [`Expr`] nodes; the evaluator in
//! `keel_eval` walks it without mutating or constructing nodes.

pub mod ast;
mod span;

pub use ast::{
    ArithmeticOp, AssignOp, CallExpr, CaseOption, ComparisonOp, Expr, ExprKind, HashEntry,
    LambdaExpr, Literal, MatchOp, Param, RelationshipOp, SelectorEntry, UnaryOp,
};
pub use span::Span;
