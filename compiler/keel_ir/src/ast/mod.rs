//! Abstract syntax tree for Keel manifests.

mod expr;
mod operators;

pub use expr::{
    CallExpr, CaseOption, Expr, ExprKind, HashEntry, LambdaExpr, Literal, Param, SelectorEntry,
};
pub use operators::{ArithmeticOp, AssignOp, ComparisonOp, MatchOp, RelationshipOp, UnaryOp};

#[cfg(test)]
mod tests;
