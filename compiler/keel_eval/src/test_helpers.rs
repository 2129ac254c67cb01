//! AST shorthands for tests.
//!
//! The evaluator never builds nodes itself; these exist so tests (here and
//! in embedders) can write trees without a parser. Every node gets
//! `Span::DUMMY`.

use std::sync::Arc;

use keel_ir::{
    ArithmeticOp, AssignOp, CallExpr, CaseOption, ComparisonOp, Expr, ExprKind, HashEntry,
    LambdaExpr, Literal, MatchOp, Param, RelationshipOp, SelectorEntry, Span, UnaryOp,
};
use keel_value::Closure;
use rustc_hash::FxHashMap;

pub fn expr(kind: ExprKind) -> Expr {
    Expr::new(kind, Span::DUMMY)
}

fn boxed(kind: ExprKind) -> Box<Expr> {
    Box::new(expr(kind))
}

// Atoms

pub fn int(n: i64) -> Expr {
    expr(ExprKind::Literal(Literal::Integer(n)))
}

pub fn float(x: f64) -> Expr {
    expr(ExprKind::Literal(Literal::Float(x)))
}

pub fn boolean(b: bool) -> Expr {
    expr(ExprKind::Literal(Literal::Boolean(b)))
}

pub fn string(s: &str) -> Expr {
    expr(ExprKind::Literal(Literal::String(s.to_string())))
}

pub fn undef() -> Expr {
    expr(ExprKind::Undef)
}

pub fn default() -> Expr {
    expr(ExprKind::Default)
}

pub fn regex(pattern: &str) -> Expr {
    expr(ExprKind::Regex(pattern.to_string()))
}

/// Bare word.
pub fn name(word: &str) -> Expr {
    expr(ExprKind::QualifiedName(word.to_string()))
}

/// Type name.
pub fn type_name(name: &str) -> Expr {
    expr(ExprKind::QualifiedReference(name.to_string()))
}

/// `$name`
pub fn var(name: &str) -> Expr {
    expr(ExprKind::Variable(boxed(ExprKind::QualifiedName(
        name.to_string(),
    ))))
}

/// `$n`
pub fn num_var(n: i64) -> Expr {
    expr(ExprKind::Variable(Box::new(int(n))))
}

// Operators

pub fn not(operand: Expr) -> Expr {
    expr(ExprKind::Unary {
        op: UnaryOp::Not,
        operand: Box::new(operand),
    })
}

pub fn neg(operand: Expr) -> Expr {
    expr(ExprKind::Unary {
        op: UnaryOp::Neg,
        operand: Box::new(operand),
    })
}

pub fn unfold(inner: Expr) -> Expr {
    expr(ExprKind::Unfold(Box::new(inner)))
}

pub fn arith(op: ArithmeticOp, left: Expr, right: Expr) -> Expr {
    expr(ExprKind::Arithmetic {
        op,
        left: Box::new(left),
        right: Box::new(right),
    })
}

pub fn add(left: Expr, right: Expr) -> Expr {
    arith(ArithmeticOp::Add, left, right)
}

pub fn cmp(op: ComparisonOp, left: Expr, right: Expr) -> Expr {
    expr(ExprKind::Comparison {
        op,
        left: Box::new(left),
        right: Box::new(right),
    })
}

pub fn matches(left: Expr, right: Expr) -> Expr {
    expr(ExprKind::Match {
        op: MatchOp::Match,
        left: Box::new(left),
        right: Box::new(right),
    })
}

pub fn not_matches(left: Expr, right: Expr) -> Expr {
    expr(ExprKind::Match {
        op: MatchOp::NotMatch,
        left: Box::new(left),
        right: Box::new(right),
    })
}

pub fn in_(left: Expr, right: Expr) -> Expr {
    expr(ExprKind::In {
        left: Box::new(left),
        right: Box::new(right),
    })
}

pub fn and(left: Expr, right: Expr) -> Expr {
    expr(ExprKind::And {
        left: Box::new(left),
        right: Box::new(right),
    })
}

pub fn or(left: Expr, right: Expr) -> Expr {
    expr(ExprKind::Or {
        left: Box::new(left),
        right: Box::new(right),
    })
}

pub fn relationship(op: RelationshipOp, left: Expr, right: Expr) -> Expr {
    expr(ExprKind::Relationship {
        op,
        left: Box::new(left),
        right: Box::new(right),
    })
}

pub fn assign_op(op: AssignOp, left: Expr, right: Expr) -> Expr {
    expr(ExprKind::Assignment {
        op,
        left: Box::new(left),
        right: Box::new(right),
    })
}

/// `left = right`
pub fn assign(left: Expr, right: Expr) -> Expr {
    assign_op(AssignOp::Assign, left, right)
}

// Structure and control flow

pub fn paren(inner: Expr) -> Expr {
    expr(ExprKind::Parenthesized(Box::new(inner)))
}

pub fn block(statements: Vec<Expr>) -> Expr {
    expr(ExprKind::Block(statements))
}

pub fn if_(test: Expr, then_branch: Expr, else_branch: Option<Expr>) -> Expr {
    expr(ExprKind::If {
        test: Box::new(test),
        then_branch: Box::new(then_branch),
        else_branch: else_branch.map(Box::new),
    })
}

pub fn unless(test: Expr, then_branch: Expr, else_branch: Option<Expr>) -> Expr {
    expr(ExprKind::Unless {
        test: Box::new(test),
        then_branch: Box::new(then_branch),
        else_branch: else_branch.map(Box::new),
    })
}

/// `case test { values: then, ... }`
pub fn case(test: Expr, options: Vec<(Vec<Expr>, Expr)>) -> Expr {
    expr(ExprKind::Case {
        test: Box::new(test),
        options: options
            .into_iter()
            .map(|(values, then)| CaseOption {
                values,
                then: Box::new(then),
                span: Span::DUMMY,
            })
            .collect(),
    })
}

/// `test ? { matching => value, ... }`
pub fn selector(test: Expr, entries: Vec<(Expr, Expr)>) -> Expr {
    expr(ExprKind::Selector {
        test: Box::new(test),
        entries: entries
            .into_iter()
            .map(|(matching, value)| SelectorEntry { matching, value })
            .collect(),
    })
}

// Access and calls

pub fn access(receiver: Expr, keys: Vec<Expr>) -> Expr {
    expr(ExprKind::Access {
        receiver: Box::new(receiver),
        keys,
    })
}

pub fn named_access(receiver: Expr, method: &str) -> Expr {
    expr(ExprKind::NamedAccess {
        receiver: Box::new(receiver),
        name: Box::new(name(method)),
    })
}

/// `|params| { body }`; each param is a name and an optional default.
pub fn lambda(params: Vec<(&str, Option<Expr>)>, body: Expr) -> Arc<LambdaExpr> {
    Arc::new(LambdaExpr {
        params: params
            .into_iter()
            .map(|(name, default)| Param {
                name: name.to_string(),
                default,
                span: Span::DUMMY,
            })
            .collect(),
        body: Box::new(body),
        span: Span::DUMMY,
    })
}

/// A closure over `lambda` with no captured bindings.
pub fn closure(params: Vec<(&str, Option<Expr>)>, body: Expr) -> Closure {
    Closure::new(lambda(params, body), FxHashMap::default())
}

pub fn call(function: &str, args: Vec<Expr>) -> Expr {
    call_with(name(function), args, None)
}

pub fn call_with_lambda(function: &str, args: Vec<Expr>, lambda: Arc<LambdaExpr>) -> Expr {
    call_with(name(function), args, Some(lambda))
}

/// Call with an arbitrary functor node.
pub fn call_with(functor: Expr, args: Vec<Expr>, lambda: Option<Arc<LambdaExpr>>) -> Expr {
    expr(ExprKind::CallNamed(CallExpr {
        functor: Box::new(functor),
        args,
        lambda,
    }))
}

/// `receiver.method(args)`
pub fn method_call(receiver: Expr, method: &str, args: Vec<Expr>) -> Expr {
    expr(ExprKind::CallMethod(CallExpr {
        functor: Box::new(named_access(receiver, method)),
        args,
        lambda: None,
    }))
}

// Constructors

pub fn list(items: Vec<Expr>) -> Expr {
    expr(ExprKind::List(items))
}

pub fn hash(entries: Vec<(Expr, Expr)>) -> Expr {
    expr(ExprKind::Hash(
        entries
            .into_iter()
            .map(|(key, value)| HashEntry { key, value })
            .collect(),
    ))
}

/// Interpolated string.
pub fn concat(segments: Vec<Expr>) -> Expr {
    expr(ExprKind::ConcatenatedString(segments))
}

/// `${inner}`
pub fn text(inner: Expr) -> Expr {
    expr(ExprKind::Text(Box::new(inner)))
}
