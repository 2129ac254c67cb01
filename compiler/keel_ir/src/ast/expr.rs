//! Expression nodes.
//!
//! The tree is closed: every construct the language can express is one
//! `ExprKind` variant. Nodes are produced by the parser and only read by the
//! evaluator, so children are boxed rather than arena-allocated.

use std::sync::Arc;

use super::operators::{
    ArithmeticOp, AssignOp, ComparisonOp, MatchOp, RelationshipOp, UnaryOp,
};
use crate::Span;

/// Expression node.
#[derive(Clone, Debug, PartialEq)]
pub struct Expr {
    pub kind: ExprKind,
    pub span: Span,
}

impl Expr {
    #[inline]
    pub fn new(kind: ExprKind, span: Span) -> Self {
        Expr { kind, span }
    }

    /// Short name of this node's kind, used in diagnostics.
    #[inline]
    pub fn kind_name(&self) -> &'static str {
        self.kind.name()
    }
}

/// Self-evaluating literal payload.
///
/// All literal kinds share one evaluation rule, so they share one variant.
#[derive(Clone, Debug, PartialEq)]
pub enum Literal {
    Integer(i64),
    Float(f64),
    Boolean(bool),
    String(String),
}

/// Closure parameter: a name and an optional default expression.
#[derive(Clone, Debug, PartialEq)]
pub struct Param {
    pub name: String,
    pub default: Option<Expr>,
    pub span: Span,
}

impl Param {
    /// Whether this parameter must receive an argument.
    #[inline]
    pub fn is_required(&self) -> bool {
        self.default.is_none()
    }
}

/// Lambda attached to a call site (`each($xs) |$x| { ... }`).
///
/// Shared through `Arc` so closures created from it can outlive the call.
#[derive(Clone, Debug, PartialEq)]
pub struct LambdaExpr {
    pub params: Vec<Param>,
    pub body: Box<Expr>,
    pub span: Span,
}

impl LambdaExpr {
    /// Number of parameters without a default.
    pub fn required_count(&self) -> usize {
        self.params.iter().filter(|p| p.is_required()).count()
    }
}

/// Functor, arguments and optional trailing lambda of a call.
#[derive(Clone, Debug, PartialEq)]
pub struct CallExpr {
    pub functor: Box<Expr>,
    pub args: Vec<Expr>,
    pub lambda: Option<Arc<LambdaExpr>>,
}

/// One `when`-style option of a case expression.
#[derive(Clone, Debug, PartialEq)]
pub struct CaseOption {
    pub values: Vec<Expr>,
    pub then: Box<Expr>,
    pub span: Span,
}

/// One `pattern => value` entry of a selector expression.
#[derive(Clone, Debug, PartialEq)]
pub struct SelectorEntry {
    pub matching: Expr,
    pub value: Expr,
}

/// One `key => value` entry of a hash literal.
#[derive(Clone, Debug, PartialEq)]
pub struct HashEntry {
    pub key: Expr,
    pub value: Expr,
}

/// Expression kinds.
#[derive(Clone, Debug, PartialEq)]
pub enum ExprKind {
    /// Empty statement.
    Nop,
    /// `undef`
    Undef,
    /// `default`
    Default,
    Literal(Literal),
    /// `/pattern/`
    Regex(String),
    /// Bare word such as `present` or `foo::bar`.
    QualifiedName(String),
    /// Capitalized type name such as `Integer` or `File`.
    QualifiedReference(String),
    /// Keyword used as a value.
    ReservedWord(String),
    /// `$name` or `$1`; the inner node is a `QualifiedName` or an integer literal.
    Variable(Box<Expr>),

    Unary {
        op: UnaryOp,
        operand: Box<Expr>,
    },
    /// `*expr`
    Unfold(Box<Expr>),
    Arithmetic {
        op: ArithmeticOp,
        left: Box<Expr>,
        right: Box<Expr>,
    },
    Comparison {
        op: ComparisonOp,
        left: Box<Expr>,
        right: Box<Expr>,
    },
    Match {
        op: MatchOp,
        left: Box<Expr>,
        right: Box<Expr>,
    },
    In {
        left: Box<Expr>,
        right: Box<Expr>,
    },
    And {
        left: Box<Expr>,
        right: Box<Expr>,
    },
    Or {
        left: Box<Expr>,
        right: Box<Expr>,
    },
    Relationship {
        op: RelationshipOp,
        left: Box<Expr>,
        right: Box<Expr>,
    },
    Assignment {
        op: AssignOp,
        left: Box<Expr>,
        right: Box<Expr>,
    },

    Parenthesized(Box<Expr>),
    Block(Vec<Expr>),
    Program(Box<Expr>),

    If {
        test: Box<Expr>,
        then_branch: Box<Expr>,
        else_branch: Option<Box<Expr>>,
    },
    Unless {
        test: Box<Expr>,
        then_branch: Box<Expr>,
        else_branch: Option<Box<Expr>>,
    },
    Case {
        test: Box<Expr>,
        options: Vec<CaseOption>,
    },
    Selector {
        test: Box<Expr>,
        entries: Vec<SelectorEntry>,
    },

    /// `receiver[k1, k2, ...]`
    Access {
        receiver: Box<Expr>,
        keys: Vec<Expr>,
    },
    /// `receiver.name`; only meaningful as a method-call functor.
    NamedAccess {
        receiver: Box<Expr>,
        name: Box<Expr>,
    },
    /// `name(args)`
    CallNamed(CallExpr),
    /// `receiver.name(args)`
    CallMethod(CallExpr),

    List(Vec<Expr>),
    Hash(Vec<HashEntry>),
    /// Interpolated string; segments are text or embedded expressions.
    ConcatenatedString(Vec<Expr>),
    /// `${expr}` segment of an interpolated string.
    Text(Box<Expr>),
    Heredoc {
        syntax: Option<String>,
        text: Box<Expr>,
    },

    /// `<| query |>`
    VirtualQuery(Option<Box<Expr>>),
    /// `<<| query |>>`
    ExportedQuery(Option<Box<Expr>>),
    /// `Type <| query |>`
    Collect {
        type_name: Box<Expr>,
        query: Box<Expr>,
    },
}

impl ExprKind {
    /// Short name of this kind, used in diagnostics.
    pub fn name(&self) -> &'static str {
        match self {
            ExprKind::Nop => "Nop",
            ExprKind::Undef => "Undef",
            ExprKind::Default => "Default",
            ExprKind::Literal(lit) => match lit {
                Literal::Integer(_) => "LiteralInteger",
                Literal::Float(_) => "LiteralFloat",
                Literal::Boolean(_) => "LiteralBoolean",
                Literal::String(_) => "LiteralString",
            },
            ExprKind::Regex(_) => "LiteralRegex",
            ExprKind::QualifiedName(_) => "QualifiedName",
            ExprKind::QualifiedReference(_) => "QualifiedReference",
            ExprKind::ReservedWord(_) => "ReservedWord",
            ExprKind::Variable(_) => "Variable",
            ExprKind::Unary { op, .. } => match op {
                UnaryOp::Not => "Not",
                UnaryOp::Neg => "UnaryMinus",
            },
            ExprKind::Unfold(_) => "Unfold",
            ExprKind::Arithmetic { .. } => "Arithmetic",
            ExprKind::Comparison { .. } => "Comparison",
            ExprKind::Match { .. } => "Match",
            ExprKind::In { .. } => "In",
            ExprKind::And { .. } => "And",
            ExprKind::Or { .. } => "Or",
            ExprKind::Relationship { .. } => "Relationship",
            ExprKind::Assignment { .. } => "Assignment",
            ExprKind::Parenthesized(_) => "Parenthesized",
            ExprKind::Block(_) => "Block",
            ExprKind::Program(_) => "Program",
            ExprKind::If { .. } => "If",
            ExprKind::Unless { .. } => "Unless",
            ExprKind::Case { .. } => "Case",
            ExprKind::Selector { .. } => "Selector",
            ExprKind::Access { .. } => "Access",
            ExprKind::NamedAccess { .. } => "NamedAccess",
            ExprKind::CallNamed(_) => "CallNamedFunction",
            ExprKind::CallMethod(_) => "CallMethod",
            ExprKind::List(_) => "LiteralList",
            ExprKind::Hash(_) => "LiteralHash",
            ExprKind::ConcatenatedString(_) => "ConcatenatedString",
            ExprKind::Text(_) => "Text",
            ExprKind::Heredoc { .. } => "Heredoc",
            ExprKind::VirtualQuery(_) => "VirtualQuery",
            ExprKind::ExportedQuery(_) => "ExportedQuery",
            ExprKind::Collect { .. } => "Collect",
        }
    }

    /// Whether this node is the `default` marker.
    #[inline]
    pub fn is_default(&self) -> bool {
        matches!(self, ExprKind::Default)
    }

    /// Whether this node is a splat (`*expr`).
    #[inline]
    pub fn is_unfold(&self) -> bool {
        matches!(self, ExprKind::Unfold(_))
    }
}
