//! Evaluation errors.
//!
//! `EvalErrorKind` carries the structured data of each fault; `EvalError`
//! adds the message, the offending node's position, a backtrace of active
//! closure/function frames and free-form notes.
//!
//! Factory functions (`illegal_assignment`, `comparison_not_possible`, ...)
//! are the public constructors. They set both `kind` and `message`.

use std::fmt;

use keel_ir::{Expr, Span};

use crate::value::Value;

/// Result of evaluation.
pub type EvalResult = Result<Value, EvalError>;

/// Lower bound reported by a too-few-arguments fault.
///
/// Displays as `2` when every parameter is required, `min 2` when some
/// parameters have defaults.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ArgBound {
    Exactly(usize),
    AtLeast(usize),
}

impl fmt::Display for ArgBound {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ArgBound::Exactly(n) => write!(f, "{n}"),
            ArgBound::AtLeast(n) => write!(f, "min {n}"),
        }
    }
}

/// Typed error category.
///
/// Callers match on the kind; the rendered message is for humans.
#[derive(Clone, Debug, PartialEq, thiserror::Error)]
pub enum EvalErrorKind {
    // Assignment
    #[error("illegal attempt to assign to '{target}'")]
    IllegalAssignment { target: String },
    #[error("cannot assign to a variable in another namespace: '${name}'")]
    CrossScopeAssignment { name: String },
    #[error("illegal attempt to assign to the numeric match result variable '${name}'")]
    IllegalNumericAssignment { name: String },

    // Expression shape
    #[error("illegal variable expression: {kind}")]
    IllegalVariableExpression { kind: String },
    #[error("illegal expression: {kind} is unacceptable here")]
    IllegalExpression { kind: String },

    // Operators
    #[error("unsupported operator '{op}'")]
    UnsupportedOperator { op: String },
    #[error("operator '{op}' is not applicable to {}", .operand.type_name())]
    OperatorNotApplicable { op: String, operand: Value },
    #[error("error while evaluating '{op}': {detail}")]
    RuntimeArithmetic {
        op: String,
        operand: Value,
        detail: String,
    },
    #[error("'{op}' failed: {detail}")]
    AppendFailed { op: String, detail: String },
    #[error(
        "comparison of {} {op} {} is not possible",
        .left.type_name(),
        .right.type_name()
    )]
    ComparisonNotPossible {
        op: String,
        left: Value,
        right: Value,
    },
    #[error("cannot match with pattern {pattern:?}: {detail}")]
    MatchPatternInvalid { pattern: String, detail: String },
    #[error("can only match a String, got {}", .operand.type_name())]
    MatchOperandNotString { operand: Value },
    #[error("cannot convert {} to {target}", .value.type_name())]
    TypeCoercion { value: Value, target: String },

    // Calls
    #[error("too many arguments: {given} for {total}")]
    TooManyArguments { given: usize, total: usize },
    #[error("too few arguments: {given} for {bound}")]
    TooFewArguments {
        given: usize,
        bound: ArgBound,
        missing: Vec<String>,
    },
    #[error("unknown function: '{name}'")]
    UnknownFunction { name: String },
    #[error("maximum call depth exceeded (limit: {limit})")]
    RecursionLimitExceeded { limit: usize },

    // Lookup
    #[error("unknown variable: '${name}'")]
    UnknownVariable { name: String },

    // Internal
    #[error("no '{family}' rule for {kind}")]
    NoHandlerFound { family: &'static str, kind: String },

    /// Catch-all for faults raised by host functions.
    #[error("{message}")]
    Custom { message: String },
}

/// Additional context note attached to an error.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct EvalNote {
    pub message: String,
    pub span: Option<Span>,
}

impl EvalNote {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            span: None,
        }
    }

    pub fn with_span(message: impl Into<String>, span: Span) -> Self {
        Self {
            message: message.into(),
            span: Some(span),
        }
    }
}

/// A single frame in an evaluation backtrace.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct BacktraceFrame {
    /// Function name, or `<closure>`.
    pub name: String,
    /// Call site.
    pub span: Option<Span>,
}

/// Snapshot of the call stack at an error site, most recent call first.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct EvalBacktrace {
    frames: Vec<BacktraceFrame>,
}

impl EvalBacktrace {
    pub fn new(frames: Vec<BacktraceFrame>) -> Self {
        Self { frames }
    }

    pub fn frames(&self) -> &[BacktraceFrame] {
        &self.frames
    }

    pub fn is_empty(&self) -> bool {
        self.frames.is_empty()
    }

    pub fn len(&self) -> usize {
        self.frames.len()
    }
}

impl fmt::Display for EvalBacktrace {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.frames.is_empty() {
            return Ok(());
        }
        writeln!(f, "call backtrace:")?;
        for (i, frame) in self.frames.iter().enumerate() {
            write!(f, "  {i}: {}", frame.name)?;
            if let Some(span) = frame.span {
                write!(f, " at {span}")?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}

/// Evaluation error.
#[derive(Clone, Debug)]
pub struct EvalError {
    /// Structured error category.
    pub kind: EvalErrorKind,
    /// Human-readable message; equals `kind.to_string()` for factory errors.
    pub message: String,
    /// Location of the offending node.
    pub span: Option<Span>,
    /// Kind name of the offending node (`Arithmetic`, `Variable`, ...).
    pub node_kind: Option<&'static str>,
    /// Active closure/function frames at the error site.
    pub backtrace: Option<EvalBacktrace>,
    pub notes: Vec<EvalNote>,
}

impl EvalError {
    /// Create a `Custom` error with just a message.
    pub fn new(message: impl Into<String>) -> Self {
        let message = message.into();
        Self::from_kind(EvalErrorKind::Custom { message })
    }

    fn from_kind(kind: EvalErrorKind) -> Self {
        let message = kind.to_string();
        Self {
            kind,
            message,
            span: None,
            node_kind: None,
            backtrace: None,
            notes: Vec::new(),
        }
    }

    /// Attach the offending node unless one is already attached.
    ///
    /// The innermost node wins: errors bubbling out of nested evaluation keep
    /// the position where they were raised.
    #[must_use]
    pub fn with_node(mut self, node: &Expr) -> Self {
        if self.span.is_none() {
            self.span = Some(node.span);
            self.node_kind = Some(node.kind_name());
        }
        self
    }

    /// Attach a source span to this error.
    #[must_use]
    pub fn with_span(mut self, span: Span) -> Self {
        self.span = Some(span);
        self
    }

    /// Attach a backtrace unless one is already attached.
    #[must_use]
    pub fn with_backtrace(mut self, backtrace: EvalBacktrace) -> Self {
        if self.backtrace.is_none() {
            self.backtrace = Some(backtrace);
        }
        self
    }

    #[must_use]
    pub fn with_note(mut self, note: EvalNote) -> Self {
        self.notes.push(note);
        self
    }
}

impl fmt::Display for EvalError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.message)
    }
}

impl std::error::Error for EvalError {}

// Assignment

#[cold]
pub fn illegal_assignment(target: &str) -> EvalError {
    EvalError::from_kind(EvalErrorKind::IllegalAssignment {
        target: target.to_string(),
    })
}

#[cold]
pub fn cross_scope_assignment(name: &str) -> EvalError {
    EvalError::from_kind(EvalErrorKind::CrossScopeAssignment {
        name: name.to_string(),
    })
}

#[cold]
pub fn illegal_numeric_assignment(name: &str) -> EvalError {
    EvalError::from_kind(EvalErrorKind::IllegalNumericAssignment {
        name: name.to_string(),
    })
}

// Expression shape

#[cold]
pub fn illegal_variable_expression(kind: &str) -> EvalError {
    EvalError::from_kind(EvalErrorKind::IllegalVariableExpression {
        kind: kind.to_string(),
    })
}

#[cold]
pub fn illegal_expression(kind: &str) -> EvalError {
    EvalError::from_kind(EvalErrorKind::IllegalExpression {
        kind: kind.to_string(),
    })
}

// Operators

#[cold]
pub fn unsupported_operator(op: &str) -> EvalError {
    EvalError::from_kind(EvalErrorKind::UnsupportedOperator { op: op.to_string() })
}

#[cold]
pub fn operator_not_applicable(op: &str, operand: Value) -> EvalError {
    EvalError::from_kind(EvalErrorKind::OperatorNotApplicable {
        op: op.to_string(),
        operand,
    })
}

#[cold]
pub fn runtime_arithmetic(op: &str, operand: Value, detail: impl Into<String>) -> EvalError {
    EvalError::from_kind(EvalErrorKind::RuntimeArithmetic {
        op: op.to_string(),
        operand,
        detail: detail.into(),
    })
}

#[cold]
pub fn append_failed(op: &str, detail: impl Into<String>) -> EvalError {
    EvalError::from_kind(EvalErrorKind::AppendFailed {
        op: op.to_string(),
        detail: detail.into(),
    })
}

#[cold]
pub fn comparison_not_possible(op: &str, left: Value, right: Value) -> EvalError {
    EvalError::from_kind(EvalErrorKind::ComparisonNotPossible {
        op: op.to_string(),
        left,
        right,
    })
}

#[cold]
pub fn match_pattern_invalid(pattern: &str, detail: impl Into<String>) -> EvalError {
    EvalError::from_kind(EvalErrorKind::MatchPatternInvalid {
        pattern: pattern.to_string(),
        detail: detail.into(),
    })
}

#[cold]
pub fn match_operand_not_string(operand: Value) -> EvalError {
    EvalError::from_kind(EvalErrorKind::MatchOperandNotString { operand })
}

#[cold]
pub fn type_coercion(value: Value, target: &str) -> EvalError {
    EvalError::from_kind(EvalErrorKind::TypeCoercion {
        value,
        target: target.to_string(),
    })
}

// Calls

#[cold]
pub fn too_many_arguments(given: usize, total: usize) -> EvalError {
    EvalError::from_kind(EvalErrorKind::TooManyArguments { given, total })
}

#[cold]
pub fn too_few_arguments(given: usize, bound: ArgBound, missing: Vec<String>) -> EvalError {
    EvalError::from_kind(EvalErrorKind::TooFewArguments {
        given,
        bound,
        missing,
    })
}

#[cold]
pub fn unknown_function(name: &str) -> EvalError {
    EvalError::from_kind(EvalErrorKind::UnknownFunction {
        name: name.to_string(),
    })
}

#[cold]
pub fn recursion_limit_exceeded(limit: usize) -> EvalError {
    EvalError::from_kind(EvalErrorKind::RecursionLimitExceeded { limit })
}

#[cold]
pub fn unknown_variable(name: &str) -> EvalError {
    EvalError::from_kind(EvalErrorKind::UnknownVariable {
        name: name.to_string(),
    })
}

/// A node kind with no rule in the given operation family.
///
/// Indicates an evaluator defect rather than a manifest error.
#[cold]
pub fn no_handler_found(family: &'static str, kind: &str) -> EvalError {
    EvalError::from_kind(EvalErrorKind::NoHandlerFound {
        family,
        kind: kind.to_string(),
    })
}
