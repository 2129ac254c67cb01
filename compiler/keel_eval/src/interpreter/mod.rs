//! The tree-walking evaluator.
//!
//! # Architecture
//!
//! `evaluate` is the single recursive entry point. It grows the stack if
//! needed, dispatches on `ExprKind` with one exhaustive match (no catch-all
//! arm, so a new node kind is a compile error until it has a rule) and tags
//! any error with the innermost failing node.
//!
//! The evaluator holds the collaborator services and per-run state (call
//! stack, pattern cache); variable storage is the caller's [`Scope`],
//! threaded through every call.
//!
//! # Submodules
//!
//! - `binary`: arithmetic, comparison and match operators
//! - `control`: `if`/`unless`, `case`, selector
//! - `assignment`: lvalues, `=`, `+=`, `-=`
//! - `calls`: named/method calls and closure invocation
//! - `builder`: `EvaluatorBuilder`
//! - `scope_guard`: RAII nesting-level restore

mod assignment;
mod binary;
mod builder;
mod calls;
mod control;
mod scope_guard;

use std::fmt;
use std::rc::Rc;

use keel_ir::{Expr, ExprKind, Literal, UnaryOp};
use keel_stack::ensure_sufficient_stack;
use keel_value::{
    illegal_expression, illegal_variable_expression, match_pattern_invalid, unknown_variable,
    EvalError, EvalResult, Value, ValueMap,
};
use rustc_hash::FxHashMap;
use smallvec::SmallVec;

pub use assignment::{assign_lvalue, lvalue, LValue};
pub use builder::EvaluatorBuilder;
pub use scope_guard::{guarded, ScopeGuard};

use crate::collection;
use crate::diagnostics::CallStack;
use crate::eval_mode::EvalMode;
use crate::operators;
use crate::services::{Comparator, FunctionRegistry, Indexer, RelationshipResolver, Scope, TypeSystem};

/// Evaluates expression trees against a caller-supplied [`Scope`].
pub struct Evaluator {
    types: Rc<dyn TypeSystem>,
    comparator: Rc<dyn Comparator>,
    relationships: Rc<dyn RelationshipResolver>,
    indexer: Rc<dyn Indexer>,
    functions: Rc<dyn FunctionRegistry>,
    mode: EvalMode,
    call_stack: CallStack,
    /// Compiled patterns keyed by source text.
    regex_cache: FxHashMap<String, regex::Regex>,
}

impl Evaluator {
    /// An evaluator in `Standard` mode with the reference services and an
    /// empty function table.
    pub fn new() -> Self {
        EvaluatorBuilder::new().build()
    }

    pub fn builder() -> EvaluatorBuilder {
        EvaluatorBuilder::new()
    }

    #[inline]
    pub fn mode(&self) -> EvalMode {
        self.mode
    }

    /// Current closure/function call depth.
    #[inline]
    pub fn call_depth(&self) -> usize {
        self.call_stack.depth()
    }

    /// Evaluate `expr` in `scope`.
    #[tracing::instrument(level = "trace", skip_all, fields(kind = expr.kind_name()))]
    pub fn evaluate(&mut self, expr: &Expr, scope: &mut dyn Scope) -> EvalResult {
        ensure_sufficient_stack(|| self.eval_inner(expr, scope)).map_err(|e| e.with_node(expr))
    }

    fn eval_inner(&mut self, expr: &Expr, scope: &mut dyn Scope) -> EvalResult {
        match &expr.kind {
            // Accepted syntactically, evaluated elsewhere
            ExprKind::Nop
            | ExprKind::Undef
            | ExprKind::VirtualQuery(_)
            | ExprKind::ExportedQuery(_)
            | ExprKind::Collect { .. } => Ok(Value::Undef),
            ExprKind::Default => Ok(Value::Default),
            ExprKind::Literal(literal) => Ok(literal_value(literal)),
            ExprKind::Regex(pattern) => Ok(Value::regex(self.cached_regex(pattern)?)),
            ExprKind::QualifiedName(word) | ExprKind::ReservedWord(word) => {
                Ok(Value::string(word.as_str()))
            }
            ExprKind::QualifiedReference(_) => {
                Ok(Value::type_ref(self.types.parse_type_name(expr)?))
            }
            ExprKind::Variable(inner) => self.eval_variable(inner, scope),

            // Operators
            ExprKind::Unary { op, operand } => {
                let value = self.evaluate(operand, scope)?;
                match op {
                    UnaryOp::Not => Ok(Value::Bool(!value.is_truthy())),
                    UnaryOp::Neg => operators::negate(&value),
                }
            }
            ExprKind::Unfold(inner) => {
                let value = self.evaluate(inner, scope)?;
                Ok(Value::array(collection::unfold(value)))
            }
            ExprKind::Arithmetic { op, left, right } => {
                let (l, r) = self.eval_operands(left, right, scope)?;
                binary::arithmetic(*op, &l, &r)
            }
            ExprKind::Comparison { op, left, right } => {
                let (l, r) = self.eval_operands(left, right, scope)?;
                self.compare_values(*op, &l, &r)
            }
            ExprKind::Match { op, left, right } => {
                let (l, r) = self.eval_operands(left, right, scope)?;
                self.eval_match(*op, &l, &r, scope)
            }
            ExprKind::In { left, right } => {
                let (l, r) = self.eval_operands(left, right, scope)?;
                Ok(Value::Bool(self.comparator.includes(&r, &l)))
            }
            ExprKind::And { left, right } => {
                if !self.evaluate(left, scope)?.is_truthy() {
                    return Ok(Value::Bool(false));
                }
                Ok(Value::Bool(self.evaluate(right, scope)?.is_truthy()))
            }
            ExprKind::Or { left, right } => {
                if self.evaluate(left, scope)?.is_truthy() {
                    return Ok(Value::Bool(true));
                }
                Ok(Value::Bool(self.evaluate(right, scope)?.is_truthy()))
            }
            ExprKind::Relationship { op, left, right } => {
                let (l, r) = self.eval_operands(left, right, scope)?;
                self.relationships.resolve(l, r, *op, expr)
            }
            ExprKind::Assignment { op, left, right } => {
                self.eval_assignment(*op, left, right, scope)
            }

            // Structure
            ExprKind::Parenthesized(inner)
            | ExprKind::Program(inner)
            | ExprKind::Text(inner)
            | ExprKind::Heredoc { text: inner, .. } => self.evaluate(inner, scope),
            ExprKind::Block(statements) => {
                let mut last = Value::Undef;
                for statement in statements {
                    last = self.evaluate(statement, scope)?;
                }
                Ok(last)
            }

            // Control flow
            ExprKind::If {
                test,
                then_branch,
                else_branch,
            } => self.eval_conditional(test, then_branch, else_branch.as_deref(), false, scope),
            ExprKind::Unless {
                test,
                then_branch,
                else_branch,
            } => self.eval_conditional(test, then_branch, else_branch.as_deref(), true, scope),
            ExprKind::Case { test, options } => self.eval_case(test, options, scope),
            ExprKind::Selector { test, entries } => self.eval_selector(test, entries, scope),

            // Access and calls
            ExprKind::Access { receiver, keys } => {
                let receiver = self.evaluate(receiver, scope)?;
                let mut key_values: SmallVec<[Value; 4]> = SmallVec::new();
                self.eval_spliced_into(keys, scope, &mut key_values)?;
                self.indexer.access(&receiver, &key_values, expr)
            }
            ExprKind::NamedAccess { .. } => Err(illegal_expression(expr.kind_name())),
            ExprKind::CallNamed(call) => self.eval_call_named(call, scope),
            ExprKind::CallMethod(call) => self.eval_call_method(call, scope),

            // Constructors
            ExprKind::List(items) => {
                let mut values = Vec::with_capacity(items.len());
                self.eval_spliced_into(items, scope, &mut values)?;
                Ok(Value::array(values))
            }
            ExprKind::Hash(entries) => {
                let mut map = ValueMap::default();
                for entry in entries {
                    let key = self.evaluate(&entry.key, scope)?;
                    let value = self.evaluate(&entry.value, scope)?;
                    map.insert(key, value);
                }
                Ok(Value::map(map))
            }
            ExprKind::ConcatenatedString(segments) => self.eval_interpolation(segments, scope),
        }
    }

    /// Evaluate both operands, left first.
    fn eval_operands(
        &mut self,
        left: &Expr,
        right: &Expr,
        scope: &mut dyn Scope,
    ) -> Result<(Value, Value), EvalError> {
        let l = self.evaluate(left, scope)?;
        let r = self.evaluate(right, scope)?;
        Ok((l, r))
    }

    /// Evaluate `exprs` in order into `out`, splicing `*expr` element-wise.
    fn eval_spliced_into<E: Extend<Value>>(
        &mut self,
        exprs: &[Expr],
        scope: &mut dyn Scope,
        out: &mut E,
    ) -> Result<(), EvalError> {
        for expr in exprs {
            if let ExprKind::Unfold(inner) = &expr.kind {
                let value = self.evaluate(inner, scope)?;
                out.extend(collection::unfold(value));
            } else {
                out.extend(std::iter::once(self.evaluate(expr, scope)?));
            }
        }
        Ok(())
    }

    /// `$name` or `$n`.
    fn eval_variable(&self, inner: &Expr, scope: &dyn Scope) -> EvalResult {
        match &inner.kind {
            ExprKind::QualifiedName(name) => match scope.get(name) {
                Some(value) => Ok(value),
                None if self.mode.strict_variables() => Err(unknown_variable(name)),
                None => Ok(Value::Undef),
            },
            ExprKind::Literal(Literal::Integer(n)) if *n >= 0 => {
                Ok(scope.get(&n.to_string()).unwrap_or(Value::Undef))
            }
            other => Err(illegal_variable_expression(other.name())),
        }
    }

    /// Interpolated string. `${name}` and `${1}` segments are variable
    /// lookups rather than bare words.
    fn eval_interpolation(&mut self, segments: &[Expr], scope: &mut dyn Scope) -> EvalResult {
        let mut out = String::new();
        for segment in segments {
            let value = match &segment.kind {
                ExprKind::Text(inner)
                    if matches!(
                        inner.kind,
                        ExprKind::QualifiedName(_) | ExprKind::Literal(Literal::Integer(_))
                    ) =>
                {
                    self.eval_variable(inner, scope)
                        .map_err(|e| e.with_node(segment))?
                }
                _ => self.evaluate(segment, scope)?,
            };
            out.push_str(&value.to_interpolated());
        }
        Ok(Value::string(out))
    }

    /// Compile `pattern`, reusing an earlier compilation.
    fn cached_regex(&mut self, pattern: &str) -> Result<regex::Regex, EvalError> {
        if let Some(re) = self.regex_cache.get(pattern) {
            return Ok(re.clone());
        }
        let re = regex::Regex::new(pattern)
            .map_err(|e| match_pattern_invalid(pattern, e.to_string()))?;
        self.regex_cache.insert(pattern.to_string(), re.clone());
        Ok(re)
    }
}

fn literal_value(literal: &Literal) -> Value {
    match literal {
        Literal::Integer(n) => Value::Integer(*n),
        Literal::Float(x) => Value::Float(*x),
        Literal::Boolean(b) => Value::Bool(*b),
        Literal::String(s) => Value::string(s.as_str()),
    }
}

impl Default for Evaluator {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for Evaluator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Evaluator")
            .field("mode", &self.mode)
            .field("call_stack", &self.call_stack)
            .field("cached_patterns", &self.regex_cache.len())
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
#[expect(
    clippy::unwrap_used,
    reason = "tests use unwrap to panic on unexpected state"
)]
