//! Assignment targets and assignment.

use keel_ir::{ArithmeticOp, AssignOp, Expr, ExprKind, Literal};
use keel_value::{
    append_failed, cross_scope_assignment, illegal_assignment, illegal_numeric_assignment,
    illegal_variable_expression, unsupported_operator, EvalError, EvalResult, Value,
};

use super::{binary, Evaluator};
use crate::collection;
use crate::services::Scope;

/// Resolved assignment target.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum LValue {
    /// `$name`
    Name(String),
    /// `[$a, [$b, $c]]`
    List(Vec<LValue>),
}

/// Resolve the left-hand side of an assignment.
///
/// Only variables and lists of assignable targets qualify.
pub fn lvalue(expr: &Expr) -> Result<LValue, EvalError> {
    let resolved = match &expr.kind {
        ExprKind::Variable(inner) => match &inner.kind {
            ExprKind::QualifiedName(name) => Ok(LValue::Name(name.clone())),
            ExprKind::Literal(Literal::Integer(n)) if *n >= 0 => Ok(LValue::Name(n.to_string())),
            other => Err(illegal_variable_expression(other.name())),
        },
        ExprKind::List(items) => items.iter().map(lvalue).collect::<Result<_, _>>().map(LValue::List),
        other => Err(illegal_assignment(other.name())),
    };
    resolved.map_err(|e| e.with_node(expr))
}

fn is_numeric_name(name: &str) -> bool {
    !name.is_empty() && name.bytes().all(|b| b.is_ascii_digit())
}

fn assign_name(name: &str, value: Value, scope: &mut dyn Scope) -> EvalResult {
    if name.contains("::") {
        return Err(cross_scope_assignment(name));
    }
    if is_numeric_name(name) {
        return Err(illegal_numeric_assignment(name));
    }
    scope.set(name, value.clone());
    Ok(value)
}

/// Assign `value` to a resolved target and return it.
///
/// A list target takes an Array positionally (surplus names and values are
/// ignored), a Hash by looking each name up as a key (`Undef` if absent), and
/// any other value is given to every name.
pub fn assign_lvalue(target: &LValue, value: Value, scope: &mut dyn Scope) -> EvalResult {
    match target {
        LValue::Name(name) => assign_name(name, value, scope),
        LValue::List(targets) => {
            distribute(targets, &value, scope)?;
            Ok(value)
        }
    }
}

fn distribute(targets: &[LValue], value: &Value, scope: &mut dyn Scope) -> Result<(), EvalError> {
    match value {
        Value::Array(items) => {
            for (target, item) in targets.iter().zip(items.iter()) {
                assign_lvalue(target, item.clone(), scope)?;
            }
        }
        Value::Hash(map) => {
            for target in targets {
                match target {
                    LValue::Name(name) => {
                        let item = map
                            .get(&Value::string(name.as_str()))
                            .cloned()
                            .unwrap_or(Value::Undef);
                        assign_name(name, item, scope)?;
                    }
                    LValue::List(_) => {
                        assign_lvalue(target, value.clone(), scope)?;
                    }
                }
            }
        }
        scalar => {
            for target in targets {
                assign_lvalue(target, scalar.clone(), scope)?;
            }
        }
    }
    Ok(())
}

impl Evaluator {
    /// Assign `value` to the target `expr` denotes.
    #[expect(
        clippy::unused_self,
        reason = "entry point alongside evaluate and call"
    )]
    #[tracing::instrument(level = "trace", skip_all, fields(target = target.kind_name()))]
    pub fn assign(&mut self, target: &Expr, value: Value, scope: &mut dyn Scope) -> EvalResult {
        let resolved = lvalue(target)?;
        assign_lvalue(&resolved, value, scope).map_err(|e| e.with_node(target))
    }

    /// `=`, `+=`, `-=`.
    pub(super) fn eval_assignment(
        &mut self,
        op: AssignOp,
        left: &Expr,
        right: &Expr,
        scope: &mut dyn Scope,
    ) -> EvalResult {
        let arith = match op {
            AssignOp::Assign => {
                let target = lvalue(left)?;
                let value = self.evaluate(right, scope)?;
                return assign_lvalue(&target, value, scope);
            }
            AssignOp::Compound(arith @ (ArithmeticOp::Add | ArithmeticOp::Sub)) => arith,
            AssignOp::Compound(_) => return Err(unsupported_operator(op.as_symbol())),
        };
        let LValue::Name(name) = lvalue(left)? else {
            return Err(illegal_assignment(left.kind_name()).with_node(left));
        };
        let rhs = self.evaluate(right, scope)?;
        let current = scope.get(&name).filter(|v| !v.is_undef());
        let symbol = op.as_symbol();
        let combined = match (arith, current) {
            // Nothing to combine with: `+=` yields the right side, `-=` undef.
            (ArithmeticOp::Add, None) => return Ok(rhs),
            (_, None) => return Ok(Value::Undef),
            (ArithmeticOp::Add, Some(current)) => binary::arithmetic(ArithmeticOp::Add, &current, &rhs)
                .map_err(|e| append_failed(symbol, e.message))?,
            (_, Some(current)) => collection::delete(&current, &rhs)
                .map_err(|e| append_failed(symbol, e.to_string()))?,
        };
        assign_name(&name, combined, scope)
    }
}
