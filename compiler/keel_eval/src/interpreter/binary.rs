//! Arithmetic, comparison and match operators.

use std::cmp::Ordering;

use keel_ir::{ArithmeticOp, ComparisonOp, MatchOp};
use keel_value::{
    comparison_not_possible, match_operand_not_string, match_pattern_invalid,
    operator_not_applicable, runtime_arithmetic, EvalError, EvalResult, MatchData, TypeRef, Value,
};

use super::Evaluator;
use crate::collection;
use crate::operators;
use crate::services::Scope;

/// Binary arithmetic. A collection on the left with `+ - <<` selects the
/// collection algebra; everything else is numeric.
pub(super) fn arithmetic(op: ArithmeticOp, left: &Value, right: &Value) -> EvalResult {
    if !(left.is_collection() && op.is_collection_op()) {
        return operators::evaluate_arithmetic(op, left, right);
    }
    let symbol = op.as_symbol();
    match op {
        ArithmeticOp::Shl => collection::append(left, right)
            .ok_or_else(|| operator_not_applicable(symbol, left.clone())),
        ArithmeticOp::Sub => collection::delete(left, right)
            .map_err(|e| runtime_arithmetic(symbol, right.clone(), e.to_string())),
        _ => collection::concatenate(left, right)
            .map_err(|e| runtime_arithmetic(symbol, right.clone(), e.to_string())),
    }
}

fn ordering_holds(op: ComparisonOp, ordering: Ordering) -> bool {
    match op {
        ComparisonOp::Eq => ordering.is_eq(),
        ComparisonOp::NotEq => ordering.is_ne(),
        ComparisonOp::Lt => ordering.is_lt(),
        ComparisonOp::LtEq => ordering.is_le(),
        ComparisonOp::Gt => ordering.is_gt(),
        ComparisonOp::GtEq => ordering.is_ge(),
    }
}

impl Evaluator {
    /// `== != < <= > >=`.
    pub(super) fn compare_values(
        &self,
        op: ComparisonOp,
        left: &Value,
        right: &Value,
    ) -> EvalResult {
        if let Value::Type(left_type) = left {
            return self.compare_types(op, left_type, left, right);
        }
        let holds = match op {
            ComparisonOp::Eq => self.comparator.equals(left, right),
            ComparisonOp::NotEq => !self.comparator.equals(left, right),
            ComparisonOp::Lt | ComparisonOp::LtEq | ComparisonOp::Gt | ComparisonOp::GtEq => {
                let ordering = self.comparator.compare(left, right).ok_or_else(|| {
                    comparison_not_possible(op.as_symbol(), left.clone(), right.clone())
                })?;
                ordering_holds(op, ordering)
            }
        };
        Ok(Value::Bool(holds))
    }

    /// Comparison with a type on the left: ordering is assignability.
    ///
    /// `A <= B` holds when `B` is assignable to `A`; `A < B` also requires
    /// `A != B`. `>=` and `>` mirror these.
    fn compare_types(
        &self,
        op: ComparisonOp,
        left_type: &TypeRef,
        left: &Value,
        right: &Value,
    ) -> EvalResult {
        let Value::Type(right_type) = right else {
            return match op {
                ComparisonOp::Eq => Ok(Value::Bool(false)),
                ComparisonOp::NotEq => Ok(Value::Bool(true)),
                _ => Err(comparison_not_possible(
                    op.as_symbol(),
                    left.clone(),
                    right.clone(),
                )),
            };
        };
        let equal = left_type == &**right_type;
        let holds = match op {
            ComparisonOp::Eq => equal,
            ComparisonOp::NotEq => !equal,
            ComparisonOp::LtEq => self.types.is_assignable(left_type, right_type),
            ComparisonOp::Lt => !equal && self.types.is_assignable(left_type, right_type),
            ComparisonOp::GtEq => self.types.is_assignable(right_type, left_type),
            ComparisonOp::Gt => !equal && self.types.is_assignable(right_type, left_type),
        };
        Ok(Value::Bool(holds))
    }

    /// The pattern a match operand denotes: a regex, or a string compiled
    /// to one.
    fn pattern_of(&mut self, operand: &Value) -> Result<regex::Regex, EvalError> {
        match operand {
            Value::Regex(re) => Ok((**re).clone()),
            Value::Str(source) => self.cached_regex(source),
            other => Err(match_pattern_invalid(
                &other.to_string(),
                format!("a {} is not a pattern", other.type_name()),
            )),
        }
    }

    /// `=~` and `!~`.
    ///
    /// A successful regex match replaces the captures at the current level;
    /// a failed one clears them.
    pub(super) fn eval_match(
        &mut self,
        op: MatchOp,
        left: &Value,
        right: &Value,
        scope: &mut dyn Scope,
    ) -> EvalResult {
        let re = self.pattern_of(right)?;
        let Some(subject) = left.as_str() else {
            return Err(match_operand_not_string(left.clone()));
        };
        let matched = set_captures(&re, subject, scope);
        Ok(Value::Bool(match op {
            MatchOp::Match => matched,
            MatchOp::NotMatch => !matched,
        }))
    }
}

/// Run `re` against `subject` and record the outcome as match data.
pub(super) fn set_captures(re: &regex::Regex, subject: &str, scope: &mut dyn Scope) -> bool {
    match re.captures(subject) {
        Some(caps) => {
            scope.set_match_data(Some(MatchData::from_captures(&caps)));
            true
        }
        None => {
            scope.set_match_data(None);
            false
        }
    }
}
