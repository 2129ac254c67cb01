//! Conditionals, case expressions and selectors.
//!
//! All three run under a scope guard that opens its own match level:
//! captures set while testing stay visible in the chosen branch and are
//! discarded when it finishes, leaving any outer captures untouched.

use keel_ir::{CaseOption, Expr, ExprKind, SelectorEntry};
use keel_value::{EvalError, EvalResult, Value};

use super::binary::set_captures;
use super::{guarded, Evaluator};
use crate::collection;
use crate::services::Scope;

impl Evaluator {
    /// `if` (`invert == false`) and `unless` (`invert == true`).
    pub(super) fn eval_conditional(
        &mut self,
        test: &Expr,
        then_branch: &Expr,
        else_branch: Option<&Expr>,
        invert: bool,
        scope: &mut dyn Scope,
    ) -> EvalResult {
        guarded(scope, |scope| {
            scope.new_match_scope();
            let truthy = self.evaluate(test, scope)?.is_truthy();
            if truthy != invert {
                self.evaluate(then_branch, scope)
            } else if let Some(else_branch) = else_branch {
                self.evaluate(else_branch, scope)
            } else {
                Ok(Value::Undef)
            }
        })
    }

    /// `case test { a, b: { ... } default: { ... } }`
    ///
    /// The first matching candidate wins and later candidates are never
    /// evaluated. A `default` candidate is remembered and used only if
    /// nothing matches; with several, the last one applies.
    pub(super) fn eval_case(
        &mut self,
        test: &Expr,
        options: &[CaseOption],
        scope: &mut dyn Scope,
    ) -> EvalResult {
        guarded(scope, |scope| {
            scope.new_match_scope();
            let subject = self.evaluate(test, scope)?;
            let mut fallback = None;
            for option in options {
                for candidate in &option.values {
                    if candidate.kind.is_default() {
                        fallback = Some(&option.then);
                        continue;
                    }
                    if self.candidate_matches(&subject, candidate, scope)? {
                        return self.evaluate(&option.then, scope);
                    }
                }
            }
            match fallback {
                Some(then) => self.evaluate(then, scope),
                None => Ok(Value::Undef),
            }
        })
    }

    /// `test ? { pattern => value, default => value }`
    pub(super) fn eval_selector(
        &mut self,
        test: &Expr,
        entries: &[SelectorEntry],
        scope: &mut dyn Scope,
    ) -> EvalResult {
        guarded(scope, |scope| {
            scope.new_match_scope();
            let subject = self.evaluate(test, scope)?;
            for entry in entries {
                if entry.matching.kind.is_default()
                    || self.candidate_matches(&subject, &entry.matching, scope)?
                {
                    return self.evaluate(&entry.value, scope);
                }
            }
            Ok(Value::Undef)
        })
    }

    /// Evaluate one candidate and test it. `*expr` matches if any of its
    /// elements does.
    fn candidate_matches(
        &mut self,
        subject: &Value,
        candidate: &Expr,
        scope: &mut dyn Scope,
    ) -> Result<bool, EvalError> {
        if let ExprKind::Unfold(inner) = &candidate.kind {
            let values = collection::unfold(self.evaluate(inner, scope)?);
            return Ok(values
                .iter()
                .any(|pattern| self.is_match(subject, pattern, scope)));
        }
        let pattern = self.evaluate(candidate, scope)?;
        Ok(self.is_match(subject, &pattern, scope))
    }

    /// Whether `subject` matches a case/selector `pattern`.
    ///
    /// - Regex: a String subject the regex matches (captures are recorded)
    /// - Type: the subject's inferred type is assignable to it
    /// - otherwise: comparator equality
    fn is_match(&self, subject: &Value, pattern: &Value, scope: &mut dyn Scope) -> bool {
        match pattern {
            Value::Regex(re) => subject
                .as_str()
                .is_some_and(|text| set_captures(re, text, scope)),
            Value::Type(t) => self.types.is_assignable(t, &self.types.infer(subject)),
            _ => self.comparator.equals(subject, pattern),
        }
    }
}
