//! Function calls and closure invocation.

use std::rc::Rc;
use std::sync::Arc;

use keel_ir::{CallExpr, ExprKind, LambdaExpr, Span};
use keel_value::{
    illegal_expression, no_handler_found, too_few_arguments, too_many_arguments, unknown_function,
    ArgBound, Closure, EvalNote, EvalResult, Value,
};
use rustc_hash::FxHashMap;

use super::{guarded, Evaluator};
use crate::diagnostics::CallFrame;
use crate::services::{CallContext, Scope};

/// Call context handed to registry functions.
struct EvalCallContext<'e, 's> {
    evaluator: &'e mut Evaluator,
    scope: &'s mut dyn Scope,
}

impl CallContext for EvalCallContext<'_, '_> {
    fn call_closure(&mut self, closure: &Closure, args: Vec<Value>) -> EvalResult {
        self.evaluator.call(closure, args, &mut *self.scope)
    }

    fn call_value(&mut self, callable: &Value, args: Vec<Value>) -> EvalResult {
        self.evaluator.call_value(callable, args, &mut *self.scope)
    }

    fn scope(&mut self) -> &mut dyn Scope {
        &mut *self.scope
    }
}

/// Argument-count bound reported by `TooFewArguments`.
fn arg_bound(lambda: &LambdaExpr) -> ArgBound {
    let required = lambda.required_count();
    if required < lambda.params.len() {
        ArgBound::AtLeast(required)
    } else {
        ArgBound::Exactly(required)
    }
}

impl Evaluator {
    /// `name(args) |params| { body }`
    pub(super) fn eval_call_named(&mut self, call: &CallExpr, scope: &mut dyn Scope) -> EvalResult {
        let ExprKind::QualifiedName(name) = &call.functor.kind else {
            return Err(illegal_expression(call.functor.kind_name()).with_node(&call.functor));
        };
        if !self.functions.is_available(name) {
            return Err(unknown_function(name));
        }
        let mut args = Vec::with_capacity(call.args.len() + 1);
        self.eval_spliced_into(&call.args, scope, &mut args)?;
        push_lambda(call, scope, &mut args);
        self.invoke_function(name, args, call.functor.span, scope)
    }

    /// `receiver.name(args) |params| { body }`; the receiver is the first
    /// argument.
    pub(super) fn eval_call_method(&mut self, call: &CallExpr, scope: &mut dyn Scope) -> EvalResult {
        let ExprKind::NamedAccess { receiver, name } = &call.functor.kind else {
            return Err(illegal_expression(call.functor.kind_name()).with_node(&call.functor));
        };
        let ExprKind::QualifiedName(method) = &name.kind else {
            return Err(illegal_expression(name.kind_name()).with_node(name));
        };
        if !self.functions.is_available(method) {
            return Err(unknown_function(method));
        }
        let mut args = Vec::with_capacity(call.args.len() + 2);
        args.push(self.evaluate(receiver, scope)?);
        self.eval_spliced_into(&call.args, scope, &mut args)?;
        push_lambda(call, scope, &mut args);
        self.invoke_function(method, args, name.span, scope)
    }

    /// Call a registry function inside a call frame. Results of functions
    /// that do not produce values are discarded.
    #[tracing::instrument(level = "debug", skip(self, args, scope))]
    fn invoke_function(
        &mut self,
        name: &str,
        args: Vec<Value>,
        call_span: Span,
        scope: &mut dyn Scope,
    ) -> EvalResult {
        self.call_stack.push(CallFrame::function(name, call_span))?;
        let functions = Rc::clone(&self.functions);
        let result = {
            let mut ctx = EvalCallContext {
                evaluator: &mut *self,
                scope,
            };
            functions.invoke(name, args, &mut ctx)
        };
        let result = result.map_err(|e| self.call_stack.attach_backtrace(e));
        self.call_stack.pop();
        let value = result?;
        Ok(if functions.is_value_producing(name) {
            value
        } else {
            Value::Undef
        })
    }

    /// Call `closure` with positional arguments.
    ///
    /// Missing arguments take their parameter's default, evaluated in the
    /// caller's `scope`.
    #[tracing::instrument(level = "debug", skip_all, fields(arity = closure.arity(), given = args.len()))]
    pub fn call(&mut self, closure: &Closure, args: Vec<Value>, scope: &mut dyn Scope) -> EvalResult {
        let params = &closure.lambda.params;
        let given = args.len();
        if given > params.len() {
            return Err(too_many_arguments(given, params.len()));
        }
        let mut bindings = closure.captures.clone();
        let mut missing = Vec::new();
        let mut args = args.into_iter();
        for param in params {
            let value = match (args.next(), &param.default) {
                (Some(value), _) => value,
                (None, Some(default)) => self.evaluate(default, scope)?,
                (None, None) => {
                    missing.push(param.name.clone());
                    continue;
                }
            };
            bindings.insert(param.name.clone(), value);
        }
        if !missing.is_empty() {
            return Err(too_few_arguments(given, arg_bound(&closure.lambda), missing));
        }
        self.enter_closure(closure, bindings, scope)
    }

    /// Call `closure` with arguments bound by parameter name.
    ///
    /// With `spill_over`, names that are not parameters become variables in
    /// the closure body too; without it, more names than parameters is an
    /// error.
    #[tracing::instrument(level = "debug", skip_all, fields(arity = closure.arity(), given = named_args.len()))]
    pub fn call_by_name(
        &mut self,
        closure: &Closure,
        named_args: &FxHashMap<String, Value>,
        spill_over: bool,
        scope: &mut dyn Scope,
    ) -> EvalResult {
        let params = &closure.lambda.params;
        if !spill_over && named_args.len() > params.len() {
            return Err(too_many_arguments(named_args.len(), params.len()));
        }
        let mut bindings = closure.captures.clone();
        if spill_over {
            bindings.extend(named_args.iter().map(|(k, v)| (k.clone(), v.clone())));
        }
        let mut missing = Vec::new();
        for param in params {
            let value = match (named_args.get(&param.name), &param.default) {
                (Some(value), _) => value.clone(),
                (None, Some(default)) => self.evaluate(default, scope)?,
                (None, None) => {
                    missing.push(param.name.clone());
                    continue;
                }
            };
            bindings.insert(param.name.clone(), value);
        }
        if !missing.is_empty() {
            let note = EvalNote::new(format!("missing parameters: {}", missing.join(", ")));
            return Err(
                too_few_arguments(named_args.len(), arg_bound(&closure.lambda), missing)
                    .with_note(note),
            );
        }
        self.enter_closure(closure, bindings, scope)
    }

    /// Call any callable value.
    pub fn call_value(
        &mut self,
        callable: &Value,
        args: Vec<Value>,
        scope: &mut dyn Scope,
    ) -> EvalResult {
        match callable {
            Value::Closure(closure) => self.call(closure, args, scope),
            other => Err(no_handler_found("invoke", other.type_name())),
        }
    }

    /// Evaluate the closure body in a new innermost layer holding
    /// `bindings`; the layer is gone when this returns, on every path.
    fn enter_closure(
        &mut self,
        closure: &Closure,
        bindings: FxHashMap<String, Value>,
        scope: &mut dyn Scope,
    ) -> EvalResult {
        self.call_stack.push(CallFrame::closure(closure.lambda.span))?;
        let body = &closure.lambda.body;
        let result = guarded(scope, |scope| {
            scope.new_child_scope(bindings);
            self.evaluate(body, scope)
        });
        let result = result.map_err(|e| self.call_stack.attach_backtrace(e));
        self.call_stack.pop();
        result
    }
}

/// Append the call's trailing lambda, if any, as a closure over the current
/// ephemeral bindings.
fn push_lambda(call: &CallExpr, scope: &dyn Scope, args: &mut Vec<Value>) {
    if let Some(lambda) = &call.lambda {
        args.push(Value::closure(Closure::new(
            Arc::clone(lambda),
            scope.capture(),
        )));
    }
}
