//! Shared setup for the integration tests.

use std::sync::Once;

use keel_eval::{
    collection, EvalError, EvalResult, Evaluator, FunctionTable, Scope, SharedRecord, Value,
};
use keel_ir::Expr;

static TRACING_INIT: Once = Once::new();

/// Install a subscriber when `RUST_LOG` is set, e.g.
/// `RUST_LOG=keel_eval=trace cargo test -p keel_eval`.
pub fn init_tracing() {
    TRACING_INIT.call_once(|| {
        use tracing_subscriber::{fmt, prelude::*, EnvFilter};

        if std::env::var("RUST_LOG").is_ok() {
            tracing_subscriber::registry()
                .with(fmt::layer().with_test_writer().with_target(true))
                .with(EnvFilter::from_default_env())
                .init();
        }
    });
}

/// Host functions used across the scenarios.
///
/// - `each(array, closure)` calls the closure once per element and returns
///   the array
/// - `notice(...)` appends its arguments, interpolated, to `log`; not
///   value-producing
pub fn host_functions(log: &SharedRecord<Vec<String>>) -> FunctionTable {
    let mut table = FunctionTable::new();
    table.register("each", true, |args, ctx| {
        let [items, body] = <[Value; 2]>::try_from(args)
            .map_err(|given| EvalError::new(format!("each takes 2 arguments, got {}", given.len())))?;
        for item in collection::unfold(items.clone()) {
            ctx.call_value(&body, vec![item])?;
        }
        Ok(items)
    });
    let log = log.clone();
    table.register("notice", false, move |args, _ctx| {
        log.write().extend(args.iter().map(Value::to_interpolated));
        Ok(Value::Bool(true))
    });
    table
}

pub fn evaluator_with_log() -> (Evaluator, SharedRecord<Vec<String>>) {
    init_tracing();
    let log = SharedRecord::default();
    let evaluator = Evaluator::builder().functions(host_functions(&log)).build();
    (evaluator, log)
}

pub fn eval(node: &Expr, scope: &mut dyn Scope) -> EvalResult {
    evaluator_with_log().0.evaluate(node, scope)
}
