use super::*;
use keel_value::EvalErrorKind;
use pretty_assertions::assert_eq;

#[test]
fn push_and_pop_track_depth() {
    let mut stack = CallStack::default();
    assert!(stack.is_empty());
    assert!(stack.push(CallFrame::function("each", Span::new(0, 4))).is_ok());
    assert!(stack.push(CallFrame::closure(Span::new(10, 20))).is_ok());
    assert_eq!(stack.depth(), 2);
    assert_eq!(
        stack.current_frame().map(|f| f.name.as_str()),
        Some(CLOSURE_FRAME)
    );
    stack.pop();
    stack.pop();
    assert!(stack.is_empty());
}

#[test]
fn push_fails_at_limit_without_pushing() {
    let mut stack = CallStack::new(Some(1));
    assert!(stack.push(CallFrame::closure(Span::DUMMY)).is_ok());
    let err = stack.push(CallFrame::closure(Span::DUMMY));
    assert!(matches!(
        err.map_err(|e| e.kind),
        Err(EvalErrorKind::RecursionLimitExceeded { limit: 1 })
    ));
    assert_eq!(stack.depth(), 1);
}

#[test]
fn capture_orders_most_recent_first() {
    let mut stack = CallStack::default();
    assert!(stack.push(CallFrame::function("map", Span::new(1, 2))).is_ok());
    assert!(stack.push(CallFrame::closure(Span::new(3, 4))).is_ok());
    let bt = stack.capture();
    let names: Vec<_> = bt.frames().iter().map(|f| f.name.as_str()).collect();
    assert_eq!(names, vec![CLOSURE_FRAME, "map"]);
}

#[test]
fn attach_backtrace_skips_empty_stack() {
    let stack = CallStack::default();
    let err = stack.attach_backtrace(EvalError::new("boom"));
    assert!(err.backtrace.is_none());
}
