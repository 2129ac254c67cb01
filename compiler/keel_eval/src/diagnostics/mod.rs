//! Call-stack tracking for closure and function invocations.
//!
//! Every closure call and every registry function call pushes a
//! [`CallFrame`]. The depth check lives in `push()`; errors leaving a frame
//! get a snapshot of the stack attached as an `EvalBacktrace`.

use keel_ir::Span;
use keel_value::{recursion_limit_exceeded, BacktraceFrame, EvalBacktrace, EvalError};

/// Name used for frames of anonymous closures.
pub const CLOSURE_FRAME: &str = "<closure>";

/// A single frame in the live call stack.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CallFrame {
    /// Function name, or [`CLOSURE_FRAME`].
    pub name: String,
    /// Where the call was made (the lambda itself for closures).
    pub call_span: Option<Span>,
}

impl CallFrame {
    pub fn function(name: &str, call_span: Span) -> Self {
        CallFrame {
            name: name.to_string(),
            call_span: Some(call_span),
        }
    }

    pub fn closure(span: Span) -> Self {
        CallFrame {
            name: CLOSURE_FRAME.to_string(),
            call_span: Some(span),
        }
    }
}

/// Live call stack of the evaluator.
///
/// ```text
/// self.call_stack.push(CallFrame::function(name, span))?;
/// let result = /* invoke */;
/// let result = result.map_err(|e| self.call_stack.attach_backtrace(e));
/// self.call_stack.pop();
/// ```
#[derive(Clone, Debug)]
pub struct CallStack {
    frames: Vec<CallFrame>,
    max_depth: Option<usize>,
}

impl CallStack {
    /// Create an empty stack; `None` means unlimited depth.
    pub fn new(max_depth: Option<usize>) -> Self {
        Self {
            frames: Vec::new(),
            max_depth,
        }
    }

    /// Push a frame, failing with `RecursionLimitExceeded` at the limit.
    ///
    /// The frame is not pushed on failure.
    pub fn push(&mut self, frame: CallFrame) -> Result<(), EvalError> {
        if let Some(max) = self.max_depth {
            if self.frames.len() >= max {
                return Err(recursion_limit_exceeded(max));
            }
        }
        self.frames.push(frame);
        Ok(())
    }

    /// Pop the most recent frame.
    pub fn pop(&mut self) {
        debug_assert!(
            !self.frames.is_empty(),
            "CallStack::pop() called on empty stack"
        );
        self.frames.pop();
    }

    #[inline]
    pub fn depth(&self) -> usize {
        self.frames.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.frames.is_empty()
    }

    #[inline]
    pub fn max_depth(&self) -> Option<usize> {
        self.max_depth
    }

    #[inline]
    pub fn current_frame(&self) -> Option<&CallFrame> {
        self.frames.last()
    }

    /// Snapshot the stack, most recent call first.
    pub fn capture(&self) -> EvalBacktrace {
        let frames = self
            .frames
            .iter()
            .rev()
            .map(|f| BacktraceFrame {
                name: f.name.clone(),
                span: f.call_span,
            })
            .collect();
        EvalBacktrace::new(frames)
    }

    /// Attach a snapshot of this stack to `err` unless it already has one.
    pub fn attach_backtrace(&self, err: EvalError) -> EvalError {
        if self.frames.is_empty() {
            return err;
        }
        err.with_backtrace(self.capture())
    }
}

impl Default for CallStack {
    fn default() -> Self {
        Self::new(None)
    }
}

#[cfg(test)]
mod tests;
