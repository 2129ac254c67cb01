//! Stack growth for deeply nested manifests.
//!
//! The evaluator recurses once per AST level, and manifests built by code
//! generators can nest far deeper than hand-written ones. Each recursive
//! evaluation step runs through [`ensure_sufficient_stack`], which grows the
//! native stack when it runs low.
//!
//! - **Native targets**: `stacker` allocates a new segment on demand.
//! - **WASM targets**: passthrough; the host manages the stack.
//!
//! Red zone is 100KB; each growth adds 1MB.

/// Remaining stack below which a new segment is allocated.
const RED_ZONE: usize = 100 * 1024;

/// Size of each newly allocated segment.
const STACK_PER_RECURSION: usize = 1024 * 1024;

/// Run `f`, first growing the stack if less than the red zone remains.
///
/// ```text
/// fn evaluate(&mut self, expr: &Expr, scope: &mut dyn Scope) -> EvalResult {
///     ensure_sufficient_stack(|| self.eval_inner(expr, scope))
/// }
/// ```
#[inline]
#[cfg(not(target_arch = "wasm32"))]
pub fn ensure_sufficient_stack<R>(f: impl FnOnce() -> R) -> R {
    stacker::maybe_grow(RED_ZONE, STACK_PER_RECURSION, f)
}

/// WASM version: call directly.
#[inline]
#[cfg(target_arch = "wasm32")]
pub fn ensure_sufficient_stack<R>(f: impl FnOnce() -> R) -> R {
    f()
}

#[cfg(test)]
mod tests;
