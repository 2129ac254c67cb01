//! Evaluation modes.
//!
//! `EvalMode` is a plain enum with policy methods; the evaluator asks the
//! mode instead of carrying individual flags.

/// Evaluation policy.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum EvalMode {
    /// Unknown variables evaluate to `Undef`; call depth is bounded only by
    /// memory on native targets.
    #[default]
    Standard,
    /// Unknown variables are an error; call depth is bounded.
    Strict,
}

impl EvalMode {
    /// Whether referencing an unknown (non-numeric) variable fails.
    #[inline]
    pub fn strict_variables(self) -> bool {
        matches!(self, Self::Strict)
    }

    /// Maximum closure/function call depth, or `None` for unlimited.
    ///
    /// - `Standard`: `None` on native (`stacker` grows the stack), 200 on WASM
    /// - `Strict`: always 500
    #[inline]
    pub fn max_call_depth(self) -> Option<usize> {
        match self {
            Self::Standard => {
                #[cfg(target_arch = "wasm32")]
                {
                    Some(200)
                }
                #[cfg(not(target_arch = "wasm32"))]
                {
                    None
                }
            }
            Self::Strict => Some(500),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn standard_is_default() {
        assert_eq!(EvalMode::default(), EvalMode::Standard);
    }

    #[test]
    fn strict_policies() {
        assert!(EvalMode::Strict.strict_variables());
        assert!(!EvalMode::Standard.strict_variables());
        assert_eq!(EvalMode::Strict.max_call_depth(), Some(500));
    }

    #[cfg(not(target_arch = "wasm32"))]
    #[test]
    fn standard_depth_unbounded_on_native() {
        assert_eq!(EvalMode::Standard.max_call_depth(), None);
    }
}
