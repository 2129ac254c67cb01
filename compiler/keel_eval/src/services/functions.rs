//! Name-keyed table of host functions.

use std::fmt;

use keel_value::{unknown_function, EvalResult, Value};
use rustc_hash::FxHashMap;

use super::{CallContext, FunctionRegistry};

/// A host function: receives evaluated arguments (a trailing lambda arrives
/// as a `Closure` value) and the calling context.
pub type HostFn = Box<dyn Fn(Vec<Value>, &mut dyn CallContext) -> EvalResult>;

struct FunctionEntry {
    func: HostFn,
    value_producing: bool,
}

#[derive(Default)]
pub struct FunctionTable {
    entries: FxHashMap<String, FunctionEntry>,
}

impl FunctionTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register `name`, replacing any earlier registration.
    pub fn register<F>(&mut self, name: impl Into<String>, value_producing: bool, func: F)
    where
        F: Fn(Vec<Value>, &mut dyn CallContext) -> EvalResult + 'static,
    {
        self.entries.insert(
            name.into(),
            FunctionEntry {
                func: Box::new(func),
                value_producing,
            },
        );
    }

    pub fn contains(&self, name: &str) -> bool {
        self.entries.contains_key(name)
    }
}

impl fmt::Debug for FunctionTable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut names: Vec<_> = self.entries.keys().collect();
        names.sort();
        f.debug_struct("FunctionTable")
            .field("functions", &names)
            .finish()
    }
}

impl FunctionRegistry for FunctionTable {
    fn is_available(&self, name: &str) -> bool {
        self.contains(name)
    }

    fn is_value_producing(&self, name: &str) -> bool {
        self.entries.get(name).is_some_and(|e| e.value_producing)
    }

    fn invoke(&self, name: &str, args: Vec<Value>, ctx: &mut dyn CallContext) -> EvalResult {
        let entry = self.entries.get(name).ok_or_else(|| unknown_function(name))?;
        (entry.func)(args, ctx)
    }
}
