//! Reference variable store.
//!
//! A global map plus a stack of ephemeral layers. Each layer is a set of
//! local bindings (closure parameters), a set of regex captures, or an empty
//! fence that keeps later captures from overwriting outer ones. The nesting
//! level is the stack height; restoring a level truncates.
//!
//! ```text
//! level 0   globals
//! level 1   Local { x => 1, y => 2 }     closure call
//! level 2   Match [$0, $1]               `if $s =~ /(.)/`
//! ```

use keel_value::{MatchData, Value};
use rustc_hash::FxHashMap;

use crate::services::Scope;

#[derive(Clone, Debug)]
enum Layer {
    Local(FxHashMap<String, Value>),
    Match(Option<MatchData>),
    Fence,
}

/// Scope store with globals and ephemeral layers.
#[derive(Clone, Debug, Default)]
pub struct Environment {
    globals: FxHashMap<String, Value>,
    layers: Vec<Layer>,
}

fn is_numeric_name(name: &str) -> bool {
    !name.is_empty() && name.bytes().all(|b| b.is_ascii_digit())
}

impl Environment {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_globals(globals: FxHashMap<String, Value>) -> Self {
        Environment {
            globals,
            layers: Vec::new(),
        }
    }

    pub fn globals(&self) -> &FxHashMap<String, Value> {
        &self.globals
    }

    /// Captures of the innermost match layer, if any.
    fn match_group(&self, name: &str) -> Option<Value> {
        let data = self.layers.iter().rev().find_map(|layer| match layer {
            Layer::Match(data) => Some(data),
            Layer::Local(_) | Layer::Fence => None,
        })?;
        let Some(data) = data else {
            return Some(Value::Undef);
        };
        let index = name.parse::<usize>().ok()?;
        Some(data.group(index))
    }
}

impl Scope for Environment {
    fn get(&self, name: &str) -> Option<Value> {
        if is_numeric_name(name) {
            return self.match_group(name);
        }
        if let Some(global) = name.strip_prefix("::") {
            return self.globals.get(global).cloned();
        }
        self.layers
            .iter()
            .rev()
            .find_map(|layer| match layer {
                Layer::Local(vars) => vars.get(name).cloned(),
                Layer::Match(_) | Layer::Fence => None,
            })
            .or_else(|| self.globals.get(name).cloned())
    }

    fn set(&mut self, name: &str, value: Value) {
        let local = self.layers.iter_mut().rev().find_map(|layer| match layer {
            Layer::Local(vars) => Some(vars),
            Layer::Match(_) | Layer::Fence => None,
        });
        match local {
            Some(vars) => vars.insert(name.to_string(), value),
            None => self.globals.insert(name.to_string(), value),
        };
    }

    fn exists(&self, name: &str) -> bool {
        self.get(name).is_some()
    }

    fn nesting_level(&self) -> usize {
        self.layers.len()
    }

    fn set_nesting_level(&mut self, level: usize) {
        self.layers.truncate(level);
    }

    fn new_child_scope(&mut self, bindings: FxHashMap<String, Value>) {
        self.layers.push(Layer::Local(bindings));
    }

    fn new_match_scope(&mut self) {
        self.layers.push(Layer::Fence);
    }

    fn set_match_data(&mut self, data: Option<MatchData>) {
        if let Some(Layer::Match(current)) = self.layers.last_mut() {
            *current = data;
        } else {
            self.layers.push(Layer::Match(data));
        }
    }

    fn capture(&self) -> FxHashMap<String, Value> {
        let mut captured = FxHashMap::default();
        for layer in &self.layers {
            if let Layer::Local(vars) = layer {
                captured.extend(vars.iter().map(|(k, v)| (k.clone(), v.clone())));
            }
        }
        captured
    }
}
