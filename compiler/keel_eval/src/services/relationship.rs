//! Reference relationship service that records edges.

use keel_ir::{Expr, RelationshipOp};
use keel_value::{EvalResult, Value};

use super::RelationshipResolver;
use crate::shared::SharedRecord;

/// Ordering-only (`->`, `<-`) or ordering plus refresh (`~>`, `<~`).
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum EdgeKind {
    Before,
    Notify,
}

/// A recorded `source -> target` dependency.
#[derive(Clone, Debug, PartialEq)]
pub struct Edge {
    pub source: Value,
    pub target: Value,
    pub kind: EdgeKind,
}

/// Records every edge it resolves and returns the right operand, so that
/// chains like `a -> b -> c` record `a -> b` and `b -> c`.
///
/// Clones share one record.
#[derive(Clone, Debug, Default)]
pub struct RelationshipRecorder {
    edges: SharedRecord<Vec<Edge>>,
}

impl RelationshipRecorder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Edges recorded so far, in resolution order.
    pub fn edges(&self) -> Vec<Edge> {
        self.edges.read().clone()
    }
}

fn expand(value: &Value) -> Vec<Value> {
    match value {
        Value::Array(items) => items.to_vec(),
        other => vec![other.clone()],
    }
}

impl RelationshipResolver for RelationshipRecorder {
    fn resolve(&self, left: Value, right: Value, op: RelationshipOp, _node: &Expr) -> EvalResult {
        let (sources, targets) = match op {
            RelationshipOp::Before | RelationshipOp::Notify => (expand(&left), expand(&right)),
            RelationshipOp::After | RelationshipOp::Subscribe => (expand(&right), expand(&left)),
        };
        let kind = match op {
            RelationshipOp::Before | RelationshipOp::After => EdgeKind::Before,
            RelationshipOp::Notify | RelationshipOp::Subscribe => EdgeKind::Notify,
        };
        let mut edges = self.edges.write();
        for source in &sources {
            for target in &targets {
                edges.push(Edge {
                    source: source.clone(),
                    target: target.clone(),
                    kind,
                });
            }
        }
        Ok(right)
    }
}
