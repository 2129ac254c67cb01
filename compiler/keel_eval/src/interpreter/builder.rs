//! `EvaluatorBuilder` for creating `Evaluator` instances.

use std::rc::Rc;

use rustc_hash::FxHashMap;

use super::Evaluator;
use crate::diagnostics::CallStack;
use crate::eval_mode::EvalMode;
use crate::services::{
    Comparator, FunctionRegistry, FunctionTable, Indexer, RelationshipRecorder,
    RelationshipResolver, StandardComparator, StandardIndexer, StandardTypes, TypeSystem,
};

/// Builder for [`Evaluator`].
///
/// Every collaborator not supplied defaults to its reference
/// implementation; the function registry defaults to an empty table.
///
/// ```text
/// let recorder = RelationshipRecorder::new();
/// let mut evaluator = Evaluator::builder()
///     .mode(EvalMode::Strict)
///     .functions(table)
///     .relationships(recorder.clone())
///     .build();
/// ```
#[derive(Default)]
pub struct EvaluatorBuilder {
    mode: EvalMode,
    types: Option<Rc<dyn TypeSystem>>,
    comparator: Option<Rc<dyn Comparator>>,
    relationships: Option<Rc<dyn RelationshipResolver>>,
    indexer: Option<Rc<dyn Indexer>>,
    functions: Option<Rc<dyn FunctionRegistry>>,
    /// Overrides the mode's depth limit when set.
    max_call_depth: Option<Option<usize>>,
}

impl EvaluatorBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the evaluation mode.
    ///
    /// Controls unknown-variable handling and the default call-depth limit.
    #[must_use]
    pub fn mode(mut self, mode: EvalMode) -> Self {
        self.mode = mode;
        self
    }

    #[must_use]
    pub fn type_system(mut self, types: impl TypeSystem + 'static) -> Self {
        self.types = Some(Rc::new(types));
        self
    }

    #[must_use]
    pub fn comparator(mut self, comparator: impl Comparator + 'static) -> Self {
        self.comparator = Some(Rc::new(comparator));
        self
    }

    #[must_use]
    pub fn relationships(mut self, resolver: impl RelationshipResolver + 'static) -> Self {
        self.relationships = Some(Rc::new(resolver));
        self
    }

    #[must_use]
    pub fn indexer(mut self, indexer: impl Indexer + 'static) -> Self {
        self.indexer = Some(Rc::new(indexer));
        self
    }

    #[must_use]
    pub fn functions(mut self, registry: impl FunctionRegistry + 'static) -> Self {
        self.functions = Some(Rc::new(registry));
        self
    }

    /// Override the call-depth limit; `None` means unlimited.
    #[must_use]
    pub fn max_call_depth(mut self, limit: Option<usize>) -> Self {
        self.max_call_depth = Some(limit);
        self
    }

    pub fn build(self) -> Evaluator {
        let max_depth = self
            .max_call_depth
            .unwrap_or_else(|| self.mode.max_call_depth());
        Evaluator {
            types: self.types.unwrap_or_else(|| Rc::new(StandardTypes::new())),
            comparator: self
                .comparator
                .unwrap_or_else(|| Rc::new(StandardComparator::new())),
            relationships: self
                .relationships
                .unwrap_or_else(|| Rc::new(RelationshipRecorder::new())),
            indexer: self
                .indexer
                .unwrap_or_else(|| Rc::new(StandardIndexer::new())),
            functions: self
                .functions
                .unwrap_or_else(|| Rc::new(FunctionTable::new())),
            mode: self.mode,
            call_stack: CallStack::new(max_depth),
            regex_cache: FxHashMap::default(),
        }
    }
}
