use std::rc::Rc;

use crate::composition::CompositionGraph;
use crate::foundation::error::{WeaveError, WeaveResult};
use crate::runtime::context::RuntimeContext;

#[derive(Clone, Debug, Default)]
/// What an effect inherits from its ancestors: the runtime and the nearest composition graph.
///
/// Scopes are values passed down the effect tree. A child scope is derived with
/// [`RuntimeScope::with_runtime`] or [`RuntimeScope::with_graph`] and never affects its parent.
pub struct RuntimeScope {
    runtime: Option<Rc<RuntimeContext>>,
    graph: Option<Rc<CompositionGraph>>,
}

impl RuntimeScope {
    /// Scope with nothing provided.
    pub fn root() -> Self {
        Self::default()
    }

    pub fn with_runtime(&self, runtime: Rc<RuntimeContext>) -> Self {
        Self {
            runtime: Some(runtime),
            graph: self.graph.clone(),
        }
    }

    pub fn with_graph(&self, graph: Rc<CompositionGraph>) -> Self {
        Self {
            runtime: self.runtime.clone(),
            graph: Some(graph),
        }
    }

    pub fn runtime(&self) -> WeaveResult<Rc<RuntimeContext>> {
        self.runtime
            .clone()
            .ok_or_else(|| WeaveError::scope("no runtime in scope"))
    }

    pub fn graph(&self) -> WeaveResult<Rc<CompositionGraph>> {
        self.graph
            .clone()
            .ok_or_else(|| WeaveError::scope("no composition graph in scope"))
    }
}

#[cfg(test)]
#[path = "../../tests/unit/runtime/scope.rs"]
mod tests;
