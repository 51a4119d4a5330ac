use std::cell::{Cell, RefCell};
use std::collections::VecDeque;

use crate::composition::model::LayerOptions;
use crate::expr::Expr;

struct Layer {
    id: String,
    expr: Expr,
    options: LayerOptions,
    // registration sequence, breaks order ties
    seq: u64,
}

#[derive(Default)]
struct Layers {
    entries: Vec<Layer>,
    next_seq: u64,
    version: u64,
}

impl Layers {
    fn position(&self, id: &str) -> Option<usize> {
        self.entries.iter().position(|l| l.id == id)
    }

    fn apply(&mut self, edit: Edit) -> bool {
        let changed = match edit {
            Edit::Register { id, expr, options } => {
                let options = options.sanitized();
                match self.position(&id) {
                    Some(i) => {
                        let layer = &mut self.entries[i];
                        layer.expr = expr;
                        layer.options = options;
                    }
                    None => {
                        self.next_seq += 1;
                        self.entries.push(Layer {
                            id,
                            expr,
                            options,
                            seq: self.next_seq,
                        });
                    }
                }
                true
            }
            Edit::Unregister { id } => match self.position(&id) {
                Some(i) => {
                    self.entries.remove(i);
                    true
                }
                None => false,
            },
            Edit::Update { id, expr } => match self.position(&id) {
                Some(i) => {
                    self.entries[i].expr = expr;
                    true
                }
                None => false,
            },
            Edit::Reorder { id, order } => match self.position(&id) {
                Some(i) => {
                    self.entries[i].options.order = order;
                    true
                }
                None => false,
            },
        };
        if changed {
            self.version += 1;
        }
        changed
    }

    fn sorted(&self) -> Vec<&Layer> {
        let mut sorted: Vec<&Layer> = self.entries.iter().collect();
        sorted.sort_by_key(|l| (l.options.order, l.seq));
        sorted
    }
}

enum Edit {
    Register {
        id: String,
        expr: Expr,
        options: LayerOptions,
    },
    Unregister {
        id: String,
    },
    Update {
        id: String,
        expr: Expr,
    },
    Reorder {
        id: String,
        order: i32,
    },
}

type MergeListener = Box<dyn Fn(Option<&Expr>)>;

/// Ordered stack of layer expressions merged into one output expression.
///
/// The merge is memoized on a version counter that only topology edits bump, so writing
/// uniforms never triggers a rebuild. Edits issued from a merge listener are queued and
/// applied once the merge returns.
#[derive(Default)]
pub struct CompositionGraph {
    layers: RefCell<Layers>,
    merged: RefCell<Option<(u64, Option<Expr>)>>,
    merging: Cell<bool>,
    queued: RefCell<VecDeque<Edit>>,
    listeners: RefCell<Vec<MergeListener>>,
}

impl CompositionGraph {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert or replace the layer `id`.
    pub fn register(&self, id: impl Into<String>, expr: Expr, options: LayerOptions) {
        self.edit(Edit::Register {
            id: id.into(),
            expr,
            options,
        });
    }

    /// Remove the layer `id`. Returns whether a layer was removed; edits queued during a merge
    /// report `false`.
    pub fn unregister(&self, id: &str) -> bool {
        self.edit(Edit::Unregister { id: id.to_string() })
    }

    /// Swap the expression of an existing layer, keeping its placement.
    pub fn update(&self, id: &str, expr: Expr) -> bool {
        self.edit(Edit::Update {
            id: id.to_string(),
            expr,
        })
    }

    pub fn reorder(&self, id: &str, order: i32) -> bool {
        self.edit(Edit::Reorder {
            id: id.to_string(),
            order,
        })
    }

    fn edit(&self, edit: Edit) -> bool {
        if self.merging.get() {
            self.queued.borrow_mut().push_back(edit);
            return false;
        }
        self.layers.borrow_mut().apply(edit)
    }

    /// Bumped by every edit that changed the layer stack.
    pub fn version(&self) -> u64 {
        self.layers.borrow().version
    }

    pub fn len(&self) -> usize {
        self.layers.borrow().entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.layers.borrow().entries.is_empty()
    }

    pub fn contains(&self, id: &str) -> bool {
        self.layers.borrow().position(id).is_some()
    }

    /// Layer ids bottom to top.
    pub fn ids(&self) -> Vec<String> {
        self.layers
            .borrow()
            .sorted()
            .into_iter()
            .map(|l| l.id.clone())
            .collect()
    }

    pub fn options(&self, id: &str) -> Option<LayerOptions> {
        let layers = self.layers.borrow();
        layers.position(id).map(|i| layers.entries[i].options)
    }

    /// Run `listener` after every recomputation of the merged expression.
    pub fn on_merge(&self, listener: impl Fn(Option<&Expr>) + 'static) {
        self.listeners.borrow_mut().push(Box::new(listener));
    }

    /// The whole stack folded bottom to top, or `None` when empty.
    ///
    /// Repeated reads between edits return the same node (pointer-equal). Every recomputation
    /// returns a new root, even when the folded result would otherwise reuse a layer's node.
    pub fn merged_expression(&self) -> Option<Expr> {
        let version = self.version();
        if let Some((cached, expr)) = self.merged.borrow().as_ref()
            && *cached == version
        {
            return expr.clone();
        }
        self.recompute(version)
    }

    #[tracing::instrument(skip(self))]
    fn recompute(&self, version: u64) -> Option<Expr> {
        let merged = {
            let layers = self.layers.borrow();
            let mut sorted = layers.sorted().into_iter();
            sorted.next().map(|first| {
                sorted
                    .fold(first.expr.clone(), |acc, layer| {
                        layer
                            .options
                            .blend
                            .composite(&acc, &layer.expr, layer.options.opacity)
                    })
                    .detached()
            })
        };
        *self.merged.borrow_mut() = Some((version, merged.clone()));
        tracing::debug!(
            nodes = merged.as_ref().map_or(0, Expr::node_count),
            "composition merged"
        );

        self.merging.set(true);
        {
            let listeners = self.listeners.borrow();
            for listener in listeners.iter() {
                listener(merged.as_ref());
            }
        }
        self.merging.set(false);

        loop {
            let next = self.queued.borrow_mut().pop_front();
            let Some(edit) = next else {
                break;
            };
            self.layers.borrow_mut().apply(edit);
        }
        merged
    }
}

impl std::fmt::Debug for CompositionGraph {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CompositionGraph")
            .field("layers", &self.ids())
            .field("version", &self.version())
            .finish()
    }
}

#[cfg(test)]
#[path = "../../tests/unit/composition/graph.rs"]
mod tests;
