//! Layer stacks merged into a single output expression.

pub(crate) mod graph;
pub(crate) mod model;

pub use graph::CompositionGraph;
pub use model::{BlendMode, LayerOptions};
